//! Query subsystem: the filter-and-aggregate pipeline
//!
//! Every operation is a pure function from (table, parameters) to a new
//! derived table. Nothing here mutates its input or can fail.
//!
//! # Operations
//!
//! - `filter` / `apply` / `filter_by`: row selection
//! - `top_n`: stable descending rank on one metric
//! - `aggregate_sum`: grouped sum over ordered group keys
//! - `top_k_with_others`: top-k groups plus a remainder bucket
//! - `hidden_hits`: metric predicates composed with `top_n`

mod aggregate;
mod filters;
mod result;
mod share;
mod sorter;

pub use aggregate::{aggregate_sum, metric_total};
pub use filters::{apply, filter, filter_by, hidden_hits, CompareOp, FilterSpec, Predicate, PredicateFilter};
pub use result::{GroupRow, GroupedTable};
pub use share::top_k_with_others;
pub use sorter::{top_n, ResultSorter};
