//! Sales dataset subsystem
//!
//! Loads the static sales CSV once per process and exposes it as an
//! immutable `SalesTable`.
//!
//! # Load rules
//!
//! - All ten required columns must be present in the header
//! - Rows with a missing year are dropped (the only cleaning step)
//! - Any other unparseable numeric cell fails the load with `DataLoadError`
//! - Results are memoized by path for the process lifetime

mod cache;
mod errors;
mod loader;
mod record;
mod table;

pub use cache::{TableCache, GLOBAL_CACHE};
pub use errors::{DataLoadError, DataLoadErrorCode, DataLoadResult, Severity};
pub use loader::{load, load_uncached, read_table, LoadReport, REQUIRED_COLUMNS};
pub use record::{Dimension, GroupValue, Metric, Region, SalesRecord};
pub use table::SalesTable;
