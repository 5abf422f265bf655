//! Top-N ranking
//!
//! Sorting is stable and deterministic: equal metric values keep their
//! original relative order.

use std::cmp::Ordering;

use crate::dataset::{Metric, SalesRecord, SalesTable};

/// Sorts records by a sales column
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts records descending by `metric`, stable.
    pub fn sort_desc(records: &mut [SalesRecord], metric: Metric) {
        records.sort_by(|a, b| Self::compare(b.metric(metric), a.metric(metric)));
    }

    /// Total order over sales values; NaN never appears after load.
    fn compare(a: f64, b: f64) -> Ordering {
        a.partial_cmp(&b).unwrap_or(Ordering::Equal)
    }
}

/// The `n` rows with the largest `metric`, descending.
///
/// Returns fewer than `n` rows when the table is smaller.
pub fn top_n(table: &SalesTable, metric: Metric, n: usize) -> SalesTable {
    let mut records = table.records().to_vec();
    ResultSorter::sort_desc(&mut records, metric);
    records.truncate(n);
    SalesTable::new(records)
}
