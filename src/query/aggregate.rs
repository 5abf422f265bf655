//! Grouped summation
//!
//! One primitive serves every breakdown on the dashboard: region totals,
//! genre trends, platform and publisher totals, genre x region and
//! genre x platform tables. Output rows are ordered by group key ascending.

use std::collections::BTreeMap;

use crate::dataset::{Dimension, GroupValue, Metric, SalesTable};

use super::result::{GroupRow, GroupedTable};

/// Sums `metric` per distinct combination of `group_keys`.
///
/// Only combinations present in the input produce a row. With no group keys
/// a non-empty table yields a single grand-total row.
pub fn aggregate_sum(table: &SalesTable, group_keys: &[Dimension], metric: Metric) -> GroupedTable {
    let mut groups: BTreeMap<Vec<GroupValue>, f64> = BTreeMap::new();

    for record in table.iter() {
        let key: Vec<GroupValue> = group_keys.iter().map(|&d| record.dimension(d)).collect();
        *groups.entry(key).or_insert(0.0) += record.metric(metric);
    }

    let rows = groups
        .into_iter()
        .map(|(keys, value)| GroupRow::new(keys, value))
        .collect();

    GroupedTable::new(group_keys.to_vec(), metric, rows)
}

/// Total of `metric` over the whole table; zero when empty.
pub fn metric_total(table: &SalesTable, metric: Metric) -> f64 {
    aggregate_sum(table, &[], metric).total()
}
