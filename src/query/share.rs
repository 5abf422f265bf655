//! Top-k market share with an `Others` bucket

use crate::dataset::{Dimension, GroupValue, Metric, SalesTable};

use super::aggregate::aggregate_sum;
use super::result::{GroupRow, GroupedTable};

/// The `k` largest groups of `group_key` by summed `metric`, plus one
/// `Others` row carrying the sum of every remaining group.
///
/// The `Others` row is omitted when there are at most `k` groups, and when
/// the remaining groups sum to zero. Output values always sum to the input
/// total.
pub fn top_k_with_others(
    table: &SalesTable,
    group_key: Dimension,
    metric: Metric,
    k: usize,
) -> GroupedTable {
    let grouped = aggregate_sum(table, &[group_key], metric).sorted_desc();

    if grouped.len() <= k {
        return grouped;
    }

    let GroupedTable {
        key_columns,
        metric,
        mut rows,
    } = grouped;

    let rest = rows.split_off(k);
    let remainder: f64 = rest.iter().map(|r| r.value).sum();
    if remainder > 0.0 {
        rows.push(GroupRow::new(vec![GroupValue::Others], remainder));
    }

    GroupedTable::new(key_columns, metric, rows)
}
