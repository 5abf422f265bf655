//! Derived table types produced by aggregation

use std::cmp::Ordering;

use serde::Serialize;

use crate::dataset::{Dimension, GroupValue, Metric};

/// One group of an aggregated table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    /// One cell per key column, in key column order
    pub keys: Vec<GroupValue>,
    pub value: f64,
    /// Set only on the synthetic remainder row, never on a real group
    /// whose name happens to be `Others`
    pub others: bool,
}

impl GroupRow {
    pub fn new(keys: Vec<GroupValue>, value: f64) -> Self {
        let others = keys.iter().any(GroupValue::is_others);
        Self {
            keys,
            value,
            others,
        }
    }

    /// The first key cell, for single-key tables
    pub fn key(&self) -> Option<&GroupValue> {
        self.keys.first()
    }
}

/// Aggregated table: group keys plus one summed metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedTable {
    pub key_columns: Vec<Dimension>,
    pub metric: Metric,
    pub rows: Vec<GroupRow>,
}

impl GroupedTable {
    pub fn new(key_columns: Vec<Dimension>, metric: Metric, rows: Vec<GroupRow>) -> Self {
        Self {
            key_columns,
            metric,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupRow> {
        self.rows.iter()
    }

    /// Sum of all row values
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|r| r.value).sum()
    }

    /// Value of the group with exactly these keys
    pub fn value_of(&self, keys: &[GroupValue]) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.keys.as_slice() == keys)
            .map(|r| r.value)
    }

    /// Rows reordered by value, largest first; stable among equal values.
    pub fn sorted_desc(mut self) -> Self {
        self.rows.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(Ordering::Equal)
        });
        self
    }
}
