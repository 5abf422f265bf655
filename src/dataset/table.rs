//! Immutable sales table
//!
//! A `SalesTable` is never mutated after construction. Derived views are new
//! tables; clones share the same row storage.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use super::record::SalesRecord;

/// Ordered, immutable set of sales records
#[derive(Debug, Clone, Default)]
pub struct SalesTable {
    records: Arc<Vec<SalesRecord>>,
}

impl SalesTable {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SalesRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    /// Distinct years, ascending
    pub fn years(&self) -> Vec<i32> {
        self.iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct genres, sorted
    pub fn genres(&self) -> BTreeSet<String> {
        self.iter().map(|r| r.genre.clone()).collect()
    }

    /// Distinct platforms, sorted
    pub fn platforms(&self) -> BTreeSet<String> {
        self.iter().map(|r| r.platform.clone()).collect()
    }

    /// Distinct publishers, sorted
    pub fn publishers(&self) -> BTreeSet<String> {
        self.iter().map(|r| r.publisher.clone()).collect()
    }

    /// True if both tables hold the same rows in the same order
    pub fn same_rows(&self, other: &SalesTable) -> bool {
        self.records == other.records
    }
}

impl FromIterator<SalesRecord> for SalesTable {
    fn from_iter<T: IntoIterator<Item = SalesRecord>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Serialize for SalesTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}
