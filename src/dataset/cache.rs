//! Process-lifetime memoization of loaded tables
//!
//! Entries are keyed by the input path as given and are never invalidated:
//! the source file is assumed static. After population the cache is only
//! read, so concurrent requests share one immutable table.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use lazy_static::lazy_static;

use crate::observability::{self, Event};

use super::errors::DataLoadResult;
use super::loader::load_uncached;
use super::table::SalesTable;

lazy_static! {
    /// Cache backing `dataset::load`
    pub static ref GLOBAL_CACHE: TableCache = TableCache::new();
}

/// Path-keyed table cache
#[derive(Debug, Default)]
pub struct TableCache {
    tables: RwLock<HashMap<PathBuf, SalesTable>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached table for `path`, loading it on first use.
    ///
    /// Failed loads are not cached.
    pub fn get_or_load(&self, path: &Path) -> DataLoadResult<SalesTable> {
        if let Some(table) = self.get(path) {
            let display = path.display().to_string();
            observability::log_event_with_fields(
                Event::DatasetCacheHit,
                &[("path", display.as_str())],
            );
            observability::metrics().increment_cache_hits();
            return Ok(table);
        }

        let table = load_uncached(path)?;

        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        // A concurrent loader may have won the race; keep the first entry.
        let entry = tables.entry(path.to_path_buf()).or_insert(table);
        Ok(entry.clone())
    }

    pub fn get(&self, path: &Path) -> Option<SalesTable> {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        tables.get(path).cloned()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.tables.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
