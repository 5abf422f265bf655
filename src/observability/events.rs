//! Observable lifecycle events
//!
//! Events are explicit and typed; their string forms are stable.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    BootStart,
    ConfigLoaded,
    ServerListening,

    // Dataset
    /// Load served from the process cache
    DatasetCacheHit,
    /// Rows without a year were skipped during load
    RowsDropped,

    // Queries
    QueryExecuted,
    QueryRejected,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "VGSALES_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ServerListening => "SERVER_LISTENING",
            Event::DatasetCacheHit => "DATASET_CACHE_HIT",
            Event::RowsDropped => "DATASET_ROWS_DROPPED",
            Event::QueryExecuted => "QUERY_COMPLETE",
            Event::QueryRejected => "QUERY_REJECTED",
        }
    }

    /// Events worth a warning but not an error
    pub fn is_warning(&self) -> bool {
        matches!(self, Event::RowsDropped | Event::QueryRejected)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_upper_snake() {
        let events = [
            Event::BootStart,
            Event::ConfigLoaded,
            Event::ServerListening,
            Event::DatasetCacheHit,
            Event::RowsDropped,
            Event::QueryExecuted,
            Event::QueryRejected,
        ];
        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_warning_events() {
        assert!(Event::RowsDropped.is_warning());
        assert!(Event::QueryRejected.is_warning());
        assert!(!Event::QueryExecuted.is_warning());
    }
}
