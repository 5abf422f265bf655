//! Observability subsystem
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed lifecycle events
//! - Process-wide counters
//!
//! Observability is read-only: nothing here influences query results.
//!
//! # Usage
//!
//! ```
//! use vgsales::observability::{self, Event, Logger, ObservationScope};
//!
//! Logger::info("QUERY_COMPLETE", &[("rows", "42")]);
//! observability::metrics().increment_queries_executed();
//!
//! let scope = ObservationScope::new("DATASET_LOAD");
//! scope.complete();
//! observability::log_event(Event::ConfigLoaded);
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
pub use scope::{ObservationScope, Timer};

use lazy_static::lazy_static;

lazy_static! {
    static ref METRICS: MetricsRegistry = MetricsRegistry::new();
}

/// The process-wide counters registry
pub fn metrics() -> &'static MetricsRegistry {
    &*METRICS
}

fn severity_for(event: Event) -> Severity {
    if event.is_warning() {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(severity_for(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_for(event), event.as_str(), fields);
}
