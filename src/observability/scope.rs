//! ObservationScope for automatic begin/complete logging
//!
//! - Logs `{name}_BEGIN` on creation
//! - Logs `{name}_COMPLETE` with `elapsed_ms` when completed
//! - Logs `{name}_FAILED` on explicit failure
//! - Logs `{name}_INCOMPLETE` if dropped without either

use std::cell::Cell;
use std::time::Instant;

use super::logger::{Logger, Severity};

pub struct ObservationScope<'a> {
    name: &'a str,
    completed: Cell<bool>,
    fields: Vec<(&'a str, String)>,
    timer: Timer,
}

impl<'a> ObservationScope<'a> {
    pub fn new(name: &'a str) -> Self {
        Self::with_fields(name, &[])
    }

    /// Fields given here are repeated on the completion line
    pub fn with_fields(name: &'a str, fields: &[(&'a str, &str)]) -> Self {
        Logger::info(&format!("{}_BEGIN", name), fields);

        Self {
            name,
            completed: Cell::new(false),
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
            timer: Timer::new(),
        }
    }

    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    pub fn complete_with_fields(self, extra_fields: &[(&str, &str)]) {
        self.completed.set(true);
        let elapsed = self.timer.elapsed_ms();

        let mut all_fields: Vec<(&str, &str)> = self
            .fields
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .collect();
        all_fields.extend(extra_fields.iter().copied());
        all_fields.push(("elapsed_ms", elapsed.as_str()));

        Logger::info(&format!("{}_COMPLETE", self.name), &all_fields);
    }

    pub fn fail(self, reason: &str) {
        self.finish_failed(Severity::Error, reason);
    }

    pub fn fail_fatal(self, reason: &str) {
        self.finish_failed(Severity::Fatal, reason);
    }

    fn finish_failed(self, severity: Severity, reason: &str) {
        self.completed.set(true);
        let mut all_fields: Vec<(&str, &str)> = self
            .fields
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .collect();
        all_fields.push(("reason", reason));
        Logger::log(severity, &format!("{}_FAILED", self.name), &all_fields);
    }

    pub fn is_completed(&self) -> bool {
        self.completed.get()
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.completed.get() {
            Logger::warn(
                &format!("{}_INCOMPLETE", self.name),
                &[("reason", "scope dropped without completion")],
            );
        }
    }
}

/// Wall-clock timer for elapsed-time fields
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> String {
        self.start.elapsed().as_millis().to_string()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
