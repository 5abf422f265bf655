//! vgsales - a deterministic query engine for the video game sales dashboard
//!
//! The dataset is loaded once per path and shared read-only. Every widget
//! interaction is answered by pure functions from that base table to fresh
//! derived tables.

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod http_server;
pub mod observability;
pub mod query;
