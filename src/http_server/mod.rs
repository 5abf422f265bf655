//! # vgsales HTTP Server Module
//!
//! Serves the dashboard queries over HTTP for a browser front end. The base
//! table is loaded once before the server starts and shared read-only by all
//! handlers.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/options` - Filter widget option lists
//! - `/api/dashboard` - Every panel for one selection
//! - `/api/top` - Top N rows by any sales column
//! - `/observability/metrics` - Counters

pub mod dashboard_routes;
pub mod observability_routes;
pub mod server;

pub use dashboard_routes::{dashboard_routes, DashboardState, ErrorResponse};
pub use observability_routes::{health_routes, observability_routes, HealthResponse};
pub use server::HttpServer;
