//! CLI module for vgsales
//!
//! Provides command-line interface for:
//! - options: widget option lists for a dataset
//! - summary: every dashboard panel for one selection
//! - serve: the dashboard API over HTTP

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, FilterArgs, SourceArgs};
pub use commands::{options, resolve_config, run, run_command, serve, summary};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_error_to, write_response, write_response_to};
