//! CLI argument definitions using clap
//!
//! Commands:
//! - vgsales options [--config <path>] [--data <csv>]
//! - vgsales summary [--config <path>] [--data <csv>] [--year <y|All>] [--genre <g>]... [--platform <p>]... [--region <r>]
//! - vgsales serve [--config <path>] [--data <csv>] [--port <n>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// vgsales - query engine for the video game sales dashboard
#[derive(Parser, Debug)]
#[command(name = "vgsales")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where the config and the dataset come from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to configuration file (default: ./vgsales.json if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Sales CSV, overrides `data_path` from the config
    #[arg(long)]
    pub data: Option<PathBuf>,
}

/// Widget selections for one dashboard interaction
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Release year, or "All"
    #[arg(long)]
    pub year: Option<String>,

    /// Genre to include; repeat for several. Omitted means all genres
    #[arg(long = "genre")]
    pub genres: Vec<String>,

    /// Platform to include; repeat for several. Omitted means all platforms
    #[arg(long = "platform")]
    pub platforms: Vec<String>,

    /// Region for the genre breakdown (NA, EU, JP, Other)
    #[arg(long)]
    pub region: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the filter widget option lists
    Options {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Compute every dashboard panel for one selection and print it
    Summary {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Serve the dashboard API over HTTP
    Serve {
        #[command(flatten)]
        source: SourceArgs,

        /// Port to bind, overrides the config
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
