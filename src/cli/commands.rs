//! CLI command implementations
//!
//! Each command resolves the config, loads the dataset through the process
//! cache, then either prints one JSON response or hands the table to the
//! HTTP server.

use crate::config::Config;
use crate::dashboard::{Dashboard, DashboardFrames, DashboardOptions, DashboardRequest};
use crate::dataset::{self, SalesTable};
use crate::http_server::HttpServer;
use crate::observability::{self, Event, Logger};

use super::args::{Command, FilterArgs, SourceArgs};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    observability::log_event(Event::BootStart);
    run_command(cli.command)
}

pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Options { source } => {
            let config = resolve_config(&source)?;
            write_response(&options(&config)?)
        }
        Command::Summary { source, filter } => {
            let config = resolve_config(&source)?;
            write_response(&summary(&config, &filter)?)
        }
        Command::Serve { source, port } => {
            let mut config = resolve_config(&source)?;
            if let Some(port) = port {
                config.port = port;
            }
            serve(config)
        }
    }
}

/// Loads the config and applies source overrides
pub fn resolve_config(source: &SourceArgs) -> CliResult<Config> {
    let mut config = Config::load_or_default(source.config.as_deref())?;
    if let Some(data) = &source.data {
        config.data_path = data.to_string_lossy().into_owned();
        config.validate()?;
    }
    Logger::set_min_severity(config.log_severity()?);

    let origin = source
        .config
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "default".to_string());
    observability::log_event_with_fields(
        Event::ConfigLoaded,
        &[("config", origin.as_str()), ("data_path", config.data_path.as_str())],
    );

    Ok(config)
}

/// Widget option lists for the configured dataset
pub fn options(config: &Config) -> CliResult<DashboardOptions> {
    let table = load_table(config)?;
    Ok(DashboardOptions::from_table(&table))
}

/// Every dashboard panel for one selection
pub fn summary(config: &Config, filter: &FilterArgs) -> CliResult<DashboardFrames> {
    let table = load_table(config)?;
    let request = build_request(&table, filter)?;
    Ok(Dashboard::build(&table, &request, &config.settings()))
}

/// Runs the HTTP server until it stops
pub fn serve(config: Config) -> CliResult<()> {
    let table = load_table(&config)?;
    let server = HttpServer::new(&config, table);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::io_error(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::io_error(format!("HTTP server failed: {}", e)))
    })
}

/// Repeated flags left empty mean "everything"
fn build_request(table: &SalesTable, filter: &FilterArgs) -> CliResult<DashboardRequest> {
    let genres = (!filter.genres.is_empty()).then(|| filter.genres.clone());
    let platforms = (!filter.platforms.is_empty()).then(|| filter.platforms.clone());

    DashboardRequest::from_params(
        table,
        filter.year.as_deref(),
        genres,
        platforms,
        filter.region.as_deref(),
    )
    .map_err(|e| {
        let reason = e.to_string();
        observability::log_event_with_fields(Event::QueryRejected, &[("reason", reason.as_str())]);
        observability::metrics().increment_queries_rejected();
        CliError::from(e)
    })
}

/// Load failures are also reported on stdout in the response envelope
fn load_table(config: &Config) -> CliResult<SalesTable> {
    match dataset::load(config.data_path()) {
        Ok(table) => Ok(table),
        Err(e) => {
            write_error(e.code().code(), e.message())?;
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const CSV: &str = "\
Rank,Name,Platform,Year,Genre,Publisher,NA_Sales,EU_Sales,JP_Sales,Other_Sales,Global_Sales
1,Kart,Wii,2008,Racing,Nintendo,15.0,12.0,3.0,3.0,33.0
2,Quest,DS,2008,RPG,Square,0.2,0.1,3.5,0.1,3.9
3,Shooter,X360,2009,Shooter,Activision,8.0,4.0,0.1,1.0,13.1
";

    fn write_csv(temp_dir: &TempDir) -> PathBuf {
        let path = temp_dir.path().join("vgsales.csv");
        fs::write(&path, CSV).unwrap();
        path
    }

    fn source_for(data: PathBuf) -> SourceArgs {
        SourceArgs {
            config: None,
            data: Some(data),
        }
    }

    #[test]
    fn test_options_lists_widget_values() {
        let temp_dir = TempDir::new().unwrap();
        let config = resolve_config(&source_for(write_csv(&temp_dir))).unwrap();

        let options = options(&config).unwrap();
        assert_eq!(options.years, vec![2008, 2009]);
        assert_eq!(options.genres, vec!["RPG", "Racing", "Shooter"]);
    }

    #[test]
    fn test_summary_with_filters() {
        let temp_dir = TempDir::new().unwrap();
        let config = resolve_config(&source_for(write_csv(&temp_dir))).unwrap();
        let filter = FilterArgs {
            year: Some("2008".into()),
            genres: vec![],
            platforms: vec!["DS".into()],
            region: Some("JP".into()),
        };

        let frames = summary(&config, &filter).unwrap();
        assert_eq!(frames.record_count, 1);
        assert_eq!(frames.top_games.records()[0].name, "Quest");
        assert_eq!(frames.hidden_hits.len(), 1);
    }

    #[test]
    fn test_summary_all_year() {
        let temp_dir = TempDir::new().unwrap();
        let config = resolve_config(&source_for(write_csv(&temp_dir))).unwrap();
        let filter = FilterArgs {
            year: Some("All".into()),
            ..Default::default()
        };
        assert_eq!(summary(&config, &filter).unwrap().record_count, 3);
    }

    #[test]
    fn test_summary_rejects_bad_year() {
        let temp_dir = TempDir::new().unwrap();
        let config = resolve_config(&source_for(write_csv(&temp_dir))).unwrap();
        let filter = FilterArgs {
            year: Some("later".into()),
            ..Default::default()
        };

        let err = summary(&config, &filter).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::InvalidArgument);
    }

    #[test]
    fn test_missing_dataset_is_load_failure() {
        let temp_dir = TempDir::new().unwrap();
        let config =
            resolve_config(&source_for(temp_dir.path().join("missing.csv"))).unwrap();

        let err = options(&config).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::LoadFailed);
        assert!(err.message().contains("VGS_DATA_FILE_MISSING"));
    }

    #[test]
    fn test_config_file_and_override() {
        let temp_dir = TempDir::new().unwrap();
        let csv = write_csv(&temp_dir);
        let config_path = temp_dir.path().join("vgsales.json");
        fs::write(&config_path, r#"{"data_path": "elsewhere.csv", "top_n": 1}"#).unwrap();

        let source = SourceArgs {
            config: Some(config_path),
            data: Some(csv.clone()),
        };
        let config = resolve_config(&source).unwrap();
        assert_eq!(config.data_path(), csv.as_path());
        assert_eq!(config.top_n, 1);

        let frames = summary(&config, &FilterArgs::default()).unwrap();
        assert_eq!(frames.top_games.len(), 1);
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let source = SourceArgs {
            config: Some(temp_dir.path().join("absent.json")),
            data: None,
        };
        let err = resolve_config(&source).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::ConfigError);
    }
}
