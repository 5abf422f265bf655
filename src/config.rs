//! Configuration file
//!
//! `vgsales.json` is optional. Every field has a default; the file is
//! validated once on load and rejected as a whole if any field is out of
//! range.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dashboard::{DashboardSettings, HiddenHitsSettings};
use crate::observability::Severity;

/// Config file looked up when no `--config` is given
pub const DEFAULT_CONFIG_PATH: &str = "./vgsales.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Sales CSV to serve
    #[serde(default = "default_data_path")]
    pub data_path: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default = "default_publisher_top_k")]
    pub publisher_top_k: usize,

    #[serde(default = "default_scatter_limit")]
    pub scatter_limit: usize,

    #[serde(default = "default_jp_min")]
    pub hidden_hits_jp_min: f64,

    #[serde(default = "default_na_max")]
    pub hidden_hits_na_max: f64,

    #[serde(default = "default_hidden_hits_limit")]
    pub hidden_hits_limit: usize,

    /// Minimum log severity: trace, info, warn, error or fatal
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_path() -> String {
    "vgsales.csv".to_string()
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8501
}
fn default_top_n() -> usize {
    10
}
fn default_publisher_top_k() -> usize {
    10
}
fn default_hidden_hits_limit() -> usize {
    10
}
fn default_scatter_limit() -> usize {
    500
}
fn default_jp_min() -> f64 {
    1.0
}
fn default_na_max() -> f64 {
    0.5
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            top_n: default_top_n(),
            publisher_top_k: default_publisher_top_k(),
            scatter_limit: default_scatter_limit(),
            hidden_hits_jp_min: default_jp_min(),
            hidden_hits_na_max: default_na_max(),
            hidden_hits_limit: default_hidden_hits_limit(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Loads and validates the file at `path`; the file must exist
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Loads `path` if given, otherwise the default path if it exists,
    /// otherwise all defaults
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.data_path.trim().is_empty() {
            return Err(ConfigError::Invalid("data_path must not be empty".into()));
        }

        for (name, value) in [
            ("top_n", self.top_n),
            ("publisher_top_k", self.publisher_top_k),
            ("scatter_limit", self.scatter_limit),
            ("hidden_hits_limit", self.hidden_hits_limit),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{} must be > 0", name)));
            }
        }

        for (name, value) in [
            ("hidden_hits_jp_min", self.hidden_hits_jp_min),
            ("hidden_hits_na_max", self.hidden_hits_na_max),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a finite number >= 0, got {}",
                    name, value
                )));
            }
        }

        self.log_severity()?;

        Ok(())
    }

    pub fn log_severity(&self) -> ConfigResult<Severity> {
        self.log_level
            .parse::<Severity>()
            .map_err(ConfigError::Invalid)
    }

    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_path)
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Panel sizes derived from this config
    pub fn settings(&self) -> DashboardSettings {
        DashboardSettings {
            top_n: self.top_n,
            publisher_top_k: self.publisher_top_k,
            scatter_limit: self.scatter_limit,
            hidden_hits: HiddenHitsSettings {
                jp_min: self.hidden_hits_jp_min,
                na_max: self.hidden_hits_na_max,
                limit: self.hidden_hits_limit,
            },
        }
    }
}
