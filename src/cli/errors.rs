//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::dashboard::RequestError;
use crate::dataset::DataLoadError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file missing, unreadable or invalid
    ConfigError,
    /// stdout or runtime I/O failure
    IoError,
    /// A flag value was rejected
    InvalidArgument,
    /// The dataset could not be loaded
    LoadFailed,
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "VGS_CLI_CONFIG_ERROR",
            Self::IoError => "VGS_CLI_IO_ERROR",
            Self::InvalidArgument => "VGS_CLI_INVALID_ARGUMENT",
            Self::LoadFailed => "VGS_CLI_LOAD_FAILED",
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidArgument, msg)
    }

    pub fn load_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::LoadFailed, msg)
    }

    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<DataLoadError> for CliError {
    fn from(e: DataLoadError) -> Self {
        Self::load_failed(e.to_string())
    }
}

impl From<RequestError> for CliError {
    fn from(e: RequestError) -> Self {
        Self::invalid_argument(e.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;
