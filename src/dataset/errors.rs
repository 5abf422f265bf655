//! Dataset load error types
//!
//! Error codes:
//! - VGS_DATA_FILE_MISSING (FATAL)
//! - VGS_DATA_MISSING_COLUMN (FATAL)
//! - VGS_DATA_MALFORMED_FIELD (FATAL)
//! - VGS_DATA_MALFORMED_CSV (FATAL)
//!
//! Every load failure is fatal: the dashboard has nothing to show without
//! its source table, and a static file will not fix itself on retry.

use std::fmt;
use std::io;

/// Severity levels for dataset errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Nothing can be served until the input is fixed
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Dataset-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataLoadErrorCode {
    /// Input file cannot be opened
    VgsDataFileMissing,
    /// A required header is absent
    VgsDataMissingColumn,
    /// A numeric cell failed to parse
    VgsDataMalformedField,
    /// The CSV reader could not decode a record
    VgsDataMalformedCsv,
}

impl DataLoadErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            DataLoadErrorCode::VgsDataFileMissing => "VGS_DATA_FILE_MISSING",
            DataLoadErrorCode::VgsDataMissingColumn => "VGS_DATA_MISSING_COLUMN",
            DataLoadErrorCode::VgsDataMalformedField => "VGS_DATA_MALFORMED_FIELD",
            DataLoadErrorCode::VgsDataMalformedCsv => "VGS_DATA_MALFORMED_CSV",
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }
}

impl fmt::Display for DataLoadErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Dataset load error with full context
#[derive(Debug)]
pub struct DataLoadError {
    code: DataLoadErrorCode,
    message: String,
    /// 1-based line in the input file, if the error is tied to a row
    line: Option<usize>,
    /// Column name, if the error is tied to a column
    column: Option<String>,
    source: Option<io::Error>,
}

impl DataLoadError {
    /// Create a file missing error
    pub fn file_missing(path: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: DataLoadErrorCode::VgsDataFileMissing,
            message: format!("Cannot open dataset '{}'", path.into()),
            line: None,
            column: None,
            source: Some(source),
        }
    }

    /// Create a missing column error
    pub fn missing_column(column: impl Into<String>) -> Self {
        let column = column.into();
        Self {
            code: DataLoadErrorCode::VgsDataMissingColumn,
            message: format!("Required column '{}' not found in header", column),
            line: None,
            column: Some(column),
            source: None,
        }
    }

    /// Create a malformed field error
    pub fn malformed_field(line: usize, column: impl Into<String>, value: &str) -> Self {
        let column = column.into();
        Self {
            code: DataLoadErrorCode::VgsDataMalformedField,
            message: format!(
                "Line {}: column '{}' has unparseable value '{}'",
                line, column, value
            ),
            line: Some(line),
            column: Some(column),
            source: None,
        }
    }

    /// Create a malformed CSV error
    pub fn malformed_csv(line: Option<usize>, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let message = match line {
            Some(l) => format!("Line {}: {}", l, reason),
            None => reason,
        };
        Self {
            code: DataLoadErrorCode::VgsDataMalformedCsv,
            message,
            line,
            column: None,
            source: None,
        }
    }

    pub fn code(&self) -> DataLoadErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for DataLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)?;
        if let Some(ref source) = self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for DataLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for dataset operations
pub type DataLoadResult<T> = Result<T, DataLoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            DataLoadErrorCode::VgsDataFileMissing.code(),
            "VGS_DATA_FILE_MISSING"
        );
        assert_eq!(
            DataLoadErrorCode::VgsDataMissingColumn.code(),
            "VGS_DATA_MISSING_COLUMN"
        );
        assert_eq!(
            DataLoadErrorCode::VgsDataMalformedField.code(),
            "VGS_DATA_MALFORMED_FIELD"
        );
        assert_eq!(
            DataLoadErrorCode::VgsDataMalformedCsv.code(),
            "VGS_DATA_MALFORMED_CSV"
        );
    }

    #[test]
    fn test_all_load_errors_fatal() {
        assert!(DataLoadError::missing_column("Year").is_fatal());
        assert!(DataLoadError::malformed_field(3, "NA_Sales", "abc").is_fatal());
    }

    #[test]
    fn test_malformed_field_context() {
        let err = DataLoadError::malformed_field(7, "EU_Sales", "x1");
        assert_eq!(err.line(), Some(7));
        assert_eq!(err.column(), Some("EU_Sales"));
        let display = err.to_string();
        assert!(display.contains("VGS_DATA_MALFORMED_FIELD"));
        assert!(display.contains("Line 7"));
        assert!(display.contains("x1"));
    }

    #[test]
    fn test_file_missing_keeps_source() {
        use std::error::Error;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err = DataLoadError::file_missing("vgsales.csv", io_err);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("caused by"));
    }
}
