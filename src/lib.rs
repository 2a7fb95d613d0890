//! HR Sheet Processor Library
//!
//! Turns the spreadsheet exports an HR team receives every month into
//! structured per-employee records.
//!
//! This library provides tools for:
//! - Parsing attendance exports (plain, monthly and weekly layouts) into
//!   per-employee status counts, date drill-downs and an upload summary
//! - Parsing PMS appraisal workbooks into KRA/Goal scores with reviewer comments
//! - Reading `.xlsx`/`.xls`/`.ods` workbooks into a string-only cell grid
//!
//! Parsing is pure: every call consumes an in-memory grid and shares no state
//! with any other call.

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod attendance_parser;
        pub mod field_parsers;
        pub mod pms_parser;
    }
    pub mod adapters {
        pub mod workbook_reader;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::attendance::{AttendanceRecord, AttendanceUpload, UploadSummary};
pub use app::models::pms::{PmsEmployeeReport, ReviewItem};
pub use app::models::{Cell, Row, Sheet, Workbook};
pub use app::services::attendance_parser::{AttendanceParser, AttendanceVariant};
pub use app::services::pms_parser::PmsReportParser;
pub use config::ProcessorConfig;

/// Result type alias for the HR sheet processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sheet processing operations
///
/// Only sheet-level problems are errors. Row-level anomalies (bad dates,
/// non-numeric scores, missing separators) are absorbed by the parsers.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// None of the required worksheets exist in the workbook
    #[error(
        "Required worksheet not found: expected one of [{}], workbook contains [{}]",
        expected.join(", "),
        available.join(", ")
    )]
    MissingSheet {
        expected: Vec<String>,
        available: Vec<String>,
    },

    /// A workbook file could not be opened or decoded
    #[error("Failed to read workbook '{path}': {message}")]
    WorkbookRead { path: String, message: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failed
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create a missing sheet error
    pub fn missing_sheet<E, A>(expected: E, available: A) -> Self
    where
        E: IntoIterator,
        E::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self::MissingSheet {
            expected: expected.into_iter().map(Into::into).collect(),
            available: available.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a workbook read error
    pub fn workbook_read(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::WorkbookRead {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// True when the error is the fatal missing-worksheet condition
    pub fn is_missing_sheet(&self) -> bool {
        matches!(self, Self::MissingSheet { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}

impl From<calamine::Error> for Error {
    fn from(error: calamine::Error) -> Self {
        Self::WorkbookRead {
            path: "unknown".to_string(),
            message: error.to_string(),
        }
    }
}
