//! Configuration management and validation.
//!
//! Provides the tunable parts of parsing (how date cells are read and how
//! dates are rendered back) and of the CLI runtime. The spreadsheet layout
//! itself (column indices, sheet names, KRA phrases) is fixed and lives in
//! [`crate::constants`].

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_DATE_FORMATS, DEFAULT_DISPLAY_DATE_FORMAT,
    DEFAULT_MONTH_LABEL_FORMAT,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Global configuration for sheet processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// chrono formats tried in order when reading a date cell
    pub date_formats: Vec<String>,

    /// Accept bare Excel serial day numbers in date cells
    pub accept_serial_dates: bool,

    /// Format used for drill-down dates and weekly period labels
    pub display_date_format: String,

    /// Format used for monthly period labels
    pub month_label_format: String,

    /// Number of files parsed concurrently by the CLI
    pub workers: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
            accept_serial_dates: true,
            display_date_format: DEFAULT_DISPLAY_DATE_FORMAT.to_string(),
            month_label_format: DEFAULT_MONTH_LABEL_FORMAT.to_string(),
            workers: num_cpus::get().max(1),
        }
    }
}

impl ProcessorConfig {
    /// Load configuration from a JSON file, filling missing keys with defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| {
            Error::json(format!("Invalid config file {}", path.display()), e)
        })?;

        debug!("Loaded configuration from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    /// Default config file location, `<config_dir>/hr-sheet-processor/config.json`
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Replace the accepted date formats
    pub fn with_date_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Set the drill-down date format
    pub fn with_display_date_format(mut self, format: impl Into<String>) -> Self {
        self.display_date_format = format.into();
        self
    }

    /// Set the monthly period label format
    pub fn with_month_label_format(mut self, format: impl Into<String>) -> Self {
        self.month_label_format = format.into();
        self
    }

    /// Reject Excel serial day numbers in date cells
    pub fn without_serial_dates(mut self) -> Self {
        self.accept_serial_dates = false;
        self
    }

    /// Check the configuration for values the parsers cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.date_formats.is_empty() && !self.accept_serial_dates {
            return Err(Error::configuration(
                "At least one date format (or serial dates) must be accepted",
            ));
        }

        if self.date_formats.iter().any(|f| f.trim().is_empty()) {
            return Err(Error::configuration("Date formats cannot be empty strings"));
        }

        if self.display_date_format.trim().is_empty() {
            return Err(Error::configuration("Display date format cannot be empty"));
        }

        if self.month_label_format.trim().is_empty() {
            return Err(Error::configuration("Month label format cannot be empty"));
        }

        if self.workers == 0 {
            return Err(Error::configuration(
                "Number of workers must be greater than 0",
            ));
        }

        Ok(())
    }
}
