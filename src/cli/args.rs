//! Command-line argument definitions for the HR sheet processor
//!
//! This module defines the CLI interface using the clap derive API: one
//! subcommand per spreadsheet format, sharing a common block of output,
//! configuration and verbosity flags.

use crate::app::services::attendance_parser::AttendanceVariant;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Upper bound for `--workers`
const MAX_WORKERS: usize = 100;

/// CLI arguments for the HR sheet processor
///
/// Parses attendance exports and PMS appraisal workbooks into per-employee
/// records.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hr-sheet-processor",
    version,
    about = "Parse HR attendance exports and PMS appraisal workbooks",
    long_about = "Reads the spreadsheet exports an HR team receives (attendance reports and \
                  quarterly PMS appraisal forms) and turns them into per-employee records: \
                  attendance status counts with a department summary, or KRA/Goal scores \
                  with reviewer comments."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse attendance exports into per-employee counts and a summary
    Attendance(AttendanceArgs),
    /// Parse PMS appraisal workbooks into KRA/Goal score reports
    Pms(PmsArgs),
}

/// Flags shared by every subcommand
#[derive(Debug, Clone, Parser)]
pub struct CommonArgs {
    /// Output format for results
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub format: OutputFormat,

    /// Output file
    ///
    /// If not specified, results are written to stdout.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write results to a file instead of stdout"
    )]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// JSON configuration file for date handling. If not specified, looks for
    /// <config dir>/hr-sheet-processor/config.json
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Number of files parsed concurrently
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of files parsed concurrently (default: CPU count)"
    )]
    pub workers: Option<usize>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the attendance command
#[derive(Debug, Clone, Parser)]
pub struct AttendanceArgs {
    /// Attendance workbooks or directories containing them
    #[arg(value_name = "PATHS", required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,

    /// Layout of the attendance export
    #[arg(
        long = "variant",
        value_enum,
        default_value = "plain",
        help = "Attendance export layout"
    )]
    pub variant: AttendanceVariant,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the pms command
#[derive(Debug, Clone, Parser)]
pub struct PmsArgs {
    /// Appraisal workbooks or directories containing them
    #[arg(value_name = "PATHS", required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,

    /// Department recorded on every report
    ///
    /// Defaults to the text before the first underscore of each file name.
    #[arg(
        short = 'd',
        long = "department",
        value_name = "NAME",
        help = "Department for every report (default: from the file name)"
    )]
    pub department: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl CommonArgs {
    /// Validate the shared flags for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err(Error::configuration(
                    "Number of workers must be greater than 0",
                ));
            }
            if workers > MAX_WORKERS {
                return Err(Error::configuration(format!(
                    "Number of workers cannot exceed {}",
                    MAX_WORKERS
                )));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(parent) = self.output.as_deref().and_then(|output| output.parent()) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(Error::configuration(format!(
                    "Output file directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl Default for CommonArgs {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            output: None,
            config_file: None,
            workers: None,
            verbose: 0,
            quiet: false,
        }
    }
}

/// Every input path must exist
fn validate_paths(paths: &[PathBuf]) -> Result<()> {
    if paths.is_empty() {
        return Err(Error::data_validation("At least one input path is required"));
    }

    match paths.iter().find(|path| !path.exists()) {
        Some(missing) => Err(Error::data_validation(format!(
            "Input path does not exist: {}",
            missing.display()
        ))),
        None => Ok(()),
    }
}

impl AttendanceArgs {
    /// Validate the attendance command arguments
    pub fn validate(&self) -> Result<()> {
        validate_paths(&self.paths)?;
        self.common.validate()
    }
}

impl PmsArgs {
    /// Validate the pms command arguments
    pub fn validate(&self) -> Result<()> {
        validate_paths(&self.paths)?;
        if self.department.as_deref().is_some_and(|d| d.trim().is_empty()) {
            return Err(Error::data_validation("Department cannot be empty"));
        }
        self.common.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_attendance_command() {
        let args = Args::try_parse_from([
            "hr-sheet-processor",
            "attendance",
            "Sales_Jan.xlsx",
            "Ops_Jan.xlsx",
            "--variant",
            "weekly",
            "--format",
            "json",
            "-j",
            "2",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Attendance(attendance)) => {
                assert_eq!(attendance.paths.len(), 2);
                assert_eq!(attendance.variant, AttendanceVariant::Weekly);
                assert_eq!(attendance.common.format, OutputFormat::Json);
                assert_eq!(attendance.common.workers, Some(2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_pms_command_defaults() {
        let args = Args::try_parse_from(["hr-sheet-processor", "pms", "Q1_reviews.xlsx"]).unwrap();

        match args.command {
            Some(Commands::Pms(pms)) => {
                assert_eq!(pms.department, None);
                assert_eq!(pms.common.format, OutputFormat::Human);
                assert_eq!(pms.common.workers, None);
                assert!(!pms.common.quiet);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_paths_are_required() {
        assert!(Args::try_parse_from(["hr-sheet-processor", "attendance"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["hr-sheet-processor", "pms", "a.xlsx", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_common_args_validation() {
        let mut common = CommonArgs::default();
        assert!(common.validate().is_ok());

        common.workers = Some(0);
        assert!(common.validate().is_err());

        common.workers = Some(101);
        assert!(common.validate().is_err());

        common.workers = Some(8);
        common.config_file = Some(PathBuf::from("/nonexistent/config.json"));
        assert!(common.validate().is_err());

        common.config_file = None;
        common.output = Some(PathBuf::from("/nonexistent/dir/out.json"));
        assert!(common.validate().is_err());

        common.output = Some(PathBuf::from("out.json"));
        assert!(common.validate().is_ok());
    }

    #[test]
    fn test_input_paths_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let args = AttendanceArgs {
            paths: vec![temp_dir.path().to_path_buf()],
            variant: AttendanceVariant::Plain,
            common: CommonArgs::default(),
        };
        assert!(args.validate().is_ok());

        let missing = AttendanceArgs {
            paths: vec![temp_dir.path().join("missing.xlsx")],
            ..args
        };
        assert!(missing.validate().is_err());
    }

    #[test]
    fn test_empty_department_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let args = PmsArgs {
            paths: vec![temp_dir.path().to_path_buf()],
            department: Some("  ".to_string()),
            common: CommonArgs::default(),
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut common = CommonArgs::default();
        assert_eq!(common.get_log_level(), "warn");

        common.verbose = 1;
        assert_eq!(common.get_log_level(), "info");

        common.verbose = 2;
        assert_eq!(common.get_log_level(), "debug");

        common.verbose = 3;
        assert_eq!(common.get_log_level(), "trace");

        common.quiet = true;
        assert_eq!(common.get_log_level(), "error");
        assert!(!common.show_progress());
    }
}
