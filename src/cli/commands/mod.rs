//! Command implementations for the HR sheet processor CLI
//!
//! Each subcommand lives in its own module; the helpers both of them share
//! (logging, configuration, discovery, the concurrent parse loop) are in
//! [`shared`].

pub mod attendance;
pub mod pms;
pub mod shared;

pub use shared::RunStats;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Main command runner
///
/// Dispatches to the subcommand handler:
/// - `attendance`: attendance exports to per-employee counts and a summary
/// - `pms`: appraisal workbooks to KRA/Goal score reports
pub async fn run(args: Args) -> Result<RunStats> {
    match args.command {
        Some(Commands::Attendance(attendance_args)) => {
            attendance::run_attendance(attendance_args).await
        }
        Some(Commands::Pms(pms_args)) => pms::run_pms(pms_args).await,
        None => Err(Error::configuration("No subcommand given")),
    }
}
