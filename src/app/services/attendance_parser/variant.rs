//! Attendance export layouts
//!
//! The three layouts share the block structure and column positions; they
//! differ only in which worksheet they read, whether punch anomalies are
//! their own statuses, and how a block's period label is derived.

use crate::constants::{MONTHLY_SHEET_NAME, WEEKLY_SHEET_NAME};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Layout of an attendance export
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceVariant {
    /// Monthly rules, reading whichever attendance sheet exists
    #[default]
    Plain,
    /// Month-level export
    Monthly,
    /// Week-level export with punch anomaly statuses
    Weekly,
}

impl AttendanceVariant {
    /// Worksheets tried in order; the first one present is parsed
    pub fn required_sheets(&self) -> &'static [&'static str] {
        match self {
            AttendanceVariant::Plain => &[MONTHLY_SHEET_NAME, WEEKLY_SHEET_NAME],
            AttendanceVariant::Monthly => &[MONTHLY_SHEET_NAME],
            AttendanceVariant::Weekly => &[WEEKLY_SHEET_NAME, MONTHLY_SHEET_NAME],
        }
    }

    /// Whether `No Punch In` / `No Punch Out` are classified separately
    pub fn tracks_punch_anomalies(&self) -> bool {
        matches!(self, AttendanceVariant::Weekly)
    }

    /// Whether the period label is a date range rather than a month
    pub fn uses_date_range_label(&self) -> bool {
        matches!(self, AttendanceVariant::Weekly)
    }
}

impl fmt::Display for AttendanceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttendanceVariant::Plain => "plain",
            AttendanceVariant::Monthly => "monthly",
            AttendanceVariant::Weekly => "weekly",
        };
        f.write_str(name)
    }
}
