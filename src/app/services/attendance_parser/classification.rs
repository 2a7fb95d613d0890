//! Row classification rules
//!
//! Two deliberately separate rule sets read the same three columns:
//! [`classify_for_counts`] drives the per-employee status counts, while the
//! narrower [`classify_for_percentage`] drives the summary percentage. They
//! disagree on purpose (e.g. a row with no punches and no leave code is `P`
//! for counts but is not counted for the percentage), and the published
//! figures depend on both.

use super::variant::AttendanceVariant;
use crate::app::models::Row;
use crate::app::models::attendance::AttendanceStatus;
use crate::constants::columns::{COL_LEAVE_CODE, COL_PUNCH_IN, COL_PUNCH_OUT};
use crate::constants::status_codes::ABSENT;

/// The three positional fields the rules look at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PunchFields<'a> {
    pub punch_in: &'a str,
    pub punch_out: &'a str,
    pub leave_code: &'a str,
}

impl<'a> PunchFields<'a> {
    /// Read columns 5, 6 and 12 of a data row
    pub fn from_row(row: &'a Row) -> Self {
        Self {
            punch_in: row.text(COL_PUNCH_IN),
            punch_out: row.text(COL_PUNCH_OUT),
            leave_code: row.text(COL_LEAVE_CODE),
        }
    }

    fn no_punches(&self) -> bool {
        self.punch_in.is_empty() && self.punch_out.is_empty()
    }
}

/// Status of a dated row for the attendance counts.
///
/// Without punches, `ABS` is absent and any other code is that leave type.
/// Everything else is present, however incomplete the punches are, except
/// that the weekly layout first splits out one-sided punches.
pub fn classify_for_counts(variant: AttendanceVariant, fields: &PunchFields<'_>) -> AttendanceStatus {
    if variant.tracks_punch_anomalies() {
        match (fields.punch_in.is_empty(), fields.punch_out.is_empty()) {
            (true, false) => return AttendanceStatus::NoPunchIn,
            (false, true) => return AttendanceStatus::NoPunchOut,
            _ => {}
        }
    }

    if fields.no_punches() && fields.leave_code == ABSENT {
        AttendanceStatus::Absent
    } else if fields.no_punches() && !fields.leave_code.is_empty() {
        AttendanceStatus::Leave(fields.leave_code.to_string())
    } else {
        AttendanceStatus::Present
    }
}

/// Presence as seen by the percentage re-scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceMark {
    Present,
    Absent,
}

/// Two-state rule behind the summary percentage.
///
/// Any punch makes the day present; no punches with an `ABS` code makes it
/// absent. Leave codes and the layout variant are ignored, so such rows are
/// left out of the ratio entirely.
pub fn classify_for_percentage(fields: &PunchFields<'_>) -> Option<PresenceMark> {
    if !fields.no_punches() {
        Some(PresenceMark::Present)
    } else if fields.leave_code == ABSENT {
        Some(PresenceMark::Absent)
    } else {
        None
    }
}
