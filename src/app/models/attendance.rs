//! Attendance parser output structures
//!
//! One [`AttendanceRecord`] per employee block of an uploaded export, plus the
//! [`UploadSummary`] aggregated across all of them.

use crate::constants::status_codes::{ABSENT, NO_PUNCH_IN, NO_PUNCH_OUT, PRESENT};
use crate::constants::{EMPLOYEE_HEADER_SEPARATOR, stray_header};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Classified state of one dated attendance row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    /// Leave type taken from the leave-code column; the vocabulary is open
    Leave(String),
    NoPunchIn,
    NoPunchOut,
}

impl AttendanceStatus {
    /// Status code used as the key in counts and drill-downs
    pub fn code(&self) -> &str {
        match self {
            AttendanceStatus::Present => PRESENT,
            AttendanceStatus::Absent => ABSENT,
            AttendanceStatus::Leave(code) => code,
            AttendanceStatus::NoPunchIn => NO_PUNCH_IN,
            AttendanceStatus::NoPunchOut => NO_PUNCH_OUT,
        }
    }

    /// True for dynamic leave-type statuses
    pub fn is_leave(&self) -> bool {
        matches!(self, AttendanceStatus::Leave(_))
    }
}

/// Attendance of one employee within one uploaded export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub employee_id: String,
    pub employee_name: String,

    /// Month label or date range of the block, `None` without dated rows
    pub period_label: Option<String>,

    /// Occurrences per status code; `P` and `ABS` are always present
    pub attendance_counts: BTreeMap<String, usize>,

    /// Dates per status code, same keys and cardinality as the counts
    pub date_wise_details: BTreeMap<String, Vec<String>>,
}

impl AttendanceRecord {
    /// Create an empty record with zeroed `P` and `ABS` entries
    pub fn new(employee_id: impl Into<String>, employee_name: impl Into<String>) -> Self {
        let mut attendance_counts = BTreeMap::new();
        let mut date_wise_details = BTreeMap::new();
        for code in [PRESENT, ABSENT] {
            attendance_counts.insert(code.to_string(), 0);
            date_wise_details.insert(code.to_string(), Vec::new());
        }

        Self {
            employee_id: employee_id.into(),
            employee_name: employee_name.into(),
            period_label: None,
            attendance_counts,
            date_wise_details,
        }
    }

    /// Count one dated row under `status`
    pub fn record(&mut self, status: &AttendanceStatus, date_label: String) {
        let code = status.code();
        *self.attendance_counts.entry(code.to_string()).or_insert(0) += 1;
        self.date_wise_details
            .entry(code.to_string())
            .or_default()
            .push(date_label);
    }

    /// Occurrences of a status code, 0 when never observed
    pub fn count(&self, code: &str) -> usize {
        self.attendance_counts.get(code).copied().unwrap_or(0)
    }

    /// Days counted present
    pub fn present(&self) -> usize {
        self.count(PRESENT)
    }

    /// Days counted absent
    pub fn absent(&self) -> usize {
        self.count(ABSENT)
    }

    /// `P / (P + ABS) * 100` from this record's own counts.
    ///
    /// Drill-down only; the upload summary recomputes percentages from the
    /// raw sheet.
    pub fn attendance_percentage(&self) -> Option<f64> {
        let denominator = self.present() + self.absent();
        (denominator > 0).then(|| self.present() as f64 / denominator as f64 * 100.0)
    }

    /// Status codes other than `P`/`ABS`/punch anomalies, i.e. leave types
    pub fn leave_codes(&self) -> impl Iterator<Item = &str> {
        self.attendance_counts
            .keys()
            .map(String::as_str)
            .filter(|code| !crate::constants::status_codes::NON_LEAVE_CODES.contains(code))
    }

    /// The header cell text this record was parsed from
    pub fn header_text(&self) -> String {
        if self.employee_name.is_empty() {
            self.employee_id.clone()
        } else {
            format!(
                "{}{}{}",
                self.employee_id, EMPLOYEE_HEADER_SEPARATOR, self.employee_name
            )
        }
    }

    /// True for the repeated column-title row mistaken for an employee
    pub fn is_stray_header(&self) -> bool {
        self.employee_id == stray_header::ID || self.employee_name == stray_header::NAME
    }
}

/// Aggregate over every employee of one uploaded export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    /// Text of the file name before the first underscore
    pub department: String,

    /// Most frequent employee period label, first-seen wins ties
    pub period_label: Option<String>,

    pub present_total: usize,
    pub absent_total: usize,

    /// Mean of per-employee `P / (P + ABS) * 100` from the raw-sheet re-scan
    pub attendance_percentage: f64,

    /// Distinct leave codes across all employees, sorted
    pub leave_type_codes: Vec<String>,

    pub employee_count: usize,
}

/// Result of parsing one attendance export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceUpload {
    pub summary: UploadSummary,
    pub employees: Vec<AttendanceRecord>,
}

impl AttendanceUpload {
    /// Column titles of the per-employee table.
    ///
    /// Leave codes become dynamic columns; punch anomaly columns only appear
    /// when some employee has them.
    pub fn table_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = ["Employee ID", "Employee Name", "Period", PRESENT, ABSENT]
            .iter()
            .map(|c| c.to_string())
            .collect();
        columns.extend(self.summary.leave_type_codes.iter().cloned());
        columns.extend(self.punch_anomaly_codes().map(str::to_string));
        columns.push("Attendance %".to_string());
        columns
    }

    /// One display row per employee, aligned with [`Self::table_columns`]
    pub fn table_rows(&self) -> Vec<Vec<String>> {
        let anomaly_codes: Vec<&str> = self.punch_anomaly_codes().collect();

        self.employees
            .iter()
            .map(|employee| {
                let mut row = vec![
                    employee.employee_id.clone(),
                    employee.employee_name.clone(),
                    employee.period_label.clone().unwrap_or_default(),
                    employee.present().to_string(),
                    employee.absent().to_string(),
                ];
                row.extend(
                    self.summary
                        .leave_type_codes
                        .iter()
                        .map(|code| employee.count(code).to_string()),
                );
                row.extend(
                    anomaly_codes
                        .iter()
                        .map(|code| employee.count(code).to_string()),
                );
                row.push(
                    employee
                        .attendance_percentage()
                        .map(|p| format!("{p:.2}"))
                        .unwrap_or_default(),
                );
                row
            })
            .collect()
    }

    fn punch_anomaly_codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        [NO_PUNCH_IN, NO_PUNCH_OUT]
            .into_iter()
            .filter(|code| self.employees.iter().any(|e| e.count(code) > 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_present_and_absent_keys() {
        let record = AttendanceRecord::new("E001", "Asha");
        assert_eq!(record.attendance_counts.get("P"), Some(&0));
        assert_eq!(record.attendance_counts.get("ABS"), Some(&0));
        assert_eq!(record.date_wise_details.get("P"), Some(&Vec::new()));
        assert_eq!(record.date_wise_details.get("ABS"), Some(&Vec::new()));
        assert_eq!(record.attendance_percentage(), None);
    }

    #[test]
    fn test_record_keeps_counts_and_details_aligned() {
        let mut record = AttendanceRecord::new("E001", "Asha");
        record.record(&AttendanceStatus::Present, "1/1/2024".to_string());
        record.record(&AttendanceStatus::Leave("CL".to_string()), "1/2/2024".to_string());
        record.record(&AttendanceStatus::Leave("CL".to_string()), "1/3/2024".to_string());

        for (code, count) in &record.attendance_counts {
            assert_eq!(record.date_wise_details[code].len(), *count);
        }
        assert_eq!(record.count("CL"), 2);
        assert_eq!(record.leave_codes().collect::<Vec<_>>(), vec!["CL"]);
    }

    #[test]
    fn test_header_text_round_trips_separator() {
        assert_eq!(AttendanceRecord::new("E001", "Asha").header_text(), "E001 - Asha");
        assert_eq!(AttendanceRecord::new("E001", "").header_text(), "E001");
    }

    #[test]
    fn test_stray_header_detection() {
        assert!(AttendanceRecord::new("Date", "").is_stray_header());
        assert!(AttendanceRecord::new("X", "Day").is_stray_header());
        assert!(!AttendanceRecord::new("E001", "Daya").is_stray_header());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AttendanceStatus::Present.code(), "P");
        assert_eq!(AttendanceStatus::Absent.code(), "ABS");
        assert_eq!(AttendanceStatus::NoPunchIn.code(), "No Punch In");
        assert_eq!(AttendanceStatus::NoPunchOut.code(), "No Punch Out");
        assert_eq!(AttendanceStatus::Leave("SL".to_string()).code(), "SL");
        assert!(AttendanceStatus::Leave("SL".to_string()).is_leave());
    }
}
