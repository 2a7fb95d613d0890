//! Upload summary aggregation

use crate::app::models::attendance::{AttendanceRecord, UploadSummary};
use std::collections::BTreeSet;

/// Most frequent period label among employees.
///
/// Counts are kept in first-seen order and only a strictly higher count
/// replaces the leader, so ties go to the label observed first. Employees
/// without a label do not vote.
pub fn plurality_period_label(employees: &[AttendanceRecord]) -> Option<String> {
    let mut tallies: Vec<(&str, usize)> = Vec::new();

    for label in employees.iter().filter_map(|e| e.period_label.as_deref()) {
        match tallies.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => tallies.push((label, 1)),
        }
    }

    tallies
        .into_iter()
        .fold(None::<(&str, usize)>, |best, candidate| match best {
            Some((_, best_count)) if best_count >= candidate.1 => best,
            _ => Some(candidate),
        })
        .map(|(label, _)| label.to_string())
}

/// Every leave code seen on any employee, sorted
pub fn collect_leave_type_codes(employees: &[AttendanceRecord]) -> Vec<String> {
    employees
        .iter()
        .flat_map(AttendanceRecord::leave_codes)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Assemble the summary; the percentage comes from the independent re-scan
pub fn build_summary(
    department: String,
    employees: &[AttendanceRecord],
    attendance_percentage: f64,
) -> UploadSummary {
    UploadSummary {
        department,
        period_label: plurality_period_label(employees),
        present_total: employees.iter().map(AttendanceRecord::present).sum(),
        absent_total: employees.iter().map(AttendanceRecord::absent).sum(),
        attendance_percentage,
        leave_type_codes: collect_leave_type_codes(employees),
        employee_count: employees.len(),
    }
}
