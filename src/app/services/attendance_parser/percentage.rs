//! Summary attendance percentage
//!
//! The percentage is not derived from the records' counts. For each employee
//! the raw grid is walked again from the first block row, the employee's block
//! is located by its `"ID - Name"` header, and its dated rows are recounted
//! with [`classify_for_percentage`]. The summary figure is the mean of the
//! per-employee ratios.

use super::classification::{PresenceMark, PunchFields, classify_for_percentage};
use crate::app::models::Row;
use crate::app::models::attendance::AttendanceRecord;
use crate::app::services::field_parsers::{parse_cell_date, split_employee_header};
use crate::config::ProcessorConfig;
use crate::constants::ATTENDANCE_HEADER_ROW_OFFSET;
use crate::constants::columns::COL_DATE;
use tracing::debug;

/// Present/absent tally of one employee from the re-scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresenceTally {
    pub present: usize,
    pub absent: usize,
}

impl PresenceTally {
    /// `present / (present + absent) * 100`, `None` without any marked day
    pub fn percentage(&self) -> Option<f64> {
        let denominator = self.present + self.absent;
        (denominator > 0).then(|| self.present as f64 / denominator as f64 * 100.0)
    }
}

/// Grid index of the first non-blank row whose first cell splits into this id and name
fn locate_header(rows: &[Row], employee_id: &str, employee_name: &str) -> Option<usize> {
    rows.iter()
        .enumerate()
        .skip(ATTENDANCE_HEADER_ROW_OFFSET)
        .find(|(_, row)| {
            if row.is_blank() {
                return false;
            }
            let (id, name) = split_employee_header(row.text(COL_DATE));
            id == employee_id && name == employee_name
        })
        .map(|(index, _)| index)
}

/// Recount one employee's block straight from the grid
pub fn tally_employee(
    rows: &[Row],
    employee_id: &str,
    employee_name: &str,
    config: &ProcessorConfig,
) -> Option<PresenceTally> {
    let header = locate_header(rows, employee_id, employee_name)?;

    let tally = rows[header + 1..]
        .iter()
        .take_while(|row| !row.is_blank())
        .filter(|row| parse_cell_date(row.text(COL_DATE), config).is_some())
        .filter_map(|row| classify_for_percentage(&PunchFields::from_row(row)))
        .fold(PresenceTally::default(), |mut tally, mark| {
            match mark {
                PresenceMark::Present => tally.present += 1,
                PresenceMark::Absent => tally.absent += 1,
            }
            tally
        });

    Some(tally)
}

/// Mean per-employee attendance percentage, skipping employees with no
/// present or absent day. Zero when nobody qualifies.
pub fn attendance_percentage_from_grid(
    rows: &[Row],
    employees: &[AttendanceRecord],
    config: &ProcessorConfig,
) -> f64 {
    let percentages: Vec<f64> = employees
        .iter()
        .filter_map(|employee| {
            let tally = tally_employee(rows, &employee.employee_id, &employee.employee_name, config);
            if tally.is_none() {
                debug!("No block found for '{}' during re-scan", employee.header_text());
            }
            tally?.percentage()
        })
        .collect();

    if percentages.is_empty() {
        0.0
    } else {
        percentages.iter().sum::<f64>() / percentages.len() as f64
    }
}
