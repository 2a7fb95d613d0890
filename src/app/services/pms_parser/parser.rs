//! Core PMS report parser implementation

use super::quarter::quarter_from_sheet;
use super::state::ParserState;
use crate::app::models::pms::{PmsEmployeeReport, ReportHeader};
use crate::app::models::{Sheet, Workbook};
use crate::app::services::field_parsers::split_employee_header;
use crate::constants::PMS_EMPLOYEE_ROW;
use crate::{Error, Result};
use tracing::{debug, info, warn};

/// Parser for PMS appraisal workbooks
#[derive(Debug, Clone, Copy, Default)]
pub struct PmsReportParser;

impl PmsReportParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse every worksheet of an appraisal workbook.
    ///
    /// The quarter comes from the first sheet and is shared by all reports.
    /// Sheets without an employee header are skipped; a workbook without any
    /// sheet is an error.
    pub fn parse_workbook(&self, workbook: &Workbook, department: &str) -> Result<Vec<PmsEmployeeReport>> {
        let first_sheet = workbook
            .first_sheet()
            .ok_or_else(|| Error::missing_sheet(["any worksheet"], Vec::<String>::new()))?;

        let quarter = quarter_from_sheet(first_sheet);
        match &quarter {
            Some(quarter) => debug!("Appraisal quarter: {}", quarter),
            None => warn!("No quarter label found on sheet '{}'", first_sheet.name),
        }

        let reports: Vec<PmsEmployeeReport> = workbook
            .sheets()
            .iter()
            .filter_map(|sheet| self.parse_sheet(sheet, department, quarter.as_deref()))
            .collect();

        info!(
            "Parsed {} appraisal reports from {} sheets",
            reports.len(),
            workbook.sheets().len()
        );
        Ok(reports)
    }

    /// Parse one worksheet, `None` when it has no employee header
    pub fn parse_sheet(&self, sheet: &Sheet, department: &str, quarter: Option<&str>) -> Option<PmsEmployeeReport> {
        let header_cell = sheet
            .row(PMS_EMPLOYEE_ROW)
            .and_then(|row| row.non_empty().next())
            .map(|(_, text)| text);

        let Some(header_cell) = header_cell else {
            warn!("Sheet '{}' has no employee header, skipping", sheet.name);
            return None;
        };

        let (employee_name, employee_code) = split_employee_header(header_cell);
        let (kra_details, goal_details) = ParserState::scan(&sheet.rows).into_details();

        let header = ReportHeader {
            employee_name,
            employee_code,
            department: department.to_string(),
            quarter: quarter.map(str::to_string),
            sheet_name: sheet.name.clone(),
        };
        let report = PmsEmployeeReport::new(header, kra_details, goal_details);

        debug!(
            "Sheet '{}': {} KRAs, {} goals, {:.2}%",
            sheet.name,
            report.kra_details.len(),
            report.goal_details.len(),
            report.percentage
        );
        Some(report)
    }
}
