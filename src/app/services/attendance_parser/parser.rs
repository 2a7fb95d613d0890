//! Core attendance parser implementation
//!
//! Locates the attendance worksheet, builds one record per employee block and
//! aggregates the upload summary.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::blocks::{EmployeeBlock, scan_blocks};
use super::classification::{PunchFields, classify_for_counts};
use super::percentage::attendance_percentage_from_grid;
use super::summary::build_summary;
use super::variant::AttendanceVariant;
use crate::Result;
use crate::app::models::attendance::{AttendanceRecord, AttendanceUpload};
use crate::app::models::{Row, Workbook};
use crate::app::services::field_parsers::{department_from_file_name, format_date, parse_cell_date};
use crate::config::ProcessorConfig;
use crate::constants::columns::COL_DATE;

/// Parser for attendance exports
///
/// Holds no per-upload state; one instance can parse any number of grids.
#[derive(Debug, Clone)]
pub struct AttendanceParser {
    variant: AttendanceVariant,
    config: ProcessorConfig,
}

impl AttendanceParser {
    /// Create a parser for a layout with the given configuration
    pub fn new(variant: AttendanceVariant, config: ProcessorConfig) -> Self {
        Self { variant, config }
    }

    /// Create a parser with default configuration
    pub fn with_defaults(variant: AttendanceVariant) -> Self {
        Self::new(variant, ProcessorConfig::default())
    }

    /// Layout this parser reads
    pub fn variant(&self) -> AttendanceVariant {
        self.variant
    }

    /// Parse the attendance worksheet of a workbook.
    ///
    /// Fails only when none of the layout's worksheets exists.
    pub fn parse_workbook(&self, workbook: &Workbook, file_name: &str) -> Result<AttendanceUpload> {
        let sheet = workbook.find_first_of(self.variant.required_sheets())?;
        info!(
            "Parsing {} attendance sheet '{}' from {}",
            self.variant, sheet.name, file_name
        );
        Ok(self.parse_grid(&sheet.rows, file_name))
    }

    /// Parse an attendance grid; row-level problems never fail the parse
    pub fn parse_grid(&self, rows: &[Row], file_name: &str) -> AttendanceUpload {
        let blocks = scan_blocks(rows, &self.config);
        debug!("Found {} employee blocks", blocks.len());

        let mut employees: Vec<AttendanceRecord> =
            blocks.iter().map(|block| self.build_record(block)).collect();
        employees.retain(|employee| !employee.is_stray_header());

        let attendance_percentage = attendance_percentage_from_grid(rows, &employees, &self.config);
        let summary = build_summary(
            department_from_file_name(file_name),
            &employees,
            attendance_percentage,
        );

        info!(
            "Parsed {} employees: {} present, {} absent, {:.2}% attendance",
            summary.employee_count,
            summary.present_total,
            summary.absent_total,
            summary.attendance_percentage
        );

        AttendanceUpload { summary, employees }
    }

    /// Classify every dated row of a block into a record
    fn build_record(&self, block: &EmployeeBlock<'_>) -> AttendanceRecord {
        let mut record = AttendanceRecord::new(&block.employee_id, &block.employee_name);
        let mut dates: Vec<NaiveDate> = Vec::new();

        for row in block.rows {
            let Some(date) = parse_cell_date(row.text(COL_DATE), &self.config) else {
                continue;
            };

            let status = classify_for_counts(self.variant, &PunchFields::from_row(row));
            record.record(&status, format_date(date, &self.config.display_date_format));
            dates.push(date);
        }

        record.period_label = self.period_label(&dates);
        if dates.is_empty() {
            warn!(
                "Employee '{}' has no dated rows",
                record.header_text()
            );
        }

        record
    }

    /// Month label of the first dated row, or the min/max range for weekly exports
    fn period_label(&self, dates: &[NaiveDate]) -> Option<String> {
        let first = dates.first()?;

        if self.variant.uses_date_range_label() {
            let min = dates.iter().min()?;
            let max = dates.iter().max()?;
            Some(format!(
                "{} - {}",
                format_date(*min, &self.config.display_date_format),
                format_date(*max, &self.config.display_date_format)
            ))
        } else {
            Some(format_date(*first, &self.config.month_label_format))
        }
    }
}
