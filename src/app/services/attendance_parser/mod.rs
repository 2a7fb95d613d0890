//! Attendance export parser
//!
//! Turns the `MonthlyAttenReportNew` / `WeeklyAttenReportNew` worksheet of an
//! attendance export into one [`AttendanceRecord`](crate::AttendanceRecord)
//! per employee and an [`UploadSummary`](crate::UploadSummary) for the file.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`parser`] - Orchestration: sheet lookup, record building, summary
//! - [`variant`] - Plain, monthly and weekly layouts and their differences
//! - [`blocks`] - Splitting the grid into per-employee row blocks
//! - [`classification`] - Row status rules for counts and for percentages
//! - [`percentage`] - Independent raw-sheet re-scan behind the summary percentage
//! - [`summary`] - Period-label vote, leave-code union and totals
//!
//! ## Usage
//!
//! ```rust
//! use hr_sheet_processor::{AttendanceParser, AttendanceVariant, Row, Sheet, Workbook};
//!
//! # fn example() -> hr_sheet_processor::Result<()> {
//! let workbook = Workbook::new(vec![Sheet::new("MonthlyAttenReportNew", Vec::<Row>::new())]);
//! let parser = AttendanceParser::with_defaults(AttendanceVariant::Monthly);
//! let upload = parser.parse_workbook(&workbook, "Sales_Jan.xlsx")?;
//!
//! println!("{} employees, {:.1}% attendance",
//!          upload.summary.employee_count,
//!          upload.summary.attendance_percentage);
//! # Ok(())
//! # }
//! ```

pub mod blocks;
pub mod classification;
pub mod parser;
pub mod percentage;
pub mod summary;
pub mod variant;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use blocks::EmployeeBlock;
pub use classification::{PresenceMark, PunchFields, classify_for_counts, classify_for_percentage};
pub use parser::AttendanceParser;
pub use variant::AttendanceVariant;
