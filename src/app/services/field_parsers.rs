//! Field parsing utilities for spreadsheet cells
//!
//! Every cell arrives as text, so these helpers read ids, dates and scores
//! defensively: anything unreadable yields `None` or zero instead of an error.

use crate::config::ProcessorConfig;
use crate::constants::{EMPLOYEE_HEADER_SEPARATOR, EXCEL_SERIAL_RANGE};
use chrono::NaiveDate;
use std::fmt::Write;
use std::path::Path;

/// Split a combined `"left - right"` header cell.
///
/// Only the first separator splits; without a separator the whole trimmed
/// cell is the left part and the right part is empty.
pub fn split_employee_header(cell: &str) -> (String, String) {
    match cell.trim().split_once(EMPLOYEE_HEADER_SEPARATOR) {
        Some((left, right)) => (left.trim().to_string(), right.trim().to_string()),
        None => (cell.trim().to_string(), String::new()),
    }
}

/// Parse a date cell using the configured formats.
///
/// Falls back to a leading ISO date followed by a time component, then to an
/// Excel serial day number when enabled.
pub fn parse_cell_date(value: &str, config: &ProcessorConfig) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(date) = config
        .date_formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
    {
        return Some(date);
    }

    if let Some(date) = parse_leading_iso_date(value) {
        return Some(date);
    }

    if config.accept_serial_dates {
        return parse_excel_serial(value);
    }

    None
}

/// `2024-01-05 09:00:00` or `2024-01-05T09:00:00` style values
fn parse_leading_iso_date(value: &str) -> Option<NaiveDate> {
    let (date_part, rest) = (value.get(..10)?, value.get(10..)?);
    if !(rest.starts_with(' ') || rest.starts_with('T')) {
        return None;
    }
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Excel day number counted from the 1899-12-30 epoch
fn parse_excel_serial(value: &str) -> Option<NaiveDate> {
    let serial = value.parse::<f64>().ok()?;
    if !serial.is_finite() {
        return None;
    }

    let days = serial.trunc() as i64;
    if !EXCEL_SERIAL_RANGE.contains(&days) {
        return None;
    }

    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_signed(chrono::Duration::days(days))
}

/// Render a date with a strftime format, falling back to ISO on a bad format
pub fn format_date(date: NaiveDate, format: &str) -> String {
    let mut rendered = String::new();
    if write!(rendered, "{}", date.format(format)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    rendered
}

/// Parse a score cell; anything non-numeric counts as zero
pub fn parse_score(value: &str) -> f64 {
    let cleaned = value.trim().trim_end_matches('%').trim();
    match cleaned.parse::<f64>() {
        Ok(score) if score.is_finite() => score,
        _ => 0.0,
    }
}

/// Department from an uploaded file name: the text before the first
/// underscore, or the whole file name when there is none.
pub fn department_from_file_name(file_name: &str) -> String {
    let path = Path::new(file_name);
    let base = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file_name);

    match base.split_once('_') {
        Some((department, _)) => department.trim().to_string(),
        None => base.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_employee_header() {
        assert_eq!(
            split_employee_header("E001 - Asha Rao"),
            ("E001".to_string(), "Asha Rao".to_string())
        );
        assert_eq!(
            split_employee_header("  E002 -  Ravi  "),
            ("E002".to_string(), "Ravi".to_string())
        );
        assert_eq!(
            split_employee_header("E003"),
            ("E003".to_string(), String::new())
        );
        // Only the first separator splits
        assert_eq!(
            split_employee_header("E004 - Mary - Ann"),
            ("E004".to_string(), "Mary - Ann".to_string())
        );
        // Hyphen without surrounding spaces is not a separator
        assert_eq!(
            split_employee_header("E005-Joe"),
            ("E005-Joe".to_string(), String::new())
        );
    }

    #[test]
    fn test_parse_cell_date_formats() {
        let config = ProcessorConfig::default();
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5);

        assert_eq!(parse_cell_date("2024-01-05", &config), expected);
        assert_eq!(parse_cell_date("05-Jan-2024", &config), expected);
        assert_eq!(parse_cell_date("05-Jan-24", &config), expected);
        assert_eq!(parse_cell_date("01/05/2024", &config), expected);
        assert_eq!(parse_cell_date("05-01-2024", &config), expected);
        assert_eq!(parse_cell_date("2024/01/05", &config), expected);
        assert_eq!(parse_cell_date("05 Jan 2024", &config), expected);
        assert_eq!(parse_cell_date("2024-01-05 09:30:00", &config), expected);
        assert_eq!(parse_cell_date("2024-01-05T00:00:00", &config), expected);
    }

    #[test]
    fn test_parse_cell_date_serial() {
        let config = ProcessorConfig::default();
        assert_eq!(
            parse_cell_date("45296", &config),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(
            parse_cell_date("45296.0", &config),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );

        let strict = ProcessorConfig::default().without_serial_dates();
        assert_eq!(parse_cell_date("45296", &strict), None);
    }

    #[test]
    fn test_parse_cell_date_rejects_noise() {
        let config = ProcessorConfig::default();
        assert_eq!(parse_cell_date("", &config), None);
        assert_eq!(parse_cell_date("Date", &config), None);
        assert_eq!(parse_cell_date("E001 - Asha", &config), None);
        assert_eq!(parse_cell_date("7", &config), None);
        assert_eq!(parse_cell_date("2024-13-45", &config), None);
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date(date, "%-m/%-d/%Y"), "1/5/2024");
        assert_eq!(format_date(date, "%b-%y"), "Jan-24");
        // Invalid specifier falls back to ISO
        assert_eq!(format_date(date, "%Q"), "2024-01-05");
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("8"), 8.0);
        assert_eq!(parse_score(" 7.5 "), 7.5);
        assert_eq!(parse_score("9%"), 9.0);
        assert_eq!(parse_score(""), 0.0);
        assert_eq!(parse_score("N/A"), 0.0);
        assert_eq!(parse_score("NaN"), 0.0);
    }

    #[test]
    fn test_department_from_file_name() {
        assert_eq!(department_from_file_name("Sales_Jan_2024.xlsx"), "Sales");
        assert_eq!(
            department_from_file_name("/uploads/Finance_weekly.xlsx"),
            "Finance"
        );
        assert_eq!(department_from_file_name("Operations.xlsx"), "Operations.xlsx");
        assert_eq!(department_from_file_name("/uploads/Payroll.xls"), "Payroll.xls");
        assert_eq!(department_from_file_name(""), "");
    }
}
