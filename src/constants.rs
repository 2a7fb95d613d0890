//! Application constants for the HR sheet processor
//!
//! Every literal of the source spreadsheet layouts lives here. Column meaning
//! is positional in both formats, so these indices are part of the input
//! contract and must not be inferred from header text.

// =============================================================================
// Attendance Export Layout
// =============================================================================

/// Worksheet holding the monthly attendance export
pub const MONTHLY_SHEET_NAME: &str = "MonthlyAttenReportNew";

/// Worksheet holding the weekly attendance export
pub const WEEKLY_SHEET_NAME: &str = "WeeklyAttenReportNew";

/// Number of title rows above the first employee block
pub const ATTENDANCE_HEADER_ROW_OFFSET: usize = 3;

/// Separator between id and name in an employee header cell
pub const EMPLOYEE_HEADER_SEPARATOR: &str = " - ";

/// Positional columns of an attendance data row
pub mod columns {
    /// Calendar date of the row
    pub const COL_DATE: usize = 0;

    /// First punch of the day
    pub const COL_PUNCH_IN: usize = 5;

    /// Last punch of the day
    pub const COL_PUNCH_OUT: usize = 6;

    /// Leave or absence code
    pub const COL_LEAVE_CODE: usize = 12;

    /// Item name (and combined comments) of a PMS row
    pub const COL_ITEM_NAME: usize = 0;

    /// Score cell of a PMS KRA/Goal row
    pub const COL_SCORE: usize = 2;
}

/// Fixed attendance status codes
pub mod status_codes {
    /// Present
    pub const PRESENT: &str = "P";

    /// Absent
    pub const ABSENT: &str = "ABS";

    /// Punch-out recorded without a punch-in (weekly layout only)
    pub const NO_PUNCH_IN: &str = "No Punch In";

    /// Punch-in recorded without a punch-out (weekly layout only)
    pub const NO_PUNCH_OUT: &str = "No Punch Out";

    /// Codes that are never reported as leave types
    pub const NON_LEAVE_CODES: &[&str] = &[PRESENT, ABSENT, NO_PUNCH_IN, NO_PUNCH_OUT];
}

/// Repeated column-title row that occasionally appears between blocks
pub mod stray_header {
    /// Id parsed from the repeated title row
    pub const ID: &str = "Date";

    /// Name parsed from the repeated title row
    pub const NAME: &str = "Day";
}

// =============================================================================
// PMS Appraisal Workbook Layout
// =============================================================================

/// Row of the first sheet carrying the appraisal title
pub const PMS_TITLE_ROW: usize = 1;

/// Row carrying the `Name - Code` employee header on every sheet
pub const PMS_EMPLOYEE_ROW: usize = 3;

/// First row scanned for KRA/Goal entries
pub const PMS_FIRST_ITEM_ROW: usize = 5;

/// Maximum score of a single KRA or Goal
pub const MAX_ITEM_SCORE: f64 = 10.0;

/// Primary quarter pattern, e.g. `Appraisal Form Report - Q1_AprJun_2024`
pub const QUARTER_PATTERN: &str = r"Appraisal Form Report - ([^_\s]+)_([^_\s]+)_(\d{4})";

/// Fallback quarter pattern used when the primary one does not match
pub const QUARTER_FALLBACK_PATTERN: &str = r"Report - (.*?) for the period";

/// Label of the self-review comment
pub const SELF_MARKER: &str = "Self";

/// Label of the first-level manager comment
pub const PMS1_MARKER: &str = "pms_1";

/// Label of the HR comment
pub const HR_MARKER: &str = "HR";

/// Bucket header row that groups free-form goals
pub const DEFAULT_BUCKET: &str = "default";

/// Closing row of an item list
pub const TOTAL_ROW: &str = "total";

/// Canonical KRA phrases, compared case-insensitively.
///
/// Anything not on this list is a Goal.
pub const KRA_LIST: [&str; 8] = [
    "quality of work",
    "productivity",
    "job knowledge",
    "communication skills",
    "teamwork and collaboration",
    "initiative and ownership",
    "attendance and punctuality",
    "adherence to company policies",
];

// =============================================================================
// Defaults
// =============================================================================

/// Date formats tried in order for attendance date cells.
///
/// Two-digit-year formats come first: `%Y` would happily read `24` as year 24.
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d-%b-%y",
    "%d-%b-%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%Y/%m/%d",
    "%d %b %Y",
];

/// `en-US` short date, as rendered by the browser the exports were built for
pub const DEFAULT_DISPLAY_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Monthly period label, e.g. `Jan-24`
pub const DEFAULT_MONTH_LABEL_FORMAT: &str = "%b-%y";

/// Plausible range of Excel serial day numbers (1954-10-03 .. 2119-01-12)
pub const EXCEL_SERIAL_RANGE: std::ops::RangeInclusive<i64> = 20_000..=80_000;

/// Spreadsheet extensions picked up when a directory is given to the CLI
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// Config file name inside the user config directory
pub const CONFIG_DIR_NAME: &str = "hr-sheet-processor";
pub const CONFIG_FILE_NAME: &str = "config.json";
