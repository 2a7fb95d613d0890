//! Quarter label extraction

use crate::app::models::Sheet;
use crate::constants::{PMS_TITLE_ROW, QUARTER_FALLBACK_PATTERN, QUARTER_PATTERN};
use regex::Regex;
use std::sync::LazyLock;

static QUARTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(QUARTER_PATTERN).expect("valid quarter regex"));
static QUARTER_FALLBACK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(QUARTER_FALLBACK_PATTERN).expect("valid fallback quarter regex"));

/// Quarter label from a title text.
///
/// `Appraisal Form Report - Q1_AprJun_2024` yields `Q1_AprJun_2024`; otherwise
/// the text between `Report - ` and ` for the period` is used.
pub fn extract_quarter(title: &str) -> Option<String> {
    if let Some(captures) = QUARTER_RE.captures(title) {
        return Some(format!("{}_{}_{}", &captures[1], &captures[2], &captures[3]));
    }

    QUARTER_FALLBACK_RE
        .captures(title)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|quarter| !quarter.is_empty())
}

/// Quarter label from the title row of a sheet
pub fn quarter_from_sheet(sheet: &Sheet) -> Option<String> {
    let title_row = sheet.row(PMS_TITLE_ROW)?;
    let title: Vec<&str> = title_row.non_empty().map(|(_, text)| text).collect();
    extract_quarter(&title.join(" "))
}
