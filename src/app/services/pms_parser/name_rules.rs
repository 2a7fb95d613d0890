//! Item-name validation and KRA/Goal classification

use crate::constants::{DEFAULT_BUCKET, HR_MARKER, KRA_LIST, PMS1_MARKER, SELF_MARKER, TOTAL_ROW};

/// Which list an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Kra,
    Goal,
}

impl ItemKind {
    /// KRA when the name is one of the canonical phrases, Goal otherwise
    pub fn classify(name: &str) -> Self {
        let lowered = name.trim().to_lowercase();
        if KRA_LIST.contains(&lowered.as_str()) {
            ItemKind::Kra
        } else {
            ItemKind::Goal
        }
    }
}

/// First line of a cell, trimmed
pub fn first_line(cell: &str) -> &str {
    cell.trim().lines().next().unwrap_or("").trim()
}

/// Starts with `self`, `hr` or `pms_1`, ignoring case
pub fn has_marker_prefix(text: &str) -> bool {
    let lowered = text.trim_start().to_lowercase();
    [SELF_MARKER, HR_MARKER, PMS1_MARKER]
        .iter()
        .any(|marker| lowered.starts_with(&marker.to_lowercase()))
}

fn is_total(text: &str) -> bool {
    text.eq_ignore_ascii_case(TOTAL_ROW)
}

fn is_default_bucket(text: &str) -> bool {
    text.eq_ignore_ascii_case(DEFAULT_BUCKET)
}

/// Strict item-name rule.
///
/// More than one character and none of a marker row, the `default` bucket
/// header or the `total` row. Numbered and numeric names pass.
pub fn is_candidate_name(text: &str) -> bool {
    let text = text.trim();
    text.chars().count() > 1
        && !is_default_bucket(text)
        && !has_marker_prefix(text)
        && !is_total(text)
}

/// Lenient fallback: any free text longer than three characters that is not
/// a marker, `total` or `default` row.
///
/// This can turn stray prose into a Goal.
pub fn is_lenient_name(text: &str) -> bool {
    let text = text.trim();
    text.chars().count() > 3
        && !is_default_bucket(text)
        && !has_marker_prefix(text)
        && !is_total(text)
}

/// Whether a first-cell line names a KRA or Goal under either rule
pub fn accepts_item_name(text: &str) -> bool {
    is_candidate_name(text) || is_lenient_name(text)
}
