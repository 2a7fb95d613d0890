//! Reviewer comment extraction
//!
//! Comments come in two shapes. Either all three sit in the item row itself,
//! one per line behind `Self :`, `pms_1 :` and `HR :` markers, or they follow
//! the item on their own rows in fixed order: self at +1, pms_1 at +2, HR at
//! +3, each row's first cell starting with its marker.
//!
//! An empty `pms_1` row falls back through increasingly permissive sources:
//! the other columns of that row, the row at +3 when it is not a marker, then
//! up to three further rows of unmarked text. No source ever reaches past the
//! next row that names an item.

use super::name_rules::{accepts_item_name, first_line};
use crate::app::models::Row;
use crate::constants::columns::{COL_ITEM_NAME, COL_SCORE};
use crate::constants::{HR_MARKER, PMS1_MARKER, SELF_MARKER};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// Offsets of the comment rows below an item row
const SELF_ROW_OFFSET: usize = 1;
const PMS1_ROW_OFFSET: usize = 2;
const HR_ROW_OFFSET: usize = 3;

/// Rows the last-resort pms_1 scan may look at
const PMS1_SCAN_ROWS: usize = 3;

/// Columns of an item row that never hold comments
const NON_COMMENT_COLUMNS: [usize; 2] = [1, COL_SCORE];

/// Pattern capturing the text behind `marker :` up to the next marker
fn combined_pattern(marker: &str, others: [&str; 2]) -> Regex {
    let pattern = format!(
        r"(?s){}\s*:\s*(.*?)\s*(?:{}\s*:|{}\s*:|\z)",
        regex::escape(marker),
        regex::escape(others[0]),
        regex::escape(others[1])
    );
    Regex::new(&pattern).expect("valid combined comment regex")
}

static SELF_COMBINED: LazyLock<Regex> =
    LazyLock::new(|| combined_pattern(SELF_MARKER, [PMS1_MARKER, HR_MARKER]));
static PMS1_COMBINED: LazyLock<Regex> =
    LazyLock::new(|| combined_pattern(PMS1_MARKER, [SELF_MARKER, HR_MARKER]));
static HR_COMBINED: LazyLock<Regex> =
    LazyLock::new(|| combined_pattern(HR_MARKER, [SELF_MARKER, PMS1_MARKER]));

/// Reviewer a comment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    SelfReview,
    Pms1,
    Hr,
}

impl Marker {
    pub const ALL: [Marker; 3] = [Marker::SelfReview, Marker::Pms1, Marker::Hr];

    /// Literal label as written in the workbook
    pub fn label(&self) -> &'static str {
        match self {
            Marker::SelfReview => SELF_MARKER,
            Marker::Pms1 => PMS1_MARKER,
            Marker::Hr => HR_MARKER,
        }
    }

    fn combined_regex(&self) -> &'static Regex {
        match self {
            Marker::SelfReview => &*SELF_COMBINED,
            Marker::Pms1 => &*PMS1_COMBINED,
            Marker::Hr => &*HR_COMBINED,
        }
    }

    /// Marker a cell starts with, ignoring case
    pub fn of_cell(cell: &str) -> Option<Marker> {
        let cell = cell.trim_start();
        Self::ALL.into_iter().find(|marker| {
            cell.get(..marker.label().len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(marker.label()))
        })
    }

    /// Text behind the marker label and its colon
    pub fn strip<'a>(&self, cell: &'a str) -> &'a str {
        let cell = cell.trim_start();
        let rest = cell.get(self.label().len()..).unwrap_or("");
        let rest = rest.trim_start();
        rest.strip_prefix(':').unwrap_or(rest).trim()
    }

    /// Text captured behind this marker inside a multi-line cell
    pub fn capture(&self, text: &str) -> Option<String> {
        self.combined_regex()
            .captures(text)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().trim())
            .and_then(non_empty)
    }
}

/// The three reviewer comments of one item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentSet {
    pub self_comment: Option<String>,
    pub pms1_comment: Option<String>,
    pub hr_comment: Option<String>,
}

impl CommentSet {
    pub fn get(&self, marker: Marker) -> Option<&str> {
        match marker {
            Marker::SelfReview => self.self_comment.as_deref(),
            Marker::Pms1 => self.pms1_comment.as_deref(),
            Marker::Hr => self.hr_comment.as_deref(),
        }
    }

    pub fn set(&mut self, marker: Marker, text: Option<String>) {
        let slot = match marker {
            Marker::SelfReview => &mut self.self_comment,
            Marker::Pms1 => &mut self.pms1_comment,
            Marker::Hr => &mut self.hr_comment,
        };
        *slot = text;
    }

    pub fn is_empty(&self) -> bool {
        Marker::ALL.iter().all(|marker| self.get(*marker).is_none())
    }
}

/// Comments found below an item row, and the rows they were read from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowingComments {
    pub comments: CommentSet,
    /// Row indices consumed as comment rows, ascending
    pub consumed_rows: Vec<usize>,
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Non-empty cells of a row, optionally skipping some columns, joined by `separator`
fn joined_text(row: &Row, skip: &[usize], separator: &str) -> Option<String> {
    let parts: Vec<&str> = row
        .non_empty()
        .filter(|(index, _)| !skip.contains(index))
        .map(|(_, text)| text)
        .collect();
    non_empty(&parts.join(separator))
}

/// Text behind a row's marker, or its other columns when that is empty
pub fn marker_row_text(row: &Row, marker: Marker) -> Option<String> {
    non_empty(marker.strip(row.text(COL_ITEM_NAME)))
        .or_else(|| joined_text(row, &[COL_ITEM_NAME], " "))
}

/// Comments written inside the item row itself.
///
/// Reads the name cell and the columns right of the score. `None` when no
/// marker appears there at all.
pub fn extract_combined(row: &Row) -> Option<CommentSet> {
    let text = joined_text(row, &NON_COMMENT_COLUMNS, "\n")?;

    let mut comments = CommentSet::default();
    let mut found = false;
    for marker in Marker::ALL {
        if marker.combined_regex().is_match(&text) {
            found = true;
            comments.set(marker, marker.capture(&text));
        }
    }

    found.then_some(comments)
}

/// Whether a row names a KRA or Goal and so can never be a comment row
pub fn is_item_row(row: &Row) -> bool {
    let first = row.text(COL_ITEM_NAME);
    Marker::of_cell(first).is_none() && accepts_item_name(first_line(first))
}

/// Index of the first item row after `item_index`, or the end of the sheet
fn next_item_index(rows: &[Row], item_index: usize) -> usize {
    (item_index + 1..rows.len())
        .find(|&index| is_item_row(&rows[index]))
        .unwrap_or(rows.len())
}

fn marker_row(rows: &[Row], index: usize, limit: usize, marker: Marker) -> Option<&Row> {
    if index >= limit {
        return None;
    }
    rows.get(index)
        .filter(|row| Marker::of_cell(row.text(COL_ITEM_NAME)) == Some(marker))
}

/// Comments spread over the rows below the item at `item_index`.
///
/// Never reads past the next item row.
pub fn extract_following(rows: &[Row], item_index: usize) -> FollowingComments {
    let limit = next_item_index(rows, item_index);
    let mut comments = CommentSet::default();
    let mut consumed_rows = Vec::new();

    let self_index = item_index + SELF_ROW_OFFSET;
    if let Some(row) = marker_row(rows, self_index, limit, Marker::SelfReview) {
        comments.self_comment = marker_row_text(row, Marker::SelfReview);
        consumed_rows.push(self_index);
    }

    let pms1_index = item_index + PMS1_ROW_OFFSET;
    if let Some(row) = marker_row(rows, pms1_index, limit, Marker::Pms1) {
        consumed_rows.push(pms1_index);
        let (text, used) = pms1_with_fallbacks(rows, item_index, limit, row);
        comments.pms1_comment = text;
        consumed_rows.extend(used);
    }

    let hr_index = item_index + HR_ROW_OFFSET;
    if let Some(row) = marker_row(rows, hr_index, limit, Marker::Hr) {
        comments.hr_comment = marker_row_text(row, Marker::Hr);
        consumed_rows.push(hr_index);
    }

    consumed_rows.sort_unstable();
    consumed_rows.dedup();
    FollowingComments {
        comments,
        consumed_rows,
    }
}

/// The pms_1 fallback chain; returns the text and the extra rows it used
fn pms1_with_fallbacks(
    rows: &[Row],
    item_index: usize,
    limit: usize,
    pms1_row: &Row,
) -> (Option<String>, Vec<usize>) {
    if let Some(text) = marker_row_text(pms1_row, Marker::Pms1) {
        return (Some(text), Vec::new());
    }

    let lookahead_index = item_index + HR_ROW_OFFSET;
    if let Some(row) = rows.get(lookahead_index).filter(|_| lookahead_index < limit) {
        if Marker::of_cell(row.text(COL_ITEM_NAME)).is_none() {
            if let Some(text) = joined_text(row, &[], " ") {
                trace!("pms_1 comment taken from row {}", lookahead_index);
                return (Some(text), vec![lookahead_index]);
            }
        }
    }

    let mut parts = Vec::new();
    let mut used = Vec::new();
    let scan_end = (lookahead_index + PMS1_SCAN_ROWS).min(limit);
    for index in lookahead_index..scan_end {
        let Some(row) = rows.get(index) else {
            break;
        };
        if Marker::of_cell(row.text(COL_ITEM_NAME)).is_some() {
            continue;
        }
        if let Some(text) = joined_text(row, &[], " ") {
            parts.push(text);
            used.push(index);
        }
    }

    if parts.is_empty() {
        (None, Vec::new())
    } else {
        trace!("pms_1 comment collected from {} loose rows", parts.len());
        (Some(parts.join(" ")), used)
    }
}

/// A `pms_1 :` comment on a row that belongs to no item
pub fn orphan_pms1_text(row: &Row) -> Option<String> {
    if Marker::of_cell(row.text(COL_ITEM_NAME)) == Some(Marker::Pms1) {
        return marker_row_text(row, Marker::Pms1);
    }
    row.non_empty()
        .find_map(|(_, text)| Marker::Pms1.capture(text))
}
