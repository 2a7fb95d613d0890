//! Item scan state
//!
//! The scan over a sheet's item rows is a fold: [`ParserState::step`] takes
//! the state by value with one row and returns the next state. Rows already
//! consumed as comments are recorded in `consumed_rows` and skipped; a row
//! that names an item is never consumed.

use super::comments::{CommentSet, Marker, extract_combined, extract_following, marker_row_text, orphan_pms1_text};
use super::name_rules::{ItemKind, accepts_item_name, first_line};
use crate::app::models::Row;
use crate::app::models::pms::ReviewItem;
use crate::app::services::field_parsers::parse_score;
use crate::constants::PMS_FIRST_ITEM_ROW;
use crate::constants::columns::{COL_ITEM_NAME, COL_SCORE};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Most recently parsed item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentItem {
    pub kind: ItemKind,
    /// Position in the matching details list
    pub index: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParserState {
    pub kra_details: Vec<ReviewItem>,
    pub goal_details: Vec<ReviewItem>,
    /// Item that orphan `Self`/`HR` rows attach to
    pub current: Option<CurrentItem>,
    /// Orphan `pms_1` comment waiting for the next item without one
    pub pending_pms1_comment: Option<String>,
    /// Rows already read as comments of an earlier item
    pub consumed_rows: BTreeSet<usize>,
}

impl ParserState {
    /// Fold every item row of a sheet, starting at the first item row
    pub fn scan(rows: &[Row]) -> Self {
        rows.iter()
            .enumerate()
            .skip(PMS_FIRST_ITEM_ROW)
            .fold(Self::default(), |state, (index, row)| state.step(rows, index, row))
    }

    /// Advance the scan by one row
    pub fn step(mut self, rows: &[Row], index: usize, row: &Row) -> Self {
        if self.consumed_rows.contains(&index) || row.is_blank() {
            return self;
        }

        let first_cell = row.text(COL_ITEM_NAME);
        if let Some(marker) = Marker::of_cell(first_cell) {
            self.absorb_orphan(marker, row, index);
            return self;
        }

        let name = first_line(first_cell);
        if accepts_item_name(name) {
            self.push_item(rows, index, name, row);
        } else if let Some(text) = orphan_pms1_text(row) {
            trace!("Row {} carries a loose pms_1 comment", index);
            self.pending_pms1_comment = Some(text);
        } else {
            trace!("Row {} skipped: '{}'", index, name);
        }

        self
    }

    fn push_item(&mut self, rows: &[Row], index: usize, name: &str, row: &Row) {
        let score = parse_score(row.text(COL_SCORE));

        let (comments, consumed) = match extract_combined(row) {
            Some(comments) => (comments, Vec::new()),
            None => {
                let following = extract_following(rows, index);
                (following.comments, following.consumed_rows)
            }
        };

        let mut item = ReviewItem::new(name, score);
        apply_comments(&mut item, comments);
        if item.pms1_comment.is_none() {
            item.pms1_comment = self.pending_pms1_comment.take();
        }

        let kind = ItemKind::classify(name);
        debug!(
            "{:?} '{}' scored {} at row {} (comment rows {:?})",
            kind, item.name, item.score, index, consumed
        );
        self.consumed_rows.extend(consumed);

        let details = match kind {
            ItemKind::Kra => &mut self.kra_details,
            ItemKind::Goal => &mut self.goal_details,
        };
        details.push(item);
        self.current = Some(CurrentItem {
            kind,
            index: details.len() - 1,
        });
    }

    /// Marker row that no item claimed
    fn absorb_orphan(&mut self, marker: Marker, row: &Row, index: usize) {
        let Some(text) = marker_row_text(row, marker) else {
            return;
        };

        if marker == Marker::Pms1 {
            trace!("Holding pms_1 comment from row {} for the next item", index);
            self.pending_pms1_comment = Some(text);
            return;
        }

        if let Some(item) = self.current_item_mut() {
            let slot = match marker {
                Marker::SelfReview => &mut item.self_comment,
                _ => &mut item.hr_comment,
            };
            if slot.is_none() {
                *slot = Some(text);
            }
        }
    }

    fn current_item_mut(&mut self) -> Option<&mut ReviewItem> {
        let current = self.current?;
        match current.kind {
            ItemKind::Kra => self.kra_details.get_mut(current.index),
            ItemKind::Goal => self.goal_details.get_mut(current.index),
        }
    }

    /// Consume the state into its KRA and Goal lists
    pub fn into_details(self) -> (Vec<ReviewItem>, Vec<ReviewItem>) {
        (self.kra_details, self.goal_details)
    }
}

fn apply_comments(item: &mut ReviewItem, comments: CommentSet) {
    item.self_comment = comments.self_comment;
    item.pms1_comment = comments.pms1_comment;
    item.hr_comment = comments.hr_comment;
}
