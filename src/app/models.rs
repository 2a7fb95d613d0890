//! Data models for HR sheet processing
//!
//! This module contains the spreadsheet-side structures shared by both
//! parsers: a string-only [`Cell`], positional [`Row`]s, named [`Sheet`]s and
//! the [`Workbook`] that groups them. The parser outputs live in the
//! [`attendance`] and [`pms`] submodules.

pub mod attendance;
pub mod pms;

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

// =============================================================================
// Cell
// =============================================================================

/// A single spreadsheet value.
///
/// Numbers and dates arrive as their textual rendering; nothing is trusted
/// to be typed, so every consumer parses the text defensively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
}

impl Cell {
    /// Raw text of the cell, `""` when empty
    pub fn as_str(&self) -> &str {
        match self {
            Cell::Empty => "",
            Cell::Text(text) => text,
        }
    }

    /// Text with surrounding whitespace removed
    pub fn trimmed(&self) -> &str {
        self.as_str().trim()
    }

    /// A cell is empty when it holds nothing or only whitespace
    pub fn is_empty(&self) -> bool {
        self.trimmed().is_empty()
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

// =============================================================================
// Row
// =============================================================================

/// An ordered sequence of cells; column meaning is purely positional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// Create a row from cells
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Create a row from plain strings, `""` becoming an empty cell
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: texts.into_iter().map(|s| Cell::from(s.into())).collect(),
        }
    }

    /// Trimmed text at `index`, `""` for empty or missing cells
    pub fn text(&self, index: usize) -> &str {
        self.cells.get(index).map(Cell::trimmed).unwrap_or("")
    }

    /// Cell at `index`, if the row is that wide
    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// True when every cell is empty (including a row with no cells)
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    /// All cells of the row
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells in the row
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the row has no cells at all
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Non-empty trimmed cell texts with their column index
    pub fn non_empty(&self) -> impl Iterator<Item = (usize, &str)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (index, cell.trimmed()))
            .filter(|(_, text)| !text.is_empty())
    }

    /// Append a cell
    pub fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }
}

impl FromIterator<Cell> for Row {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Sheet and Workbook
// =============================================================================

/// A named worksheet as a row-major grid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Create a named sheet
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Row at `index`, if present
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }
}

/// All sheets of one uploaded file, in workbook order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create a workbook from sheets in workbook order
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Append a sheet
    pub fn push(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    /// All sheets in workbook order
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Exact-name lookup
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// First sheet of the workbook
    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.first()
    }

    /// True when the workbook has no sheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// First sheet found from a fallback chain of names.
    ///
    /// Fails with [`Error::MissingSheet`] naming both the chain and the
    /// sheets actually present.
    pub fn find_first_of(&self, names: &[&str]) -> Result<&Sheet> {
        names
            .iter()
            .find_map(|name| self.sheet(name))
            .ok_or_else(|| Error::missing_sheet(names.iter().copied(), self.sheet_names()))
    }
}
