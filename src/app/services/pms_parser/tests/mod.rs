//! Test utilities for PMS parser testing
//!
//! Sheets follow the appraisal layout: title on row 1, `Name - Code` on row
//! 3, column titles on row 4 and items from row 5.

use crate::app::models::{Row, Sheet, Workbook};

mod parser_tests;

pub const TITLE: &str = "Appraisal Form Report - Q1_AprJun_2024 for the period 01-Apr-2024 to 30-Jun-2024";

/// Rows above the first item
pub fn preamble(title: &str, header: &str) -> Vec<Row> {
    vec![
        Row::from_texts(["Example Pvt Ltd"]),
        Row::from_texts([title]),
        Row::from_texts([""]),
        Row::from_texts([header]),
        Row::from_texts(["KRA / Goal", "Weightage", "Score"]),
    ]
}

/// A full sheet grid: preamble followed by item and comment rows
pub fn sheet_rows(header: &str, rows: Vec<Row>) -> Vec<Row> {
    let mut grid = preamble(TITLE, header);
    grid.extend(rows);
    grid
}

/// KRA or Goal row with its score in column 2
pub fn item(name: &str, score: &str) -> Row {
    Row::from_texts([name, "", score])
}

/// Single-cell row, typically a comment marker row
pub fn line(text: &str) -> Row {
    Row::from_texts([text])
}

pub fn sheet(name: &str, header: &str, rows: Vec<Row>) -> Sheet {
    Sheet::new(name, sheet_rows(header, rows))
}

pub fn workbook(sheets: Vec<Sheet>) -> Workbook {
    Workbook::new(sheets)
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
