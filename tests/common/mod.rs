//! Shared helpers for integration tests: writing real `.xlsx` fixtures

#![allow(dead_code)]

use rust_xlsxwriter::{Workbook as XlsxWorkbook, Worksheet};
use std::path::{Path, PathBuf};

/// Value written into one fixture cell
#[derive(Debug, Clone, Copy)]
pub enum Value {
    Text(&'static str),
    Number(f64),
    Empty,
}

/// Shorthand for a row of text cells
pub fn texts(cells: &[&'static str]) -> Vec<Value> {
    cells
        .iter()
        .map(|&text| if text.is_empty() { Value::Empty } else { Value::Text(text) })
        .collect()
}

/// Write a workbook with the given sheets, rows starting at cell `A1`
pub fn write_workbook(dir: &Path, file_name: &str, sheets: &[(&str, Vec<Vec<Value>>)]) -> PathBuf {
    write_workbook_at(dir, file_name, sheets, (0, 0))
}

/// Write a workbook whose rows start at the given (row, column) offset
pub fn write_workbook_at(
    dir: &Path,
    file_name: &str,
    sheets: &[(&str, Vec<Vec<Value>>)],
    origin: (u32, u16),
) -> PathBuf {
    let mut workbook = XlsxWorkbook::new();

    for (name, rows) in sheets {
        let mut worksheet = Worksheet::new();
        worksheet.set_name(*name).unwrap();

        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                let row_index = origin.0 + r as u32;
                let col_index = origin.1 + c as u16;
                match value {
                    Value::Text(text) => {
                        worksheet.write_string(row_index, col_index, *text).unwrap();
                    }
                    Value::Number(number) => {
                        worksheet.write_number(row_index, col_index, *number).unwrap();
                    }
                    Value::Empty => {}
                }
            }
        }

        workbook.push_worksheet(worksheet);
    }

    let buffer = workbook.save_to_buffer().unwrap();
    let path = dir.join(file_name);
    std::fs::write(&path, buffer).unwrap();
    path
}

/// 13-column attendance data row
pub fn attendance_day(date: Value, punch_in: &'static str, punch_out: &'static str, code: &'static str) -> Vec<Value> {
    let mut cells = vec![Value::Empty; 13];
    cells[0] = date;
    cells[1] = Value::Text("Mon");
    cells[5] = texts(&[punch_in])[0];
    cells[6] = texts(&[punch_out])[0];
    cells[12] = texts(&[code])[0];
    cells
}

/// Float comparison for percentages
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
