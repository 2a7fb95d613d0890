//! Test utilities for attendance parser testing
//!
//! Helpers build grids in the export's positional layout: three title rows,
//! then `"ID - Name"` header rows followed by 13-column data rows.

use crate::app::models::{Row, Sheet, Workbook};


/// The three title rows above the first block
pub fn title_rows() -> Vec<Row> {
    vec![
        Row::from_texts(["Monthly Attendance Report"]),
        Row::from_texts(["Company: Example Pvt Ltd"]),
        Row::from_texts(["Date", "Day", "Shift", "", "", "In", "Out"]),
    ]
}

/// Employee header row
pub fn header(text: &str) -> Row {
    Row::from_texts([text])
}

/// Fully empty separator row
pub fn blank() -> Row {
    Row::from_texts(["", "", ""])
}

/// 13-column data row with date, punches and leave code at their positions
pub fn day(date: &str, punch_in: &str, punch_out: &str, leave_code: &str) -> Row {
    let mut cells = vec![""; 13];
    cells[0] = date;
    cells[1] = "Mon";
    cells[2] = "GEN";
    cells[5] = punch_in;
    cells[6] = punch_out;
    cells[12] = leave_code;
    Row::from_texts(cells)
}

/// Worked day with both punches
pub fn present(date: &str) -> Row {
    day(date, "09:00", "18:00", "")
}

/// Day without punches marked `ABS`
pub fn absent(date: &str) -> Row {
    day(date, "", "", "ABS")
}

/// Day without punches carrying a leave code
pub fn leave(date: &str, code: &str) -> Row {
    day(date, "", "", code)
}

/// Grid of title rows followed by the given blocks separated by blank rows
pub fn grid(blocks: Vec<Vec<Row>>) -> Vec<Row> {
    let mut rows = title_rows();
    for block in blocks {
        rows.extend(block);
        rows.push(blank());
    }
    rows
}

/// The two-employee fixture: A has 3 P and 2 ABS, B has 5 P
pub fn two_employee_grid() -> Vec<Row> {
    grid(vec![
        vec![
            header("E001 - Asha Rao"),
            present("2024-01-01"),
            present("2024-01-02"),
            absent("2024-01-03"),
            present("2024-01-04"),
            absent("2024-01-05"),
        ],
        vec![
            header("E002 - Ravi Kumar"),
            present("2024-01-01"),
            present("2024-01-02"),
            present("2024-01-03"),
            present("2024-01-04"),
            present("2024-01-05"),
        ],
    ])
}

/// Wrap a grid into a workbook under the given sheet name
pub fn workbook_with(sheet_name: &str, rows: Vec<Row>) -> Workbook {
    Workbook::new(vec![Sheet::new(sheet_name, rows)])
}

/// Float comparison for percentages
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
