//! Spreadsheet file reading
//!
//! Opens `.xlsx`/`.xlsm`/`.xls`/`.xlsb`/`.ods` files with calamine and turns
//! every worksheet into the string-only [`Workbook`] model the parsers work
//! on. Used ranges are padded back to cell `A1` so column and row indices
//! match what a user sees in the spreadsheet.

use crate::app::models::{Cell, Row, Sheet, Workbook};
use crate::constants::WORKBOOK_EXTENSIONS;
use crate::{Error, Result};
use calamine::{Data, Range, Reader, open_workbook_auto};
use chrono::NaiveDate;
use std::path::Path;
use tracing::{debug, warn};

/// True when the path has a spreadsheet extension this reader can open
pub fn is_workbook_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Read every worksheet of a spreadsheet file, in workbook order
pub fn read_workbook(path: &Path) -> Result<Workbook> {
    let shown = path.display().to_string();
    let mut source =
        open_workbook_auto(path).map_err(|e| Error::workbook_read(&shown, e.to_string()))?;

    let names = source.sheet_names().to_owned();
    let mut workbook = Workbook::default();

    for name in names {
        let range = source
            .worksheet_range(&name)
            .map_err(|e| Error::workbook_read(&shown, format!("sheet '{}': {}", name, e)))?;

        let rows = range_to_rows(&range);
        debug!("Read sheet '{}' with {} rows from {}", name, rows.len(), shown);
        workbook.push(Sheet::new(name, rows));
    }

    if workbook.is_empty() {
        warn!("Workbook {} contains no worksheets", shown);
    }

    Ok(workbook)
}

/// Convert a calamine range into rows indexed from cell `A1`
pub fn range_to_rows(range: &Range<Data>) -> Vec<Row> {
    let (row_offset, col_offset) = range
        .start()
        .map_or((0, 0), |(row, col)| (row as usize, col as usize));

    let mut rows: Vec<Row> = std::iter::repeat_with(Row::default).take(row_offset).collect();
    rows.extend(range.rows().map(|cells| {
        std::iter::repeat_n(Cell::Empty, col_offset)
            .chain(cells.iter().map(data_to_cell))
            .collect::<Row>()
    }));
    rows
}

/// Render one calamine value as text.
///
/// Integral numbers drop their `.0`, date cells become ISO dates (with a time
/// only when they carry one) and error cells read as empty.
pub fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(text) => Cell::from(text.as_str()),
        Data::Int(value) => Cell::from(value.to_string()),
        Data::Float(value) => Cell::from(format_float(*value)),
        Data::Bool(value) => Cell::from(value.to_string()),
        Data::DateTime(value) => match value.as_datetime() {
            Some(datetime) => Cell::from(format_datetime(datetime)),
            None => Cell::from(format_float(value.as_f64())),
        },
        Data::DateTimeIso(text) | Data::DurationIso(text) => Cell::from(text.as_str()),
    }
}

fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Time-only cells sit on the 1899-12-30 epoch and render as a clock time
fn format_datetime(datetime: chrono::NaiveDateTime) -> String {
    let time_only = NaiveDate::from_ymd_opt(1900, 1, 1).is_some_and(|start| datetime.date() < start);

    if time_only {
        datetime.format("%H:%M:%S").to_string()
    } else if datetime.time() == chrono::NaiveTime::MIN {
        datetime.format("%Y-%m-%d").to_string()
    } else {
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
