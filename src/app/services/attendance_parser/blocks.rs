//! Splitting an attendance grid into per-employee blocks
//!
//! Below the title rows the sheet is a sequence of blocks: one header row
//! carrying `"ID - Name"` in its first cell, then the employee's data rows,
//! closed by a blank row or the end of the sheet.

use crate::app::models::Row;
use crate::app::services::field_parsers::{parse_cell_date, split_employee_header};
use crate::config::ProcessorConfig;
use crate::constants::columns::COL_DATE;
use crate::constants::{ATTENDANCE_HEADER_ROW_OFFSET, stray_header};
use tracing::{debug, trace};

/// Contiguous rows belonging to one employee
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeBlock<'a> {
    /// Grid index of the header row
    pub header_index: usize,
    pub employee_id: String,
    pub employee_name: String,
    /// Rows between the header and the closing blank row
    pub rows: &'a [Row],
}

/// True for the repeated column-title row (`Date` / `Day`)
pub fn is_stray_header(employee_id: &str, employee_name: &str) -> bool {
    employee_id == stray_header::ID || employee_name == stray_header::NAME
}

/// Index of the first blank row at or after `start`, or the grid length
fn block_end(rows: &[Row], start: usize) -> usize {
    rows[start..]
        .iter()
        .position(Row::is_blank)
        .map_or(rows.len(), |offset| start + offset)
}

/// Skip the dated rows that trail a stray header.
///
/// Stops at the first blank row or the first non-dated row, which then gets
/// its own chance to be an employee header.
fn skip_stray_rows(rows: &[Row], start: usize, config: &ProcessorConfig) -> usize {
    let mut index = start;
    while let Some(row) = rows.get(index) {
        if row.is_blank() {
            break;
        }
        let first = row.text(COL_DATE);
        let (id, name) = split_employee_header(first);
        if parse_cell_date(first, config).is_none() && !is_stray_header(&id, &name) {
            break;
        }
        index += 1;
    }
    index
}

/// Split the grid into employee blocks, skipping the fixed title rows.
///
/// Stray header rows and the dated rows directly under them never form a
/// block.
pub fn scan_blocks<'a>(rows: &'a [Row], config: &ProcessorConfig) -> Vec<EmployeeBlock<'a>> {
    let mut blocks = Vec::new();
    let mut index = ATTENDANCE_HEADER_ROW_OFFSET;

    while index < rows.len() {
        let row = &rows[index];
        if row.is_blank() {
            index += 1;
            continue;
        }

        let (employee_id, employee_name) = split_employee_header(row.text(COL_DATE));
        let data_start = index + 1;

        if is_stray_header(&employee_id, &employee_name) {
            let resume = skip_stray_rows(rows, data_start, config);
            debug!(
                "Skipping stray header at row {} ({} trailing rows)",
                index,
                resume - data_start
            );
            index = resume;
            continue;
        }

        let data_end = block_end(rows, data_start);
        trace!(
            "Block '{}' at row {} with {} data rows",
            employee_id,
            index,
            data_end - data_start
        );

        blocks.push(EmployeeBlock {
            header_index: index,
            employee_id,
            employee_name,
            rows: &rows[data_start..data_end],
        });
        index = data_end;
    }

    blocks
}
