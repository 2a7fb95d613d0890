//! Attendance command implementation
//!
//! Parses every attendance export found in the input paths and prints the
//! per-upload summary with the per-employee table.

use crate::app::adapters::workbook_reader::read_workbook;
use crate::app::models::attendance::AttendanceUpload;
use crate::app::services::attendance_parser::AttendanceParser;
use crate::cli::args::{AttendanceArgs, OutputFormat};
use crate::{Error, Result};
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use std::time::Instant;
use tracing::info;

use super::shared::{
    RunStats, collect_successes, configure_colors, create_progress_bar, discover_input_files,
    display_file_name, load_configuration, parse_files_concurrently, setup_logging, write_output,
};

/// Parse result of one attendance file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceFileReport {
    pub file: String,
    #[serde(flatten)]
    pub upload: AttendanceUpload,
}

/// Run the attendance command
pub async fn run_attendance(args: AttendanceArgs) -> Result<RunStats> {
    let start = Instant::now();

    setup_logging(&args.common)?;
    args.validate()?;
    configure_colors(&args.common);

    let config = load_configuration(&args.common)?;
    let files = discover_input_files(&args.paths)?;
    if files.is_empty() {
        return Err(Error::data_validation(
            "No workbook files found in the input paths",
        ));
    }

    info!(
        "Parsing {} {} attendance file(s) with {} workers",
        files.len(),
        args.variant,
        config.workers
    );

    let mut stats = RunStats {
        files_discovered: files.len(),
        ..RunStats::default()
    };

    let progress = (args.common.show_progress() && files.len() > 1)
        .then(|| create_progress_bar(files.len() as u64, "Parsing attendance"));

    let parser = AttendanceParser::new(args.variant, config.clone());
    let outcomes = parse_files_concurrently(files, config.workers, progress.as_ref(), move |path| {
        parse_attendance_file(&parser, path)
    })
    .await;

    if let Some(pb) = &progress {
        pb.finish_with_message("Parsing complete");
    }

    let reports: Vec<AttendanceFileReport> = collect_successes(outcomes, &mut stats)
        .into_iter()
        .map(|(path, upload)| AttendanceFileReport {
            file: display_file_name(&path),
            upload,
        })
        .collect();
    stats.records_produced = reports.iter().map(|r| r.upload.employees.len()).sum();

    let rendered = match args.common.format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Human => render_human(&reports),
    };
    write_output(args.common.output.as_deref(), &rendered)?;

    stats.processing_time = start.elapsed();
    info!("{}", stats.summary_line());

    if stats.files_parsed == 0 {
        return Err(Error::data_validation(format!(
            "None of the {} attendance file(s) could be parsed",
            stats.files_discovered
        )));
    }

    Ok(stats)
}

/// Read one workbook and parse its attendance sheet
pub fn parse_attendance_file(parser: &AttendanceParser, path: &Path) -> Result<AttendanceUpload> {
    let workbook = read_workbook(path)?;
    parser.parse_workbook(&workbook, &display_file_name(path))
}

/// Render uploads as a summary block and an aligned table per file
pub fn render_human(reports: &[AttendanceFileReport]) -> String {
    let mut out = String::new();

    for report in reports {
        let summary = &report.upload.summary;

        let _ = writeln!(out, "{}", report.file.bright_green().bold());
        let _ = writeln!(
            out,
            "  {} {}   {} {}   {} {}",
            "Department:".bright_cyan(),
            summary.department,
            "Period:".bright_cyan(),
            summary.period_label.as_deref().unwrap_or("-"),
            "Employees:".bright_cyan(),
            summary.employee_count
        );
        let _ = writeln!(
            out,
            "  {} {}   {} {}   {} {:.2}%",
            "Present:".bright_cyan(),
            summary.present_total,
            "Absent:".bright_cyan(),
            summary.absent_total,
            "Attendance:".bright_cyan(),
            summary.attendance_percentage
        );
        if !summary.leave_type_codes.is_empty() {
            let _ = writeln!(
                out,
                "  {} {}",
                "Leave types:".bright_cyan(),
                summary.leave_type_codes.join(", ")
            );
        }
        let _ = writeln!(out);

        render_table(
            &mut out,
            &report.upload.table_columns(),
            &report.upload.table_rows(),
        );
        let _ = writeln!(out);
    }

    out
}

fn render_table(out: &mut String, columns: &[String], rows: &[Vec<String>]) {
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, title)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(title.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(title, width)| format!("{:<width$}", title, width = width).bold().to_string())
        .collect();
    let _ = writeln!(out, "  {}", header.join("  "));

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        let _ = writeln!(out, "  {}", cells.join("  ").trim_end());
    }
}
