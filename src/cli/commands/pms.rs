//! PMS command implementation
//!
//! Parses every appraisal workbook found in the input paths and prints one
//! scored report per employee sheet.

use crate::app::adapters::workbook_reader::read_workbook;
use crate::app::models::pms::{PmsEmployeeReport, ReviewItem};
use crate::app::services::field_parsers::department_from_file_name;
use crate::app::services::pms_parser::PmsReportParser;
use crate::cli::args::{OutputFormat, PmsArgs};
use crate::{Error, Result};
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use super::shared::{
    RunStats, collect_successes, configure_colors, create_progress_bar, discover_input_files,
    display_file_name, load_configuration, parse_files_concurrently, setup_logging, write_output,
};

/// Parse result of one appraisal workbook
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PmsFileReport {
    pub file: String,
    pub reports: Vec<PmsEmployeeReport>,
}

/// Run the pms command
pub async fn run_pms(args: PmsArgs) -> Result<RunStats> {
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
        "Parsing {} appraisal file(s) with {} workers",
        files.len(),
        config.workers
    );

    let mut stats = RunStats {
        files_discovered: files.len(),
        ..RunStats::default()
    };

    let progress = (args.common.show_progress() && files.len() > 1)
        .then(|| create_progress_bar(files.len() as u64, "Parsing appraisals"));

    let department = args.department.clone();
    let outcomes = parse_files_concurrently(files, config.workers, progress.as_ref(), move |path| {
        parse_pms_file(path, department.as_deref())
    })
    .await;

    if let Some(pb) = &progress {
        pb.finish_with_message("Parsing complete");
    }

    let files: Vec<PmsFileReport> = collect_successes(outcomes, &mut stats)
        .into_iter()
        .map(|(path, reports)| PmsFileReport {
            file: display_file_name(&path),
            reports,
        })
        .collect();
    stats.records_produced = files.iter().map(|f| f.reports.len()).sum();

    for file in files.iter().filter(|f| f.reports.is_empty()) {
        warn!("No employee sheets found in {}", file.file);
    }

    let rendered = match args.common.format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&files)?),
        OutputFormat::Human => render_human(&files),
    };
    write_output(args.common.output.as_deref(), &rendered)?;

    stats.processing_time = start.elapsed();
    info!("{}", stats.summary_line());

    if stats.files_parsed == 0 {
        return Err(Error::data_validation(format!(
            "None of the {} appraisal file(s) could be parsed",
            stats.files_discovered
        )));
    }

    Ok(stats)
}

/// Read one workbook and parse every employee sheet.
///
/// Without an explicit department the file name decides it.
pub fn parse_pms_file(path: &Path, department: Option<&str>) -> Result<Vec<PmsEmployeeReport>> {
    let department = department
        .map(str::to_string)
        .unwrap_or_else(|| department_from_file_name(&display_file_name(path)));

    let workbook = read_workbook(path)?;
    PmsReportParser::new().parse_workbook(&workbook, &department)
}

/// Render every report with its score breakdown and items
pub fn render_human(files: &[PmsFileReport]) -> String {
    let mut out = String::new();

    for file in files {
        let quarter = file
            .reports
            .first()
            .and_then(|r| r.quarter.as_deref())
            .unwrap_or("unknown quarter");
        let _ = writeln!(
            out,
            "{} {}",
            file.file.bright_green().bold(),
            format!("({})", quarter).bright_black()
        );

        for report in &file.reports {
            render_report(&mut out, report);
        }
        let _ = writeln!(out);
    }

    out
}

fn render_report(out: &mut String, report: &PmsEmployeeReport) {
    let code = if report.employee_code.is_empty() {
        String::new()
    } else {
        format!(" ({})", report.employee_code)
    };
    let _ = writeln!(
        out,
        "  {}{}  {} {}  {} {}",
        report.employee_name.bright_white().bold(),
        code,
        "Department:".bright_cyan(),
        report.department,
        "Sheet:".bright_cyan(),
        report.sheet_name
    );
    let _ = writeln!(
        out,
        "    {} {}/{}   {} {}/{}   {} {}/{}   {:.2}% ({:.2}/10)",
        "KRA".bright_cyan(),
        report.kra_score,
        report.max_kra,
        "Goal".bright_cyan(),
        report.goal_score,
        report.max_goal,
        "Total".bright_cyan(),
        report.total_score,
        report.max_total,
        report.percentage,
        report.percentage_out_of_10
    );

    for item in &report.kra_details {
        render_item(out, "KRA", item);
    }
    for item in &report.goal_details {
        render_item(out, "Goal", item);
    }
}

fn render_item(out: &mut String, kind: &str, item: &ReviewItem) {
    let _ = writeln!(
        out,
        "    {} {}  {}",
        format!("[{}]", kind).bright_yellow(),
        item.name,
        item.score
    );

    let comments = [
        ("Self", &item.self_comment),
        ("pms_1", &item.pms1_comment),
        ("HR", &item.hr_comment),
    ];
    for (label, comment) in comments {
        if let Some(text) = comment {
            let _ = writeln!(
                out,
                "        {} {}",
                format!("{}:", label).bright_black(),
                text.replace('\n', " ")
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::pms::ReportHeader;

    fn report() -> PmsEmployeeReport {
        let mut productivity = ReviewItem::new("Productivity", 8.0);
        productivity.self_comment = Some("Met targets\nearly".to_string());

        PmsEmployeeReport::new(
            ReportHeader {
                employee_name: "Asha Rao".to_string(),
                employee_code: "E001".to_string(),
                department: "Sales".to_string(),
                quarter: Some("Q1_AprJun_2024".to_string()),
                sheet_name: "Asha".to_string(),
            },
            vec![productivity],
            vec![ReviewItem::new("Close 10 deals", 6.0)],
        )
    }

    #[test]
    fn test_render_human_shows_scores_and_comments() {
        let files = vec![PmsFileReport {
            file: "Sales_Q1.xlsx".to_string(),
            reports: vec![report()],
        }];
        let text = render_human(&files);

        assert!(text.contains("Sales_Q1.xlsx"));
        assert!(text.contains("Q1_AprJun_2024"));
        assert!(text.contains("Asha Rao"));
        assert!(text.contains("70.00%"));
        assert!(text.contains("Close 10 deals"));
        assert!(text.contains("Met targets early"));
    }

    #[test]
    fn test_json_report_uses_camel_case() {
        let file = PmsFileReport {
            file: "Sales_Q1.xlsx".to_string(),
            reports: vec![report()],
        };
        let value = serde_json::to_value(&file).unwrap();

        assert_eq!(value["reports"][0]["employeeCode"], "E001");
        assert_eq!(value["reports"][0]["percentageOutOf10"], 7.0);
        assert!(value["reports"][0]["goalDetails"][0].get("selfComment").is_none());
    }

    #[test]
    fn test_missing_file_fails_with_read_error() {
        let result = parse_pms_file(Path::new("/nonexistent/Sales_Q1.xlsx"), None);
        assert!(matches!(result, Err(Error::WorkbookRead { .. })));
    }
}
