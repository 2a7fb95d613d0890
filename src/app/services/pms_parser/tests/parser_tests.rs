//! End-to-end tests for the PMS report parser

use super::*;
use crate::Error;
use crate::app::services::pms_parser::PmsReportParser;

fn asha_sheet() -> Sheet {
    sheet(
        "Asha",
        "Asha Rao - E001",
        vec![
            item("Productivity", "8"),
            line("Self : Met targets"),
            line("pms_1 : Agreed"),
            line("HR : Noted"),
            item("Quality of work", "6"),
            item("Close 10 enterprise deals", "7"),
            item("Total", "21"),
        ],
    )
}

#[test]
fn test_report_scores() {
    let reports = PmsReportParser::new()
        .parse_workbook(&workbook(vec![asha_sheet()]), "Sales")
        .unwrap();

    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report.employee_name, "Asha Rao");
    assert_eq!(report.employee_code, "E001");
    assert_eq!(report.department, "Sales");
    assert_eq!(report.sheet_name, "Asha");
    assert_eq!(report.quarter.as_deref(), Some("Q1_AprJun_2024"));

    assert_eq!(report.kra_details.len(), 2);
    assert_eq!(report.goal_details.len(), 1);
    assert_close(report.kra_score, 14.0);
    assert_close(report.goal_score, 7.0);
    assert_close(report.total_score, 21.0);
    assert_close(report.max_kra, 20.0);
    assert_close(report.max_goal, 10.0);
    assert_close(report.max_total, 30.0);
    assert_close(report.percentage, 70.0);
    assert_close(report.percentage_out_of_10, 7.0);
    assert_eq!(report.remark, "");
}

#[test]
fn test_kra_list_membership_decides_the_list() {
    let sheet = sheet(
        "Ravi",
        "Ravi Kumar - E002",
        vec![
            item("communication skills", "5"),
            item("Attendance And Punctuality", "9"),
            item("Communication skills training", "4"),
        ],
    );
    let reports = PmsReportParser::new().parse_workbook(&workbook(vec![sheet]), "Ops").unwrap();
    let report = &reports[0];

    let kras: Vec<&str> = report.kra_details.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(kras, vec!["communication skills", "Attendance And Punctuality"]);
    assert_eq!(report.goal_details.len(), 1);
    assert_close(report.max_kra, 10.0 * report.kra_details.len() as f64);
}

#[test]
fn test_quarter_shared_from_first_sheet() {
    let mut second = sheet("Ravi", "Ravi Kumar - E002", vec![item("Productivity", "9")]);
    second.rows[1] = line("Appraisal Form Report - Q4_JanMar_2025");

    let reports = PmsReportParser::new()
        .parse_workbook(&workbook(vec![asha_sheet(), second]), "Sales")
        .unwrap();

    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.quarter.as_deref() == Some("Q1_AprJun_2024")));
    assert_eq!(reports[1].employee_code, "E002");
}

#[test]
fn test_sheet_without_header_is_skipped() {
    let empty = Sheet::new("Instructions", preamble("How to fill this form", ""));
    let reports = PmsReportParser::new()
        .parse_workbook(&workbook(vec![asha_sheet(), empty]), "Sales")
        .unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].sheet_name, "Asha");
}

#[test]
fn test_sheet_shorter_than_header_row_is_skipped() {
    let short = Sheet::new("Notes", vec![line("Draft")]);
    let reports = PmsReportParser::new()
        .parse_workbook(&workbook(vec![short]), "Sales")
        .unwrap();

    assert!(reports.is_empty());
}

#[test]
fn test_report_without_items_has_zero_percentages() {
    let sheet = sheet("Meena", "Meena Iyer - E003", vec![item("Total", "0")]);
    let reports = PmsReportParser::new().parse_workbook(&workbook(vec![sheet]), "HR").unwrap();
    let report = &reports[0];

    assert_eq!(report.item_count(), 0);
    assert_eq!(report.percentage, 0.0);
    assert_eq!(report.percentage_out_of_10, 0.0);
    assert!(report.percentage_out_of_10.is_finite());
}

#[test]
fn test_header_without_code() {
    let sheet = sheet("Solo", "Asha Rao", vec![item("Productivity", "8")]);
    let reports = PmsReportParser::new().parse_workbook(&workbook(vec![sheet]), "Sales").unwrap();

    assert_eq!(reports[0].employee_name, "Asha Rao");
    assert_eq!(reports[0].employee_code, "");
}

#[test]
fn test_missing_quarter_is_none() {
    let mut sheet = asha_sheet();
    sheet.rows[1] = line("Appraisal");
    let reports = PmsReportParser::new().parse_workbook(&workbook(vec![sheet]), "Sales").unwrap();

    assert_eq!(reports[0].quarter, None);
}

#[test]
fn test_empty_workbook_is_an_error() {
    let result = PmsReportParser::new().parse_workbook(&workbook(vec![]), "Sales");

    assert!(matches!(result, Err(Error::MissingSheet { .. })));
}

#[test]
fn test_remark_can_be_edited_after_parsing() {
    let mut reports = PmsReportParser::new()
        .parse_workbook(&workbook(vec![asha_sheet()]), "Sales")
        .unwrap();
    let before = reports[0].percentage;

    reports[0].set_remark("Ready for promotion");

    assert_eq!(reports[0].remark, "Ready for promotion");
    assert_close(reports[0].percentage, before);
}
