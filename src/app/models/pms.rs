//! PMS appraisal report structures

use crate::constants::MAX_ITEM_SCORE;
use serde::{Deserialize, Serialize};

/// One scored KRA or Goal with its reviewer comments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    pub name: String,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pms1_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hr_comment: Option<String>,
}

impl ReviewItem {
    /// Create an item without comments
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
            self_comment: None,
            pms1_comment: None,
            hr_comment: None,
        }
    }

    /// True when none of the three comments was found
    pub fn has_no_comments(&self) -> bool {
        self.self_comment.is_none() && self.pms1_comment.is_none() && self.hr_comment.is_none()
    }
}

/// Appraisal result of one employee
///
/// Scores are derived once at construction; only the remark can change
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PmsEmployeeReport {
    pub employee_name: String,
    pub employee_code: String,
    pub department: String,
    /// Quarter label shared by every report of the workbook
    pub quarter: Option<String>,
    /// Worksheet the report was read from
    pub sheet_name: String,

    pub kra_details: Vec<ReviewItem>,
    pub goal_details: Vec<ReviewItem>,

    pub kra_score: f64,
    pub goal_score: f64,
    pub total_score: f64,
    pub max_kra: f64,
    pub max_goal: f64,
    pub max_total: f64,
    pub percentage: f64,
    pub percentage_out_of_10: f64,

    pub remark: String,
}

/// Identity and placement of a report before its items are known
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportHeader {
    pub employee_name: String,
    pub employee_code: String,
    pub department: String,
    pub quarter: Option<String>,
    pub sheet_name: String,
}

impl PmsEmployeeReport {
    /// Build a report and derive every score from the item lists
    pub fn new(header: ReportHeader, kra_details: Vec<ReviewItem>, goal_details: Vec<ReviewItem>) -> Self {
        let kra_score: f64 = kra_details.iter().map(|item| item.score).sum();
        let goal_score: f64 = goal_details.iter().map(|item| item.score).sum();
        let total_score = kra_score + goal_score;

        let max_kra = MAX_ITEM_SCORE * kra_details.len() as f64;
        let max_goal = MAX_ITEM_SCORE * goal_details.len() as f64;
        let max_total = max_kra + max_goal;

        let (percentage, percentage_out_of_10) = if max_total > 0.0 {
            let ratio = total_score / max_total;
            (ratio * 100.0, ratio * 10.0)
        } else {
            (0.0, 0.0)
        };

        Self {
            employee_name: header.employee_name,
            employee_code: header.employee_code,
            department: header.department,
            quarter: header.quarter,
            sheet_name: header.sheet_name,
            kra_details,
            goal_details,
            kra_score,
            goal_score,
            total_score,
            max_kra,
            max_goal,
            max_total,
            percentage,
            percentage_out_of_10,
            remark: String::new(),
        }
    }

    /// Replace the free-text remark
    pub fn set_remark(&mut self, remark: impl Into<String>) {
        self.remark = remark.into();
    }

    /// Number of scored items
    pub fn item_count(&self) -> usize {
        self.kra_details.len() + self.goal_details.len()
    }
}
