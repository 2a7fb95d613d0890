//! PMS appraisal workbook parser
//!
//! Every worksheet of an appraisal workbook holds one employee: a
//! `"Name - Code"` header on row 3, then KRA and Goal rows from row 5 on, each
//! followed by optional `Self :`, `pms_1 :` and `HR :` comment rows.
//!
//! ## Architecture
//!
//! - [`parser`] - Orchestration: quarter lookup, per-sheet reports
//! - [`quarter`] - Quarter label from the first sheet's title row
//! - [`name_rules`] - Which first cells name a KRA or Goal, and which kind
//! - [`comments`] - Reviewer comment markers and the extraction fallbacks
//! - [`state`] - Row-by-row scan as a fold over an explicit [`ParserState`]
//!
//! ## Usage
//!
//! ```rust
//! use hr_sheet_processor::{PmsReportParser, Workbook};
//!
//! # fn example(workbook: &Workbook) -> hr_sheet_processor::Result<()> {
//! let reports = PmsReportParser::new().parse_workbook(workbook, "Sales")?;
//! for report in &reports {
//!     println!("{}: {:.1}/10", report.employee_name, report.percentage_out_of_10);
//! }
//! # Ok(())
//! # }
//! ```

pub mod comments;
pub mod name_rules;
pub mod parser;
pub mod quarter;
pub mod state;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use comments::{CommentSet, Marker};
pub use name_rules::ItemKind;
pub use parser::PmsReportParser;
pub use state::ParserState;
