//! `reportkit_report`:
//! Formatted multi-sheet company report.
//!
//! - `dataset`   : hard-coded company rows
//! - `aggregate` : group-by-key averaging
//! - `conf`      : constants, layout presets, config loading
//! - `spec`      : config/layout/outcome models
//! - `report`    : workbook generation
//! - `cli`       : command implementations for the binary
pub mod aggregate;
pub mod cli;
pub mod conf;
pub mod dataset;
pub mod error;
pub mod report;
pub mod spec;

pub use error::{ErrorReport, ResultReport};
pub use report::{SpecReportData, derive_report_data, generate_report, render_preview};
pub use spec::{EnumReportLayout, SpecReportConfig, SpecReportOutcome};
