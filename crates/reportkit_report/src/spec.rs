//! Report configuration, layout and outcome models.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::ValueEnum;
use reportkit_io_xlsx::{
    C_FONT_COLOR_DEFAULT, C_FONT_NAME_DEFAULT, N_FONT_SIZE_DEFAULT, SpecCellFormat,
    SpecSheetHorizontalMerge, SpecXlsxReport,
};
use serde::{Deserialize, Serialize};

use crate::conf::{C_OUTPUT_PATH_DEFAULT, derive_default_company_details};

////////////////////////////////////////////////////////////////////////////////
// #region DatasetSpecification

/// One company row of the report dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecCompanyRecord {
    /// Company id.
    pub id: i64,
    /// Company display name.
    pub name: &'static str,
    /// ISO country code.
    pub country: &'static str,
    /// Stock price.
    pub stock_price: f64,
}

/// Label/value line of the company details block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecCompanyDetail {
    /// Text in column A.
    pub label: String,
    /// Text in column B.
    pub value: String,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ConfigSpecification

/// Sheet arrangement preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EnumReportLayout {
    /// Spaced sheet names, multiheader over the company columns.
    #[default]
    Classic,
    /// Underscored sheet names, company details block above the table.
    Detailed,
}

/// Document-wide font settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecReportStyle {
    pub font_name: String,
    pub font_size: i64,
    pub font_color: String,
}

impl Default for SpecReportStyle {
    fn default() -> Self {
        Self {
            font_name: C_FONT_NAME_DEFAULT.to_string(),
            font_size: N_FONT_SIZE_DEFAULT,
            font_color: C_FONT_COLOR_DEFAULT.to_string(),
        }
    }
}

impl SpecReportStyle {
    /// Base cell format every workbook preset is derived from.
    pub fn to_base_format(&self) -> SpecCellFormat {
        SpecCellFormat {
            font_name: Some(self.font_name.clone()),
            font_size: Some(self.font_size),
            font_color: Some(self.font_color.clone()),
            ..Default::default()
        }
    }
}

/// Full report-generation configuration; every key is optional in YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecReportConfig {
    /// Output workbook path.
    pub output: PathBuf,
    /// Layout preset.
    pub layout: EnumReportLayout,
    /// Font settings.
    pub style: SpecReportStyle,
    /// Lines of the company details block (detailed layout only).
    pub company_details: Vec<SpecCompanyDetail>,
}

impl Default for SpecReportConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(C_OUTPUT_PATH_DEFAULT),
            layout: EnumReportLayout::default(),
            style: SpecReportStyle::default(),
            company_details: derive_default_company_details(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region LayoutSpecification

/// Merged title and label/value rows placed above the company table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecDetailsBlock {
    /// Merged title over columns `0..=col_idx_end` at `row_idx`.
    pub title: SpecSheetHorizontalMerge,
    /// Title cell format patch.
    pub fmt_title: SpecCellFormat,
    /// Empty rows between the last detail line and the table header.
    pub n_rows_gap: usize,
}

/// Fixed sheet names, cells and widths of one report arrangement.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecReportLayout {
    pub kind: EnumReportLayout,

    pub sheet_front_page: String,
    pub sheet_report: String,
    pub sheet_summary: String,

    /// Title in `A1` of the front page.
    pub front_page_title: String,
    /// Width of column A on the front page.
    pub front_page_col_width: f64,
    /// Cells holding the table-of-contents links, report first.
    pub front_page_link_cells: [String; 2],

    /// Cell of the link back to the front page on data sheets.
    pub back_link_cell: String,
    pub back_link_text: String,

    /// Header row of the company table when no details block is present.
    pub report_start_row: usize,
    /// Header row of the summary table.
    pub summary_start_row: usize,

    /// Column holding the price on the company table.
    pub col_price_report: String,
    /// Column holding the price on the summary table.
    pub col_price_summary: String,

    pub report_col_widths: BTreeMap<usize, f64>,
    pub summary_col_widths: BTreeMap<usize, f64>,

    /// Merged header above the company table.
    pub report_multiheader: Option<SpecSheetHorizontalMerge>,
    /// Multiheader format patch.
    pub fmt_multiheader: SpecCellFormat,
    /// Details block above the company table.
    pub details_block: Option<SpecDetailsBlock>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region OutcomeSpecification

/// Result of one report-generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecReportOutcome {
    /// Written workbook path.
    pub path: PathBuf,
    /// Layout used.
    pub layout: EnumReportLayout,
    /// Per-sheet reports in workbook order.
    pub sheets: Vec<SpecXlsxReport>,
}

impl SpecReportOutcome {
    /// All non-fatal warnings, prefixed with their sheet name.
    pub fn warnings(&self) -> Vec<String> {
        self.sheets
            .iter()
            .flat_map(|report| {
                report
                    .warnings
                    .iter()
                    .map(move |c_warn| format!("[{}] {c_warn}", report.sheet_name))
            })
            .collect()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
