//! Report constants, layout presets and config loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use reportkit_io_xlsx::{SpecCellFormat, SpecSheetHorizontalMerge};
use tracing::debug;

use crate::error::{ErrorReport, ResultReport};
use crate::spec::{
    EnumReportLayout, SpecCompanyDetail, SpecCompanyRecord, SpecDetailsBlock, SpecReportConfig,
    SpecReportLayout,
};

/// Default output workbook path.
pub const C_OUTPUT_PATH_DEFAULT: &str = "report.xlsx";

/// Company dataset column names, in column order.
pub const C_COL_ID: &str = "id";
pub const C_COL_NAME: &str = "name";
pub const C_COL_COUNTRY: &str = "country";
pub const C_COL_STOCK_PRICE: &str = "stock_price";
/// Renamed aggregate column of the summary dataset.
pub const C_COL_MEAN_STOCK_PRICE: &str = "mean_stock_price";

/// Hard-coded company rows.
pub const TUP_COMPANY_RECORDS: [SpecCompanyRecord; 3] = [
    SpecCompanyRecord {
        id: 14,
        name: "Cookie Corp.",
        country: "FR",
        stock_price: 152.501,
    },
    SpecCompanyRecord {
        id: 82,
        name: "Chocolate Inc.",
        country: "DE",
        stock_price: 99.00,
    },
    SpecCompanyRecord {
        id: 5,
        name: "Banana AG",
        country: "FR",
        stock_price: 45.12,
    },
];

/// Default company details block.
pub fn derive_default_company_details() -> Vec<SpecCompanyDetail> {
    [
        ("Company Name", "ACME Corp."),
        ("Report Date", "2024-05-08"),
        ("Author", "Jane Doe"),
    ]
    .into_iter()
    .map(|(label, value)| SpecCompanyDetail {
        label: label.to_string(),
        value: value.to_string(),
    })
    .collect()
}

fn derive_col_widths(l_widths: &[(usize, f64)]) -> BTreeMap<usize, f64> {
    l_widths.iter().copied().collect()
}

/// Build the sheet arrangement for `kind`.
pub fn derive_report_layout(kind: EnumReportLayout) -> SpecReportLayout {
    let layout_base = SpecReportLayout {
        kind,
        sheet_front_page: "Front Page".to_string(),
        sheet_report: "Company Report".to_string(),
        sheet_summary: "Summary".to_string(),
        front_page_title: "List of contents:".to_string(),
        front_page_col_width: 15.0,
        front_page_link_cells: ["A2".to_string(), "A3".to_string()],
        back_link_cell: "A1".to_string(),
        back_link_text: "Back to Front Page".to_string(),
        report_start_row: 1,
        summary_start_row: 1,
        col_price_report: C_COL_STOCK_PRICE.to_string(),
        col_price_summary: C_COL_MEAN_STOCK_PRICE.to_string(),
        report_col_widths: derive_col_widths(&[(0, 15.0), (1, 20.0), (2, 15.0), (3, 15.0)]),
        summary_col_widths: derive_col_widths(&[(0, 15.0), (1, 20.0)]),
        report_multiheader: None,
        fmt_multiheader: SpecCellFormat {
            bg_color: Some("#c4c4c4".to_string()),
            valign: Some("vcenter".to_string()),
            ..Default::default()
        },
        details_block: None,
    };

    match kind {
        EnumReportLayout::Classic => SpecReportLayout {
            report_multiheader: Some(SpecSheetHorizontalMerge {
                row_idx_start: 0,
                col_idx_start: 1,
                col_idx_end: 2,
                text: "Company information".to_string(),
            }),
            ..layout_base
        },
        EnumReportLayout::Detailed => SpecReportLayout {
            sheet_front_page: "Front_Page".to_string(),
            sheet_report: "Company_Report".to_string(),
            front_page_col_width: 20.0,
            back_link_text: "Back_to_Front_Page".to_string(),
            details_block: Some(SpecDetailsBlock {
                title: SpecSheetHorizontalMerge {
                    row_idx_start: 1,
                    col_idx_start: 0,
                    col_idx_end: 1,
                    text: "Company Details".to_string(),
                },
                fmt_title: SpecCellFormat {
                    bold: Some(true),
                    bg_color: Some("#d3d3d3".to_string()),
                    valign: Some("vcenter".to_string()),
                    ..Default::default()
                },
                n_rows_gap: 1,
            }),
            ..layout_base
        },
    }
}

/// Header row of the company table given the number of detail lines.
pub fn derive_report_start_row(layout: &SpecReportLayout, n_details: usize) -> usize {
    match &layout.details_block {
        Some(block) => block.title.row_idx_start + 1 + n_details + block.n_rows_gap,
        None => layout.report_start_row,
    }
}

/// Rows to freeze so a table header at `header_row` stays visible.
pub fn derive_freeze_rows(header_row: usize) -> usize {
    header_row + 1
}

/// Read a YAML config file; absent keys take their defaults.
pub fn load_report_config(path: &Path) -> ResultReport<SpecReportConfig> {
    let c_text = fs::read_to_string(path)?;
    let config = parse_report_config(&c_text)?;
    debug!(path = %path.display(), "loaded report config");
    Ok(config)
}

/// Parse YAML config text and validate it.
pub fn parse_report_config(c_text: &str) -> ResultReport<SpecReportConfig> {
    let config: SpecReportConfig = if c_text.trim().is_empty() {
        SpecReportConfig::default()
    } else {
        serde_yaml::from_str(c_text)?
    };
    validate_report_config(&config)?;
    Ok(config)
}

/// Reject settings the workbook cannot express.
pub fn validate_report_config(config: &SpecReportConfig) -> ResultReport<()> {
    if config.output.as_os_str().is_empty() {
        return Err(ErrorReport::Config("output path must not be empty".to_string()));
    }
    if config.style.font_name.trim().is_empty() {
        return Err(ErrorReport::Config("style.font_name must not be empty".to_string()));
    }
    if !(1..=409).contains(&config.style.font_size) {
        return Err(ErrorReport::Config(format!(
            "style.font_size must be within 1..=409, got {}",
            config.style.font_size
        )));
    }
    let c_color = config.style.font_color.trim_start_matches('#');
    if c_color.len() != 6 || !c_color.chars().all(|chr| chr.is_ascii_hexdigit()) {
        return Err(ErrorReport::Config(format!(
            "style.font_color must be #rrggbb, got {:?}",
            config.style.font_color
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classic_layout() {
        let layout = derive_report_layout(EnumReportLayout::Classic);
        assert_eq!(layout.sheet_front_page, "Front Page");
        assert_eq!(layout.sheet_report, "Company Report");
        assert_eq!(layout.back_link_text, "Back to Front Page");
        assert_eq!(layout.front_page_col_width, 15.0);
        assert!(layout.details_block.is_none());
        let merge = layout.report_multiheader.as_ref().unwrap();
        assert_eq!((merge.row_idx_start, merge.col_idx_start, merge.col_idx_end), (0, 1, 2));
        assert_eq!(derive_report_start_row(&layout, 3), 1);
    }

    #[test]
    fn test_detailed_layout() {
        let layout = derive_report_layout(EnumReportLayout::Detailed);
        assert_eq!(layout.sheet_front_page, "Front_Page");
        assert_eq!(layout.sheet_report, "Company_Report");
        assert_eq!(layout.sheet_summary, "Summary");
        assert_eq!(layout.back_link_text, "Back_to_Front_Page");
        assert_eq!(layout.front_page_col_width, 20.0);
        assert!(layout.report_multiheader.is_none());
        // back link row 0, title row 1, details rows 2..=4, gap row 5
        assert_eq!(derive_report_start_row(&layout, 3), 6);
        assert_eq!(derive_report_start_row(&layout, 0), 3);
    }

    #[test]
    fn test_shared_widths() {
        for kind in [EnumReportLayout::Classic, EnumReportLayout::Detailed] {
            let layout = derive_report_layout(kind);
            assert_eq!(
                layout.report_col_widths.into_iter().collect::<Vec<_>>(),
                vec![(0, 15.0), (1, 20.0), (2, 15.0), (3, 15.0)]
            );
            assert_eq!(
                layout.summary_col_widths.into_iter().collect::<Vec<_>>(),
                vec![(0, 15.0), (1, 20.0)]
            );
        }
    }

    #[test]
    fn test_parse_report_config_partial() {
        let config = parse_report_config(
            "layout: detailed\nstyle:\n  font_size: 12\ncompany_details:\n  - label: Author\n    value: Ada\n",
        )
        .unwrap();
        assert_eq!(config.layout, EnumReportLayout::Detailed);
        assert_eq!(config.style.font_size, 12);
        assert_eq!(config.style.font_name, "Open Sans");
        assert_eq!(config.output, std::path::PathBuf::from("report.xlsx"));
        assert_eq!(config.company_details.len(), 1);
    }

    #[test]
    fn test_parse_report_config_empty_is_default() {
        assert_eq!(parse_report_config("").unwrap(), SpecReportConfig::default());
        assert_eq!(SpecReportConfig::default().company_details.len(), 3);
    }

    #[test]
    fn test_parse_report_config_rejects_bad_values() {
        assert!(matches!(
            parse_report_config("layout: sideways\n"),
            Err(ErrorReport::Yaml(_))
        ));
        assert!(matches!(
            parse_report_config("colour: red\n"),
            Err(ErrorReport::Yaml(_))
        ));
        assert!(matches!(
            parse_report_config("style:\n  font_color: blue\n"),
            Err(ErrorReport::Config(_))
        ));
        assert!(matches!(
            parse_report_config("style:\n  font_size: 0\n"),
            Err(ErrorReport::Config(_))
        ));
    }
}
