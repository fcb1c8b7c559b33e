//! Report generation: datasets in, formatted workbook out.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use reportkit_io_xlsx::{
    EnumFmtKey, SpecDataFrameWriteOptions, SpecSheetLink, SpecTableRegion, XlsxWriter,
    derive_string_grid_from_dataframe, derive_xlsx_formats,
};
use tracing::{debug, info, warn};

use crate::aggregate::summarize_stock_price_by_country;
use crate::conf::{derive_freeze_rows, derive_report_layout, derive_report_start_row};
use crate::dataset::derive_company_dataframe;
use crate::error::{ErrorReport, ResultReport};
use crate::spec::{SpecReportConfig, SpecReportLayout, SpecReportOutcome};

/// Company rows and their per-country summary.
#[derive(Debug, Clone)]
pub struct SpecReportData {
    pub df_company: DataFrame,
    pub df_summary: DataFrame,
}

/// Build both report datasets.
pub fn derive_report_data() -> ResultReport<SpecReportData> {
    let df_company = derive_company_dataframe()?;
    let df_summary = summarize_stock_price_by_country(&df_company)?;
    Ok(SpecReportData {
        df_company,
        df_summary,
    })
}

fn create_writer(config: &SpecReportConfig) -> ResultReport<XlsxWriter> {
    let dict_fmt = derive_xlsx_formats(&config.style.to_base_format());
    let derive_fmt = |key: EnumFmtKey| {
        dict_fmt
            .get(key.as_str())
            .cloned()
            .ok_or_else(|| {
                ErrorReport::Config(format!("Missing format preset: {}", key.as_str()))
            })
    };

    Ok(XlsxWriter::new(
        config.output.clone(),
        derive_fmt(EnumFmtKey::Text)?,
        derive_fmt(EnumFmtKey::Integer)?,
        derive_fmt(EnumFmtKey::Decimal)?,
        derive_fmt(EnumFmtKey::Header)?,
    ))
}

fn derive_column_index(df: &DataFrame, c_col: &str) -> ResultReport<usize> {
    df.get_column_names_str()
        .iter()
        .position(|c_name| *c_name == c_col)
        .ok_or_else(|| ErrorReport::Data(format!("Column not found: {c_col:?}")))
}

fn derive_headers(df: &DataFrame) -> Vec<String> {
    df.get_column_names_str()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

/// Write front page, company report and summary sheets to `config.output`.
pub fn generate_report(config: &SpecReportConfig) -> ResultReport<SpecReportOutcome> {
    let layout = derive_report_layout(config.layout);
    info!(
        layout = ?layout.kind,
        path = %config.output.display(),
        "generating report"
    );

    let data = derive_report_data()?;
    let mut writer = create_writer(config)?;
    let fmt_base = config.style.to_base_format();

    // Sheets first so links resolve in workbook order.
    let sheet_front_page = writer.add_sheet(&layout.sheet_front_page)?;
    let sheet_report = writer.add_sheet(&layout.sheet_report)?;
    let sheet_summary = writer.add_sheet(&layout.sheet_summary)?;

    write_front_page(
        &mut writer,
        &layout,
        &sheet_front_page,
        [&sheet_report, &sheet_summary],
    )?;

    // Company report sheet
    let mut n_row_report_start = layout.report_start_row;
    if let Some(block) = &layout.details_block {
        writer.merge_header(
            &sheet_report,
            &block.title,
            &fmt_base.with_(block.fmt_title.clone()),
        )?;
        let l_rows: Vec<(String, String)> = config
            .company_details
            .iter()
            .map(|detail| (detail.label.clone(), detail.value.clone()))
            .collect();
        writer.write_rows(&sheet_report, block.title.row_idx_start + 1, &l_rows, None)?;
        n_row_report_start = derive_report_start_row(&layout, l_rows.len());
    }

    let region_report = write_data_sheet(
        &mut writer,
        &layout,
        &sheet_report,
        &sheet_front_page,
        &data.df_company,
        n_row_report_start,
        &layout.col_price_report,
        &layout.report_col_widths,
    )?;

    if let Some(merge) = &layout.report_multiheader {
        writer.merge_header(
            &sheet_report,
            merge,
            &fmt_base.with_(layout.fmt_multiheader.clone()),
        )?;
    }

    // Summary sheet
    let region_summary = write_data_sheet(
        &mut writer,
        &layout,
        &sheet_summary,
        &sheet_front_page,
        &data.df_summary,
        layout.summary_start_row,
        &layout.col_price_summary,
        &layout.summary_col_widths,
    )?;

    debug!(?region_report, ?region_summary, "data sheets written");

    writer.close()?;

    let outcome = SpecReportOutcome {
        path: writer.file_out().to_path_buf(),
        layout: layout.kind,
        sheets: writer.report(),
    };
    for c_warn in outcome.warnings() {
        warn!("{c_warn}");
    }
    Ok(outcome)
}

fn write_front_page(
    writer: &mut XlsxWriter,
    layout: &SpecReportLayout,
    sheet_front_page: &str,
    l_targets: [&String; 2],
) -> ResultReport<()> {
    writer.write_text(sheet_front_page, "A1", &layout.front_page_title, None)?;
    writer.set_column_widths(
        sheet_front_page,
        &BTreeMap::from([(0, layout.front_page_col_width)]),
    )?;

    for (c_cell, c_target) in layout.front_page_link_cells.iter().zip(l_targets) {
        writer.write_link(
            sheet_front_page,
            &SpecSheetLink {
                cell: c_cell.clone(),
                target_sheet: c_target.clone(),
                text: c_target.clone(),
            },
        )?;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn write_data_sheet(
    writer: &mut XlsxWriter,
    layout: &SpecReportLayout,
    sheet_name: &str,
    sheet_front_page: &str,
    df: &DataFrame,
    start_row: usize,
    c_col_price: &str,
    dict_col_width: &BTreeMap<usize, f64>,
) -> ResultReport<SpecTableRegion> {
    let n_idx_col_price = derive_column_index(df, c_col_price)?;

    let region = writer.write_dataframe(
        sheet_name,
        df,
        start_row,
        &SpecDataFrameWriteOptions {
            cols_decimal: Some(vec![c_col_price.to_string()]),
            ..Default::default()
        },
    )?;

    writer.write_link(
        sheet_name,
        &SpecSheetLink {
            cell: layout.back_link_cell.clone(),
            target_sheet: sheet_front_page.to_string(),
            text: layout.back_link_text.clone(),
        },
    )?;

    let fmt_price = writer.fmt_preset(EnumFmtKey::Decimal).clone();
    writer.set_column_format(sheet_name, region.first_col + n_idx_col_price, &fmt_price)?;

    writer.format_as_table(sheet_name, &region, &derive_headers(df))?;
    writer.set_column_widths(sheet_name, dict_col_width)?;
    writer.freeze_rows(sheet_name, derive_freeze_rows(region.first_row))?;

    Ok(region)
}

/// Plain-text rendering of both datasets, tab separated.
pub fn render_preview(data: &SpecReportData) -> ResultReport<String> {
    let mut l_lines = Vec::new();
    for (c_title, df) in [
        ("Company Report", &data.df_company),
        ("Summary", &data.df_summary),
    ] {
        l_lines.push(format!("# {c_title}"));
        l_lines.push(derive_headers(df).join("\t"));
        for row in derive_string_grid_from_dataframe(df)? {
            l_lines.push(row.join("\t"));
        }
        l_lines.push(String::new());
    }
    Ok(l_lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_preview() {
        let c_text = render_preview(&derive_report_data().unwrap()).unwrap();
        let l_lines: Vec<&str> = c_text.lines().collect();

        assert_eq!(l_lines[0], "# Company Report");
        assert_eq!(l_lines[1], "id\tname\tcountry\tstock_price");
        assert_eq!(l_lines[2], "14\tCookie Corp.\tFR\t152.501");
        assert_eq!(l_lines[6], "# Summary");
        assert_eq!(l_lines[7], "country\tmean_stock_price");
        assert!(l_lines[8].starts_with("DE\t99"));
        assert!(l_lines[9].starts_with("FR\t98.8"));
    }

    #[test]
    fn test_derive_column_index() {
        let data = derive_report_data().unwrap();
        assert_eq!(derive_column_index(&data.df_company, "stock_price").unwrap(), 3);
        assert_eq!(derive_column_index(&data.df_summary, "mean_stock_price").unwrap(), 1);
        assert!(derive_column_index(&data.df_summary, "stock_price").is_err());
    }
}
