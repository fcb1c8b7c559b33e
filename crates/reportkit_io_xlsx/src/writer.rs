//! XLSX writer kernel that lays out DataFrames and report chrome in a workbook.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use rust_xlsxwriter::{
    Format, FormatAlign, FormatBorder, Table, TableColumn, Url, Workbook, Worksheet,
};
use tracing::{debug, info};

use crate::conf::{EnumFmtKey, N_LEN_EXCEL_SHEET_NAME_MAX};
use crate::error::{ErrorXlsx, ResultXlsx};
use crate::spec::{
    EnumCellValue, SpecCellFormat, SpecDataFrameWriteOptions, SpecSheetHorizontalMerge,
    SpecSheetLink, SpecTableRegion, SpecXlsxReport,
};
use crate::util::{
    derive_cell_value_from_any_value, derive_internal_link, derive_table_region,
    parse_cell_ref, sanitize_sheet_name, select_sorted_indices_from_refs,
    validate_unique_columns,
};

/// Inputs of [`plan_column_formats`]: column classes and the presets to pick from.
pub struct SpecColumnFormatPlanOptions<'a> {
    /// Number of columns written.
    pub width_data: usize,
    /// Numeric column indices.
    pub cols_idx_numeric: &'a [usize],
    /// Integer column indices.
    pub cols_idx_integer: &'a [usize],
    /// Explicit decimal column indices; all non-integer numerics when `None`.
    pub cols_idx_decimal: Option<&'a [usize]>,
    /// Base text format.
    pub fmt_text: &'a SpecCellFormat,
    /// Base integer format.
    pub fmt_integer: &'a SpecCellFormat,
    /// Base decimal format.
    pub fmt_decimal: &'a SpecCellFormat,
}

/// Stateful workbook writer.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    fmt_text: SpecCellFormat,
    fmt_integer: SpecCellFormat,
    fmt_decimal: SpecCellFormat,
    fmt_header: SpecCellFormat,
    set_sheet_names_existing: BTreeSet<String>,
    l_reports: Vec<SpecXlsxReport>,
    l_links: Vec<(String, SpecSheetLink)>,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path and format/options presets.
    ///
    /// The workbook is buffered in memory until [`Self::close`] is called.
    pub fn new(
        path_file_out: PathBuf,
        fmt_text: SpecCellFormat,
        fmt_integer: SpecCellFormat,
        fmt_decimal: SpecCellFormat,
        fmt_header: SpecCellFormat,
    ) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            fmt_text,
            fmt_integer,
            fmt_decimal,
            fmt_header,
            set_sheet_names_existing: BTreeSet::new(),
            l_reports: Vec::new(),
            l_links: Vec::new(),
            if_closed: false,
        }
    }

    /// Return output file path.
    pub fn file_out(&self) -> &Path {
        &self.path_file_out
    }

    /// Return immutable snapshot of per-sheet write reports, in sheet order.
    pub fn report(&self) -> Vec<SpecXlsxReport> {
        self.l_reports.clone()
    }

    /// Format preset bound to `key`.
    pub fn fmt_preset(&self, key: EnumFmtKey) -> &SpecCellFormat {
        match key {
            EnumFmtKey::Text => &self.fmt_text,
            EnumFmtKey::Integer => &self.fmt_integer,
            EnumFmtKey::Decimal => &self.fmt_decimal,
            EnumFmtKey::Header => &self.fmt_header,
        }
    }

    /// Validate pending links and flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> ResultXlsx<()> {
        if self.if_closed {
            return Ok(());
        }

        for (sheet_name, link) in &self.l_links {
            if !self.set_sheet_names_existing.contains(&link.target_sheet) {
                return Err(ErrorXlsx::Validation(format!(
                    "Link in {sheet_name:?}!{} points to missing sheet {:?}",
                    link.cell, link.target_sheet
                )));
            }
        }

        self.workbook.save(&self.path_file_out)?;
        self.if_closed = true;
        info!(
            path = %self.path_file_out.display(),
            n_sheets = self.l_reports.len(),
            "workbook saved"
        );
        Ok(())
    }

    /// Add a worksheet and return its actual (sanitized, unique) name.
    pub fn add_sheet(&mut self, sheet_name: &str) -> ResultXlsx<String> {
        self.validate_open()?;

        let c_name_sanitized = sanitize_sheet_name(sheet_name, "_");
        let sheet_name_unique = self.derive_unique_sheet_name(&c_name_sanitized);

        // Name is claimed only once the worksheet accepts it.
        let mut worksheet = Worksheet::new();
        worksheet.set_name(&sheet_name_unique)?;
        self.workbook.push_worksheet(worksheet);
        self.set_sheet_names_existing.insert(sheet_name_unique.clone());

        let mut report = SpecXlsxReport {
            sheet_name: sheet_name_unique.clone(),
            ..Default::default()
        };
        if sheet_name_unique != sheet_name {
            report.warn(format!(
                "Sheet name {sheet_name:?} written as {sheet_name_unique:?}."
            ));
        }
        self.l_reports.push(report);

        debug!(sheet = %sheet_name_unique, "added worksheet");
        Ok(sheet_name_unique)
    }

    /// Write a text cell; `fmt` defaults to the text preset.
    pub fn write_text(
        &mut self,
        sheet_name: &str,
        cell: &str,
        text: &str,
        fmt: Option<&SpecCellFormat>,
    ) -> ResultXlsx<()> {
        self.validate_open()?;
        let (n_row, n_col) = parse_cell_ref(cell)?;
        let format = derive_rust_xlsx_format(fmt.unwrap_or(&self.fmt_text));

        let worksheet = self.derive_worksheet(sheet_name)?;
        worksheet.write_string_with_format(
            cast_row_num(n_row)?,
            cast_col_num(n_col)?,
            text,
            &format,
        )?;
        Ok(())
    }

    /// Write `label | value` rows starting at `start_row`, column A/B.
    ///
    /// Returns the first row below the block.
    pub fn write_rows(
        &mut self,
        sheet_name: &str,
        start_row: usize,
        rows: &[(String, String)],
        fmt: Option<&SpecCellFormat>,
    ) -> ResultXlsx<usize> {
        self.validate_open()?;
        let format = derive_rust_xlsx_format(fmt.unwrap_or(&self.fmt_text));

        let worksheet = self.derive_worksheet(sheet_name)?;
        for (n_offset, (c_label, c_value)) in rows.iter().enumerate() {
            let n_row = cast_row_num(start_row + n_offset)?;
            worksheet.write_string_with_format(n_row, 0, c_label, &format)?;
            worksheet.write_string_with_format(n_row, 1, c_value, &format)?;
        }

        debug!(sheet = %sheet_name, start_row, n_rows = rows.len(), "wrote rows");
        Ok(start_row + rows.len())
    }

    /// Write `df` with its header at `start_row`; return the covered region.
    pub fn write_dataframe(
        &mut self,
        sheet_name: &str,
        df: &DataFrame,
        start_row: usize,
        options: &SpecDataFrameWriteOptions,
    ) -> ResultXlsx<SpecTableRegion> {
        self.validate_open()?;

        let l_colnames_df: Vec<String> = df
            .get_column_names_str()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        validate_unique_columns(&l_colnames_df)?;

        let region = derive_table_region(
            start_row,
            options.start_col,
            df.height(),
            l_colnames_df.len(),
        )?;

        let l_cols_idx_numeric = derive_numeric_column_indices(df);
        let l_cols_idx_integer = derive_integer_column_indices(df, &l_cols_idx_numeric);
        let l_cols_idx_decimal_specified =
            select_sorted_indices_from_refs(&l_colnames_df, options.cols_decimal.as_deref())?;

        let l_fmt_data_by_col: Vec<Format> = plan_column_formats(SpecColumnFormatPlanOptions {
            width_data: l_colnames_df.len(),
            cols_idx_numeric: &l_cols_idx_numeric,
            cols_idx_integer: &l_cols_idx_integer,
            cols_idx_decimal: if l_cols_idx_decimal_specified.is_empty() {
                None
            } else {
                Some(&l_cols_idx_decimal_specified)
            },
            fmt_text: &self.fmt_text,
            fmt_integer: &self.fmt_integer,
            fmt_decimal: &self.fmt_decimal,
        })
        .iter()
        .map(derive_rust_xlsx_format)
        .collect();
        let fmt_header = derive_rust_xlsx_format(&self.fmt_header);

        let worksheet = derive_worksheet(
            &mut self.workbook,
            &self.set_sheet_names_existing,
            sheet_name,
        )?;

        for (n_idx_col, c_colname) in l_colnames_df.iter().enumerate() {
            worksheet.write_string_with_format(
                cast_row_num(region.first_row)?,
                cast_col_num(region.first_col + n_idx_col)?,
                c_colname,
                &fmt_header,
            )?;
        }

        for (n_idx_col, col) in df.get_columns().iter().enumerate() {
            for n_row_local in 0..df.height() {
                let value = derive_cell_value_from_any_value(col.get(n_row_local)?);
                write_cell_with_format(
                    worksheet,
                    region.first_row + 1 + n_row_local,
                    region.first_col + n_idx_col,
                    &value,
                    &l_fmt_data_by_col[n_idx_col],
                )?;
            }
        }

        self.derive_report_mut(sheet_name)?.tables.push(region);
        debug!(sheet = %sheet_name, ?region, "wrote dataframe");
        Ok(region)
    }

    /// Write a same-document hyperlink to `A1` of `link.target_sheet`.
    ///
    /// The target may be added later; it is checked on [`Self::close`].
    pub fn write_link(&mut self, sheet_name: &str, link: &SpecSheetLink) -> ResultXlsx<()> {
        self.validate_open()?;
        let (n_row, n_col) = parse_cell_ref(&link.cell)?;
        let url = Url::new(derive_internal_link(&link.target_sheet));

        let worksheet = self.derive_worksheet(sheet_name)?;
        worksheet.write_url_with_text(
            cast_row_num(n_row)?,
            cast_col_num(n_col)?,
            url,
            link.text.as_str(),
        )?;

        self.l_links.push((sheet_name.to_string(), link.clone()));
        debug!(sheet = %sheet_name, cell = %link.cell, target = %link.target_sheet, "wrote link");
        Ok(())
    }

    /// Apply `fmt` as the default format of one whole column.
    pub fn set_column_format(
        &mut self,
        sheet_name: &str,
        col_idx: usize,
        fmt: &SpecCellFormat,
    ) -> ResultXlsx<()> {
        self.validate_open()?;
        let format = derive_rust_xlsx_format(fmt);

        let worksheet = self.derive_worksheet(sheet_name)?;
        worksheet.set_column_format(cast_col_num(col_idx)?, &format)?;
        Ok(())
    }

    /// Change widths of the listed columns only.
    pub fn set_column_widths(
        &mut self,
        sheet_name: &str,
        dict_col_width: &BTreeMap<usize, f64>,
    ) -> ResultXlsx<()> {
        self.validate_open()?;

        let worksheet = self.derive_worksheet(sheet_name)?;
        for (n_idx_col, n_width) in dict_col_width {
            worksheet.set_column_width(cast_col_num(*n_idx_col)?, *n_width)?;
        }
        Ok(())
    }

    /// Format `region` as an Excel table with `headers` as column names.
    pub fn format_as_table(
        &mut self,
        sheet_name: &str,
        region: &SpecTableRegion,
        headers: &[String],
    ) -> ResultXlsx<()> {
        self.validate_open()?;
        if headers.len() != region.width() {
            return Err(ErrorXlsx::Validation(format!(
                "Table has {} headers but region is {} columns wide.",
                headers.len(),
                region.width()
            )));
        }
        if region.height_body() == 0 {
            return Err(ErrorXlsx::Validation(
                "Table region must contain at least one body row.".to_string(),
            ));
        }

        let fmt_header = derive_rust_xlsx_format(&self.fmt_header);
        let l_columns: Vec<TableColumn> = headers
            .iter()
            .map(|c_header| {
                TableColumn::new()
                    .set_header(c_header)
                    .set_header_format(fmt_header.clone())
            })
            .collect();
        let table = Table::new().set_columns(&l_columns);

        let worksheet = self.derive_worksheet(sheet_name)?;
        worksheet.add_table(
            cast_row_num(region.first_row)?,
            cast_col_num(region.first_col)?,
            cast_row_num(region.last_row)?,
            cast_col_num(region.last_col)?,
            &table,
        )?;

        debug!(sheet = %sheet_name, ?region, "formatted table");
        Ok(())
    }

    /// Freeze the top `n_rows` rows.
    pub fn freeze_rows(&mut self, sheet_name: &str, n_rows: usize) -> ResultXlsx<()> {
        self.validate_open()?;

        let worksheet = self.derive_worksheet(sheet_name)?;
        worksheet.set_freeze_panes(cast_row_num(n_rows)?, 0)?;
        Ok(())
    }

    /// Merge one horizontal run of cells and write `merge.text` into it.
    pub fn merge_header(
        &mut self,
        sheet_name: &str,
        merge: &SpecSheetHorizontalMerge,
        fmt: &SpecCellFormat,
    ) -> ResultXlsx<()> {
        self.validate_open()?;
        if merge.col_idx_end <= merge.col_idx_start {
            return Err(ErrorXlsx::Validation(format!(
                "Merge must span at least two columns: {merge:?}"
            )));
        }
        let format = derive_rust_xlsx_format(fmt);

        let worksheet = self.derive_worksheet(sheet_name)?;
        worksheet.merge_range(
            cast_row_num(merge.row_idx_start)?,
            cast_col_num(merge.col_idx_start)?,
            cast_row_num(merge.row_idx_start)?,
            cast_col_num(merge.col_idx_end)?,
            &merge.text,
            &format,
        )?;
        Ok(())
    }

    fn validate_open(&self) -> ResultXlsx<()> {
        if self.if_closed {
            return Err(ErrorXlsx::Closed);
        }
        Ok(())
    }

    fn derive_worksheet(&mut self, sheet_name: &str) -> ResultXlsx<&mut Worksheet> {
        derive_worksheet(
            &mut self.workbook,
            &self.set_sheet_names_existing,
            sheet_name,
        )
    }

    fn derive_report_mut(&mut self, sheet_name: &str) -> ResultXlsx<&mut SpecXlsxReport> {
        self.l_reports
            .iter_mut()
            .find(|report| report.sheet_name == sheet_name)
            .ok_or_else(|| ErrorXlsx::UnknownSheet(sheet_name.to_string()))
    }

    /// Excel compares sheet names case-insensitively.
    fn if_sheet_name_taken(&self, name: &str) -> bool {
        let c_name_lower = name.to_lowercase();
        self.set_sheet_names_existing
            .iter()
            .any(|c_existing| c_existing.to_lowercase() == c_name_lower)
    }

    fn derive_unique_sheet_name(&self, name: &str) -> String {
        if !self.if_sheet_name_taken(name) {
            return name.to_string();
        }

        let mut n_idx = 2usize;
        loop {
            let c_suffix = format!("__{n_idx}");
            let base_name: String = name
                .chars()
                .take(N_LEN_EXCEL_SHEET_NAME_MAX.saturating_sub(c_suffix.len()))
                .collect();
            let candidate = format!("{base_name}{c_suffix}");
            if !self.if_sheet_name_taken(&candidate) {
                return candidate;
            }
            n_idx += 1;
        }
    }
}

fn derive_worksheet<'a>(
    workbook: &'a mut Workbook,
    set_sheet_names_existing: &BTreeSet<String>,
    sheet_name: &str,
) -> ResultXlsx<&'a mut Worksheet> {
    if !set_sheet_names_existing.contains(sheet_name) {
        return Err(ErrorXlsx::UnknownSheet(sheet_name.to_string()));
    }
    Ok(workbook.worksheet_from_name(sheet_name)?)
}

/// Pick the integer, decimal or text preset for each column.
pub fn plan_column_formats(options: SpecColumnFormatPlanOptions<'_>) -> Vec<SpecCellFormat> {
    let SpecColumnFormatPlanOptions {
        width_data,
        cols_idx_numeric,
        cols_idx_integer,
        cols_idx_decimal,
        fmt_text,
        fmt_integer,
        fmt_decimal,
    } = options;

    let set_cols_idx_numeric: BTreeSet<usize> = cols_idx_numeric.iter().copied().collect();
    let set_cols_idx_integer: BTreeSet<usize> = cols_idx_integer.iter().copied().collect();
    let set_cols_idx_decimal: Option<BTreeSet<usize>> =
        cols_idx_decimal.map(|vals| vals.iter().copied().collect());

    (0..width_data)
        .map(|col_idx| {
            if set_cols_idx_integer.contains(&col_idx) {
                fmt_integer.clone()
            } else if set_cols_idx_decimal
                .as_ref()
                .map_or(set_cols_idx_numeric.contains(&col_idx), |set_idx| {
                    set_idx.contains(&col_idx)
                })
            {
                fmt_decimal.clone()
            } else {
                fmt_text.clone()
            }
        })
        .collect()
}

fn derive_numeric_column_indices(df: &DataFrame) -> Vec<usize> {
    df.get_columns()
        .iter()
        .enumerate()
        .filter(|(_, c_col)| c_col.dtype().is_numeric())
        .map(|(n_idx, _)| n_idx)
        .collect()
}

fn derive_integer_column_indices(df: &DataFrame, cols_idx_numeric: &[usize]) -> Vec<usize> {
    cols_idx_numeric
        .iter()
        .copied()
        .filter(|n_idx| df.get_columns()[*n_idx].dtype().is_integer())
        .collect()
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
) -> ResultXlsx<()> {
    let n_row = cast_row_num(row_idx)?;
    let n_col = cast_col_num(col_idx)?;
    match value {
        EnumCellValue::None => {
            worksheet.write_blank(n_row, n_col, format)?;
        }
        EnumCellValue::String(val) => {
            worksheet.write_string_with_format(n_row, n_col, val, format)?;
        }
        EnumCellValue::Number(val) => {
            worksheet.write_number_with_format(n_row, n_col, *val, format)?;
        }
    }
    Ok(())
}

/// Translate a format spec into a `rust_xlsxwriter` format.
pub fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    if spec.italic.unwrap_or(false) {
        format = format.set_italic();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }
    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }
    if let Some(val) = &spec.font_color {
        format = format.set_font_color(val.as_str());
    }
    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }
    if spec.text_wrap.unwrap_or(false) {
        format = format.set_text_wrap();
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        7 => FormatBorder::Hair,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> ResultXlsx<u32> {
    u32::try_from(value).map_err(|_| ErrorXlsx::Validation(format!("row index overflow: {value}")))
}

fn cast_col_num(value: usize) -> ResultXlsx<u16> {
    u16::try_from(value)
        .map_err(|_| ErrorXlsx::Validation(format!("column index overflow: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::derive_default_xlsx_formats;
    use calamine::{Reader, Xlsx, open_workbook};

    fn create_writer(path_file_out: PathBuf) -> XlsxWriter {
        let dict_fmt = derive_default_xlsx_formats();
        XlsxWriter::new(
            path_file_out,
            dict_fmt[EnumFmtKey::Text.as_str()].clone(),
            dict_fmt[EnumFmtKey::Integer.as_str()].clone(),
            dict_fmt[EnumFmtKey::Decimal.as_str()].clone(),
            dict_fmt[EnumFmtKey::Header.as_str()].clone(),
        )
    }

    #[test]
    fn test_plan_column_formats_explicit_decimal() {
        let dict_fmt = derive_default_xlsx_formats();
        let l_fmts = plan_column_formats(SpecColumnFormatPlanOptions {
            width_data: 4,
            cols_idx_numeric: &[0, 3],
            cols_idx_integer: &[0],
            cols_idx_decimal: Some(&[3]),
            fmt_text: &dict_fmt["text"],
            fmt_integer: &dict_fmt["integer"],
            fmt_decimal: &dict_fmt["decimal"],
        });

        assert_eq!(l_fmts[0].num_format.as_deref(), Some("0"));
        assert_eq!(l_fmts[1], dict_fmt["text"]);
        assert_eq!(l_fmts[2], dict_fmt["text"]);
        assert_eq!(l_fmts[3].num_format.as_deref(), Some("0.00"));
        assert_eq!(l_fmts[3].italic, Some(true));
    }

    #[test]
    fn test_plan_column_formats_infers_decimal_from_numeric() {
        let dict_fmt = derive_default_xlsx_formats();
        let l_fmts = plan_column_formats(SpecColumnFormatPlanOptions {
            width_data: 3,
            cols_idx_numeric: &[1, 2],
            cols_idx_integer: &[2],
            cols_idx_decimal: None,
            fmt_text: &dict_fmt["text"],
            fmt_integer: &dict_fmt["integer"],
            fmt_decimal: &dict_fmt["decimal"],
        });

        assert_eq!(l_fmts[0], dict_fmt["text"]);
        assert_eq!(l_fmts[1], dict_fmt["decimal"]);
        assert_eq!(l_fmts[2], dict_fmt["integer"]);
    }

    #[test]
    fn test_add_sheet_sanitizes_and_deduplicates() {
        let mut writer = create_writer(PathBuf::from("unused.xlsx"));
        assert_eq!(writer.add_sheet("Summary").unwrap(), "Summary");
        assert_eq!(writer.add_sheet("Summary").unwrap(), "Summary__2");
        assert_eq!(writer.add_sheet("a/b").unwrap(), "a_b");

        let l_reports = writer.report();
        assert_eq!(l_reports.len(), 3);
        assert!(l_reports[0].warnings.is_empty());
        assert_eq!(l_reports[1].warnings.len(), 1);
        assert_eq!(l_reports[2].warnings.len(), 1);
    }

    #[test]
    fn test_add_sheet_deduplicates_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = create_writer(dir.path().join("case.xlsx"));
        assert_eq!(writer.add_sheet("Summary").unwrap(), "Summary");
        assert_eq!(writer.add_sheet("SUMMARY").unwrap(), "SUMMARY__2");
        assert_eq!(writer.add_sheet("summary__2").unwrap(), "summary__3");

        writer.close().unwrap();
        assert_eq!(writer.report().len(), 3);
    }

    #[test]
    fn test_add_sheet_long_name_never_ends_with_apostrophe() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = create_writer(dir.path().join("long.xlsx"));
        let c_name = format!("{}'bc", "a".repeat(30));

        let c_first = writer.add_sheet(&c_name).unwrap();
        assert_eq!(c_first, "a".repeat(30));
        let c_second = writer.add_sheet(&c_name).unwrap();
        assert_eq!(c_second, format!("{}__2", "a".repeat(28)));

        writer.close().unwrap();
        assert_eq!(writer.report().len(), 2);

        let workbook: Xlsx<_> = open_workbook(dir.path().join("long.xlsx")).unwrap();
        assert_eq!(workbook.sheet_names(), vec![c_first, c_second]);
    }

    #[test]
    fn test_unknown_sheet_is_rejected() {
        let mut writer = create_writer(PathBuf::from("unused.xlsx"));
        let err = writer.write_text("Missing", "A1", "x", None).unwrap_err();
        assert!(matches!(err, ErrorXlsx::UnknownSheet(ref name) if name == "Missing"));
    }

    #[test]
    fn test_merge_header_requires_two_columns() {
        let mut writer = create_writer(PathBuf::from("unused.xlsx"));
        writer.add_sheet("Report").unwrap();
        let merge = SpecSheetHorizontalMerge {
            row_idx_start: 0,
            col_idx_start: 1,
            col_idx_end: 1,
            text: "Company information".to_string(),
        };
        let err = writer
            .merge_header("Report", &merge, &SpecCellFormat::default())
            .unwrap_err();
        assert!(matches!(err, ErrorXlsx::Validation(_)));
    }

    #[test]
    fn test_close_rejects_dangling_link() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = create_writer(dir.path().join("dangling.xlsx"));
        writer.add_sheet("Front Page").unwrap();
        writer
            .write_link(
                "Front Page",
                &SpecSheetLink {
                    cell: "A2".to_string(),
                    target_sheet: "Company_Report".to_string(),
                    text: "Company_Report".to_string(),
                },
            )
            .unwrap();

        let err = writer.close().unwrap_err();
        assert!(err.to_string().contains("Company_Report"));
        assert!(!dir.path().join("dangling.xlsx").exists());
    }

    #[test]
    fn test_write_after_close_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = create_writer(dir.path().join("closed.xlsx"));
        writer.add_sheet("Summary").unwrap();
        writer.close().unwrap();
        writer.close().unwrap();

        assert!(matches!(writer.add_sheet("Other"), Err(ErrorXlsx::Closed)));
        assert!(dir.path().join("closed.xlsx").exists());
    }
}
