//! Shared XLSX specification models.

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification; `None` fields inherit from the merge base.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Italic style.
    pub italic: Option<bool>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,
    /// Text wrap.
    pub text_wrap: Option<bool>,

    /// Number format code.
    pub num_format: Option<String>,
    /// Background fill color.
    pub bg_color: Option<String>,
    /// Font color.
    pub font_color: Option<String>,
}

/// Normalized cell value during conversion/write pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
            text_wrap: other.text_wrap.or(self.text_wrap),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WriteOptions

/// Per-dataframe call options for [`crate::writer::XlsxWriter::write_dataframe`].
#[derive(Debug, Clone, Default)]
pub struct SpecDataFrameWriteOptions {
    /// Columns forced to the decimal preset, by name or index-string.
    pub cols_decimal: Option<Vec<String>>,
    /// First column of the written block.
    pub start_col: usize,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetGeometrySpecification

/// Inclusive rectangular cell region covering a table header and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecTableRegion {
    /// Header row index.
    pub first_row: usize,
    /// Leftmost column index.
    pub first_col: usize,
    /// Last body row index (equals `first_row` for a header-only table).
    pub last_row: usize,
    /// Rightmost column index.
    pub last_col: usize,
}

impl SpecTableRegion {
    /// Number of body rows below the header.
    pub fn height_body(&self) -> usize {
        self.last_row - self.first_row
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.last_col - self.first_col + 1
    }

    /// First row below the region.
    pub fn row_after(&self) -> usize {
        self.last_row + 1
    }
}

/// Horizontal merge plan item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetHorizontalMerge {
    /// Row index where merge is applied.
    pub row_idx_start: usize,
    /// Start column index (inclusive).
    pub col_idx_start: usize,
    /// End column index (inclusive).
    pub col_idx_end: usize,
    /// Merge display text.
    pub text: String,
}

/// Same-document hyperlink placed in one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetLink {
    /// A1-style anchor cell, e.g. `A2`.
    pub cell: String,
    /// Target sheet name; the link jumps to its `A1`.
    pub target_sheet: String,
    /// Display text.
    pub text: String,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per-sheet write report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Actual sheet name in workbook.
    pub sheet_name: String,
    /// Table regions written to the sheet, in write order.
    pub tables: Vec<SpecTableRegion>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_right_side_wins() {
        let fmt_base = SpecCellFormat {
            font_name: Some("Open Sans".to_string()),
            italic: Some(false),
            ..Default::default()
        };
        let fmt = fmt_base.with_(SpecCellFormat {
            italic: Some(true),
            bg_color: Some("#c4c4c4".to_string()),
            ..Default::default()
        });

        assert_eq!(fmt.font_name.as_deref(), Some("Open Sans"));
        assert_eq!(fmt.italic, Some(true));
        assert_eq!(fmt.bg_color.as_deref(), Some("#c4c4c4"));
        assert_eq!(fmt.bold, None);
    }

    #[test]
    fn test_table_region_dimensions() {
        let region = SpecTableRegion {
            first_row: 5,
            first_col: 0,
            last_row: 8,
            last_col: 3,
        };
        assert_eq!(region.height_body(), 3);
        assert_eq!(region.width(), 4);
        assert_eq!(region.row_after(), 9);
    }
}
