//! XLSX constants and default preset factories.

use std::collections::BTreeMap;

use crate::spec::SpecCellFormat;

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Document-wide font family.
pub const C_FONT_NAME_DEFAULT: &str = "Open Sans";
/// Document-wide font size in points.
pub const N_FONT_SIZE_DEFAULT: i64 = 10;
/// Document-wide font color.
pub const C_FONT_COLOR_DEFAULT: &str = "#3b3b3b";
/// Excel built-in number format 2: always two decimal places.
pub const C_NUM_FORMAT_TWO_DECIMALS: &str = "0.00";

/// Canonical format preset keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EnumFmtKey {
    /// Generic text cell format.
    Text,
    /// Integer number format.
    Integer,
    /// Decimal number format.
    Decimal,
    /// Table header cell format.
    Header,
}

impl EnumFmtKey {
    /// Preset key as used in the default format map.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnumFmtKey::Text => "text",
            EnumFmtKey::Integer => "integer",
            EnumFmtKey::Decimal => "decimal",
            EnumFmtKey::Header => "header",
        }
    }
}

/// Base format shared by every preset: Open Sans, 10pt, dark grey.
pub fn derive_default_base_format() -> SpecCellFormat {
    SpecCellFormat {
        font_name: Some(C_FONT_NAME_DEFAULT.to_string()),
        font_size: Some(N_FONT_SIZE_DEFAULT),
        font_color: Some(C_FONT_COLOR_DEFAULT.to_string()),
        ..Default::default()
    }
}

/// Build default named format presets on top of `cfg_base_fmt_spec`.
///
/// Decimal cells are italic with two decimal places, matching the price
/// columns of the report.
pub fn derive_xlsx_formats(cfg_base_fmt_spec: &SpecCellFormat) -> BTreeMap<String, SpecCellFormat> {
    let mut dict_fmt = BTreeMap::new();
    dict_fmt.insert(
        EnumFmtKey::Text.as_str().to_string(),
        cfg_base_fmt_spec.clone(),
    );
    dict_fmt.insert(
        EnumFmtKey::Header.as_str().to_string(),
        cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        EnumFmtKey::Integer.as_str().to_string(),
        cfg_base_fmt_spec.with_(SpecCellFormat {
            num_format: Some("0".to_string()),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        EnumFmtKey::Decimal.as_str().to_string(),
        cfg_base_fmt_spec.with_(SpecCellFormat {
            italic: Some(true),
            num_format: Some(C_NUM_FORMAT_TWO_DECIMALS.to_string()),
            ..Default::default()
        }),
    );

    dict_fmt
}

/// Build default named format presets with the document base format.
pub fn derive_default_xlsx_formats() -> BTreeMap<String, SpecCellFormat> {
    derive_xlsx_formats(&derive_default_base_format())
}
