//! `reportkit_io_xlsx` v1:
//! XLSX writer kernel for formatted multi-sheet reports.
//!
//! - `conf`   : constants and default presets
//! - `spec`   : specs/models/options
//! - `util`   : pure helper functions (values, sheet names, cell geometry)
//! - `writer` : stateful writer over `rust_xlsxwriter`
//! - `error`  : error type
pub mod conf;
pub mod error;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_FONT_COLOR_DEFAULT, C_FONT_NAME_DEFAULT, C_NUM_FORMAT_TWO_DECIMALS, EnumFmtKey,
    N_FONT_SIZE_DEFAULT, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    TUP_EXCEL_ILLEGAL, derive_default_base_format, derive_default_xlsx_formats,
    derive_xlsx_formats,
};
pub use error::{ErrorXlsx, ResultXlsx};
pub use spec::{
    EnumCellValue, SpecCellFormat, SpecDataFrameWriteOptions, SpecSheetHorizontalMerge,
    SpecSheetLink, SpecTableRegion, SpecXlsxReport,
};
pub use util::{
    derive_cell_ref, derive_column_letters, derive_internal_link, derive_string_grid_from_dataframe,
    derive_table_region, parse_cell_ref, sanitize_sheet_name,
};
pub use writer::XlsxWriter;
