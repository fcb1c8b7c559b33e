use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use reportkit_io_xlsx::{
    EnumFmtKey, ErrorXlsx, N_NROWS_EXCEL_MAX, SpecDataFrameWriteOptions,
    SpecSheetHorizontalMerge, SpecSheetLink, XlsxWriter, derive_default_xlsx_formats,
    derive_table_region,
};
use tempfile::TempDir;

fn create_writer(path: &Path) -> XlsxWriter {
    let dict_fmt = derive_default_xlsx_formats();
    let fmt = |key: EnumFmtKey| dict_fmt[key.as_str()].clone();
    XlsxWriter::new(
        path.to_path_buf(),
        fmt(EnumFmtKey::Text),
        fmt(EnumFmtKey::Integer),
        fmt(EnumFmtKey::Decimal),
        fmt(EnumFmtKey::Header),
    )
}

fn read_sheet(path: &Path, sheet_name: &str) -> Range<Data> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("open workbook");
    workbook.worksheet_range(sheet_name).expect("sheet must exist")
}

fn create_df_prices() -> DataFrame {
    df!(
        "country" => ["DE", "FR"],
        "price" => [99.0, 98.8105]
    )
    .unwrap()
}

proptest! {
    #[test]
    fn prop_table_region_covers_header_and_body(
        start_row in 0usize..10_000,
        start_col in 0usize..100,
        height_body in 0usize..1_000,
        width in 1usize..50,
    ) {
        let region = derive_table_region(start_row, start_col, height_body, width).unwrap();
        prop_assert_eq!(region.first_row, start_row);
        prop_assert_eq!(region.last_row - region.first_row, height_body);
        prop_assert_eq!(region.height_body(), height_body);
        prop_assert_eq!(region.width(), width);
        prop_assert_eq!(region.row_after(), start_row + height_body + 1);
    }
}

#[test]
fn test_table_region_rejects_overflow() {
    assert!(matches!(
        derive_table_region(N_NROWS_EXCEL_MAX - 1, 0, 1, 1),
        Err(ErrorXlsx::Validation(_))
    ));
    assert!(matches!(
        derive_table_region(0, 0, 1, 0),
        Err(ErrorXlsx::Validation(_))
    ));
}

#[test]
fn test_write_dataframe_at_offset_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("offset.xlsx");
    let mut writer = create_writer(&path);

    let sheet = writer.add_sheet("Data").unwrap();
    let df = create_df_prices();
    let region = writer
        .write_dataframe(
            &sheet,
            &df,
            4,
            &SpecDataFrameWriteOptions {
                cols_decimal: Some(vec!["price".to_string()]),
                ..Default::default()
            },
        )
        .unwrap();
    writer
        .format_as_table(&sheet, &region, &["country".to_string(), "price".to_string()])
        .unwrap();
    writer.freeze_rows(&sheet, region.first_row + 1).unwrap();
    writer.close().unwrap();

    assert_eq!((region.first_row, region.last_row), (4, 6));
    let range = read_sheet(&path, "Data");
    assert_eq!(range.get_value((4, 0)), Some(&Data::String("country".to_string())));
    assert_eq!(range.get_value((4, 1)), Some(&Data::String("price".to_string())));
    assert_eq!(range.get_value((5, 0)), Some(&Data::String("DE".to_string())));
    assert_eq!(range.get_value((6, 1)), Some(&Data::Float(98.8105)));
}

#[test]
fn test_links_and_merged_header_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("links.xlsx");
    let mut writer = create_writer(&path);

    let sheet_front = writer.add_sheet("Front Page").unwrap();
    let sheet_data = writer.add_sheet("Data Sheet").unwrap();
    writer
        .write_link(
            &sheet_front,
            &SpecSheetLink {
                cell: "A2".to_string(),
                target_sheet: sheet_data.clone(),
                text: "Data Sheet".to_string(),
            },
        )
        .unwrap();
    let fmt_header = writer.fmt_preset(EnumFmtKey::Header).clone();
    writer
        .merge_header(
            &sheet_data,
            &SpecSheetHorizontalMerge {
                row_idx_start: 0,
                col_idx_start: 1,
                col_idx_end: 3,
                text: "Group".to_string(),
            },
            &fmt_header,
        )
        .unwrap();
    writer.close().unwrap();

    let range = read_sheet(&path, "Front Page");
    assert_eq!(range.get_value((1, 0)), Some(&Data::String("Data Sheet".to_string())));
    let range = read_sheet(&path, "Data Sheet");
    assert_eq!(range.get_value((0, 1)), Some(&Data::String("Group".to_string())));
}

#[test]
fn test_format_as_table_requires_body_row() {
    let dir = TempDir::new().unwrap();
    let mut writer = create_writer(&dir.path().join("empty.xlsx"));
    let sheet = writer.add_sheet("Data").unwrap();

    let df = create_df_prices().head(Some(0));
    let region = writer
        .write_dataframe(&sheet, &df, 0, &SpecDataFrameWriteOptions::default())
        .unwrap();
    assert_eq!(region.height_body(), 0);

    let err = writer
        .format_as_table(&sheet, &region, &["country".to_string(), "price".to_string()])
        .unwrap_err();
    assert!(matches!(err, ErrorXlsx::Validation(_)));
}
