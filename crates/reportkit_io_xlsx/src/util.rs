//! Stateless helper utilities used by the XLSX writer kernel.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::{AnyValue, DataFrame};

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
use crate::error::{ErrorXlsx, ResultXlsx};
use crate::spec::{EnumCellValue, SpecTableRegion};

////////////////////////////////////////////////////////////////////////////////
// #region CellValueConversion

/// Map one polars value onto the writer's cell model.
///
/// Non-finite floats become blanks.
pub fn derive_cell_value_from_any_value(value: AnyValue<'_>) -> EnumCellValue {
    match value {
        AnyValue::Null => EnumCellValue::None,
        AnyValue::String(val) => EnumCellValue::String(val.to_string()),
        AnyValue::StringOwned(val) => EnumCellValue::String(val.to_string()),
        AnyValue::Boolean(val) => {
            EnumCellValue::String(if val { "True" } else { "False" }.to_string())
        }
        AnyValue::UInt32(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float32(val) if val.is_finite() => EnumCellValue::Number(val as f64),
        AnyValue::Float64(val) if val.is_finite() => EnumCellValue::Number(val),
        AnyValue::Float32(_) | AnyValue::Float64(_) => EnumCellValue::None,
        _ => EnumCellValue::String(value.to_string()),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region DataFrameLikeUtils

/// Validate that `columns` has no duplicated names.
pub fn validate_unique_columns(columns: &[String]) -> ResultXlsx<()> {
    if columns.len() == columns.iter().collect::<BTreeSet<_>>().len() {
        return Ok(());
    }

    let mut dict_pos: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (n_idx, c_name) in columns.iter().enumerate() {
        dict_pos.entry(c_name).or_default().push(n_idx);
    }

    let c_msg = dict_pos
        .iter()
        .filter(|(_, l_pos)| l_pos.len() > 1)
        .map(|(c_name, l_pos)| format!("{c_name:?} x{} at indices {:?}", l_pos.len(), l_pos))
        .collect::<Vec<_>>()
        .join("; ");

    Err(ErrorXlsx::Validation(format!(
        "Duplicate column names detected: {c_msg}"
    )))
}

/// Resolve mixed refs (`name` or numeric string index) to sorted unique indices.
pub fn select_sorted_indices_from_refs(
    columns: &[String],
    refs: Option<&[String]>,
) -> ResultXlsx<Vec<usize>> {
    let Some(refs) = refs else {
        return Ok(vec![]);
    };

    let mut set_idx = BTreeSet::new();
    for ref_col in refs {
        if let Ok(n_idx) = ref_col.parse::<usize>() {
            if n_idx >= columns.len() {
                return Err(ErrorXlsx::Validation(format!(
                    "Column index out of range: {n_idx} (width {})",
                    columns.len()
                )));
            }
            set_idx.insert(n_idx);
            continue;
        }

        let Some(n_idx) = columns.iter().position(|c_name| c_name == ref_col) else {
            return Err(ErrorXlsx::Validation(format!(
                "Column not found: {ref_col:?}"
            )));
        };
        set_idx.insert(n_idx);
    }

    Ok(set_idx.into_iter().collect())
}

/// Render every cell of `df` as display text, row-major.
pub fn derive_string_grid_from_dataframe(df: &DataFrame) -> ResultXlsx<Vec<Vec<String>>> {
    let l_cols = df.get_columns();

    let mut l_grid = vec![vec![String::new(); df.width()]; df.height()];
    for (_idx_row, _val_row) in l_grid.iter_mut().enumerate() {
        for (_idx_col, _val_cell) in _val_row.iter_mut().enumerate() {
            *_val_cell = match l_cols[_idx_col].get(_idx_row)? {
                AnyValue::Null => String::new(),
                AnyValue::String(val) => val.to_string(),
                AnyValue::StringOwned(val) => val.to_string(),
                value => value.to_string(),
            };
        }
    }

    Ok(l_grid)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    // Truncate before trimming so the cut cannot expose an apostrophe.
    let c_name: String = c_name.trim().chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect();
    let c_name = c_name.trim_matches(|chr: char| chr == '\'' || chr.is_whitespace());
    if c_name.is_empty() {
        return "Sheet".to_string();
    }
    c_name.to_string()
}

/// Same-document hyperlink target pointing at `A1` of `sheet_name`.
///
/// Names with characters other than ASCII alphanumerics and `_` are quoted.
pub fn derive_internal_link(sheet_name: &str) -> String {
    let if_plain = sheet_name
        .chars()
        .all(|chr| chr.is_ascii_alphanumeric() || chr == '_');
    if if_plain {
        format!("internal:{sheet_name}!A1")
    } else {
        format!("internal:'{}'!A1", sheet_name.replace('\'', "''"))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellGeometry

/// Compute the region of a table whose header sits at `start_row`.
///
/// Body rows occupy `start_row + 1 ..= start_row + height_body`.
pub fn derive_table_region(
    start_row: usize,
    start_col: usize,
    height_body: usize,
    width: usize,
) -> ResultXlsx<SpecTableRegion> {
    if width == 0 {
        return Err(ErrorXlsx::Validation(
            "Table must have at least one column.".to_string(),
        ));
    }

    let region = SpecTableRegion {
        first_row: start_row,
        first_col: start_col,
        last_row: start_row + height_body,
        last_col: start_col + width - 1,
    };

    if region.last_row >= N_NROWS_EXCEL_MAX || region.last_col >= N_NCOLS_EXCEL_MAX {
        return Err(ErrorXlsx::Validation(format!(
            "Table region exceeds Excel limits: {region:?}"
        )));
    }
    Ok(region)
}

/// Convert zero-based column index to letters (`0 -> A`, `26 -> AA`).
pub fn derive_column_letters(col_idx: usize) -> String {
    let mut l_chars = Vec::new();
    let mut n_rest = col_idx + 1;
    while n_rest > 0 {
        let n_rem = (n_rest - 1) % 26;
        l_chars.push((b'A' + n_rem as u8) as char);
        n_rest = (n_rest - 1) / 26;
    }
    l_chars.iter().rev().collect()
}

/// Convert zero-based `(row, col)` to an A1-style reference.
pub fn derive_cell_ref(row_idx: usize, col_idx: usize) -> String {
    format!("{}{}", derive_column_letters(col_idx), row_idx + 1)
}

/// Parse an A1-style reference into zero-based `(row, col)`.
pub fn parse_cell_ref(cell_ref: &str) -> ResultXlsx<(usize, usize)> {
    let err = || ErrorXlsx::Validation(format!("Invalid cell reference: {cell_ref:?}"));

    let c_ref = cell_ref.trim().to_ascii_uppercase();
    let n_split = c_ref
        .find(|chr: char| chr.is_ascii_digit())
        .ok_or_else(err)?;
    let (c_letters, c_digits) = c_ref.split_at(n_split);

    if c_letters.is_empty()
        || !c_letters.chars().all(|chr| chr.is_ascii_uppercase())
        || !c_digits.chars().all(|chr| chr.is_ascii_digit())
    {
        return Err(err());
    }

    let mut n_col = 0usize;
    for chr in c_letters.chars() {
        n_col = n_col
            .checked_mul(26)
            .and_then(|val| val.checked_add((chr as u8 - b'A') as usize + 1))
            .ok_or_else(err)?;
    }
    let n_row: usize = c_digits.parse().map_err(|_| err())?;

    if n_row == 0 || n_row > N_NROWS_EXCEL_MAX || n_col > N_NCOLS_EXCEL_MAX {
        return Err(err());
    }
    Ok((n_row - 1, n_col - 1))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
