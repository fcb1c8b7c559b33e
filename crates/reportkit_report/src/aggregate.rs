//! Group-by-key averaging.

use polars::prelude::*;

use crate::conf::{C_COL_COUNTRY, C_COL_MEAN_STOCK_PRICE, C_COL_STOCK_PRICE};
use crate::error::{ErrorReport, ResultReport};

/// Mean of `c_value` per distinct `c_key`, output column renamed to `c_value_renamed`.
///
/// Rows are sorted ascending by key so repeated runs yield the same frame.
pub fn aggregate_mean_by_key(
    df: &DataFrame,
    c_key: &str,
    c_value: &str,
    c_value_renamed: &str,
) -> ResultReport<DataFrame> {
    let df_agg = df
        .clone()
        .lazy()
        .group_by([col(c_key)])
        .agg([col(c_value).mean().alias(c_value_renamed)])
        .sort([c_key], SortMultipleOptions::default())
        .collect()?;
    Ok(df_agg)
}

/// Mean stock price per country.
pub fn summarize_stock_price_by_country(df: &DataFrame) -> ResultReport<DataFrame> {
    aggregate_mean_by_key(df, C_COL_COUNTRY, C_COL_STOCK_PRICE, C_COL_MEAN_STOCK_PRICE)
}

/// Read `(key, mean)` pairs back out of an aggregate frame.
pub fn collect_group_means(
    df: &DataFrame,
    c_key: &str,
    c_value: &str,
) -> ResultReport<Vec<(String, f64)>> {
    let col_key = df.column(c_key)?;
    let col_value = df.column(c_value)?;

    let mut l_pairs = Vec::with_capacity(df.height());
    for n_idx_row in 0..df.height() {
        let c_key_value = match col_key.get(n_idx_row)? {
            AnyValue::String(val) => val.to_string(),
            AnyValue::StringOwned(val) => val.to_string(),
            value => value.to_string(),
        };
        let n_mean = match col_value.get(n_idx_row)? {
            AnyValue::Float64(val) => val,
            AnyValue::Float32(val) => val as f64,
            value => {
                return Err(ErrorReport::Data(format!(
                    "Expected float mean for {c_key_value:?}, got {value:?}"
                )));
            }
        };
        l_pairs.push((c_key_value, n_mean));
    }
    Ok(l_pairs)
}
