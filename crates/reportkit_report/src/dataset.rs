//! Hard-coded company dataset.

use polars::prelude::*;

use crate::conf::{C_COL_COUNTRY, C_COL_ID, C_COL_NAME, C_COL_STOCK_PRICE, TUP_COMPANY_RECORDS};
use crate::error::ResultReport;
use crate::spec::SpecCompanyRecord;

/// Build a `id | name | country | stock_price` frame from `records`.
pub fn derive_dataframe_from_records(records: &[SpecCompanyRecord]) -> ResultReport<DataFrame> {
    let l_ids: Vec<i64> = records.iter().map(|rec| rec.id).collect();
    let l_names: Vec<&str> = records.iter().map(|rec| rec.name).collect();
    let l_countries: Vec<&str> = records.iter().map(|rec| rec.country).collect();
    let l_prices: Vec<f64> = records.iter().map(|rec| rec.stock_price).collect();

    let df = df!(
        C_COL_ID => l_ids,
        C_COL_NAME => l_names,
        C_COL_COUNTRY => l_countries,
        C_COL_STOCK_PRICE => l_prices
    )?;
    Ok(df)
}

/// The report's company rows.
pub fn derive_company_dataframe() -> ResultReport<DataFrame> {
    derive_dataframe_from_records(&TUP_COMPANY_RECORDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_dataframe_shape() {
        let df = derive_company_dataframe().unwrap();
        assert_eq!(df.shape(), (3, 4));
        assert_eq!(
            df.get_column_names_str(),
            vec!["id", "name", "country", "stock_price"]
        );
        assert!(df.column("id").unwrap().dtype().is_integer());
        assert!(df.column("stock_price").unwrap().dtype().is_float());
    }

    #[test]
    fn test_empty_records() {
        let df = derive_dataframe_from_records(&[]).unwrap();
        assert_eq!(df.shape(), (0, 4));
    }
}
