//! Error type of the XLSX writer kernel.

use polars::prelude::PolarsError;
use rust_xlsxwriter::XlsxError;
use thiserror::Error;

pub type ResultXlsx<T> = Result<T, ErrorXlsx>;

#[derive(Error, Debug)]
pub enum ErrorXlsx {
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("dataframe error: {0}")]
    Polars(#[from] PolarsError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unknown sheet: {0:?}")]
    UnknownSheet(String),

    #[error("cannot write after close()")]
    Closed,
}
