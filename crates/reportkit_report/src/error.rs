//! Error type of report generation.

use polars::prelude::PolarsError;
use reportkit_io_xlsx::ErrorXlsx;
use thiserror::Error;

pub type ResultReport<T> = Result<T, ErrorReport>;

#[derive(Error, Debug)]
pub enum ErrorReport {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Workbook error: {0}")]
    Xlsx(#[from] ErrorXlsx),

    #[error("Dataframe error: {0}")]
    Polars(#[from] PolarsError),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Config error: {0}")]
    Config(String),
}
