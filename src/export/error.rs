use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed assembling forecast DataFrame")]
    DataFrame(#[source] PolarsError),

    #[error("Failed to create export file '{0}'")]
    FileCreate(PathBuf, #[source] std::io::Error),

    #[error("Failed to write CSV export '{0}'")]
    CsvWrite(PathBuf, #[source] PolarsError),
}
