use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to parse forecast JSON document")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to list directory '{0}'")]
    DirectoryRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to read forecast CSV file '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Failed processing column '{column}' of CSV file '{path}'")]
    CsvColumn {
        path: PathBuf,
        column: String,
        #[source]
        source: PolarsError,
    },
}
