use std::path::PathBuf;

use arrow::datatypes::DataType;
use thiserror::Error;

/// Faults that end a run. Anything not named here travels as a plain
/// `anyhow::Error` with context attached.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("Parquet file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("column `{column}` not present in file")]
    MissingColumn { column: String },

    #[error("column `{column}` has type {data_type}, which cannot be read as a timestamp")]
    UnsupportedTimestampType { column: String, data_type: DataType },

    #[error("row {row}: cannot parse `{value}` in column `{column}` as a timestamp")]
    UnparseableTimestamp {
        column: String,
        row: usize,
        value: String,
    },
}
