// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Failure kinds the pipeline driver is allowed to contain. Anything outside
/// this set (a panic, a logic bug) propagates instead of being swallowed.
#[derive(Error, Debug)]
pub enum EtlError {
    #[error("reading {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed delimited input: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column {0:?} is missing")]
    MissingColumn(String),

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),

    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),
}
