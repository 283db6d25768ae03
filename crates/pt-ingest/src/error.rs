use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn an input file into an in-memory table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("unsupported file format: .{extension} (supported: .csv, .xlsx, .xls)")]
    UnsupportedExtension { extension: String },

    #[error("failed to read file metadata for {path}: {source}")]
    Metadata {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read CSV file {path}: {source}")]
    Csv {
        path: PathBuf,
        source: polars::error::PolarsError,
    },

    #[error("all spreadsheet engines failed for {path}: {}", .attempts.join("; "))]
    SpreadsheetEngines {
        path: PathBuf,
        /// One line per attempted engine, in attempt order.
        attempts: Vec<String>,
    },

    #[error("input file contains no data rows: {0}")]
    EmptyTable(PathBuf),
}
