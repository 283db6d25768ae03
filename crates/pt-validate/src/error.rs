use polars::error::PolarsError;
use thiserror::Error;

use pt_ingest::LoadError;
use pt_model::{ValidationIssue, format_issues};

/// Issues shown in full before truncation kicks in.
pub const MAX_DISPLAYED_ISSUES: usize = 10;

/// One or more configured columns are absent from the input header.
/// Always lists every missing name together with the actual header.
#[derive(Debug, Error)]
#[error("missing required columns: {missing:?}. Available columns: {header:?}")]
pub struct SchemaError {
    pub missing: Vec<String>,
    pub header: Vec<String>,
}

/// Aggregate numeric violations found during vectorized type coercion.
/// Each variant names the offending column and the exact count.
#[derive(Debug, Error)]
pub enum DataTypeError {
    #[error("found {count} non-numeric or missing values in {column} column")]
    NullOrUnconvertible { column: String, count: usize },

    #[error("found {count} infinite values in {column} column")]
    Infinite { column: String, count: usize },

    #[error("found {count} NaN values in {column} column")]
    Nan { column: String, count: usize },

    #[error("found {count} negative values in {column} column")]
    Negative { column: String, count: usize },

    #[error("failed to coerce {column} column to numeric: {source}")]
    Coerce {
        column: String,
        source: PolarsError,
    },
}

/// Row-addressable validation failures, display-truncated to the first
/// [`MAX_DISPLAYED_ISSUES`] plus a remainder count.
#[derive(Debug, Error)]
#[error("data validation errors:\n{}", format_issues(.issues, MAX_DISPLAYED_ISSUES))]
pub struct RowValidationError {
    pub issues: Vec<ValidationIssue>,
}

/// Any failure of the validation pipeline, tagged by stage so callers can
/// branch on kind rather than message text.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    DataType(#[from] DataTypeError),

    #[error(transparent)]
    Rows(#[from] RowValidationError),

    #[error("internal table error: {0}")]
    Internal(#[from] PolarsError),
}
