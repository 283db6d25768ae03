//! Row-level validation with bounded cost on large tables.
//!
//! A vectorized mask finds rows with numeric problems first. If anything is
//! flagged, only those rows are re-examined to produce row-addressed
//! diagnostics. If the mask is clean, a confidence pass checks row
//! construction on every row for small tables, or on a fixed sample of
//! head, tail, and middle rows for large ones. Participant ids outside the
//! sample of a large clean table are not checked.

use std::collections::BTreeSet;

use polars::error::PolarsError;
use polars::prelude::{BooleanChunked, ChunkCompareIneq, Column, DataFrame};

use pt_ingest::{any_to_f64, any_to_string};
use pt_model::{ColumnMapping, ParticipantRecord, ValidationIssue};

use crate::error::{RowValidationError, ValidateError};

/// Tables at or below this height are validated row by row.
pub const FULL_VALIDATION_LIMIT: usize = 1000;
/// Rows taken from each end of a sampled table.
const EDGE_ROWS: usize = 10;
/// Upper bound on the contiguous middle slice of a sampled table.
const MAX_MIDDLE_SAMPLE: usize = 100;

/// Validates rows and extracts the typed record collection.
///
/// Score and record order follows input row order. Idempotent on clean
/// tables.
pub fn validate_rows(
    df: &DataFrame,
    mapping: &ColumnMapping,
) -> Result<Vec<ParticipantRecord>, ValidateError> {
    let cols = RowColumns::bind(df, mapping)?;
    let flagged = flagged_rows(df, mapping)?;

    let checked: Vec<usize> = if flagged.is_empty() {
        let rows = df.height();
        if rows <= FULL_VALIDATION_LIMIT {
            (0..rows).collect()
        } else {
            let sample = sample_indices(rows);
            tracing::debug!(rows, sampled = sample.len(), "sampling row validation");
            sample
        }
    } else {
        tracing::debug!(flagged = flagged.len(), "validating flagged rows");
        flagged
    };

    let mut issues = Vec::new();
    for row in checked {
        if let Some(issue) = check_row(&cols, row)? {
            issues.push(issue);
        }
    }
    if !issues.is_empty() {
        return Err(RowValidationError { issues }.into());
    }

    extract_records(&cols, df.height()).map_err(ValidateError::Internal)
}

/// Row indices checked on a large clean table: the first and last
/// [`EDGE_ROWS`] plus a contiguous middle slice of size
/// `min(MAX_MIDDLE_SAMPLE, rows / 10)` centered in the table. Deduplicated
/// and sorted.
pub(crate) fn sample_indices(rows: usize) -> Vec<usize> {
    let mut picked = BTreeSet::new();
    picked.extend(0..EDGE_ROWS.min(rows));
    picked.extend(rows.saturating_sub(EDGE_ROWS)..rows);
    let middle = MAX_MIDDLE_SAMPLE.min(rows / 10);
    let start = rows / 2 - middle / 2;
    picked.extend(start..start + middle);
    picked.into_iter().collect()
}

struct RowColumns<'a> {
    id: &'a Column,
    result: &'a Column,
    uncertainty: Option<&'a Column>,
}

impl<'a> RowColumns<'a> {
    fn bind(df: &'a DataFrame, mapping: &ColumnMapping) -> Result<Self, PolarsError> {
        Ok(Self {
            id: df.column(&mapping.participant_id_col)?,
            result: df.column(&mapping.result_col)?,
            uncertainty: match &mapping.uncertainty_col {
                Some(name) => Some(df.column(name)?),
                None => None,
            },
        })
    }
}

/// Rows whose result is null, infinite, or NaN, or whose uncertainty is
/// negative or NaN. Null uncertainties are not flagged.
fn flagged_rows(df: &DataFrame, mapping: &ColumnMapping) -> Result<Vec<usize>, PolarsError> {
    let result = df.column(&mapping.result_col)?.f64()?;
    let mut mask: BooleanChunked = &(&result.is_infinite() | &result.is_nan()) | &result.is_null();
    if let Some(name) = &mapping.uncertainty_col {
        let uncertainty = df.column(name)?.f64()?;
        mask = &mask | &(&uncertainty.lt(0.0) | &uncertainty.is_nan());
    }
    Ok(mask
        .into_iter()
        .enumerate()
        .filter(|(_, bad)| bad.unwrap_or(false))
        .map(|(row, _)| row)
        .collect())
}

/// Attempts record construction for one row; returns the diagnostic (with a
/// 1-based row index) when construction fails.
fn check_row(cols: &RowColumns<'_>, row: usize) -> Result<Option<ValidationIssue>, PolarsError> {
    let id = any_to_string(cols.id.get(row)?);
    let result = any_to_f64(cols.result.get(row)?).unwrap_or(f64::NAN);
    let uncertainty = match cols.uncertainty {
        Some(column) => any_to_f64(column.get(row)?),
        None => None,
    };
    Ok(ParticipantRecord::new(id, result, uncertainty)
        .err()
        .map(|e| ValidationIssue::new(row + 1, e.to_string())))
}

/// Builds the record collection in one pass without re-validating.
fn extract_records(
    cols: &RowColumns<'_>,
    rows: usize,
) -> Result<Vec<ParticipantRecord>, PolarsError> {
    let result = cols.result.f64()?;
    let uncertainty = match cols.uncertainty {
        Some(column) => Some(column.f64()?),
        None => None,
    };
    let mut records = Vec::with_capacity(rows);
    for row in 0..rows {
        records.push(ParticipantRecord {
            participant_id: any_to_string(cols.id.get(row)?),
            result: result.get(row).unwrap_or(f64::NAN),
            uncertainty: uncertainty.and_then(|ca| ca.get(row)),
        });
    }
    Ok(records)
}
