//! Vectorized type coercion of the numeric columns.
//!
//! The result column is cast to Float64 non-strictly (unparseable cells
//! become null) and screened in aggregate: null/unconvertible, infinite,
//! and NaN counts for results; negative and infinite counts for
//! uncertainties. There is no per-row fallback here; exact row locations
//! come from the row validator, which only pays that cost for rows the
//! aggregate screen flagged.

use polars::prelude::{BooleanChunked, ChunkCompareIneq, Column, DataFrame, DataType};

use pt_model::ColumnMapping;

use crate::error::DataTypeError;

/// Coerces the result and (if configured) uncertainty columns to Float64
/// and fails with exact counts on any aggregate violation. On success the
/// returned table carries both columns strictly double-typed.
pub fn coerce_types(
    mut df: DataFrame,
    mapping: &ColumnMapping,
) -> Result<DataFrame, DataTypeError> {
    let result_col = cast_to_f64(&df, &mapping.result_col)?;
    {
        let ca = result_col
            .f64()
            .map_err(|source| DataTypeError::Coerce {
                column: mapping.result_col.clone(),
                source,
            })?;
        let null_count = ca.null_count();
        if null_count > 0 {
            return Err(DataTypeError::NullOrUnconvertible {
                column: mapping.result_col.clone(),
                count: null_count,
            });
        }
        let infinite_count = count_true(&ca.is_infinite());
        if infinite_count > 0 {
            return Err(DataTypeError::Infinite {
                column: mapping.result_col.clone(),
                count: infinite_count,
            });
        }
        let nan_count = count_true(&ca.is_nan());
        if nan_count > 0 {
            return Err(DataTypeError::Nan {
                column: mapping.result_col.clone(),
                count: nan_count,
            });
        }
    }
    replace_column(&mut df, &mapping.result_col, result_col)?;

    if let Some(uncertainty_name) = &mapping.uncertainty_col {
        let uncertainty_col = cast_to_f64(&df, uncertainty_name)?;
        {
            let ca = uncertainty_col
                .f64()
                .map_err(|source| DataTypeError::Coerce {
                    column: uncertainty_name.clone(),
                    source,
                })?;
            // Null uncertainties are allowed; a participant may simply not
            // have reported one.
            let negative_count = count_true(&ca.lt(0.0));
            if negative_count > 0 {
                return Err(DataTypeError::Negative {
                    column: uncertainty_name.clone(),
                    count: negative_count,
                });
            }
            let infinite_count = count_true(&ca.is_infinite());
            if infinite_count > 0 {
                return Err(DataTypeError::Infinite {
                    column: uncertainty_name.clone(),
                    count: infinite_count,
                });
            }
        }
        replace_column(&mut df, uncertainty_name, uncertainty_col)?;
    }

    Ok(df)
}

fn count_true(mask: &BooleanChunked) -> usize {
    mask.sum().unwrap_or(0) as usize
}

fn cast_to_f64(df: &DataFrame, name: &str) -> Result<Column, DataTypeError> {
    let column = df.column(name).map_err(|source| DataTypeError::Coerce {
        column: name.to_string(),
        source,
    })?;
    column
        .cast(&DataType::Float64)
        .map_err(|source| DataTypeError::Coerce {
            column: name.to_string(),
            source,
        })
}

fn replace_column(
    df: &mut DataFrame,
    name: &str,
    column: Column,
) -> Result<(), DataTypeError> {
    df.with_column(column)
        .map_err(|source| DataTypeError::Coerce {
            column: name.to_string(),
            source,
        })?;
    Ok(())
}
