//! Header check: every configured column must exist in the table.

use polars::prelude::DataFrame;

use pt_model::ColumnMapping;

use crate::error::SchemaError;

/// Checks that the id, result, and (if configured) uncertainty columns are
/// present. On failure the error lists *every* missing name plus the full
/// actual header, never just the first. Pure: the table is not touched.
pub fn check_schema(df: &DataFrame, mapping: &ColumnMapping) -> Result<(), SchemaError> {
    let header: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let missing: Vec<String> = mapping
        .required_columns()
        .into_iter()
        .filter(|required| !header.iter().any(|h| h == required))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError { missing, header })
    }
}
