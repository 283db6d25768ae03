//! The validation pipeline: schema check, type coercion, row validation.
//!
//! [`load_and_validate`] is the stage driver the commands call. It fails on
//! the first stage that finds a problem, so a schema error is never mixed
//! with type errors and a type error is never mixed with row diagnostics.
//! For large CSV inputs the schema is checked on a bounded prefix sample
//! before the full table is materialized.

mod coerce;
mod error;
mod rows;
mod schema;

use std::path::Path;

use pt_config::Config;
use pt_ingest::{SCHEMA_SAMPLE_ROWS, TableSource};
use pt_model::{ColumnMapping, ParticipantRecord};

pub use coerce::coerce_types;
pub use error::{
    DataTypeError, MAX_DISPLAYED_ISSUES, RowValidationError, SchemaError, ValidateError,
};
pub use rows::{FULL_VALIDATION_LIMIT, validate_rows};
pub use schema::check_schema;

/// The outcome of a successful validation run.
#[derive(Debug, Clone)]
pub struct ValidatedData {
    /// Typed records in input row order.
    pub records: Vec<ParticipantRecord>,
    /// The column mapping the records were read with.
    pub mapping: ColumnMapping,
}

/// Loads the input file and runs the full validation pipeline against the
/// configured column mapping.
pub fn load_and_validate(path: &Path, config: &Config) -> Result<ValidatedData, ValidateError> {
    let mapping = config.input_data.column_mapping();
    let source = TableSource::open(path)?;

    if source.is_large()? {
        // Fail on header problems before committing to a full read.
        let sample = source.sample(SCHEMA_SAMPLE_ROWS)?;
        check_schema(&sample, &mapping)?;
        tracing::debug!(path = %path.display(), "schema verified on prefix sample");
    }

    let df = source.read_all()?;
    check_schema(&df, &mapping)?;
    let df = coerce_types(df, &mapping)?;
    let records = validate_rows(&df, &mapping)?;
    tracing::info!(
        path = %path.display(),
        records = records.len(),
        "input validated"
    );
    Ok(ValidatedData { records, mapping })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn valid_csv_produces_typed_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "results.csv",
            "ParticipantID,Value,Uncertainty\nL1,10.1,0.05\nL2,10.3,\nL3,9.9,0.04\n",
        );
        let config = Config::default();
        let data = load_and_validate(&path, &config).unwrap();
        assert_eq!(data.records.len(), 3);
        assert_eq!(data.records[0].participant_id, "L1");
        assert_eq!(data.records[1].uncertainty, None);
        assert_eq!(data.mapping.result_col, "Value");
    }

    #[test]
    fn missing_columns_fail_at_the_schema_stage() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "results.csv", "Lab,Measurement\nL1,10.1\n");
        let err = load_and_validate(&path, &Config::default()).unwrap_err();
        assert!(matches!(err, ValidateError::Schema(_)));
    }

    #[test]
    fn non_numeric_values_fail_at_the_type_stage() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "results.csv",
            "ParticipantID,Value,Uncertainty\nL1,abc,0.05\nL2,10.3,0.04\n",
        );
        let err = load_and_validate(&path, &Config::default()).unwrap_err();
        match err {
            ValidateError::DataType(DataTypeError::NullOrUnconvertible { column, count }) => {
                assert_eq!(column, "Value");
                assert_eq!(count, 1);
            }
            other => panic!("expected a type error, got {other:?}"),
        }
    }

    #[test]
    fn empty_id_fails_at_the_row_stage() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "results.csv",
            "ParticipantID,Value,Uncertainty\nL1,10.1,0.05\n ,10.3,0.04\n",
        );
        let err = load_and_validate(&path, &Config::default()).unwrap_err();
        match err {
            ValidateError::Rows(rows) => {
                assert_eq!(rows.issues.len(), 1);
                assert_eq!(rows.issues[0].row_index, 2);
            }
            other => panic!("expected a row error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_fails_at_the_load_stage() {
        let config = Config::default();
        let err = load_and_validate(Path::new("/nonexistent/results.csv"), &config).unwrap_err();
        assert!(matches!(err, ValidateError::Load(_)));
    }

    #[test]
    fn validation_is_idempotent_on_clean_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "results.csv",
            "ParticipantID,Value,Uncertainty\nL1,10.1,0.05\nL2,10.3,0.04\n",
        );
        let config = Config::default();
        let first = load_and_validate(&path, &config).unwrap();
        let second = load_and_validate(&path, &config).unwrap();
        assert_eq!(first.records, second.records);
    }
}
