//! Intermediate results JSON.
//!
//! The persisted file is the interface between a calculation run and a
//! later report-only run, so its field names are stable.

use std::fs;
use std::path::Path;

use pt_model::{CalculationResult, PersistedResults};

use crate::error::PersistError;

/// Writes the wire form of a calculation result as pretty-printed JSON.
pub fn save_results(path: &Path, result: &CalculationResult) -> Result<(), PersistError> {
    let persisted = PersistedResults::from(result);
    let json = serde_json::to_string_pretty(&persisted).map_err(|source| PersistError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "results saved");
    Ok(())
}

/// Reads a previously saved results file.
pub fn load_results(path: &Path) -> Result<PersistedResults, PersistError> {
    let text = fs::read_to_string(path).map_err(|source| PersistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| PersistError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use pt_model::CalculationMethod;

    fn sample_result() -> CalculationResult {
        CalculationResult {
            x_pt: 10.02,
            u_x_pt: 0.045,
            method_used: CalculationMethod::AlgorithmA,
            sigma_pt_used: 0.15,
            z_scores: vec![-0.13, 0.2, 1.87],
            zeta_scores: vec![-0.4, 0.6, 5.2],
            calculation_details: BTreeMap::from([(
                "iterations".to_string(),
                serde_json::json!(4),
            )]),
        }
    }

    #[test]
    fn save_then_load_round_trips_the_wire_form() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        let result = sample_result();
        save_results(&path, &result).unwrap();

        let loaded = load_results(&path).unwrap();
        assert_eq!(loaded, PersistedResults::from(&result));
    }

    #[test]
    fn saved_file_uses_the_interface_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        save_results(&path, &sample_result()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"participant_scores\""));
        assert!(text.contains("\"participant_z_prime_scores\""));
        assert!(text.contains("\"method_used\": \"AlgorithmA\""));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_results(Path::new("/nonexistent/results.json")).unwrap_err();
        assert!(matches!(err, PersistError::Read { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load_results(&path).unwrap_err();
        assert!(matches!(err, PersistError::Parse { .. }));
    }
}
