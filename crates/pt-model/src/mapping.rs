use serde::{Deserialize, Serialize};

/// Names of the input table columns the pipeline reads from.
///
/// The uncertainty column is optional; when absent, scoring falls back to
/// the simplified zeta variant that ignores participant uncertainties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub participant_id_col: String,
    pub result_col: String,
    pub uncertainty_col: Option<String>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            participant_id_col: "ParticipantID".to_string(),
            result_col: "Value".to_string(),
            uncertainty_col: Some("Uncertainty".to_string()),
        }
    }
}

impl ColumnMapping {
    /// All column names that must be present in the input header.
    pub fn required_columns(&self) -> Vec<&str> {
        let mut columns = vec![self.participant_id_col.as_str(), self.result_col.as_str()];
        if let Some(uncertainty) = &self.uncertainty_col {
            columns.push(uncertainty.as_str());
        }
        columns
    }
}
