use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::method::CalculationMethod;

/// Outcome of one calculation run. Built exactly once per run and never
/// mutated afterwards; score vectors are ordered like the input records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Assigned value for the round.
    pub x_pt: f64,
    /// Standard uncertainty of the assigned value.
    pub u_x_pt: f64,
    pub method_used: CalculationMethod,
    pub sigma_pt_used: f64,
    pub z_scores: Vec<f64>,
    pub zeta_scores: Vec<f64>,
    /// Method-specific diagnostics (iterations, robust std dev, source, ...).
    pub calculation_details: BTreeMap<String, serde_json::Value>,
}

/// Wire form of a calculation result as persisted to the intermediate JSON
/// file. Field names are part of the external interface; the report-only
/// path consumes this without re-running validation or calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedResults {
    pub x_pt: f64,
    pub u_x_pt: f64,
    pub method_used: CalculationMethod,
    pub sigma_pt_used: f64,
    pub participant_scores: Vec<f64>,
    pub participant_z_prime_scores: Vec<f64>,
    #[serde(default)]
    pub calculation_details: BTreeMap<String, serde_json::Value>,
}

impl From<&CalculationResult> for PersistedResults {
    fn from(result: &CalculationResult) -> Self {
        Self {
            x_pt: result.x_pt,
            u_x_pt: result.u_x_pt,
            method_used: result.method_used,
            sigma_pt_used: result.sigma_pt_used,
            participant_scores: result.z_scores.clone(),
            participant_z_prime_scores: result.zeta_scores.clone(),
            calculation_details: result.calculation_details.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> CalculationResult {
        CalculationResult {
            x_pt: 10.0,
            u_x_pt: 0.05,
            method_used: CalculationMethod::Crm,
            sigma_pt_used: 0.15,
            z_scores: vec![0.0, 1.0],
            zeta_scores: vec![0.0, 2.0],
            calculation_details: BTreeMap::from([(
                "source".to_string(),
                serde_json::json!("certificate"),
            )]),
        }
    }

    #[test]
    fn persisted_form_uses_interface_field_names() {
        let persisted = PersistedResults::from(&sample_result());
        let value = serde_json::to_value(&persisted).unwrap();
        assert!(value.get("participant_scores").is_some());
        assert!(value.get("participant_z_prime_scores").is_some());
        assert_eq!(value["method_used"], "CRM");
        assert_eq!(value["x_pt"], 10.0);
    }

    #[test]
    fn persisted_form_preserves_score_order() {
        let persisted = PersistedResults::from(&sample_result());
        assert_eq!(persisted.participant_scores, vec![0.0, 1.0]);
        assert_eq!(persisted.participant_z_prime_scores, vec![0.0, 2.0]);
    }
}
