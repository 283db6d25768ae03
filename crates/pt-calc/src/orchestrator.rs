//! Method dispatch and score assembly.

use std::collections::BTreeMap;

use serde_json::json;

use pt_config::CalculationConfig;
use pt_model::{CalculationMethod, CalculationResult, ParticipantRecord};

use crate::engine::ComputeEngine;
use crate::error::CalculationError;

/// Runs the configured calculation method over validated records and
/// assembles the scored result. Score order follows record order. Nothing
/// is retried and no partial result is produced.
pub fn run_calculation(
    records: &[ParticipantRecord],
    config: &CalculationConfig,
    engine: &dyn ComputeEngine,
) -> Result<CalculationResult, CalculationError> {
    let sigma_pt = config.sigma_pt;
    if !sigma_pt.is_finite() || sigma_pt <= 0.0 {
        return Err(CalculationError::NonPositiveSigma(sigma_pt));
    }

    let results: Vec<f64> = records.iter().map(|r| r.result).collect();
    let method = config.method;

    let (x_pt, u_x_pt, calculation_details) = match method {
        CalculationMethod::AlgorithmA => {
            let params = &config.algorithm_a;
            let estimate = engine.algorithm_a(&results, params.tolerance, params.max_iterations)?;
            let u_x_pt =
                engine.consensus_uncertainty(estimate.s_star, estimate.participants_used)?;
            tracing::info!(
                x_pt = estimate.x_pt,
                s_star = estimate.s_star,
                participants_used = estimate.participants_used,
                iterations = estimate.iterations,
                "robust estimate converged"
            );
            let details = BTreeMap::from([
                ("s_star".to_string(), json!(estimate.s_star)),
                (
                    "participants_used".to_string(),
                    json!(estimate.participants_used),
                ),
                ("iterations".to_string(), json!(estimate.iterations)),
                ("tolerance".to_string(), json!(params.tolerance)),
                ("max_iterations".to_string(), json!(params.max_iterations)),
            ]);
            (estimate.x_pt, u_x_pt, details)
        }
        CalculationMethod::Crm => {
            let value = require(method, "certified_value", config.crm.certified_value)?;
            let uncertainty = require(method, "uncertainty", config.crm.uncertainty)?;
            (
                pt_engine::crm_value(value)?,
                pt_engine::crm_uncertainty(uncertainty)?,
                source_details("certificate"),
            )
        }
        CalculationMethod::Formulation => {
            let value = require(method, "known_value", config.formulation.known_value)?;
            let uncertainty = require(method, "uncertainty", config.formulation.uncertainty)?;
            (
                pt_engine::formulation_value(value)?,
                pt_engine::formulation_uncertainty(uncertainty)?,
                source_details("formulation"),
            )
        }
        CalculationMethod::Expert => {
            let value = require(
                method,
                "consensus_value",
                config.expert_consensus.consensus_value,
            )?;
            let uncertainty = require(method, "uncertainty", config.expert_consensus.uncertainty)?;
            (
                pt_engine::expert_value(value)?,
                pt_engine::expert_uncertainty(uncertainty)?,
                source_details("expert_consensus"),
            )
        }
    };

    let z_scores = engine.z_scores(&results, x_pt, sigma_pt)?;
    let zeta_scores = if records.iter().any(ParticipantRecord::has_usable_uncertainty) {
        // Participants without a reported uncertainty enter the paired
        // formula with u = 0.
        let uncertainties: Vec<f64> = records
            .iter()
            .map(|r| r.uncertainty.unwrap_or(0.0))
            .collect();
        engine.zeta_scores(&results, &uncertainties, x_pt, u_x_pt)?
    } else {
        engine.zeta_scores_simplified(&results, x_pt, u_x_pt)?
    };

    Ok(CalculationResult {
        x_pt,
        u_x_pt,
        method_used: method,
        sigma_pt_used: sigma_pt,
        z_scores,
        zeta_scores,
        calculation_details,
    })
}

fn require(
    method: CalculationMethod,
    parameter: &'static str,
    value: Option<f64>,
) -> Result<f64, CalculationError> {
    value.ok_or(CalculationError::MissingParameter { method, parameter })
}

fn source_details(source: &str) -> BTreeMap<String, serde_json::Value> {
    BTreeMap::from([("source".to_string(), json!(source))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use pt_engine::{EngineError, RobustEstimate};

    use crate::engine::StatEngine;

    fn record(id: &str, result: f64, uncertainty: Option<f64>) -> ParticipantRecord {
        ParticipantRecord::new(id, result, uncertainty).unwrap()
    }

    fn crm_config(value: f64, uncertainty: f64) -> CalculationConfig {
        CalculationConfig {
            method: CalculationMethod::Crm,
            crm: pt_config::CrmParams {
                certified_value: Some(value),
                uncertainty: Some(uncertainty),
            },
            ..CalculationConfig::default()
        }
    }

    #[test]
    fn crm_passes_the_certificate_pair_through_exactly() {
        let records = vec![
            record("L1", 10.0, Some(0.05)),
            record("L2", 10.3, Some(0.04)),
        ];
        let result = run_calculation(&records, &crm_config(10.0, 0.05), &StatEngine).unwrap();
        assert_eq!(result.x_pt, 10.0);
        assert_eq!(result.u_x_pt, 0.05);
        assert_eq!(result.method_used, CalculationMethod::Crm);
        assert_eq!(result.calculation_details["source"], "certificate");
        // A participant reporting exactly the certified value scores zero.
        assert!(result.z_scores[0].abs() < 1e-12);
        assert!((result.z_scores[1] - 0.3 / 0.15).abs() < 1e-9);
    }

    #[test]
    fn missing_crm_value_is_a_configuration_error() {
        let mut config = crm_config(10.0, 0.05);
        config.crm.certified_value = None;
        let err = run_calculation(&[record("L1", 10.0, None)], &config, &StatEngine).unwrap_err();
        match err {
            CalculationError::MissingParameter { method, parameter } => {
                assert_eq!(method, CalculationMethod::Crm);
                assert_eq!(parameter, "certified_value");
            }
            other => panic!("expected MissingParameter, got {other:?}"),
        }
    }

    #[test]
    fn non_positive_sigma_fails_before_any_engine_call() {
        let mut config = crm_config(10.0, 0.05);
        config.sigma_pt = 0.0;
        let err = run_calculation(&[record("L1", 10.0, None)], &config, &StatEngine).unwrap_err();
        assert!(matches!(err, CalculationError::NonPositiveSigma(_)));
    }

    #[test]
    fn algorithm_a_details_carry_the_convergence_record() {
        let records: Vec<ParticipantRecord> = [9.8, 9.9, 10.0, 10.1, 10.2, 10.05]
            .iter()
            .enumerate()
            .map(|(i, &v)| record(&format!("L{i}"), v, None))
            .collect();
        let config = CalculationConfig::default();
        let result = run_calculation(&records, &config, &StatEngine).unwrap();
        assert_eq!(result.method_used, CalculationMethod::AlgorithmA);
        for key in [
            "s_star",
            "participants_used",
            "iterations",
            "tolerance",
            "max_iterations",
        ] {
            assert!(result.calculation_details.contains_key(key), "missing {key}");
        }
        assert_eq!(result.z_scores.len(), records.len());
        assert_eq!(result.zeta_scores.len(), records.len());
    }

    #[test]
    fn too_few_participants_surface_as_an_engine_error() {
        let records = vec![record("L1", 10.0, None), record("L2", 10.1, None)];
        let err = run_calculation(&records, &CalculationConfig::default(), &StatEngine)
            .unwrap_err();
        assert!(matches!(
            err,
            CalculationError::Engine(EngineError::InsufficientData { .. })
        ));
    }

    /// Records which zeta variant the orchestrator selected.
    #[derive(Default)]
    struct RecordingEngine {
        paired: Cell<bool>,
        simplified: Cell<bool>,
    }

    impl ComputeEngine for RecordingEngine {
        fn algorithm_a(
            &self,
            results: &[f64],
            tolerance: f64,
            max_iterations: usize,
        ) -> Result<RobustEstimate, EngineError> {
            StatEngine.algorithm_a(results, tolerance, max_iterations)
        }

        fn consensus_uncertainty(
            &self,
            s_star: f64,
            participants_used: usize,
        ) -> Result<f64, EngineError> {
            StatEngine.consensus_uncertainty(s_star, participants_used)
        }

        fn z_scores(
            &self,
            results: &[f64],
            x_pt: f64,
            sigma_pt: f64,
        ) -> Result<Vec<f64>, EngineError> {
            StatEngine.z_scores(results, x_pt, sigma_pt)
        }

        fn zeta_scores(
            &self,
            results: &[f64],
            uncertainties: &[f64],
            x_pt: f64,
            u_x_pt: f64,
        ) -> Result<Vec<f64>, EngineError> {
            self.paired.set(true);
            StatEngine.zeta_scores(results, uncertainties, x_pt, u_x_pt)
        }

        fn zeta_scores_simplified(
            &self,
            results: &[f64],
            x_pt: f64,
            u_x_pt: f64,
        ) -> Result<Vec<f64>, EngineError> {
            self.simplified.set(true);
            StatEngine.zeta_scores_simplified(results, x_pt, u_x_pt)
        }
    }

    #[test]
    fn one_usable_uncertainty_selects_the_paired_zeta_variant() {
        let records = vec![
            record("L1", 10.0, None),
            record("L2", 10.3, Some(0.04)),
            record("L3", 9.9, Some(0.0)),
        ];
        let engine = RecordingEngine::default();
        run_calculation(&records, &crm_config(10.0, 0.05), &engine).unwrap();
        assert!(engine.paired.get());
        assert!(!engine.simplified.get());
    }

    #[test]
    fn no_usable_uncertainty_selects_the_simplified_variant() {
        let records = vec![
            record("L1", 10.0, None),
            record("L2", 10.3, Some(0.0)),
        ];
        let engine = RecordingEngine::default();
        run_calculation(&records, &crm_config(10.0, 0.05), &engine).unwrap();
        assert!(engine.simplified.get());
        assert!(!engine.paired.get());
    }

    #[test]
    fn score_order_follows_record_order() {
        let records = vec![
            record("L1", 10.3, None),
            record("L2", 10.0, None),
            record("L3", 9.7, None),
        ];
        let result = run_calculation(&records, &crm_config(10.0, 0.05), &StatEngine).unwrap();
        assert!(result.z_scores[0] > 0.0);
        assert!(result.z_scores[1].abs() < 1e-12);
        assert!(result.z_scores[2] < 0.0);
    }
}
