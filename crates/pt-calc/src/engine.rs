//! Seam between the orchestrator and the numeric engine.

use pt_engine::{EngineError, RobustEstimate};

/// The numeric operations the orchestrator needs. The orchestrator decides
/// *which* operation runs with *which* inputs; the formulas behind them are
/// the engine's contract.
pub trait ComputeEngine {
    fn algorithm_a(
        &self,
        results: &[f64],
        tolerance: f64,
        max_iterations: usize,
    ) -> Result<RobustEstimate, EngineError>;

    fn consensus_uncertainty(
        &self,
        s_star: f64,
        participants_used: usize,
    ) -> Result<f64, EngineError>;

    fn z_scores(&self, results: &[f64], x_pt: f64, sigma_pt: f64) -> Result<Vec<f64>, EngineError>;

    fn zeta_scores(
        &self,
        results: &[f64],
        uncertainties: &[f64],
        x_pt: f64,
        u_x_pt: f64,
    ) -> Result<Vec<f64>, EngineError>;

    fn zeta_scores_simplified(
        &self,
        results: &[f64],
        x_pt: f64,
        u_x_pt: f64,
    ) -> Result<Vec<f64>, EngineError>;
}

/// The production engine, backed by `pt-engine`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatEngine;

impl ComputeEngine for StatEngine {
    fn algorithm_a(
        &self,
        results: &[f64],
        tolerance: f64,
        max_iterations: usize,
    ) -> Result<RobustEstimate, EngineError> {
        pt_engine::algorithm_a(results, tolerance, max_iterations)
    }

    fn consensus_uncertainty(
        &self,
        s_star: f64,
        participants_used: usize,
    ) -> Result<f64, EngineError> {
        pt_engine::consensus_uncertainty(s_star, participants_used)
    }

    fn z_scores(&self, results: &[f64], x_pt: f64, sigma_pt: f64) -> Result<Vec<f64>, EngineError> {
        pt_engine::z_scores(results, x_pt, sigma_pt)
    }

    fn zeta_scores(
        &self,
        results: &[f64],
        uncertainties: &[f64],
        x_pt: f64,
        u_x_pt: f64,
    ) -> Result<Vec<f64>, EngineError> {
        pt_engine::zeta_scores(results, uncertainties, x_pt, u_x_pt)
    }

    fn zeta_scores_simplified(
        &self,
        results: &[f64],
        x_pt: f64,
        u_x_pt: f64,
    ) -> Result<Vec<f64>, EngineError> {
        pt_engine::zeta_scores_simplified(results, x_pt, u_x_pt)
    }
}
