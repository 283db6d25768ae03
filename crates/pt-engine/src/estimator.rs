//! Assigned-value (x_pt) estimators.
//!
//! Algorithm A follows ISO 13528:2022 Annex C: initialize with the median
//! and the MAD-based robust standard deviation, then iterate Huber-weighted
//! means until both estimates move by less than the tolerance. The CRM,
//! formulation, and expert paths validate and pass the configured value
//! straight through.

use crate::MIN_PARTICIPANTS;
use crate::error::{EngineError, ensure_finite};
use crate::robust::{HUBER_C, MAD_TO_SIGMA, huber_weight, mad, median};

/// Floor applied to s* so weights stay defined for degenerate data.
const MIN_ROBUST_STD: f64 = 1e-10;

/// Converged output of Algorithm A.
#[derive(Debug, Clone, PartialEq)]
pub struct RobustEstimate {
    /// Robust consensus value x*.
    pub x_pt: f64,
    /// Robust standard deviation s*.
    pub s_star: f64,
    /// Participants whose final weight exceeded 0.1.
    pub participants_used: usize,
    /// Iterations until convergence.
    pub iterations: usize,
}

pub fn algorithm_a(
    results: &[f64],
    tolerance: f64,
    max_iterations: usize,
) -> Result<RobustEstimate, EngineError> {
    if results.len() < MIN_PARTICIPANTS {
        return Err(EngineError::InsufficientData {
            required: MIN_PARTICIPANTS,
            actual: results.len(),
        });
    }
    ensure_finite(results, "participant results")?;
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "tolerance must be a positive finite number, got {tolerance}"
        )));
    }

    let mut x_star = median(results).ok_or(EngineError::InsufficientData {
        required: MIN_PARTICIPANTS,
        actual: 0,
    })?;
    let mut s_star = (mad(results, x_star)? * MAD_TO_SIGMA).max(MIN_ROBUST_STD);

    let mut iterations = 0;
    loop {
        if iterations >= max_iterations {
            return Err(EngineError::NonConvergence { max_iterations });
        }

        let x_prev = x_star;
        let s_prev = s_star;

        let mut weight_sum = 0.0;
        let mut weighted_values = 0.0;
        let mut weighted_squares = 0.0;
        for &value in results {
            let weight = huber_weight((value - x_star) / s_star, HUBER_C);
            weight_sum += weight;
            weighted_values += weight * value;
            weighted_squares += weight * (value - x_star).powi(2);
        }
        if weight_sum <= 0.0 {
            return Err(EngineError::DivisionByZero {
                context: "sum of Huber weights",
            });
        }

        x_star = weighted_values / weight_sum;
        s_star = (weighted_squares / weight_sum).sqrt().max(MIN_ROBUST_STD);

        if (x_star - x_prev).abs() < tolerance && (s_star - s_prev).abs() < tolerance {
            break;
        }
        iterations += 1;
    }

    let participants_used = results
        .iter()
        .filter(|&&value| huber_weight((value - x_star) / s_star, HUBER_C) > 0.1)
        .count();

    Ok(RobustEstimate {
        x_pt: x_star,
        s_star,
        participants_used,
        iterations,
    })
}

fn finite_passthrough(value: f64, label: &str) -> Result<f64, EngineError> {
    if !value.is_finite() {
        return Err(EngineError::InvalidInput(format!(
            "{label} must be finite, got {value}"
        )));
    }
    Ok(value)
}

/// Assigned value from a certified reference material.
pub fn crm_value(certified_value: f64) -> Result<f64, EngineError> {
    finite_passthrough(certified_value, "certified value")
}

/// Assigned value known from formulation of the test material.
pub fn formulation_value(known_value: f64) -> Result<f64, EngineError> {
    finite_passthrough(known_value, "formulation value")
}

/// Assigned value agreed by expert laboratories.
pub fn expert_value(consensus_value: f64) -> Result<f64, EngineError> {
    finite_passthrough(consensus_value, "expert consensus value")
}
