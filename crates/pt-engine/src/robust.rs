//! Robust-statistics primitives shared by the estimators.

use crate::error::EngineError;

/// Conversion factor from MAD to a standard deviation estimate,
/// 1/Φ⁻¹(3/4) for a normal distribution.
pub(crate) const MAD_TO_SIGMA: f64 = 1.4826;

/// Huber's cut-off used by Algorithm A.
pub(crate) const HUBER_C: f64 = 1.5;

/// Median of the values. Sorts a copy; `None` on empty input.
pub(crate) fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 0 {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    } else {
        Some(sorted[n / 2])
    }
}

/// Median absolute deviation around `center`.
pub(crate) fn mad(values: &[f64], center: f64) -> Result<f64, EngineError> {
    if values.is_empty() {
        return Err(EngineError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    let deviations: Vec<f64> = values.iter().map(|v| (v - center).abs()).collect();
    median(&deviations).ok_or(EngineError::DivisionByZero {
        context: "median of absolute deviations",
    })
}

/// Huber's ψ: identity inside ±c, clamped to ±c outside.
pub(crate) fn huber_psi(x: f64, c: f64) -> f64 {
    if x.abs() <= c { x } else { c * x.signum() }
}

/// Weight of one observation given its standardized residual.
pub(crate) fn huber_weight(standardized_residual: f64, c: f64) -> f64 {
    if standardized_residual.abs() < 1e-10 {
        1.0
    } else {
        huber_psi(standardized_residual, c) / standardized_residual
    }
}
