//! Participant performance scores.
//!
//! z = (x_i − x_pt) / σ_pt. The zeta score normalizes by the combined
//! uncertainty √(u(x_i)² + u(x_pt)²); when participants reported no usable
//! uncertainties the simplified variant divides by u(x_pt) alone.

use crate::error::{EngineError, ensure_finite, ensure_same_length};

pub fn z_scores(results: &[f64], x_pt: f64, sigma_pt: f64) -> Result<Vec<f64>, EngineError> {
    ensure_finite(results, "participant results")?;
    if !x_pt.is_finite() {
        return Err(EngineError::InvalidInput(format!(
            "assigned value must be finite, got {x_pt}"
        )));
    }
    if !sigma_pt.is_finite() || sigma_pt <= 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "sigma_pt must be a positive finite number, got {sigma_pt}"
        )));
    }
    Ok(results.iter().map(|x| (x - x_pt) / sigma_pt).collect())
}

pub fn zeta_scores(
    results: &[f64],
    uncertainties: &[f64],
    x_pt: f64,
    u_x_pt: f64,
) -> Result<Vec<f64>, EngineError> {
    ensure_same_length("results", results.len(), "uncertainties", uncertainties.len())?;
    ensure_finite(results, "participant results")?;
    ensure_finite(uncertainties, "participant uncertainties")?;
    if !x_pt.is_finite() {
        return Err(EngineError::InvalidInput(format!(
            "assigned value must be finite, got {x_pt}"
        )));
    }
    if !u_x_pt.is_finite() || u_x_pt < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "u(x_pt) must be non-negative and finite, got {u_x_pt}"
        )));
    }
    if let Some((i, &u)) = uncertainties.iter().enumerate().find(|&(_, &u)| u < 0.0) {
        return Err(EngineError::InvalidInput(format!(
            "negative participant uncertainty at index {i}: {u}"
        )));
    }

    results
        .iter()
        .zip(uncertainties)
        .map(|(&x, &u)| {
            let combined_squared = u.powi(2) + u_x_pt.powi(2);
            if combined_squared <= 0.0 {
                return Err(EngineError::DivisionByZero {
                    context: "combined uncertainty",
                });
            }
            Ok((x - x_pt) / combined_squared.sqrt())
        })
        .collect()
}

pub fn zeta_scores_simplified(
    results: &[f64],
    x_pt: f64,
    u_x_pt: f64,
) -> Result<Vec<f64>, EngineError> {
    ensure_finite(results, "participant results")?;
    if !x_pt.is_finite() {
        return Err(EngineError::InvalidInput(format!(
            "assigned value must be finite, got {x_pt}"
        )));
    }
    if !u_x_pt.is_finite() || u_x_pt <= 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "u(x_pt) must be a positive finite number, got {u_x_pt}"
        )));
    }
    Ok(results.iter().map(|x| (x - x_pt) / u_x_pt).collect())
}

/// Performance band per ISO 13528:2022 acceptance limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Satisfactory,
    Questionable,
    Unsatisfactory,
}

impl ScoreBand {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Satisfactory => "Satisfactory",
            Self::Questionable => "Questionable",
            Self::Unsatisfactory => "Unsatisfactory",
        }
    }
}

pub fn classify_z_score(z: f64) -> ScoreBand {
    let z = z.abs();
    if z <= 2.0 {
        ScoreBand::Satisfactory
    } else if z <= 3.0 {
        ScoreBand::Questionable
    } else {
        ScoreBand::Unsatisfactory
    }
}

pub fn classify_zeta_score(zeta: f64) -> ScoreBand {
    if zeta.abs() <= 2.0 {
        ScoreBand::Satisfactory
    } else {
        ScoreBand::Unsatisfactory
    }
}
