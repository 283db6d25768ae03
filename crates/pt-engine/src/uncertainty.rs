//! Standard uncertainty of the assigned value, u(x_pt), per method.

use crate::error::EngineError;

/// Factor relating the robust standard deviation to the consensus
/// uncertainty: u(x_pt) = 1.25 · s* / √p.
const CONSENSUS_FACTOR: f64 = 1.25;

/// Uncertainty of a consensus value from Algorithm A.
pub fn consensus_uncertainty(s_star: f64, participants_used: usize) -> Result<f64, EngineError> {
    if !s_star.is_finite() || s_star < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "robust standard deviation must be non-negative and finite, got {s_star}"
        )));
    }
    if participants_used == 0 {
        return Err(EngineError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    Ok(CONSENSUS_FACTOR * s_star / (participants_used as f64).sqrt())
}

fn passthrough_uncertainty(value: f64, label: &str) -> Result<f64, EngineError> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "{label} must be non-negative and finite, got {value}"
        )));
    }
    Ok(value)
}

/// Uncertainty stated on a CRM certificate, validated and passed through.
pub fn crm_uncertainty(certified_uncertainty: f64) -> Result<f64, EngineError> {
    passthrough_uncertainty(certified_uncertainty, "CRM uncertainty")
}

/// Uncertainty estimated from the formulation process.
pub fn formulation_uncertainty(known_uncertainty: f64) -> Result<f64, EngineError> {
    passthrough_uncertainty(known_uncertainty, "formulation uncertainty")
}

/// Uncertainty assessed for an expert consensus value.
pub fn expert_uncertainty(consensus_uncertainty: f64) -> Result<f64, EngineError> {
    passthrough_uncertainty(consensus_uncertainty, "expert consensus uncertainty")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consensus_formula() {
        // 1.25 * 1.0 / sqrt(25) = 0.25
        let u = consensus_uncertainty(1.0, 25).unwrap();
        assert!((u - 0.25).abs() < 1e-12);
    }

    #[test]
    fn consensus_rejects_invalid_inputs() {
        assert!(consensus_uncertainty(f64::NAN, 10).is_err());
        assert!(consensus_uncertainty(-1.0, 10).is_err());
        assert!(matches!(
            consensus_uncertainty(1.0, 0),
            Err(EngineError::InsufficientData { .. })
        ));
    }

    #[test]
    fn passthroughs_are_exact() {
        assert_eq!(crm_uncertainty(0.15).unwrap(), 0.15);
        assert_eq!(formulation_uncertainty(0.08).unwrap(), 0.08);
        assert_eq!(expert_uncertainty(0.12).unwrap(), 0.12);
    }

    #[test]
    fn passthroughs_reject_negative_or_non_finite() {
        assert!(crm_uncertainty(-0.1).is_err());
        assert!(formulation_uncertainty(f64::INFINITY).is_err());
        assert!(expert_uncertainty(f64::NAN).is_err());
    }
}
