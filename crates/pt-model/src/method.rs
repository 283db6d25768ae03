use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Assigned-value determination method per ISO 13528:2022.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculationMethod {
    /// Robust consensus from participant results (Annex C, Algorithm A).
    AlgorithmA,
    /// Certified reference material: value and uncertainty from the certificate.
    #[serde(rename = "CRM")]
    Crm,
    /// Known value from formulation of the test material.
    Formulation,
    /// Consensus value from expert laboratories.
    Expert,
}

#[derive(Debug, Error)]
#[error("unknown calculation method: {0} (expected AlgorithmA, CRM, Formulation, or Expert)")]
pub struct ParseMethodError(String);

impl FromStr for CalculationMethod {
    type Err = ParseMethodError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "AlgorithmA" => Ok(Self::AlgorithmA),
            "CRM" => Ok(Self::Crm),
            "Formulation" => Ok(Self::Formulation),
            "Expert" => Ok(Self::Expert),
            other => Err(ParseMethodError(other.to_string())),
        }
    }
}

impl fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AlgorithmA => "AlgorithmA",
            Self::Crm => "CRM",
            Self::Formulation => "Formulation",
            Self::Expert => "Expert",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_configuration_spellings() {
        assert_eq!(
            "AlgorithmA".parse::<CalculationMethod>().unwrap(),
            CalculationMethod::AlgorithmA
        );
        assert_eq!(
            "CRM".parse::<CalculationMethod>().unwrap(),
            CalculationMethod::Crm
        );
        assert!("algorithm_a".parse::<CalculationMethod>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for method in [
            CalculationMethod::AlgorithmA,
            CalculationMethod::Crm,
            CalculationMethod::Formulation,
            CalculationMethod::Expert,
        ] {
            assert_eq!(method.to_string().parse::<CalculationMethod>().unwrap(), method);
        }
    }

    #[test]
    fn serde_uses_crm_spelling() {
        let json = serde_json::to_string(&CalculationMethod::Crm).unwrap();
        assert_eq!(json, "\"CRM\"");
    }
}
