use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single validated participant measurement.
///
/// Construction through [`ParticipantRecord::new`] guarantees the result is
/// finite and the uncertainty, when present, is finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub participant_id: String,
    pub result: f64,
    pub uncertainty: Option<f64>,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("participant id is missing or empty")]
    MissingParticipantId,
    #[error("result must be a finite number, got {0}")]
    NonFiniteResult(f64),
    #[error("uncertainty must be a finite number, got {0}")]
    NonFiniteUncertainty(f64),
    #[error("uncertainty must be non-negative, got {0}")]
    NegativeUncertainty(f64),
}

impl ParticipantRecord {
    pub fn new(
        participant_id: impl Into<String>,
        result: f64,
        uncertainty: Option<f64>,
    ) -> Result<Self, RecordError> {
        let participant_id = participant_id.into();
        if participant_id.trim().is_empty() {
            return Err(RecordError::MissingParticipantId);
        }
        if !result.is_finite() {
            return Err(RecordError::NonFiniteResult(result));
        }
        if let Some(u) = uncertainty {
            if !u.is_finite() {
                return Err(RecordError::NonFiniteUncertainty(u));
            }
            if u < 0.0 {
                return Err(RecordError::NegativeUncertainty(u));
            }
        }
        Ok(Self {
            participant_id,
            result,
            uncertainty,
        })
    }

    /// Uncertainty usable for zeta scoring: present, finite, and strictly positive.
    pub fn has_usable_uncertainty(&self) -> bool {
        self.uncertainty.is_some_and(|u| u.is_finite() && u > 0.0)
    }
}

/// A row-addressable validation diagnostic. Row indices are 1-based to match
/// what a person sees in a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub row_index: usize,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(row_index: usize, message: impl Into<String>) -> Self {
        Self {
            row_index,
            message: message.into(),
        }
    }
}

/// Formats issues for display, truncated to the first `limit` entries with a
/// trailing remainder count.
pub fn format_issues(issues: &[ValidationIssue], limit: usize) -> String {
    let mut lines: Vec<String> = issues
        .iter()
        .take(limit)
        .map(|issue| format!("Row {}: {}", issue.row_index, issue.message))
        .collect();
    if issues.len() > limit {
        lines.push(format!("... and {} more errors", issues.len() - limit));
    }
    lines.join("\n")
}
