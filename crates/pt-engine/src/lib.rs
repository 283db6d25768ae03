//! Numeric kernels for proficiency-testing statistics.
//!
//! Implements the ISO 13528:2022 computations the orchestration layer
//! dispatches to: the Annex C robust estimator (Algorithm A), assigned-value
//! uncertainty derivations, and participant performance scores. All
//! functions are pure over slices and scalars, synchronous, and re-entrant.

mod error;
mod estimator;
mod robust;
mod scoring;
mod uncertainty;

pub use error::EngineError;
pub use estimator::{RobustEstimate, algorithm_a, crm_value, expert_value, formulation_value};
pub use scoring::{
    ScoreBand, classify_z_score, classify_zeta_score, z_scores, zeta_scores,
    zeta_scores_simplified,
};
pub use uncertainty::{
    consensus_uncertainty, crm_uncertainty, expert_uncertainty, formulation_uncertainty,
};

/// Algorithm A is not meaningful below this participant count.
pub const MIN_PARTICIPANTS: usize = 5;
