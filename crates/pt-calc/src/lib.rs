//! Calculation orchestration.
//!
//! Dispatches the configured assigned-value method over validated records,
//! selects the applicable zeta-score variant, and persists the intermediate
//! results JSON consumed by report-only runs. Formulas live in `pt-engine`;
//! this crate decides which ones run and with what inputs.

mod engine;
mod error;
mod orchestrator;
mod persist;

pub use engine::{ComputeEngine, StatEngine};
pub use error::{CalculationError, PersistError};
pub use orchestrator::run_calculation;
pub use persist::{load_results, save_results};
