use std::path::PathBuf;

use thiserror::Error;

use pt_engine::EngineError;
use pt_model::CalculationMethod;

/// Failures of the calculation stage. Configuration problems are separated
/// from numeric engine failures so the operator knows which file to fix.
#[derive(Debug, Error)]
pub enum CalculationError {
    #[error("{method} method requires the '{parameter}' parameter in the configuration")]
    MissingParameter {
        method: CalculationMethod,
        parameter: &'static str,
    },

    #[error("sigma_pt must be a positive finite number, got {0}")]
    NonPositiveSigma(f64),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Failures reading or writing the intermediate results JSON.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to write results to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read results from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("results file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
