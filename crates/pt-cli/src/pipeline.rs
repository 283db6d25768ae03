//! High-level pipeline entry points shared by the commands and the
//! integration tests.

use std::path::Path;

use anyhow::Context;

use pt_calc::StatEngine;
use pt_config::Config;
use pt_model::{CalculationResult, ParticipantRecord};
use pt_validate::ValidatedData;

/// Outcome of a full calculate run.
pub struct AnalysisOutcome {
    pub records: Vec<ParticipantRecord>,
    pub result: CalculationResult,
}

/// Validation stage only.
pub fn validate_input(input: &Path, config: &Config) -> anyhow::Result<ValidatedData> {
    pt_validate::load_and_validate(input, config)
        .with_context(|| format!("validation failed for {}", input.display()))
}

/// Validation followed by the configured calculation.
pub fn run_analysis(input: &Path, config: &Config) -> anyhow::Result<AnalysisOutcome> {
    let data = validate_input(input, config)?;
    let result = pt_calc::run_calculation(&data.records, &config.calculation, &StatEngine)
        .context("calculation failed")?;
    Ok(AnalysisOutcome {
        records: data.records,
        result,
    })
}
