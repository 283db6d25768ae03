use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use pt_model::{CalculationMethod, ColumnMapping};

use crate::error::ConfigError;

/// Top-level configuration. Every field has a default so a missing or empty
/// configuration file yields a fully usable setup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub input_data: InputDataConfig,
    pub calculation: CalculationConfig,
    pub reporting: ReportingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct InputDataConfig {
    pub participant_id_col: String,
    pub result_col: String,
    pub uncertainty_col: Option<String>,
}

impl Default for InputDataConfig {
    fn default() -> Self {
        Self {
            participant_id_col: "ParticipantID".to_string(),
            result_col: "Value".to_string(),
            uncertainty_col: Some("Uncertainty".to_string()),
        }
    }
}

impl InputDataConfig {
    pub fn column_mapping(&self) -> ColumnMapping {
        ColumnMapping {
            participant_id_col: self.participant_id_col.clone(),
            result_col: self.result_col.clone(),
            uncertainty_col: self.uncertainty_col.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CalculationConfig {
    pub method: CalculationMethod,
    /// Standard deviation for proficiency assessment, chosen independently
    /// of the data. Must be strictly positive.
    pub sigma_pt: f64,
    pub algorithm_a: AlgorithmAParams,
    pub crm: CrmParams,
    pub formulation: FormulationParams,
    pub expert_consensus: ExpertConsensusParams,
    pub outlier_handling: OutlierHandlingConfig,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            method: CalculationMethod::AlgorithmA,
            sigma_pt: 0.15,
            algorithm_a: AlgorithmAParams::default(),
            crm: CrmParams::default(),
            formulation: FormulationParams::default(),
            expert_consensus: ExpertConsensusParams::default(),
            outlier_handling: OutlierHandlingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AlgorithmAParams {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for AlgorithmAParams {
    fn default() -> Self {
        Self {
            tolerance: 1.0e-5,
            max_iterations: 50,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CrmParams {
    pub certified_value: Option<f64>,
    pub uncertainty: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct FormulationParams {
    pub known_value: Option<f64>,
    pub uncertainty: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ExpertConsensusParams {
    pub consensus_value: Option<f64>,
    pub uncertainty: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct OutlierHandlingConfig {
    pub method: OutlierMethod,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutlierMethod {
    #[default]
    RobustAlgorithmA,
    Grubbs,
    DixonsQ,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ReportingConfig {
    pub default_format: ReportFormat,
    pub custom_template: Option<PathBuf>,
    pub plots: PlotConfig,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            default_format: ReportFormat::Pdf,
            custom_template: None,
            plots: PlotConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Pdf,
    Html,
    Docx,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Html => "html",
            Self::Docx => "docx",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "html" => Ok(Self::Html),
            "docx" => Ok(Self::Docx),
            other => Err(format!(
                "unknown report format: {other} (expected pdf, html, or docx)"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PlotConfig {
    pub generate_histogram: bool,
    pub histogram_bins: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            generate_histogram: true,
            histogram_bins: 30,
        }
    }
}

impl Config {
    /// Applies every range predicate in one pass. Called by `load_config`
    /// so an invalid configuration never reaches the pipeline.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_data.participant_id_col.trim().is_empty() {
            return Err(ConfigError::invalid(
                "input_data.participant_id_col",
                "column name must not be empty",
            ));
        }
        if self.input_data.result_col.trim().is_empty() {
            return Err(ConfigError::invalid(
                "input_data.result_col",
                "column name must not be empty",
            ));
        }
        let calc = &self.calculation;
        if !calc.sigma_pt.is_finite() || calc.sigma_pt <= 0.0 {
            return Err(ConfigError::invalid(
                "calculation.sigma_pt",
                format!("must be a positive finite number, got {}", calc.sigma_pt),
            ));
        }
        if !calc.algorithm_a.tolerance.is_finite() || calc.algorithm_a.tolerance <= 0.0 {
            return Err(ConfigError::invalid(
                "calculation.algorithm_a.tolerance",
                format!("must be positive, got {}", calc.algorithm_a.tolerance),
            ));
        }
        if calc.algorithm_a.max_iterations == 0 {
            return Err(ConfigError::invalid(
                "calculation.algorithm_a.max_iterations",
                "must be greater than zero",
            ));
        }
        for (field, uncertainty) in [
            ("calculation.crm.uncertainty", calc.crm.uncertainty),
            (
                "calculation.formulation.uncertainty",
                calc.formulation.uncertainty,
            ),
            (
                "calculation.expert_consensus.uncertainty",
                calc.expert_consensus.uncertainty,
            ),
        ] {
            if let Some(u) = uncertainty {
                if !u.is_finite() || u < 0.0 {
                    return Err(ConfigError::invalid(
                        field,
                        format!("must be non-negative and finite, got {u}"),
                    ));
                }
            }
        }
        if self.reporting.plots.histogram_bins == 0 {
            return Err(ConfigError::invalid(
                "reporting.plots.histogram_bins",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
