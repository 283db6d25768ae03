//! Application configuration: typed structures with per-field defaults,
//! YAML/TOML loading selected by file extension, and a single validation
//! pass applying every range predicate before any pipeline stage runs.

mod error;
mod model;

use std::path::Path;

pub use error::ConfigError;
pub use model::{
    AlgorithmAParams, CalculationConfig, Config, CrmParams, ExpertConsensusParams,
    FormulationParams, InputDataConfig, OutlierHandlingConfig, OutlierMethod, PlotConfig,
    ReportFormat, ReportingConfig,
};

/// Loads configuration from an optional file, falling back to defaults.
///
/// The format is chosen by extension: `.yaml`/`.yml` or `.toml`. The loaded
/// configuration is range-validated before it is returned; out-of-range or
/// unknown fields are rejected here, not later in the pipeline.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config = match path {
        None => Config::default(),
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase)
                .unwrap_or_default();
            let text = std::fs::read_to_string(path)
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
            match extension.as_str() {
                "yaml" | "yml" => serde_yaml::from_str(&text).map_err(|source| {
                    ConfigError::ParseYaml {
                        path: path.to_path_buf(),
                        source,
                    }
                })?,
                "toml" => toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
                    path: path.to_path_buf(),
                    source,
                })?,
                other => {
                    return Err(ConfigError::UnsupportedFormat {
                        extension: other.to_string(),
                    });
                }
            }
        }
    };
    config.validate()?;
    tracing::debug!(method = %config.calculation.method, "configuration loaded");
    Ok(config)
}
