//! Renderer invocation.
//!
//! The report is rendered by an external Quarto installation. All staging
//! artifacts (report data JSON, template) live in a scoped temp directory
//! that is removed on every exit path, success or failure.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use pt_config::{ReportFormat, ReportingConfig};

use crate::dataset::ReportDataset;

const DATA_FILE: &str = "report_data.json";
const TEMPLATE_FILE: &str = "report.qmd";

/// Built-in template used when the configuration does not name one. Reads
/// the staged data JSON; histogram settings travel inside that file.
const DEFAULT_TEMPLATE: &str = r##"---
title: "Proficiency Testing Report"
format:
  pdf: default
  html: default
  docx: default
---

```{python}
import json

with open("report_data.json") as f:
    data = json.load(f)
```

## Round summary

```{python}
summary = data.get("summary")
if summary is not None:
    print(f"Participants: {summary['count']}")
    print(f"Mean: {summary['mean']:.4g}  Median: {summary['median']:.4g}")
    print(f"Std dev: {summary['std_dev']:.4g}")
calc = data.get("calculation")
if calc is not None:
    print(f"Assigned value x_pt: {calc['x_pt']:.4g} (u = {calc['u_x_pt']:.4g})")
    print(f"Method: {calc['method_used']}  sigma_pt: {calc['sigma_pt_used']}")
```

## Participant scores

```{python}
calc = data.get("calculation")
ids = data.get("participant_ids") or []
if calc is not None:
    scores = calc["participant_scores"]
    zetas = calc["participant_z_prime_scores"]
    for i, (z, zeta) in enumerate(zip(scores, zetas)):
        label = ids[i] if i < len(ids) else f"#{i + 1}"
        print(f"{label}: z = {z:.3f}, zeta = {zeta:.3f}")
```
"##;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report renderer not found: install Quarto and ensure 'quarto' is on PATH")]
    RendererUnavailable,

    #[error("report rendering failed with status {status}: {stderr}")]
    RenderFailed { status: i32, stderr: String },

    #[error("custom template not found: {path}")]
    TemplateNotFound { path: PathBuf },

    #[error("failed to stage report artifacts: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize report data: {0}")]
    Data(#[from] serde_json::Error),
}

/// Renders `dataset` to `output` in the requested format.
pub fn render_report(
    dataset: &ReportDataset,
    config: &ReportingConfig,
    format: ReportFormat,
    output: &Path,
) -> Result<(), ReportError> {
    probe_renderer()?;

    let staging = tempfile::TempDir::new()?;
    fs::write(
        staging.path().join(DATA_FILE),
        serde_json::to_string_pretty(dataset)?,
    )?;
    stage_template(staging.path(), config)?;

    let rendered_name = format!("report.{}", format.extension());
    tracing::info!(format = %format, output = %output.display(), "rendering report");
    let rendered = Command::new("quarto")
        .arg("render")
        .arg(TEMPLATE_FILE)
        .arg("--to")
        .arg(format.extension())
        .arg("--output")
        .arg(&rendered_name)
        .current_dir(staging.path())
        .output()
        .map_err(|_| ReportError::RendererUnavailable)?;
    if !rendered.status.success() {
        return Err(ReportError::RenderFailed {
            status: rendered.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&rendered.stderr).into_owned(),
        });
    }

    fs::copy(staging.path().join(&rendered_name), output)?;
    Ok(())
}

fn probe_renderer() -> Result<(), ReportError> {
    let probe = Command::new("quarto")
        .arg("--version")
        .output()
        .map_err(|_| ReportError::RendererUnavailable)?;
    if probe.status.success() {
        Ok(())
    } else {
        Err(ReportError::RendererUnavailable)
    }
}

/// Copies the configured template into the staging directory, or writes the
/// built-in one when none is configured.
fn stage_template(staging: &Path, config: &ReportingConfig) -> Result<(), ReportError> {
    let destination = staging.join(TEMPLATE_FILE);
    match &config.custom_template {
        Some(template) => {
            if !template.is_file() {
                return Err(ReportError::TemplateNotFound {
                    path: template.clone(),
                });
            }
            fs::copy(template, &destination)?;
        }
        None => fs::write(&destination, DEFAULT_TEMPLATE)?,
    }
    Ok(())
}
