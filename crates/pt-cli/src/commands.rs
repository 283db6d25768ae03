//! Command implementations.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};

use pt_config::{Config, ReportFormat};
use pt_model::PersistedResults;
use pt_report::render_report;

use pt_cli::pipeline::{run_analysis, validate_input};

use crate::cli::{CalculateArgs, ReportOnlyArgs, ValidateDataArgs};
use crate::summary::{print_scores, print_validation_summary};

pub fn run_calculate(args: &CalculateArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(method) = args.method {
        config.calculation.method = method;
    }
    if let Some(sigma_pt) = args.sigma_pt {
        config.calculation.sigma_pt = sigma_pt;
    }
    config.validate().context("invalid configuration")?;

    let spinner = start_spinner(&format!("Analyzing {}", args.input.display()));
    let outcome = run_analysis(&args.input, &config);
    spinner.finish_and_clear();
    let outcome = outcome?;

    println!(
        "Assigned value x_pt = {:.6} (u = {:.6}), method {}",
        outcome.result.x_pt, outcome.result.u_x_pt, outcome.result.method_used
    );
    print_scores(&outcome.records, &outcome.result);

    if let Some(path) = &args.results_json {
        pt_calc::save_results(path, &outcome.result).context("failed to save results")?;
        println!("Results saved to {}", path.display());
    }

    if let Some(report_path) = &args.output_report {
        let format = report_format(&config, args.output_format);
        let dataset = pt_report::aggregate(
            &outcome.records,
            Some(PersistedResults::from(&outcome.result)),
            &config,
        );
        let spinner = start_spinner("Rendering report");
        let rendered = render_report(&dataset, &config.reporting, format, report_path);
        spinner.finish_and_clear();
        rendered.context("report rendering failed")?;
        println!("Report written to {}", report_path.display());
    }
    Ok(())
}

pub fn run_validate_data(args: &ValidateDataArgs, config: &Config) -> anyhow::Result<()> {
    let spinner = start_spinner(&format!("Validating {}", args.input.display()));
    let data = validate_input(&args.input, config);
    spinner.finish_and_clear();
    let data = data?;

    print_validation_summary(&args.input, &data);
    println!("Validation passed. Participants: {}", data.records.len());
    Ok(())
}

pub fn run_report_only(args: &ReportOnlyArgs, config: &Config) -> anyhow::Result<()> {
    let persisted = pt_calc::load_results(&args.results_json)
        .with_context(|| format!("failed to load results from {}", args.results_json.display()))?;

    let format = report_format(config, args.output_format);
    let output = args
        .output_report
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("report.{}", format.extension())));
    let dataset = pt_report::aggregate(&[], Some(persisted), config);

    let spinner = start_spinner("Rendering report");
    let rendered = render_report(&dataset, &config.reporting, format, &output);
    spinner.finish_and_clear();
    rendered.context("report rendering failed")?;
    println!("Report written to {}", output.display());
    Ok(())
}

fn report_format(config: &Config, override_format: Option<ReportFormat>) -> ReportFormat {
    override_format.unwrap_or(config.reporting.default_format)
}

fn start_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
