//! CLI argument definitions for the proficiency testing analyzer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use pt_config::ReportFormat;
use pt_model::CalculationMethod;

#[derive(Parser)]
#[command(
    name = "pt-analysis",
    version,
    about = "Proficiency Testing Analysis - validate, score, and report PT rounds",
    long_about = "Validate participant result tables, compute assigned values and\n\
                  performance scores per ISO 13528:2022, and render reports.\n\n\
                  Supports CSV and Excel input, Algorithm A consensus values,\n\
                  CRM/formulation/expert assigned values, and z/zeta scoring."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a YAML or TOML configuration file (defaults apply when omitted).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full analysis: validate, calculate, and optionally report.
    Calculate(CalculateArgs),

    /// Validate an input file without calculating anything.
    ValidateData(ValidateDataArgs),

    /// Render a report from previously saved results.
    ReportOnly(ReportOnlyArgs),
}

#[derive(Parser)]
pub struct CalculateArgs {
    /// Participant results file (.csv, .xlsx, or .xls).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Override the configured calculation method
    /// (AlgorithmA, CRM, Formulation, Expert).
    #[arg(long = "method", value_name = "METHOD")]
    pub method: Option<CalculationMethod>,

    /// Override the configured standard deviation for proficiency assessment.
    #[arg(long = "sigma-pt", value_name = "SIGMA")]
    pub sigma_pt: Option<f64>,

    /// Write intermediate results JSON to this path.
    #[arg(long = "results-json", value_name = "PATH")]
    pub results_json: Option<PathBuf>,

    /// Render a report to this path.
    #[arg(long = "output-report", value_name = "PATH")]
    pub output_report: Option<PathBuf>,

    /// Report format (pdf, html, docx); defaults to the configured format.
    #[arg(long = "output-format", value_name = "FORMAT")]
    pub output_format: Option<ReportFormat>,
}

#[derive(Parser)]
pub struct ValidateDataArgs {
    /// Participant results file (.csv, .xlsx, or .xls).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

#[derive(Parser)]
pub struct ReportOnlyArgs {
    /// Intermediate results JSON from an earlier calculate run.
    #[arg(value_name = "RESULTS_JSON")]
    pub results_json: PathBuf,

    /// Render the report to this path (default: report.<format extension>).
    #[arg(long = "output-report", value_name = "PATH")]
    pub output_report: Option<PathBuf>,

    /// Report format (pdf, html, docx); defaults to the configured format.
    #[arg(long = "output-format", value_name = "FORMAT")]
    pub output_format: Option<ReportFormat>,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
