//! Report dataset assembly.

use chrono::{DateTime, Utc};
use serde::Serialize;

use pt_config::Config;
use pt_model::{
    CalculationMethod, ColumnMapping, ParticipantRecord, PersistedResults, SummaryStatistics,
};

/// Everything a report template needs, assembled once and serialized to the
/// report data JSON. Vector order follows input record order.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDataset {
    pub participant_ids: Vec<String>,
    pub results: Vec<f64>,
    pub uncertainties: Vec<Option<f64>>,
    pub method: CalculationMethod,
    pub sigma_pt: f64,
    pub column_mapping: ColumnMapping,
    /// Fresh statistics over the result column; absent when the dataset was
    /// built from persisted results alone.
    pub summary: Option<SummaryStatistics>,
    pub calculation: Option<PersistedResults>,
    pub generate_histogram: bool,
    pub histogram_bins: usize,
    pub generated_at: DateTime<Utc>,
}

/// Merges validated records, an optional calculation outcome, and the
/// configuration actually used. Pure; summary statistics are recomputed
/// here rather than trusted from upstream.
pub fn aggregate(
    records: &[ParticipantRecord],
    calculation: Option<PersistedResults>,
    config: &Config,
) -> ReportDataset {
    let results: Vec<f64> = records.iter().map(|r| r.result).collect();
    let (method, sigma_pt) = match &calculation {
        Some(c) => (c.method_used, c.sigma_pt_used),
        None => (config.calculation.method, config.calculation.sigma_pt),
    };
    ReportDataset {
        participant_ids: records.iter().map(|r| r.participant_id.clone()).collect(),
        uncertainties: records.iter().map(|r| r.uncertainty).collect(),
        method,
        sigma_pt,
        column_mapping: config.input_data.column_mapping(),
        summary: SummaryStatistics::from_values(&results),
        results,
        calculation,
        generate_histogram: config.reporting.plots.generate_histogram,
        histogram_bins: config.reporting.plots.histogram_bins,
        generated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, result: f64, uncertainty: Option<f64>) -> ParticipantRecord {
        ParticipantRecord::new(id, result, uncertainty).unwrap()
    }

    fn persisted() -> PersistedResults {
        PersistedResults {
            x_pt: 10.0,
            u_x_pt: 0.05,
            method_used: CalculationMethod::Crm,
            sigma_pt_used: 0.2,
            participant_scores: vec![0.5, -0.5],
            participant_z_prime_scores: vec![0.8, -0.8],
            calculation_details: Default::default(),
        }
    }

    #[test]
    fn merges_records_and_recomputes_summary() {
        let records = vec![
            record("L1", 9.0, Some(0.05)),
            record("L2", 10.0, None),
            record("L3", 11.0, Some(0.04)),
        ];
        let dataset = aggregate(&records, None, &Config::default());
        assert_eq!(dataset.participant_ids, vec!["L1", "L2", "L3"]);
        assert_eq!(dataset.results, vec![9.0, 10.0, 11.0]);
        let summary = dataset.summary.unwrap();
        assert_eq!(summary.count, 3);
        assert!((summary.mean - 10.0).abs() < 1e-12);
        assert!((summary.median - 10.0).abs() < 1e-12);
    }

    #[test]
    fn calculation_outcome_overrides_configured_method_and_sigma() {
        let records = vec![record("L1", 9.0, None)];
        let dataset = aggregate(&records, Some(persisted()), &Config::default());
        assert_eq!(dataset.method, CalculationMethod::Crm);
        assert!((dataset.sigma_pt - 0.2).abs() < 1e-12);
    }

    #[test]
    fn record_free_dataset_has_no_summary() {
        let dataset = aggregate(&[], Some(persisted()), &Config::default());
        assert!(dataset.summary.is_none());
        assert!(dataset.participant_ids.is_empty());
        assert!(dataset.calculation.is_some());
    }

    #[test]
    fn dataset_serializes_with_histogram_metadata() {
        let dataset = aggregate(&[record("L1", 9.0, None)], None, &Config::default());
        let value = serde_json::to_value(&dataset).unwrap();
        assert_eq!(value["generate_histogram"], true);
        assert_eq!(value["histogram_bins"], 30);
        assert!(value["generated_at"].is_string());
    }
}
