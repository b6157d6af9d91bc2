//! The analyzer that runs one full analysis over a dataset.

use crate::aggregation::{categorical_counts_by, missing_report, numeric_stats_by, shape_summary};
use crate::config::{AnalysisConfig, ConfigValidationError};
use crate::correlation::{correlations, histogram_by_outcome};
use crate::error::Result;
use crate::imputers::clean;
use crate::io::records_from_dataframe;
use crate::ranking::{RankingInputs, rank_factors};
use crate::reporting::{ReportWriter, categorical_chart, histogram_chart, missing_chart};
use crate::schema::{CleanDataset, Field, RawRecord, Row, parse_records};
use crate::types::{AnalysisReport, CategoryBreakdown};
use polars::prelude::DataFrame;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info};

/// Runs the full analysis: parse, impute, derive, aggregate, rank.
///
/// The analyzer holds no per-run state, so one instance can serve any
/// number of runs, from any thread.
pub struct Analyzer {
    config: AnalysisConfig,
    writer: ReportWriter,
}

static_assertions::assert_impl_all!(Analyzer: Send, Sync);

/// Everything a run produces: the report plus the cleaned data behind it.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub report: AnalysisReport,
    pub dataset: CleanDataset,
    /// Files written when `save_to_disk` is enabled.
    pub exported_files: Vec<PathBuf>,
}

impl Analyzer {
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::default()
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn writer(&self) -> &ReportWriter {
        &self.writer
    }

    /// Analyze loosely typed records and return the report.
    pub fn analyze(&self, records: &[RawRecord]) -> Result<AnalysisReport> {
        self.run(records).map(|run| run.report)
    }

    /// Analyze a polars `DataFrame`, e.g. one loaded with [`crate::io::load_csv`].
    pub fn analyze_dataframe(&self, df: &DataFrame) -> Result<AnalysisReport> {
        self.run_dataframe(df).map(|run| run.report)
    }

    pub fn run_dataframe(&self, df: &DataFrame) -> Result<AnalysisRun> {
        let records = records_from_dataframe(df)?;
        self.run(&records)
    }

    /// Run the analysis and keep the cleaned dataset alongside the report.
    pub fn run(&self, records: &[RawRecord]) -> Result<AnalysisRun> {
        info!("Starting analysis of {} records", records.len());

        // Step 1: Parse records into typed rows
        let parsed = parse_records(records)?;
        info!(
            "Step 1: Parsed {} rows ({} rejected)",
            parsed.dataset.len(),
            parsed.rejected.len()
        );

        // Step 2: Missing values on the pre-imputation snapshot
        let missing = missing_report(parsed.dataset.rows(), &Field::SOURCE);

        // Step 3: Imputation and feature derivation
        let cleaned = clean(&parsed.dataset);
        let rows = cleaned.dataset.rows();
        let post_imputation_missing = missing_report(rows, &Field::ALL);
        info!("Step 3: Applied {} processing steps", cleaned.processing_steps.len());

        // Step 4: Grouped statistics
        let numeric_stats_by_outcome = self
            .config
            .numeric_fields
            .iter()
            .map(|&field| (field, numeric_stats_by(rows, field, Some(Field::Survived))))
            .collect();
        let categorical_counts_by_outcome: BTreeMap<Field, CategoryBreakdown> = self
            .config
            .categorical_fields
            .iter()
            .map(|&field| (field, categorical_counts_by(rows, field, Some(Field::Survived))))
            .collect();
        info!("Step 4: Computed grouped statistics");

        // Step 5: Correlations and histograms
        let correlations = correlations(rows, &self.config.correlation_fields);
        let histogram_bins: BTreeMap<_, _> = self
            .config
            .histogram_fields
            .iter()
            .map(|&field| {
                (
                    field,
                    histogram_by_outcome(rows, field, self.config.histogram_bins),
                )
            })
            .collect();
        info!("Step 5: Computed correlations and histograms");

        // Step 6: Factor ranking
        let inputs = self.ranking_inputs(rows, &categorical_counts_by_outcome);
        let ranking = rank_factors(&inputs);

        let mut charts = vec![missing_chart(&missing)];
        charts.extend(
            categorical_counts_by_outcome
                .iter()
                .map(|(&field, breakdown)| categorical_chart(field, breakdown)),
        );
        charts.extend(
            histogram_bins
                .iter()
                .map(|(&field, pair)| histogram_chart(field, pair)),
        );
        debug!("Built {} chart descriptions", charts.len());

        let report = AnalysisReport {
            shape_summary: shape_summary(rows),
            rejected_records: parsed.rejected,
            missing_report: missing,
            post_imputation_missing,
            imputation_steps: cleaned.processing_steps,
            numeric_stats_by_outcome,
            categorical_counts_by_outcome,
            correlations,
            histogram_bins,
            factor_scores: ranking.scores,
            key_finding: ranking.key_finding,
            preview: preview(rows, self.config.preview_rows),
            charts,
        };

        let exported_files = if self.config.save_to_disk {
            vec![
                self.writer.write_processed_csv(&cleaned.dataset)?,
                self.writer.write_summary(&report.shape_summary)?,
            ]
        } else {
            Vec::new()
        };

        info!("Analysis complete: {} rows", report.shape_summary.row_count);

        Ok(AnalysisRun {
            report,
            dataset: cleaned.dataset,
            exported_files,
        })
    }

    /// Reuse the `Sex` and `Pclass` breakdowns when they were configured.
    fn ranking_inputs(
        &self,
        rows: &[Row],
        breakdowns: &BTreeMap<Field, CategoryBreakdown>,
    ) -> RankingInputs {
        let breakdown = |field: Field| {
            breakdowns
                .get(&field)
                .cloned()
                .unwrap_or_else(|| categorical_counts_by(rows, field, Some(Field::Survived)))
        };
        RankingInputs::from_breakdowns(&breakdown(Field::Sex), &breakdown(Field::Pclass), rows)
    }
}

/// First `limit` rows as field-to-label maps.
fn preview(rows: &[Row], limit: usize) -> Vec<BTreeMap<Field, Option<String>>> {
    rows.iter()
        .take(limit)
        .map(|row| {
            Field::ALL
                .iter()
                .map(|&field| (field, row.label(field)))
                .collect()
        })
        .collect()
}

/// Builder for [`Analyzer`].
#[derive(Debug, Default)]
pub struct AnalyzerBuilder {
    config: Option<AnalysisConfig>,
}

impl AnalyzerBuilder {
    /// Set the analysis configuration.
    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the analyzer.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<Analyzer, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let writer = ReportWriter::new(config.output_dir.clone(), config.output_name.clone());

        Ok(Analyzer { config, writer })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RawValue;
    use pretty_assertions::assert_eq;

    fn record(pairs: &[(&str, RawValue)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn records() -> Vec<RawRecord> {
        vec![
            record(&[
                ("Survived", RawValue::Number(1.0)),
                ("Pclass", RawValue::Number(1.0)),
                ("Sex", "female".into()),
                ("Name", "Smith, Mrs. Jane".into()),
                ("Age", RawValue::Number(29.0)),
                ("SibSp", RawValue::Number(0.0)),
                ("Parch", RawValue::Number(0.0)),
                ("Fare", RawValue::Number(100.0)),
            ]),
            record(&[
                ("Survived", RawValue::Number(0.0)),
                ("Pclass", RawValue::Number(3.0)),
                ("Sex", "male".into()),
                ("Name", "Doe, Mr. John".into()),
                ("Age", RawValue::Missing),
                ("SibSp", RawValue::Number(1.0)),
                ("Parch", RawValue::Number(0.0)),
                ("Fare", RawValue::Number(10.0)),
            ]),
        ]
    }

    #[test]
    fn test_analyzer_builder_default() {
        let analyzer = Analyzer::builder().build().unwrap();
        assert_eq!(analyzer.config().histogram_bins, 10);
        assert!(!analyzer.config().save_to_disk);
    }

    #[test]
    fn test_analyzer_builder_rejects_invalid_config() {
        let config = AnalysisConfig {
            histogram_bins: 0,
            ..AnalysisConfig::default()
        };
        assert!(Analyzer::builder().config(config).build().is_err());
    }

    #[test]
    fn test_run_populates_report_sections() {
        let config = AnalysisConfig::builder().histogram_bins(3).preview_rows(1).build().unwrap();
        let analyzer = Analyzer::builder().config(config).build().unwrap();

        let run = analyzer.run(&records()).unwrap();
        let report = &run.report;

        assert_eq!(report.shape_summary.row_count, 2);
        assert_eq!(report.missing_report[&Field::Age].count, 1);
        assert_eq!(report.post_imputation_missing[&Field::Age].count, 0);
        assert_eq!(report.numeric_stats_by_outcome.len(), 4);
        assert_eq!(report.categorical_counts_by_outcome.len(), 3);
        assert_eq!(report.histogram_bins[&Field::Age].survived.counts.len(), 3);
        assert_eq!(report.preview.len(), 1);
        assert_eq!(report.preview[0][&Field::Title], Some("Mrs".to_string()));
        // Missing chart, three categorical charts, two histograms
        assert_eq!(report.charts.len(), 6);
        assert!(run.exported_files.is_empty());
    }

    #[test]
    fn test_ranking_works_without_sex_breakdown_configured() {
        let config = AnalysisConfig::builder()
            .categorical_fields(vec![Field::Embarked])
            .build()
            .unwrap();
        let analyzer = Analyzer::builder().config(config).build().unwrap();

        let report = analyzer.analyze(&records()).unwrap();

        assert_eq!(report.key_finding.unwrap().factor_name, "Gender");
    }

    #[test]
    fn test_empty_input_fails() {
        let analyzer = Analyzer::builder().build().unwrap();
        let err = analyzer.analyze(&[]).unwrap_err();
        assert_eq!(err.error_code(), "EMPTY_DATASET");
    }
}
