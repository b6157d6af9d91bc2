use crate::error::{Result, ResultExt};
use crate::io::dataset_to_dataframe;
use crate::schema::CleanDataset;
use crate::types::{AnalysisReport, ShapeSummary};
use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// File name of the exported cleaned dataset.
pub const PROCESSED_CSV_NAME: &str = "titanic_train_processed.csv";

/// File name of the exported shape summary.
pub const SUMMARY_JSON_NAME: &str = "titanic_train_summary.json";

/// Shape summary in its export form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub rows: usize,
    pub columns: Vec<String>,
}

impl From<&ShapeSummary> for ExportSummary {
    fn from(shape: &ShapeSummary) -> Self {
        Self {
            rows: shape.row_count,
            columns: shape.column_names.clone(),
        }
    }
}

/// An [`AnalysisReport`] stamped with run metadata.
///
/// Used for both JSON output (`--json`) and file writing (`--emit-report`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file, when the data came from one
    pub input_file: Option<String>,
    #[serde(flatten)]
    pub report: AnalysisReport,
}

impl ReportDocument {
    pub fn new(report: AnalysisReport, input_file: Option<String>) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file,
            report,
        }
    }
}

/// Writes exported datasets and reports into one output directory.
pub struct ReportWriter {
    output_dir: PathBuf,
    output_name: Option<String>,
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            output_name: None,
        }
    }
}

impl ReportWriter {
    pub fn new(output_dir: PathBuf, output_name: Option<String>) -> Self {
        Self {
            output_dir,
            output_name,
        }
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    /// Write the cleaned dataset, every schema field, as CSV.
    pub fn write_processed_csv(&self, dataset: &CleanDataset) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let mut df = dataset_to_dataframe(dataset)?;
        let output_path = self.output_dir.join(PROCESSED_CSV_NAME);
        let mut file = File::create(&output_path)?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(&mut df)
            .context(format!("Failed to write {}", output_path.display()))?;

        info!("Dataset saved: {}", output_path.display());
        Ok(output_path)
    }

    /// Write `{rows, columns}` as pretty JSON.
    pub fn write_summary(&self, shape: &ShapeSummary) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let summary_path = self.output_dir.join(SUMMARY_JSON_NAME);
        let mut file = File::create(&summary_path)?;
        file.write_all(serde_json::to_string_pretty(&ExportSummary::from(shape))?.as_bytes())?;

        info!("Summary saved: {}", summary_path.display());
        Ok(summary_path)
    }

    /// Write the full report as `<base>_report.json`.
    ///
    /// The configured output name takes precedence over `default_base_name`.
    pub fn write_report(
        &self,
        document: &ReportDocument,
        default_base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let base_name = self.output_name.as_deref().unwrap_or(default_base_name);
        let report_path = self.output_dir.join(format!("{}_report.json", base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(document)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());
        Ok(report_path)
    }
}
