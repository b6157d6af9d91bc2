//! Configuration for an analysis run.

use crate::correlation::CORRELATION_FIELDS;
use crate::schema::Field;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_HISTOGRAM_BINS: usize = 10;
const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Configuration for the analyzer.
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use titanic_eda::config::AnalysisConfig;
/// use titanic_eda::Field;
///
/// let config = AnalysisConfig::builder()
///     .histogram_bins(20)
///     .histogram_fields(vec![Field::Age])
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of equal-width bins per histogram.
    /// Default: 10
    pub histogram_bins: usize,

    /// Fields binned into per-outcome histograms.
    /// Default: Age, Fare
    pub histogram_fields: Vec<Field>,

    /// Fields described with mean/std/median/min/max per outcome.
    /// Default: Age, SibSp, Parch, Fare
    pub numeric_fields: Vec<Field>,

    /// Fields counted per category and outcome.
    /// Default: Pclass, Sex, Embarked
    pub categorical_fields: Vec<Field>,

    /// Fields correlated with survival.
    /// Default: Pclass, Age, SibSp, Parch, Fare, FamilySize, IsAlone
    pub correlation_fields: Vec<Field>,

    /// Number of cleaned rows included in the report preview.
    /// Default: 5
    pub preview_rows: usize,

    /// Output directory for exported data and reports.
    /// Default: "output"
    pub output_dir: PathBuf,

    /// Base name for the report file (without extension).
    /// If None, the input file stem is used.
    /// Default: None
    pub output_name: Option<String>,

    /// Whether to export the processed dataset and summary after analysis.
    /// Default: false
    pub save_to_disk: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            histogram_fields: vec![Field::Age, Field::Fare],
            numeric_fields: vec![Field::Age, Field::SibSp, Field::Parch, Field::Fare],
            categorical_fields: vec![Field::Pclass, Field::Sex, Field::Embarked],
            correlation_fields: CORRELATION_FIELDS.to_vec(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            output_dir: PathBuf::from("output"),
            output_name: None,
            save_to_disk: false,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::InvalidHistogramBins(
                self.histogram_bins,
            ));
        }

        let lists = [
            ("histogram_fields", &self.histogram_fields),
            ("numeric_fields", &self.numeric_fields),
            ("categorical_fields", &self.categorical_fields),
            ("correlation_fields", &self.correlation_fields),
        ];
        for (name, fields) in lists {
            if fields.is_empty() {
                return Err(ConfigValidationError::EmptyFieldList(name.to_string()));
            }
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid histogram bins: {0} (must be at least 1)")]
    InvalidHistogramBins(usize),

    #[error("Field list '{0}' must not be empty")]
    EmptyFieldList(String),
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    histogram_bins: Option<usize>,
    histogram_fields: Option<Vec<Field>>,
    numeric_fields: Option<Vec<Field>>,
    categorical_fields: Option<Vec<Field>>,
    correlation_fields: Option<Vec<Field>>,
    preview_rows: Option<usize>,
    output_dir: Option<PathBuf>,
    output_name: Option<String>,
    save_to_disk: Option<bool>,
}

impl AnalysisConfigBuilder {
    /// Set the number of histogram bins.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    pub fn histogram_fields(mut self, fields: Vec<Field>) -> Self {
        self.histogram_fields = Some(fields);
        self
    }

    pub fn numeric_fields(mut self, fields: Vec<Field>) -> Self {
        self.numeric_fields = Some(fields);
        self
    }

    pub fn categorical_fields(mut self, fields: Vec<Field>) -> Self {
        self.categorical_fields = Some(fields);
        self
    }

    pub fn correlation_fields(mut self, fields: Vec<Field>) -> Self {
        self.correlation_fields = Some(fields);
        self
    }

    /// Set how many cleaned rows the report preview holds.
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Set the output directory for exported data and reports.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set a custom report base name (without extension).
    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// Enable or disable exporting results to disk.
    pub fn save_to_disk(mut self, save: bool) -> Self {
        self.save_to_disk = Some(save);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            histogram_bins: self.histogram_bins.unwrap_or(defaults.histogram_bins),
            histogram_fields: self.histogram_fields.unwrap_or(defaults.histogram_fields),
            numeric_fields: self.numeric_fields.unwrap_or(defaults.numeric_fields),
            categorical_fields: self
                .categorical_fields
                .unwrap_or(defaults.categorical_fields),
            correlation_fields: self
                .correlation_fields
                .unwrap_or(defaults.correlation_fields),
            preview_rows: self.preview_rows.unwrap_or(defaults.preview_rows),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            output_name: self.output_name,
            save_to_disk: self.save_to_disk.unwrap_or(defaults.save_to_disk),
        };

        config.validate()?;
        Ok(config)
    }
}
