//! Titanic Exploratory Statistics Library
//!
//! A batch statistics engine for the Titanic passenger dataset, built with
//! Rust and Polars.
//!
//! # Overview
//!
//! One analysis run takes loosely typed passenger records and produces:
//!
//! - **Data Quality**: Missing-value counts before and after imputation
//! - **Imputation**: Age median, Fare mean and a fixed Embarked port
//! - **Feature Derivation**: Title, FamilySize and IsAlone
//! - **Grouped Statistics**: Numeric and categorical breakdowns by outcome
//! - **Correlation & Histograms**: Pearson correlation with survival and
//!   equal-width histograms per outcome
//! - **Factor Ranking**: A fixed-priority heuristic naming the dominant
//!   survival factor
//!
//! The core never parses delimited text and never touches the filesystem;
//! the [`io`] and [`reporting`] modules form the shell around it.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use titanic_eda::{Analyzer, AnalysisConfig};
//! use titanic_eda::io::load_csv;
//!
//! let df = load_csv("data/train.csv")?;
//!
//! let config = AnalysisConfig::builder()
//!     .histogram_bins(10)
//!     .preview_rows(5)
//!     .build()?;
//!
//! let report = Analyzer::builder()
//!     .config(config)
//!     .build()?
//!     .analyze_dataframe(&df)?;
//!
//! if let Some(finding) = &report.key_finding {
//!     println!("{}: {}", finding.factor_name, finding.explanation_text);
//! }
//! ```
//!
//! # Ad-hoc Aggregation
//!
//! Individual statistics are available by field name:
//!
//! ```rust,ignore
//! use titanic_eda::aggregation::{aggregate, AggregationKind};
//!
//! let fares = aggregate(run.dataset.rows(), "Fare", Some("Pclass"), AggregationKind::Numeric)?;
//! ```

pub mod aggregation;
pub mod config;
pub mod correlation;
pub mod error;
pub mod imputers;
pub mod io;
pub mod pipeline;
pub mod ranking;
pub mod reporting;
pub mod schema;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use aggregation::{AggregationKind, aggregate};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError};
pub use error::{AnalysisError, Result as AnalysisResult, ResultExt};
pub use imputers::{CleaningOutput, FeatureDeriver, StatisticalImputer, clean};
pub use pipeline::{AnalysisRun, Analyzer, AnalyzerBuilder};
pub use ranking::{FactorRanking, RankingInputs, ScoringRule, rank_factors};
pub use reporting::{ReportDocument, ReportWriter};
pub use schema::{
    CleanDataset, Dataset, Embarked, Field, ParsedDataset, Pclass, RawRecord, RawValue,
    RejectedRecord, Row, Sex, Title, parse_records,
};
pub use types::{
    AggregateResult, AnalysisReport, CategoryBreakdown, CategoryLabel, CategoryStats, ChartSpec,
    Factor, FactorScore, Histogram, HistogramPair, KeyFinding, MissingReport, NumericStats,
    ShapeSummary,
};
