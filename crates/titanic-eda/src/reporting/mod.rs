//! Report output: chart descriptions and file export.
//!
//! Chart builders are pure functions over aggregate results. The
//! [`ReportWriter`] handles everything that touches the filesystem:
//!
//! - `titanic_train_processed.csv`: the cleaned dataset
//! - `titanic_train_summary.json`: `{rows, columns}`
//! - `<name>_report.json`: the full [`ReportDocument`]
//!
//! # Example
//!
//! ```rust,ignore
//! use titanic_eda::reporting::{ReportDocument, ReportWriter};
//!
//! let writer = ReportWriter::new(PathBuf::from("output"), None);
//! let document = ReportDocument::new(report, Some("train.csv".to_string()));
//! writer.write_report(&document, "train")?;
//! ```

mod charts;
mod writer;

pub use charts::{categorical_chart, histogram_chart, missing_chart};
pub use writer::{
    ExportSummary, PROCESSED_CSV_NAME, ReportDocument, ReportWriter, SUMMARY_JSON_NAME,
};
