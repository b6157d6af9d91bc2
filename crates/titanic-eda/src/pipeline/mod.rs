//! Pipeline module.
//!
//! This module provides the analyzer that drives one analysis run.

mod builder;

pub use builder::{AnalysisRun, Analyzer, AnalyzerBuilder};
