//! Render descriptions for bar charts.
//!
//! Each function maps aggregate output to a [`ChartSpec`] value. Rendering,
//! and any canvas or widget that goes with it, belongs to the caller.

use crate::schema::Field;
use crate::types::{
    CategoryBreakdown, ChartKind, ChartSeries, ChartSpec, Histogram, HistogramPair, MissingReport,
};

const NOT_SURVIVED_SERIES: &str = "Survived=0";
const SURVIVED_SERIES: &str = "Survived=1";

/// Percentage of missing values per field, on a 0-100 axis.
pub fn missing_chart(report: &MissingReport) -> ChartSpec {
    ChartSpec {
        title: "Missing Values (%)".to_string(),
        kind: ChartKind::Bar,
        labels: report.keys().map(|f| f.as_str().to_string()).collect(),
        series: vec![ChartSeries {
            label: "% Missing".to_string(),
            values: report.values().map(|entry| entry.percent).collect(),
        }],
        y_max: Some(100.0),
    }
}

/// Row counts per category, split by outcome.
pub fn categorical_chart(field: Field, breakdown: &CategoryBreakdown) -> ChartSpec {
    let series_for = |group: &str| -> Vec<f64> {
        breakdown
            .values()
            .map(|stats| stats.group_counts.get(group).copied().unwrap_or(0) as f64)
            .collect()
    };

    ChartSpec {
        title: field.as_str().to_string(),
        kind: ChartKind::Bar,
        labels: breakdown.labels().map(str::to_string).collect(),
        series: vec![
            ChartSeries {
                label: NOT_SURVIVED_SERIES.to_string(),
                values: series_for("0"),
            },
            ChartSeries {
                label: SURVIVED_SERIES.to_string(),
                values: series_for("1"),
            },
        ],
        y_max: None,
    }
}

/// Binned distribution of `field` per outcome, labelled by bin index.
pub fn histogram_chart(field: Field, pair: &HistogramPair) -> ChartSpec {
    let bins = pair.not_survived.counts.len().max(pair.survived.counts.len());
    let values = |histogram: &Histogram| -> Vec<f64> {
        histogram.counts.iter().map(|&c| c as f64).collect()
    };

    ChartSpec {
        title: format!("{} distribution", field),
        kind: ChartKind::Bar,
        labels: (0..bins).map(|i| i.to_string()).collect(),
        series: vec![
            ChartSeries {
                label: NOT_SURVIVED_SERIES.to_string(),
                values: values(&pair.not_survived),
            },
            ChartSeries {
                label: SURVIVED_SERIES.to_string(),
                values: values(&pair.survived),
            },
        ],
        y_max: None,
    }
}
