use crate::schema::{Field, RejectedRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

// ============================================================================
// Aggregation Types
// ============================================================================

/// Row count and column names of the analysed dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSummary {
    pub row_count: usize,
    pub column_names: Vec<String>,
}

/// Missing-value count for one field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissingEntry {
    pub count: usize,
    /// `count / total_rows * 100`.
    pub percent: f64,
}

pub type MissingReport = BTreeMap<Field, MissingEntry>;

/// Descriptive statistics of one numeric field within one group.
///
/// All statistics are `None` when the group has no non-missing values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub count: usize,
    pub mean: Option<f64>,
    /// Population standard deviation.
    pub std: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Group label to statistics, e.g. `"0"`/`"1"` when grouped by `Survived`.
pub type GroupedNumericStats = BTreeMap<String, NumericStats>;

/// Counts for one category value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub count: usize,
    pub survived_count: usize,
    /// Rows of this category per group-by value.
    pub group_counts: BTreeMap<String, usize>,
    /// `survived_count / count * 100`; `None` for an empty category.
    pub survival_rate_percent: Option<f64>,
}

/// Label of one category.
///
/// Numeric labels order by value and sort before text labels, so
/// `FamilySize` categories read `1, 2, 10` and not `1, 10, 2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryLabel(String);

impl CategoryLabel {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<f64> {
        self.0.parse::<f64>().ok().filter(|v| !v.is_nan())
    }
}

impl Ord for CategoryLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            // Tie-break on the text so "1" and "1.0" stay distinct keys
            (Some(a), Some(b)) => a.total_cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for CategoryLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&str> for CategoryLabel {
    fn from(label: &str) -> Self {
        CategoryLabel(label.to_string())
    }
}

impl From<String> for CategoryLabel {
    fn from(label: String) -> Self {
        CategoryLabel(label)
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Category label to counts, e.g. `"male"`/`"female"` for `Sex`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryBreakdown(BTreeMap<CategoryLabel, CategoryStats>);

impl CategoryBreakdown {
    pub fn get(&self, label: &str) -> Option<&CategoryStats> {
        self.0.get(&CategoryLabel::from(label))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Categories in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&CategoryLabel, &CategoryStats)> {
        self.0.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(CategoryLabel::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &CategoryStats> {
        self.0.values()
    }
}

impl Index<&str> for CategoryBreakdown {
    type Output = CategoryStats;

    fn index(&self, label: &str) -> &CategoryStats {
        match self.get(label) {
            Some(stats) => stats,
            None => panic!("no category '{}' in breakdown", label),
        }
    }
}

impl<L: Into<CategoryLabel>> FromIterator<(L, CategoryStats)> for CategoryBreakdown {
    fn from_iter<I: IntoIterator<Item = (L, CategoryStats)>>(iter: I) -> Self {
        CategoryBreakdown(iter.into_iter().map(|(l, s)| (l.into(), s)).collect())
    }
}

impl<'a> IntoIterator for &'a CategoryBreakdown {
    type Item = (&'a CategoryLabel, &'a CategoryStats);
    type IntoIter = std::collections::btree_map::Iter<'a, CategoryLabel, CategoryStats>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Result of a generic [`aggregate`](crate::aggregation::aggregate) call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "groups", rename_all = "snake_case")]
pub enum AggregateResult {
    Numeric(GroupedNumericStats),
    Categorical(CategoryBreakdown),
}

// ============================================================================
// Binning Types
// ============================================================================

/// Equal-width histogram over one value sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// `None` when the sequence was empty.
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Histograms of one field for each outcome group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramPair {
    pub not_survived: Histogram,
    pub survived: Histogram,
}

// ============================================================================
// Ranking Types
// ============================================================================

/// Candidate survival factors, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Factor {
    Gender,
    #[serde(rename = "Passenger Class")]
    PassengerClass,
    Fare,
}

impl Factor {
    pub fn name(&self) -> &'static str {
        match self {
            Factor::Gender => "Gender",
            Factor::PassengerClass => "Passenger Class",
            Factor::Fare => "Fare",
        }
    }
}

/// Outcome of one ranking rule. Both values are `None` when its inputs
/// were undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub factor: Factor,
    /// Raw impact as the rule computes it.
    pub impact: Option<f64>,
    /// Impact on the comparison scale; the highest score wins.
    pub score: Option<f64>,
}

/// The dominant survival factor and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyFinding {
    pub factor_name: String,
    pub explanation_text: String,
    pub score: f64,
}

// ============================================================================
// Chart Descriptions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<f64>,
}

/// Render description handed to an external chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
    /// Fixed upper bound of the value axis, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_max: Option<f64>,
}

// ============================================================================
// Analysis Report
// ============================================================================

/// Everything one analysis run produces.
///
/// This struct is designed to be serialized and handed to rendering or
/// export collaborators as plain data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub shape_summary: ShapeSummary,
    /// Records dropped during parsing, with their input positions.
    pub rejected_records: Vec<RejectedRecord>,
    /// Missing values before imputation.
    pub missing_report: MissingReport,
    /// Missing values after imputation (zero for Age, Fare, Embarked).
    pub post_imputation_missing: MissingReport,
    pub imputation_steps: Vec<String>,
    pub numeric_stats_by_outcome: BTreeMap<Field, GroupedNumericStats>,
    pub categorical_counts_by_outcome: BTreeMap<Field, CategoryBreakdown>,
    pub correlations: BTreeMap<Field, f64>,
    pub histogram_bins: BTreeMap<Field, HistogramPair>,
    pub factor_scores: Vec<FactorScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_finding: Option<KeyFinding>,
    /// First cleaned rows, one map per row.
    pub preview: Vec<BTreeMap<Field, Option<String>>>,
    pub charts: Vec<ChartSpec>,
}
