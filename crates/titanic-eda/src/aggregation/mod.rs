//! Aggregation engine.
//!
//! Every function here takes a read-only row slice and never fails on
//! missing values. Only field names that fall outside the schema produce
//! an error, and only through the name-based [`aggregate`] entry point.

mod grouped;
mod missing;

pub use grouped::{categorical_counts_by, numeric_stats_by};
pub use missing::missing_report;

use crate::error::Result;
use crate::schema::{Field, Row};
use crate::types::{AggregateResult, ShapeSummary};
use serde::{Deserialize, Serialize};

/// Group label used when no group-by field is given.
pub const ALL_GROUP: &str = "all";

/// Group or category label for rows whose value is missing.
pub const MISSING_LABEL: &str = "missing";

/// Shape of the result an [`aggregate`] call produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationKind {
    /// Mean, std, median, min and max per group.
    Numeric,
    /// Counts and survival rate per category.
    Categorical,
}

/// Aggregate `field`, optionally grouped by `group_by`, by field name.
///
/// # Errors
///
/// Returns [`AnalysisError::UnknownField`](crate::AnalysisError::UnknownField)
/// if either name is not part of the schema.
pub fn aggregate(
    rows: &[Row],
    field: &str,
    group_by: Option<&str>,
    kind: AggregationKind,
) -> Result<AggregateResult> {
    let field: Field = field.parse()?;
    let group_by = group_by.map(str::parse::<Field>).transpose()?;

    Ok(match kind {
        AggregationKind::Numeric => {
            AggregateResult::Numeric(numeric_stats_by(rows, field, group_by))
        }
        AggregationKind::Categorical => {
            AggregateResult::Categorical(categorical_counts_by(rows, field, group_by))
        }
    })
}

/// Row count and column names.
///
/// Derived columns are listed once any row carries derived features.
pub fn shape_summary(rows: &[Row]) -> ShapeSummary {
    let fields: &[Field] = if rows.iter().any(|r| r.features.is_some()) {
        &Field::ALL
    } else {
        &Field::SOURCE
    };

    ShapeSummary {
        row_count: rows.len(),
        column_names: fields.iter().map(|f| f.as_str().to_string()).collect(),
    }
}
