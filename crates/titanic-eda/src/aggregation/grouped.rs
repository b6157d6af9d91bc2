//! Grouped numeric statistics and categorical counts.

use super::{ALL_GROUP, MISSING_LABEL};
use crate::schema::{Field, Row};
use crate::types::{CategoryBreakdown, CategoryStats, GroupedNumericStats, NumericStats};
use crate::utils::{mean, median, min_max, population_std, survival_rate};
use std::collections::BTreeMap;
use tracing::debug;

impl NumericStats {
    /// Describe a set of values that already had missing entries removed.
    pub fn from_values(values: &[f64]) -> Self {
        let range = min_max(values);
        Self {
            count: values.len(),
            mean: mean(values),
            std: population_std(values),
            median: (!values.is_empty()).then(|| median(values)),
            min: range.map(|(lo, _)| lo),
            max: range.map(|(_, hi)| hi),
        }
    }
}

/// Label of the group a row belongs to.
pub(crate) fn group_label(row: &Row, group_by: Option<Field>) -> String {
    match group_by {
        None => ALL_GROUP.to_string(),
        Some(field) => row
            .label(field)
            .unwrap_or_else(|| MISSING_LABEL.to_string()),
    }
}

/// Every group label known up front, so empty groups still appear.
fn seed_groups(group_by: Option<Field>) -> Vec<String> {
    match group_by {
        None => vec![ALL_GROUP.to_string()],
        Some(field) => field
            .domain()
            .map(|labels| labels.iter().map(|s| s.to_string()).collect())
            .unwrap_or_default(),
    }
}

/// Mean, population std, median, min and max of `field` per group.
///
/// Missing values are filtered out before computing anything. A group
/// with no remaining values reports `count = 0` and `None` everywhere else.
pub fn numeric_stats_by(
    rows: &[Row],
    field: Field,
    group_by: Option<Field>,
) -> GroupedNumericStats {
    let mut values: BTreeMap<String, Vec<f64>> = seed_groups(group_by)
        .into_iter()
        .map(|label| (label, Vec::new()))
        .collect();

    for row in rows {
        let bucket = values.entry(group_label(row, group_by)).or_default();
        if let Some(v) = row.number(field) {
            bucket.push(v);
        }
    }

    let stats: GroupedNumericStats = values
        .into_iter()
        .map(|(label, group)| (label, NumericStats::from_values(&group)))
        .collect();

    debug!("Numeric stats for '{}': {} groups", field, stats.len());
    stats
}

/// Per-category row counts, survivor counts and per-group counts.
///
/// Categories from the field's closed domain are always present, so a
/// category nobody belongs to shows `count = 0` and an undefined rate.
pub fn categorical_counts_by(
    rows: &[Row],
    field: Field,
    group_by: Option<Field>,
) -> CategoryBreakdown {
    let groups = seed_groups(group_by);
    let empty_counts: BTreeMap<String, usize> =
        groups.iter().map(|label| (label.clone(), 0)).collect();

    let mut tallies: BTreeMap<String, (usize, usize, BTreeMap<String, usize>)> = field
        .domain()
        .unwrap_or_default()
        .iter()
        .map(|label| (label.to_string(), (0, 0, empty_counts.clone())))
        .collect();

    for row in rows {
        let category = row
            .label(field)
            .unwrap_or_else(|| MISSING_LABEL.to_string());
        let (count, survived, group_counts) = tallies
            .entry(category)
            .or_insert_with(|| (0, 0, empty_counts.clone()));

        *count += 1;
        if row.survived {
            *survived += 1;
        }
        *group_counts.entry(group_label(row, group_by)).or_insert(0) += 1;
    }

    let breakdown: CategoryBreakdown = tallies
        .into_iter()
        .map(|(category, (count, survived_count, group_counts))| {
            (
                category,
                CategoryStats {
                    count,
                    survived_count,
                    group_counts,
                    survival_rate_percent: survival_rate(survived_count, count),
                },
            )
        })
        .collect();

    debug!("Category counts for '{}': {} categories", field, breakdown.len());
    breakdown
}
