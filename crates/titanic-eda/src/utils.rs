//! Shared numeric helpers.
//!
//! These are the descriptive statistics every other module builds on. They
//! operate on plain `f64` slices that have already had missing values
//! filtered out.

// =============================================================================
// Descriptive Statistics
// =============================================================================

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median after an ascending sort.
///
/// An even-length input yields the average of the two central values. An
/// empty input yields 0.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Population standard deviation (divides by N, not N-1).
pub fn population_std(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Smallest and largest value, or `None` for an empty slice.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

// =============================================================================
// Rates
// =============================================================================

/// `part / total * 100`, or 0 when `total` is zero.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Survival rate in percent, undefined for an empty group.
pub fn survival_rate(survived: usize, total: usize) -> Option<f64> {
    (total > 0).then(|| survived as f64 / total as f64 * 100.0)
}

// =============================================================================
// Formatting
// =============================================================================

/// Render a number without a trailing `.0` when it is integral.
///
/// Used for group labels, so `Pclass` groups read `1`/`2`/`3` and not `1.0`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
