//! Correlation with the survival outcome, and histogram binning.

mod binning;

pub use binning::{bin_values, histogram, histogram_by_outcome};

use crate::error::Result;
use crate::schema::{Field, Row};
use crate::utils::median;
use std::collections::BTreeMap;
use tracing::debug;

/// Fields correlated with `Survived` by default.
pub const CORRELATION_FIELDS: [Field; 7] = [
    Field::Pclass,
    Field::Age,
    Field::SibSp,
    Field::Parch,
    Field::Fare,
    Field::FamilySize,
    Field::IsAlone,
];

/// Pearson correlation coefficient of two equally long sequences.
///
/// Returns 0 instead of NaN when either side has zero variance, and for
/// empty or mismatched inputs.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() != ys.len() || xs.is_empty() {
        return 0.0;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        numerator += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    if sum_sq_x == 0.0 || sum_sq_y == 0.0 {
        return 0.0;
    }

    (numerator / (sum_sq_x * sum_sq_y).sqrt()).clamp(-1.0, 1.0)
}

/// Correlation of `field` with survival over rows where `field` is present.
pub fn correlation_with_outcome(rows: &[Row], field: Field) -> f64 {
    let (xs, ys): (Vec<f64>, Vec<f64>) = rows
        .iter()
        .filter_map(|row| {
            row.number(field)
                .map(|x| (x, if row.survived { 1.0 } else { 0.0 }))
        })
        .unzip();

    pearson(&xs, &ys)
}

/// Name-based [`correlation_with_outcome`].
///
/// # Errors
///
/// Returns [`AnalysisError::UnknownField`](crate::AnalysisError::UnknownField)
/// for a name outside the schema.
pub fn correlation_for(rows: &[Row], field: &str) -> Result<f64> {
    Ok(correlation_with_outcome(rows, field.parse()?))
}

/// Correlations of several fields with survival.
pub fn correlations(rows: &[Row], fields: &[Field]) -> BTreeMap<Field, f64> {
    fields
        .iter()
        .map(|&field| {
            let r = correlation_with_outcome(rows, field);
            debug!("corr({}, Survived) = {:.4}", field, r);
            (field, r)
        })
        .collect()
}

/// Cast values to {0, 1}: 1 where the value is strictly above the median.
pub fn binarize_above_median(values: &[f64]) -> Vec<f64> {
    let threshold = median(values);
    values
        .iter()
        .map(|&v| if v > threshold { 1.0 } else { 0.0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Pclass, Sex};

    const EPSILON: f64 = 1e-9;

    fn row(survived: bool, pclass: Pclass, fare: Option<f64>) -> Row {
        Row {
            passenger_id: None,
            survived,
            pclass,
            name: None,
            sex: Sex::Male,
            age: Some(30.0),
            sib_sp: 0,
            parch: 0,
            ticket: None,
            fare,
            cabin: None,
            embarked: None,
            features: None,
        }
    }

    #[test]
    fn test_pearson_self_correlation() {
        let xs = [1.0, 4.0, 2.0, 8.0, 5.0];
        let negated: Vec<f64> = xs.iter().map(|x| -x).collect();
        assert!((pearson(&xs, &xs) - 1.0).abs() < EPSILON);
        assert!((pearson(&xs, &negated) + 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_pearson_binarized_outcome_with_itself() {
        let outcome = binarize_above_median(&[3.0, 10.0, 1.0, 7.0]);
        assert_eq!(outcome, vec![0.0, 1.0, 0.0, 1.0]);
        assert!((pearson(&outcome, &outcome) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_pearson_zero_variance_is_zero() {
        assert_eq!(pearson(&[3.0, 3.0, 3.0], &[0.0, 1.0, 1.0]), 0.0);
        assert_eq!(pearson(&[1.0, 2.0, 3.0], &[1.0, 1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_pearson_degenerate_inputs() {
        assert_eq!(pearson(&[], &[]), 0.0);
        assert_eq!(pearson(&[1.0, 2.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_correlation_with_outcome_skips_missing() {
        let rows = vec![
            row(true, Pclass::First, Some(100.0)),
            row(false, Pclass::Third, Some(10.0)),
            row(true, Pclass::Third, None),
        ];
        // Only the two rows with a fare take part
        assert!((correlation_with_outcome(&rows, Field::Fare) - 1.0).abs() < EPSILON);
        assert!(correlation_with_outcome(&rows, Field::Pclass) < 0.0);
    }

    #[test]
    fn test_correlations_stay_in_range() {
        let rows = vec![
            row(true, Pclass::First, Some(80.0)),
            row(false, Pclass::Second, Some(13.0)),
            row(false, Pclass::Third, Some(7.0)),
            row(true, Pclass::Third, Some(9.0)),
        ];

        let result = correlations(&rows, &CORRELATION_FIELDS);

        assert_eq!(result.len(), CORRELATION_FIELDS.len());
        assert!(result.values().all(|r| (-1.0..=1.0).contains(r)));
        // Age is constant in these rows
        assert_eq!(result[&Field::Age], 0.0);
    }

    #[test]
    fn test_correlation_for_unknown_field() {
        let err = correlation_for(&[], "Deck").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_FIELD");
        assert_eq!(correlation_for(&[], "Fare").unwrap(), 0.0);
    }
}
