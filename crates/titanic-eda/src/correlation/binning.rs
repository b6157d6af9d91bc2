//! Equal-width histogram binning.

use crate::schema::{Field, Row};
use crate::types::{Histogram, HistogramPair};
use crate::utils::min_max;

/// Assign each value to one of `bins` equal-width bins and count them.
///
/// The range runs from the sequence's own minimum to its maximum. A value
/// equal to the maximum lands in the last bin rather than one past it, and a
/// constant sequence puts everything in bin 0.
pub fn bin_values(values: &[f64], bins: usize) -> Vec<usize> {
    histogram(values, bins).counts
}

/// [`bin_values`] plus the range the bins cover.
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let mut counts = vec![0; bins];

    let Some((min, max)) = min_max(values) else {
        return Histogram {
            min: None,
            max: None,
            step: 0.0,
            counts,
        };
    };

    if bins == 0 {
        return Histogram {
            min: Some(min),
            max: Some(max),
            step: 0.0,
            counts,
        };
    }

    let step = (max - min) / bins as f64;
    for &value in values {
        let index = if step > 0.0 {
            ((value - min) / step).floor() as usize
        } else {
            0
        };
        counts[index.min(bins - 1)] += 1;
    }

    Histogram {
        min: Some(min),
        max: Some(max),
        step,
        counts,
    }
}

/// Histograms of `field` for non-survivors and survivors.
///
/// Each outcome group is binned over its own min/max, so bin `i` of one
/// histogram and bin `i` of the other generally cover different ranges.
pub fn histogram_by_outcome(rows: &[Row], field: Field, bins: usize) -> HistogramPair {
    let values_for = |survived: bool| -> Vec<f64> {
        rows.iter()
            .filter(|r| r.survived == survived)
            .filter_map(|r| r.number(field))
            .collect()
    };

    HistogramPair {
        not_survived: histogram(&values_for(false), bins),
        survived: histogram(&values_for(true), bins),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Pclass, Sex};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_max_value_clamps_into_last_bin() {
        let counts = bin_values(&[0.0, 5.0, 10.0], 2);
        assert_eq!(counts, vec![1, 2]);
        assert_eq!(counts.iter().sum::<usize>(), 3);
    }

    #[test]
    fn test_constant_sequence_goes_to_bin_zero() {
        for bins in 1..=5 {
            let counts = bin_values(&[4.0, 4.0, 4.0], bins);
            assert_eq!(counts[0], 3, "bins = {}", bins);
            assert_eq!(counts.iter().sum::<usize>(), 3);
        }
    }

    #[test]
    fn test_empty_sequence_yields_zero_bins() {
        let histogram = histogram(&[], 4);
        assert_eq!(histogram.counts, vec![0, 0, 0, 0]);
        assert_eq!(histogram.min, None);
    }

    #[test]
    fn test_zero_bins() {
        assert!(bin_values(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn test_histogram_keeps_range() {
        let histogram = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0], 10);
        assert_eq!(histogram.min, Some(0.0));
        assert_eq!(histogram.max, Some(10.0));
        assert_eq!(histogram.step, 1.0);
        assert_eq!(histogram.counts, vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 2]);
    }

    #[test]
    fn test_histogram_by_outcome_uses_each_groups_range() {
        let row = |survived: bool, age: f64| Row {
            passenger_id: None,
            survived,
            pclass: Pclass::Third,
            name: None,
            sex: Sex::Male,
            age: Some(age),
            sib_sp: 0,
            parch: 0,
            ticket: None,
            fare: None,
            cabin: None,
            embarked: None,
            features: None,
        };
        let rows = vec![row(false, 10.0), row(false, 20.0), row(true, 50.0)];

        let pair = histogram_by_outcome(&rows, Field::Age, 2);

        assert_eq!(pair.not_survived.min, Some(10.0));
        assert_eq!(pair.not_survived.counts, vec![1, 1]);
        assert_eq!(pair.survived.min, Some(50.0));
        assert_eq!(pair.survived.counts, vec![1, 0]);
        // Missing fares produce empty histograms, not errors
        assert_eq!(histogram_by_outcome(&rows, Field::Fare, 2).survived.total(), 0);
    }
}
