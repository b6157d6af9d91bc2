//! Statistical imputation methods.
//!
//! Provides median (Age), mean (Fare) and fixed-constant (Embarked) fills.
//! Every method takes a read-only slice and returns a new row sequence.

use crate::schema::{Embarked, Field, Row};
use crate::utils::{mean, median};
use tracing::debug;

/// Port used for every missing `Embarked` value.
///
/// This is a fixed policy, not a mode computed from the data.
pub const EMBARKED_FALLBACK: Embarked = Embarked::Southampton;

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill missing `Age` with the median of the present ages.
    ///
    /// The median is taken over the rows whose age is present before any fill.
    /// Rows filled earlier in the pass never enter the "not missing" set, so
    /// this matches recomputing the median for every missing row.
    pub fn impute_age_median(rows: &[Row], processing_steps: &mut Vec<String>) -> Vec<Row> {
        let present: Vec<f64> = rows.iter().filter_map(|r| r.age).collect();
        let fill_value = median(&present);

        let (filled, count) = Self::fill(rows, |r| r.age.is_none(), |r| r.with_age(fill_value));
        Self::log_fill(Field::Age, "median", fill_value, count, processing_steps);
        filled
    }

    /// Fill missing `Fare` with the mean of the present fares (0 if none are present).
    pub fn impute_fare_mean(rows: &[Row], processing_steps: &mut Vec<String>) -> Vec<Row> {
        let present: Vec<f64> = rows.iter().filter_map(|r| r.fare).collect();
        let fill_value = mean(&present).unwrap_or(0.0);

        let (filled, count) =
            Self::fill(rows, |r| r.fare.is_none(), |r| r.with_fare(fill_value));
        Self::log_fill(Field::Fare, "mean", fill_value, count, processing_steps);
        filled
    }

    /// Fill missing `Embarked` with [`EMBARKED_FALLBACK`].
    pub fn impute_embarked_constant(
        rows: &[Row],
        processing_steps: &mut Vec<String>,
    ) -> Vec<Row> {
        let (filled, count) = Self::fill(
            rows,
            |r| r.embarked.is_none(),
            |r| r.with_embarked(EMBARKED_FALLBACK),
        );

        if count > 0 {
            processing_steps.push(format!(
                "Filled '{}' with constant value: '{}' ({} rows)",
                Field::Embarked,
                EMBARKED_FALLBACK.as_str(),
                count
            ));
        }
        filled
    }

    fn fill(
        rows: &[Row],
        is_missing: impl Fn(&Row) -> bool,
        apply: impl Fn(Row) -> Row,
    ) -> (Vec<Row>, usize) {
        let mut count = 0;
        let filled = rows
            .iter()
            .map(|row| {
                if is_missing(row) {
                    count += 1;
                    apply(row.clone())
                } else {
                    row.clone()
                }
            })
            .collect();
        (filled, count)
    }

    fn log_fill(
        field: Field,
        method: &str,
        fill_value: f64,
        count: usize,
        processing_steps: &mut Vec<String>,
    ) {
        debug!("{}: {} missing, fill value {:.2}", field, count, fill_value);
        if count > 0 {
            processing_steps.push(format!(
                "Filled '{}' with {}: {:.2} ({} rows)",
                field, method, fill_value, count
            ));
        }
    }
}
