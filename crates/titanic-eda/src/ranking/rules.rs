//! Scoring rules for the survival-factor heuristic.

use crate::aggregation::categorical_counts_by;
use crate::schema::{Field, Pclass, Row, Sex};
use crate::types::{CategoryBreakdown, Factor};
use crate::utils::mean;

/// Fare impact multiplier. The impact is divided back down before it is
/// compared against the other factors.
pub const FARE_SCALE: f64 = 10.0;

/// Survival statistics the rules read from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingInputs {
    pub female_rate: Option<f64>,
    pub male_rate: Option<f64>,
    /// Survival rate of each class that has passengers, in class order.
    pub class_rates: Vec<(Pclass, f64)>,
    pub survivor_fare_mean: Option<f64>,
    pub overall_fare_mean: Option<f64>,
}

impl RankingInputs {
    /// Build inputs from the `Sex` and `Pclass` breakdowns plus fare means.
    pub fn from_breakdowns(
        sex: &CategoryBreakdown,
        pclass: &CategoryBreakdown,
        rows: &[Row],
    ) -> Self {
        let rate = |breakdown: &CategoryBreakdown, label: &str| {
            breakdown
                .get(label)
                .and_then(|stats| stats.survival_rate_percent)
        };

        let class_rates = Pclass::ALL
            .iter()
            .filter_map(|&class| rate(pclass, class.as_str()).map(|r| (class, r)))
            .collect();

        let fares: Vec<f64> = rows.iter().filter_map(|r| r.fare).collect();
        let survivor_fares: Vec<f64> = rows
            .iter()
            .filter(|r| r.survived)
            .filter_map(|r| r.fare)
            .collect();

        Self {
            female_rate: rate(sex, Sex::Female.as_str()),
            male_rate: rate(sex, Sex::Male.as_str()),
            class_rates,
            survivor_fare_mean: mean(&survivor_fares),
            overall_fare_mean: mean(&fares),
        }
    }

    /// Compute the breakdowns from `rows` and build inputs from them.
    pub fn from_rows(rows: &[Row]) -> Self {
        let sex = categorical_counts_by(rows, Field::Sex, Some(Field::Survived));
        let pclass = categorical_counts_by(rows, Field::Pclass, Some(Field::Survived));
        Self::from_breakdowns(&sex, &pclass, rows)
    }

    fn class_extremes(&self) -> Option<((Pclass, f64), (Pclass, f64))> {
        let first = *self.class_rates.first()?;
        Some(self.class_rates.iter().fold((first, first), |(lo, hi), &entry| {
            (
                if entry.1 < lo.1 { entry } else { lo },
                if entry.1 > hi.1 { entry } else { hi },
            )
        }))
    }
}

/// A named scoring rule.
///
/// `impact` returns `None` when the inputs it needs are undefined, in which
/// case the rule is skipped. Otherwise the rule competes with
/// `impact / comparison_divisor`.
pub struct ScoringRule {
    pub factor: Factor,
    pub impact: fn(&RankingInputs) -> Option<f64>,
    pub comparison_divisor: f64,
    pub explain: fn(&RankingInputs) -> String,
}

impl ScoringRule {
    /// Impact and comparison score, or `None` when the rule is skipped.
    pub fn evaluate(&self, inputs: &RankingInputs) -> Option<(f64, f64)> {
        let impact = (self.impact)(inputs)?;
        Some((impact, impact / self.comparison_divisor))
    }
}

/// Rules in evaluation order. Earlier rules win ties.
pub const RULES: [ScoringRule; 3] = [
    ScoringRule {
        factor: Factor::Gender,
        impact: gender_gap,
        comparison_divisor: 1.0,
        explain: explain_gender,
    },
    ScoringRule {
        factor: Factor::PassengerClass,
        impact: class_range,
        comparison_divisor: 1.0,
        explain: explain_class,
    },
    ScoringRule {
        factor: Factor::Fare,
        impact: fare_difference,
        comparison_divisor: FARE_SCALE,
        explain: explain_fare,
    },
];

fn gender_gap(inputs: &RankingInputs) -> Option<f64> {
    Some((inputs.female_rate? - inputs.male_rate?).abs())
}

fn class_range(inputs: &RankingInputs) -> Option<f64> {
    let ((_, lo), (_, hi)) = inputs.class_extremes()?;
    Some(hi - lo)
}

/// `|mean(fare | survived) - mean(fare)| * FARE_SCALE`.
fn fare_difference(inputs: &RankingInputs) -> Option<f64> {
    Some((inputs.survivor_fare_mean? - inputs.overall_fare_mean?).abs() * FARE_SCALE)
}

fn explain_gender(inputs: &RankingInputs) -> String {
    let female = inputs.female_rate.unwrap_or_default();
    let male = inputs.male_rate.unwrap_or_default();
    format!(
        "Gender is the strongest survival factor: \
         {:.1}% of women survived against {:.1}% of men.",
        female, male
    )
}

fn explain_class(inputs: &RankingInputs) -> String {
    match inputs.class_extremes() {
        Some(((low_class, low), (high_class, high))) => format!(
            "Passenger class is the strongest survival factor: \
             class {} survived at {:.1}% against {:.1}% for class {}.",
            high_class.number(),
            high,
            low,
            low_class.number()
        ),
        None => "Passenger class is the strongest survival factor.".to_string(),
    }
}

fn explain_fare(inputs: &RankingInputs) -> String {
    format!(
        "Fare is the strongest survival factor: \
         survivors paid {:.2} on average against {:.2} overall.",
        inputs.survivor_fare_mean.unwrap_or_default(),
        inputs.overall_fare_mean.unwrap_or_default()
    )
}
