//! Survival-factor ranking.
//!
//! A fixed-priority comparison over a table of [`ScoringRule`]s. Each rule
//! measures the impact of one candidate factor and competes with that impact
//! on a common comparison scale. The highest score wins, and on an exact tie
//! the rule evaluated first keeps the lead.

mod rules;

pub use rules::{FARE_SCALE, RULES, RankingInputs, ScoringRule};

use crate::types::{FactorScore, KeyFinding};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Every evaluated score plus the winning factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorRanking {
    pub scores: Vec<FactorScore>,
    /// `None` when every rule was skipped.
    pub key_finding: Option<KeyFinding>,
}

/// Rank the factors in [`RULES`] against `inputs`.
pub fn rank_factors(inputs: &RankingInputs) -> FactorRanking {
    rank_with(&RULES, inputs)
}

/// Rank against an arbitrary rule table, evaluated in slice order.
pub fn rank_with(rules: &[ScoringRule], inputs: &RankingInputs) -> FactorRanking {
    let mut scores = Vec::with_capacity(rules.len());
    let mut leader: Option<(&ScoringRule, f64)> = None;

    for rule in rules {
        let evaluated = rule.evaluate(inputs);
        scores.push(FactorScore {
            factor: rule.factor,
            impact: evaluated.map(|(impact, _)| impact),
            score: evaluated.map(|(_, score)| score),
        });

        let Some((impact, score)) = evaluated else {
            warn!("Skipping factor '{}': inputs undefined", rule.factor.name());
            continue;
        };
        debug!(
            "Factor '{}' impact {:.4}, score {:.4}",
            rule.factor.name(),
            impact,
            score
        );

        // Strictly greater, so ties stay with the earlier rule
        if leader.is_none_or(|(_, best)| score > best) {
            leader = Some((rule, score));
        }
    }

    let key_finding = leader.map(|(rule, score)| KeyFinding {
        factor_name: rule.factor.name().to_string(),
        explanation_text: (rule.explain)(inputs),
        score,
    });

    match &key_finding {
        Some(finding) => info!(
            "Key finding: {} (score {:.2})",
            finding.factor_name, finding.score
        ),
        None => warn!("No factor could be scored"),
    }

    FactorRanking {
        scores,
        key_finding,
    }
}
