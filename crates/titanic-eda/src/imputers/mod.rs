//! Imputation and feature derivation.
//!
//! The cleaning pipeline threads the dataset through a fixed sequence of pure
//! stages, each producing a new row sequence:
//!
//! 1. Age: median of the present ages
//! 2. Fare: mean of the present fares
//! 3. Embarked: fixed port `S`
//! 4. Title, FamilySize, IsAlone
//!
//! The output is a [`CleanDataset`], the only dataset type the statistics
//! modules receive after this point.

mod features;
mod statistical;

pub use features::{FeatureDeriver, UNKNOWN_TITLE, extract_raw_title};
pub use statistical::{EMBARKED_FALLBACK, StatisticalImputer};

use crate::schema::{CleanDataset, Dataset};
use tracing::info;

/// Cleaned dataset plus a human-readable log of what each stage did.
#[derive(Debug, Clone)]
pub struct CleaningOutput {
    pub dataset: CleanDataset,
    pub processing_steps: Vec<String>,
}

/// Run every imputation and derivation stage over `dataset`.
///
/// The input is left untouched so it can still serve as the
/// pre-imputation snapshot for missing-value reporting.
pub fn clean(dataset: &Dataset) -> CleaningOutput {
    let mut steps = Vec::new();

    let rows = StatisticalImputer::impute_age_median(dataset.rows(), &mut steps);
    let rows = StatisticalImputer::impute_fare_mean(&rows, &mut steps);
    let rows = StatisticalImputer::impute_embarked_constant(&rows, &mut steps);
    let rows = FeatureDeriver::derive(&rows, &mut steps);

    info!(
        "Cleaned {} rows ({} processing steps)",
        rows.len(),
        steps.len()
    );

    CleaningOutput {
        dataset: CleanDataset::from_rows(rows),
        processing_steps: steps,
    }
}
