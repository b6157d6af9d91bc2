//! Missing-value report.

use crate::schema::{Field, Row};
use crate::types::{MissingEntry, MissingReport};
use crate::utils::percentage;
use tracing::debug;

/// Count missing values of each field.
///
/// Pass the pre-imputation rows for a data-quality report, or the cleaned
/// rows to confirm that imputation left nothing missing.
pub fn missing_report(rows: &[Row], fields: &[Field]) -> MissingReport {
    let total = rows.len();

    fields
        .iter()
        .map(|&field| {
            let count = rows.iter().filter(|r| r.value(field).is_missing()).count();
            if count > 0 {
                debug!("{}: {} of {} missing", field, count, total);
            }
            (
                field,
                MissingEntry {
                    count,
                    percent: percentage(count, total),
                },
            )
        })
        .collect()
}
