//! Derived-feature construction: title, family size and the is-alone flag.

use crate::schema::{DerivedFeatures, Row, Title};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Raw title reported when a name has no comma-separated second component.
pub const UNKNOWN_TITLE: &str = "Unknown";

/// `"<Surname>, <Title>. <Rest>"`: captures everything after the first comma
/// up to the next period (or the end of the name).
static TITLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^,]*,\s*([^.]*)").expect("Invalid regex: title"));

/// Extract the raw title token from a passenger name.
pub fn extract_raw_title(name: &str) -> &str {
    TITLE_PATTERN
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or(UNKNOWN_TITLE)
}

/// Computes the derived fields of each row.
pub struct FeatureDeriver;

impl FeatureDeriver {
    /// Compute title, family size and is-alone for every row.
    pub fn derive(rows: &[Row], processing_steps: &mut Vec<String>) -> Vec<Row> {
        let mut title_counts: BTreeMap<Title, usize> = BTreeMap::new();

        let derived: Vec<Row> = rows
            .iter()
            .map(|row| {
                let features = Self::features_for(row);
                *title_counts.entry(features.title).or_insert(0) += 1;
                row.clone().with_features(features)
            })
            .collect();

        let summary = title_counts
            .iter()
            .map(|(title, count)| format!("{}={}", title.as_str(), count))
            .collect::<Vec<_>>()
            .join(", ");
        processing_steps.push(format!("Extracted 'Title' from 'Name' ({})", summary));
        processing_steps.push("Derived 'FamilySize' = SibSp + Parch + 1 and 'IsAlone'".to_string());

        derived
    }

    pub fn features_for(row: &Row) -> DerivedFeatures {
        let raw_title = row
            .name
            .as_deref()
            .map(extract_raw_title)
            .unwrap_or(UNKNOWN_TITLE);
        let family_size = row.sib_sp + row.parch + 1;

        DerivedFeatures {
            title: Title::from_raw(raw_title),
            family_size,
            is_alone: family_size == 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Pclass, Sex};

    fn row(name: Option<&str>, sib_sp: u32, parch: u32) -> Row {
        Row {
            passenger_id: None,
            survived: true,
            pclass: Pclass::Second,
            name: name.map(str::to_string),
            sex: Sex::Female,
            age: Some(30.0),
            sib_sp,
            parch,
            ticket: None,
            fare: Some(13.0),
            cabin: None,
            embarked: None,
            features: None,
        }
    }

    #[test]
    fn test_extract_raw_title() {
        assert_eq!(extract_raw_title("Braund, Mr. Owen Harris"), "Mr");
        assert_eq!(extract_raw_title("Heikkinen, Miss. Laina"), "Miss");
        assert_eq!(
            extract_raw_title("Rothes, the Countess. of (Lucy Noel Martha Dyer-Edwards)"),
            "the Countess"
        );
    }

    #[test]
    fn test_extract_raw_title_without_comma() {
        assert_eq!(extract_raw_title("NoComma"), UNKNOWN_TITLE);
        assert_eq!(extract_raw_title(""), UNKNOWN_TITLE);
    }

    #[test]
    fn test_extract_raw_title_without_period() {
        assert_eq!(extract_raw_title("Smith, Dr John"), "Dr John");
    }

    #[test]
    fn test_titles_collapse_to_five_values() {
        let cases = [
            ("Palsson, Master. Gosta Leonard", Title::Master),
            ("Nasser, Mrs. Nicholas (Adele Achem)", Title::Mrs),
            ("Uruchurtu, Don. Manuel E", Title::Other),
            ("Byles, Rev. Thomas Roussel Davids", Title::Other),
            ("NoComma", Title::Other),
        ];
        for (name, expected) in cases {
            let features = FeatureDeriver::features_for(&row(Some(name), 0, 0));
            assert_eq!(features.title, expected, "name: {}", name);
        }
    }

    #[test]
    fn test_missing_name_is_other() {
        let features = FeatureDeriver::features_for(&row(None, 0, 0));
        assert_eq!(features.title, Title::Other);
    }

    #[test]
    fn test_family_size_and_is_alone() {
        let alone = FeatureDeriver::features_for(&row(None, 0, 0));
        assert_eq!(alone.family_size, 1);
        assert!(alone.is_alone);

        let family = FeatureDeriver::features_for(&row(None, 1, 2));
        assert_eq!(family.family_size, 4);
        assert!(!family.is_alone);
    }

    #[test]
    fn test_derive_attaches_features_and_logs() {
        let rows = vec![
            row(Some("Lee, Miss. Amy"), 0, 0),
            row(Some("Doe, Mr. John"), 1, 0),
        ];
        let mut steps = Vec::new();

        let derived = FeatureDeriver::derive(&rows, &mut steps);

        assert!(derived.iter().all(|r| r.features.is_some()));
        assert!(rows.iter().all(|r| r.features.is_none()));
        assert!(steps[0].contains("Miss=1"));
        assert!(steps[0].contains("Mr=1"));
    }
}
