//! Loosely typed input records and their conversion into typed rows.

use super::{Embarked, Field, Pclass, Row, Sex};
use super::row::Dataset;
use crate::error::{AnalysisError, Result};
use crate::utils::format_number;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::{debug, warn};

/// A single cell as delivered by the parsing collaborator.
///
/// `Missing`, an empty string and a whitespace-only string are equivalent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Missing,
    Number(f64),
    Text(String),
}

impl RawValue {
    pub fn is_missing(&self) -> bool {
        match self {
            RawValue::Missing => true,
            RawValue::Number(_) => false,
            RawValue::Text(s) => s.trim().is_empty(),
        }
    }

    /// Numeric reading of the cell. Non-numeric text and non-finite numbers are missing.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            RawValue::Missing => return None,
            RawValue::Number(v) => *v,
            RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Text reading of the cell. Numbers are rendered without a trailing `.0`.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            RawValue::Missing => None,
            RawValue::Number(v) if v.is_finite() => Some(Cow::Owned(format_number(*v))),
            RawValue::Number(_) => None,
            RawValue::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then_some(Cow::Borrowed(trimmed))
            }
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

/// One input record keyed by column name.
pub type RawRecord = HashMap<String, RawValue>;

/// A record that was dropped during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    /// 0-based position of the record in the input sequence.
    pub row_index: usize,
    pub reason: String,
}

impl From<RejectedRecord> for AnalysisError {
    fn from(rejected: RejectedRecord) -> Self {
        AnalysisError::MalformedRecord {
            row_index: rejected.row_index,
            reason: rejected.reason,
        }
    }
}

/// Result of parsing: the accepted rows plus every rejection.
#[derive(Debug, Clone)]
pub struct ParsedDataset {
    pub dataset: Dataset,
    pub rejected: Vec<RejectedRecord>,
}

/// Convert input records into typed rows.
///
/// Malformed records are collected in [`ParsedDataset::rejected`] and the rest
/// proceed. Fails with [`AnalysisError::EmptyDataset`] when the input is empty
/// or no record survives.
pub fn parse_records(records: &[RawRecord]) -> Result<ParsedDataset> {
    if records.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }

    let mut rows = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for (row_index, record) in records.iter().enumerate() {
        match parse_row(row_index, record) {
            Ok(row) => rows.push(row),
            Err(rejection) => {
                warn!(
                    "Rejecting record {}: {}",
                    rejection.row_index, rejection.reason
                );
                rejected.push(rejection);
            }
        }
    }

    debug!(
        "Parsed {} records: {} accepted, {} rejected",
        records.len(),
        rows.len(),
        rejected.len()
    );

    Ok(ParsedDataset {
        dataset: Dataset::new(rows)?,
        rejected,
    })
}

fn parse_row(row_index: usize, record: &RawRecord) -> std::result::Result<Row, RejectedRecord> {
    let reject = |reason: String| RejectedRecord { row_index, reason };

    let survived = match number(record, Field::Survived) {
        Some(v) if v == 0.0 => false,
        Some(v) if v == 1.0 => true,
        Some(v) => return Err(reject(format!("Survived must be 0 or 1, got {v}"))),
        None => return Err(reject(missing_field(Field::Survived))),
    };

    let pclass = match number(record, Field::Pclass) {
        Some(v) => Pclass::from_number(v)
            .ok_or_else(|| reject(format!("Pclass must be 1, 2 or 3, got {v}")))?,
        None => return Err(reject(missing_field(Field::Pclass))),
    };

    let sex = match text(record, Field::Sex) {
        Some(s) => Sex::parse(&s)
            .ok_or_else(|| reject(format!("Sex must be male or female, got '{s}'")))?,
        None => return Err(reject(missing_field(Field::Sex))),
    };

    let sib_sp = count(record, Field::SibSp).map_err(reject)?;
    let parch = count(record, Field::Parch).map_err(reject)?;

    Ok(Row {
        passenger_id: number(record, Field::PassengerId)
            .filter(|v| v.fract() == 0.0)
            .map(|v| v as i64),
        survived,
        pclass,
        name: text(record, Field::Name).map(Cow::into_owned),
        sex,
        age: non_negative(record, Field::Age),
        sib_sp,
        parch,
        ticket: text(record, Field::Ticket).map(Cow::into_owned),
        fare: non_negative(record, Field::Fare),
        cabin: text(record, Field::Cabin).map(Cow::into_owned),
        embarked: text(record, Field::Embarked).and_then(|s| Embarked::parse(&s)),
        features: None,
    })
}

fn missing_field(field: Field) -> String {
    format!("missing required field '{}'", field)
}

fn number(record: &RawRecord, field: Field) -> Option<f64> {
    record.get(field.as_str()).and_then(RawValue::as_number)
}

fn text(record: &RawRecord, field: Field) -> Option<Cow<'_, str>> {
    record.get(field.as_str()).and_then(RawValue::as_text)
}

fn non_negative(record: &RawRecord, field: Field) -> Option<f64> {
    number(record, field).filter(|v| *v >= 0.0)
}

fn count(record: &RawRecord, field: Field) -> std::result::Result<u32, String> {
    match number(record, field) {
        Some(v) if v >= 0.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX) => Ok(v as u32),
        Some(v) => Err(format!("{field} must be a non-negative integer, got {v}")),
        None => Err(missing_field(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, RawValue)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn valid_record() -> RawRecord {
        record(&[
            ("PassengerId", RawValue::Number(1.0)),
            ("Survived", RawValue::Number(1.0)),
            ("Pclass", RawValue::Number(1.0)),
            ("Name", "Cumings, Mrs. John Bradley".into()),
            ("Sex", "female".into()),
            ("Age", RawValue::Number(38.0)),
            ("SibSp", RawValue::Number(1.0)),
            ("Parch", RawValue::Number(0.0)),
            ("Ticket", "PC 17599".into()),
            ("Fare", RawValue::Number(71.2833)),
            ("Cabin", "C85".into()),
            ("Embarked", "C".into()),
        ])
    }

    #[test]
    fn test_raw_value_missing_representations() {
        assert!(RawValue::Missing.is_missing());
        assert!(RawValue::Text(String::new()).is_missing());
        assert!(RawValue::Text("  ".to_string()).is_missing());
        assert!(!RawValue::Number(0.0).is_missing());
    }

    #[test]
    fn test_raw_value_as_number() {
        assert_eq!(RawValue::Text(" 29 ".to_string()).as_number(), Some(29.0));
        assert_eq!(RawValue::Text("abc".to_string()).as_number(), None);
        assert_eq!(RawValue::Number(f64::NAN).as_number(), None);
        assert_eq!(RawValue::Text("NaN".to_string()).as_number(), None);
    }

    #[test]
    fn test_raw_value_as_text_renders_numbers() {
        assert_eq!(RawValue::Number(113803.0).as_text().unwrap(), "113803");
        assert_eq!(RawValue::Text(" S ".to_string()).as_text().unwrap(), "S");
        assert!(RawValue::Text(String::new()).as_text().is_none());
    }

    #[test]
    fn test_raw_value_deserializes_null_as_missing() {
        let values: Vec<RawValue> = serde_json::from_str(r#"[null, 3.5, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                RawValue::Missing,
                RawValue::Number(3.5),
                RawValue::Text("x".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_valid_record() {
        let parsed = parse_records(&[valid_record()]).unwrap();
        assert!(parsed.rejected.is_empty());

        let row = &parsed.dataset.rows()[0];
        assert!(row.survived);
        assert_eq!(row.pclass, Pclass::First);
        assert_eq!(row.sex, Sex::Female);
        assert_eq!(row.age, Some(38.0));
        assert_eq!(row.sib_sp, 1);
        assert_eq!(row.embarked, Some(Embarked::Cherbourg));
        assert_eq!(row.cabin.as_deref(), Some("C85"));
        assert!(row.features.is_none());
    }

    #[test]
    fn test_parse_missing_optional_fields() {
        let mut rec = valid_record();
        rec.insert("Age".to_string(), RawValue::Missing);
        rec.insert("Fare".to_string(), RawValue::Text(String::new()));
        rec.remove("Embarked");
        rec.insert("Cabin".to_string(), RawValue::Text("not-a-number".to_string()));

        let row = parse_records(&[rec]).unwrap().dataset.rows()[0].clone();
        assert_eq!(row.age, None);
        assert_eq!(row.fare, None);
        assert_eq!(row.embarked, None);
        // Cabin is text, so any non-empty string is kept
        assert_eq!(row.cabin.as_deref(), Some("not-a-number"));
    }

    #[test]
    fn test_non_numeric_age_is_missing() {
        let mut rec = valid_record();
        rec.insert("Age".to_string(), RawValue::Text("unknown".to_string()));
        let row = parse_records(&[rec]).unwrap().dataset.rows()[0].clone();
        assert_eq!(row.age, None);
    }

    #[test]
    fn test_negative_fare_is_missing() {
        let mut rec = valid_record();
        rec.insert("Fare".to_string(), RawValue::Number(-1.0));
        let row = parse_records(&[rec]).unwrap().dataset.rows()[0].clone();
        assert_eq!(row.fare, None);
    }

    #[test]
    fn test_numeric_text_in_required_fields() {
        let mut rec = valid_record();
        rec.insert("Pclass".to_string(), RawValue::Text("2".to_string()));
        rec.insert("Survived".to_string(), RawValue::Text("0".to_string()));
        let row = parse_records(&[rec]).unwrap().dataset.rows()[0].clone();
        assert_eq!(row.pclass, Pclass::Second);
        assert!(!row.survived);
    }

    #[test]
    fn test_malformed_record_is_rejected_with_index() {
        let mut bad = valid_record();
        bad.remove("Sex");
        let parsed = parse_records(&[valid_record(), bad, valid_record()]).unwrap();

        assert_eq!(parsed.dataset.len(), 2);
        assert_eq!(parsed.rejected.len(), 1);
        assert_eq!(parsed.rejected[0].row_index, 1);
        assert!(parsed.rejected[0].reason.contains("Sex"));
    }

    #[test]
    fn test_out_of_domain_values_are_rejected() {
        let mut bad_class = valid_record();
        bad_class.insert("Pclass".to_string(), RawValue::Number(4.0));
        let mut bad_sibsp = valid_record();
        bad_sibsp.insert("SibSp".to_string(), RawValue::Number(1.5));
        let mut bad_survived = valid_record();
        bad_survived.insert("Survived".to_string(), RawValue::Number(2.0));

        let parsed =
            parse_records(&[bad_class, bad_sibsp, bad_survived, valid_record()]).unwrap();
        let indices: Vec<usize> = parsed.rejected.iter().map(|r| r.row_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_input_is_empty_dataset() {
        let err = parse_records(&[]).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyDataset));
    }

    #[test]
    fn test_all_rejected_is_empty_dataset() {
        let mut bad = valid_record();
        bad.remove("Pclass");
        let err = parse_records(&[bad]).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyDataset));
    }

    #[test]
    fn test_rejected_record_converts_to_error() {
        let err: AnalysisError = RejectedRecord {
            row_index: 4,
            reason: "missing required field 'Sex'".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "MALFORMED_RECORD");
    }
}
