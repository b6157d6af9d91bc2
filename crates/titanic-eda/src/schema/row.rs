//! Typed passenger rows and the datasets that hold them.

use super::{Embarked, Field, Pclass, Sex, Title};
use crate::error::{AnalysisError, Result};
use crate::utils::format_number;
use serde::{Deserialize, Serialize};

/// Fields computed from other fields during derivation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    pub title: Title,
    pub family_size: u32,
    pub is_alone: bool,
}

/// One passenger record.
///
/// Optional fields hold `None` while missing. A row coming out of the
/// cleaning pipeline always has `age`, `fare`, `embarked` and `features` set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub passenger_id: Option<i64>,
    pub survived: bool,
    pub pclass: Pclass,
    pub name: Option<String>,
    pub sex: Sex,
    pub age: Option<f64>,
    pub sib_sp: u32,
    pub parch: u32,
    pub ticket: Option<String>,
    pub fare: Option<f64>,
    pub cabin: Option<String>,
    pub embarked: Option<Embarked>,
    pub features: Option<DerivedFeatures>,
}

/// Uniform read view of a single field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Missing,
    Number(f64),
    Text(&'a str),
}

impl FieldValue<'_> {
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Display label used for grouping and export.
    pub fn label(&self) -> Option<String> {
        match self {
            FieldValue::Missing => None,
            FieldValue::Number(v) => Some(format_number(*v)),
            FieldValue::Text(s) => Some((*s).to_string()),
        }
    }
}

impl Row {
    /// Read a field through the uniform accessor.
    pub fn value(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::PassengerId => opt_number(self.passenger_id.map(|id| id as f64)),
            Field::Survived => FieldValue::Number(if self.survived { 1.0 } else { 0.0 }),
            Field::Pclass => FieldValue::Number(f64::from(self.pclass.number())),
            Field::Name => opt_text(self.name.as_deref()),
            Field::Sex => FieldValue::Text(self.sex.as_str()),
            Field::Age => opt_number(self.age),
            Field::SibSp => FieldValue::Number(f64::from(self.sib_sp)),
            Field::Parch => FieldValue::Number(f64::from(self.parch)),
            Field::Ticket => opt_text(self.ticket.as_deref()),
            Field::Fare => opt_number(self.fare),
            Field::Cabin => opt_text(self.cabin.as_deref()),
            Field::Embarked => opt_text(self.embarked.as_ref().map(Embarked::as_str)),
            Field::Title => opt_text(self.features.map(|f| f.title.as_str())),
            Field::FamilySize => {
                opt_number(self.features.map(|f| f64::from(f.family_size)))
            }
            Field::IsAlone => {
                opt_number(self.features.map(|f| if f.is_alone { 1.0 } else { 0.0 }))
            }
        }
    }

    pub fn number(&self, field: Field) -> Option<f64> {
        self.value(field).as_number()
    }

    pub fn label(&self, field: Field) -> Option<String> {
        self.value(field).label()
    }

    pub fn with_age(self, age: f64) -> Self {
        Self {
            age: Some(age),
            ..self
        }
    }

    pub fn with_fare(self, fare: f64) -> Self {
        Self {
            fare: Some(fare),
            ..self
        }
    }

    pub fn with_embarked(self, embarked: Embarked) -> Self {
        Self {
            embarked: Some(embarked),
            ..self
        }
    }

    pub fn with_features(self, features: DerivedFeatures) -> Self {
        Self {
            features: Some(features),
            ..self
        }
    }
}

fn opt_number<'a>(value: Option<f64>) -> FieldValue<'a> {
    value.map_or(FieldValue::Missing, FieldValue::Number)
}

fn opt_text(value: Option<&str>) -> FieldValue<'_> {
    match value {
        Some(s) if !s.trim().is_empty() => FieldValue::Text(s),
        _ => FieldValue::Missing,
    }
}

/// Parsed rows in source order, before imputation.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    /// Wrap parsed rows. Zero rows is an error.
    pub fn new(rows: Vec<Row>) -> Result<Self> {
        if rows.is_empty() {
            return Err(AnalysisError::EmptyDataset);
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Rows after imputation and derivation.
///
/// Only the cleaning pipeline constructs this type, and it only hands out
/// shared slices, so statistics never observe a half-cleaned dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanDataset {
    rows: Vec<Row>,
}

impl CleanDataset {
    pub(crate) fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
