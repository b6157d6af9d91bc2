//! Fixed passenger schema.
//!
//! This module defines the closed set of fields a passenger record can carry,
//! the enumerated domains of the categorical fields, and the typed row and
//! dataset representations built from loosely typed input records.

mod record;
mod row;

pub use record::{ParsedDataset, RawRecord, RawValue, RejectedRecord, parse_records};
pub use row::{CleanDataset, Dataset, DerivedFeatures, FieldValue, Row};

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every field of the passenger schema, source columns first.
///
/// Ordering follows the column order of the source CSV, so ordered maps
/// keyed by `Field` list fields the way the file does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    PassengerId,
    Survived,
    Pclass,
    Name,
    Sex,
    Age,
    SibSp,
    Parch,
    Ticket,
    Fare,
    Cabin,
    Embarked,
    Title,
    FamilySize,
    IsAlone,
}

impl Field {
    /// Columns present in the source data, in file order.
    pub const SOURCE: [Field; 12] = [
        Field::PassengerId,
        Field::Survived,
        Field::Pclass,
        Field::Name,
        Field::Sex,
        Field::Age,
        Field::SibSp,
        Field::Parch,
        Field::Ticket,
        Field::Fare,
        Field::Cabin,
        Field::Embarked,
    ];

    /// Fields computed during feature derivation.
    pub const DERIVED: [Field; 3] = [Field::Title, Field::FamilySize, Field::IsAlone];

    /// Source columns followed by derived fields.
    pub const ALL: [Field; 15] = [
        Field::PassengerId,
        Field::Survived,
        Field::Pclass,
        Field::Name,
        Field::Sex,
        Field::Age,
        Field::SibSp,
        Field::Parch,
        Field::Ticket,
        Field::Fare,
        Field::Cabin,
        Field::Embarked,
        Field::Title,
        Field::FamilySize,
        Field::IsAlone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::PassengerId => "PassengerId",
            Field::Survived => "Survived",
            Field::Pclass => "Pclass",
            Field::Name => "Name",
            Field::Sex => "Sex",
            Field::Age => "Age",
            Field::SibSp => "SibSp",
            Field::Parch => "Parch",
            Field::Ticket => "Ticket",
            Field::Fare => "Fare",
            Field::Cabin => "Cabin",
            Field::Embarked => "Embarked",
            Field::Title => "Title",
            Field::FamilySize => "FamilySize",
            Field::IsAlone => "IsAlone",
        }
    }

    /// Whether the field holds numbers (and can feed mean/std/correlation).
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Field::PassengerId
                | Field::Survived
                | Field::Pclass
                | Field::Age
                | Field::SibSp
                | Field::Parch
                | Field::Fare
                | Field::FamilySize
                | Field::IsAlone
        )
    }

    pub fn is_derived(&self) -> bool {
        Self::DERIVED.contains(self)
    }

    /// Every label a discrete field can take, for fields with a closed domain.
    pub fn domain(&self) -> Option<&'static [&'static str]> {
        match self {
            Field::Survived | Field::IsAlone => Some(&["0", "1"]),
            Field::Pclass => Some(&["1", "2", "3"]),
            Field::Sex => Some(&["female", "male"]),
            Field::Embarked => Some(&["C", "Q", "S"]),
            Field::Title => Some(&["Master", "Miss", "Mr", "Mrs", "Other"]),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = AnalysisError;

    /// Header names are matched case-insensitively after trimming.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| AnalysisError::UnknownField(name.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("male") {
            Some(Sex::Male)
        } else if s.eq_ignore_ascii_case("female") {
            Some(Sex::Female)
        } else {
            None
        }
    }
}

/// Port of embarkation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Embarked {
    #[serde(rename = "C")]
    Cherbourg,
    #[serde(rename = "Q")]
    Queenstown,
    #[serde(rename = "S")]
    Southampton,
}

impl Embarked {
    /// One-letter code used by the source data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Embarked::Cherbourg => "C",
            Embarked::Queenstown => "Q",
            Embarked::Southampton => "S",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "C" => Some(Embarked::Cherbourg),
            "Q" => Some(Embarked::Queenstown),
            "S" => Some(Embarked::Southampton),
            _ => None,
        }
    }
}

/// Ticket class, an ordinal 1/2/3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pclass {
    First = 1,
    Second = 2,
    Third = 3,
}

impl Pclass {
    pub const ALL: [Pclass; 3] = [Pclass::First, Pclass::Second, Pclass::Third];

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(value: f64) -> Option<Self> {
        if value == 1.0 {
            Some(Pclass::First)
        } else if value == 2.0 {
            Some(Pclass::Second)
        } else if value == 3.0 {
            Some(Pclass::Third)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Pclass::First => "1",
            Pclass::Second => "2",
            Pclass::Third => "3",
        }
    }
}

/// Honorific extracted from the passenger name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Title {
    Mr,
    Miss,
    Mrs,
    Master,
    Other,
}

impl Title {
    /// Collapse a raw title token into the five-value domain.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            "Mr" => Title::Mr,
            "Miss" => Title::Miss,
            "Mrs" => Title::Mrs,
            "Master" => Title::Master,
            _ => Title::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Title::Mr => "Mr",
            Title::Miss => "Miss",
            Title::Mrs => "Mrs",
            Title::Master => "Master",
            Title::Other => "Other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_from_str_is_case_insensitive() {
        assert_eq!("Age".parse::<Field>().unwrap(), Field::Age);
        assert_eq!(" sibsp ".parse::<Field>().unwrap(), Field::SibSp);
        assert_eq!("FAMILYSIZE".parse::<Field>().unwrap(), Field::FamilySize);
    }

    #[test]
    fn test_field_from_str_unknown() {
        let err = "Deck".parse::<Field>().unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_FIELD");
        assert!(err.to_string().contains("Deck"));
    }

    #[test]
    fn test_field_order_follows_source_columns() {
        let mut shuffled = vec![Field::Embarked, Field::Age, Field::PassengerId, Field::Title];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![Field::PassengerId, Field::Age, Field::Embarked, Field::Title]
        );
    }

    #[test]
    fn test_field_kinds() {
        assert!(Field::Fare.is_numeric());
        assert!(Field::IsAlone.is_numeric());
        assert!(!Field::Sex.is_numeric());
        assert!(!Field::Cabin.is_numeric());
        assert!(Field::Title.is_derived());
        assert!(!Field::Name.is_derived());
    }

    #[test]
    fn test_field_serializes_as_column_name() {
        assert_eq!(serde_json::to_string(&Field::SibSp).unwrap(), "\"SibSp\"");
    }

    #[test]
    fn test_sex_parse() {
        assert_eq!(Sex::parse("male"), Some(Sex::Male));
        assert_eq!(Sex::parse(" Female "), Some(Sex::Female));
        assert_eq!(Sex::parse("unknown"), None);
    }

    #[test]
    fn test_embarked_parse() {
        assert_eq!(Embarked::parse("s"), Some(Embarked::Southampton));
        assert_eq!(Embarked::parse("C"), Some(Embarked::Cherbourg));
        assert_eq!(Embarked::parse("X"), None);
        assert_eq!(Embarked::Queenstown.as_str(), "Q");
    }

    #[test]
    fn test_pclass_from_number() {
        assert_eq!(Pclass::from_number(2.0), Some(Pclass::Second));
        assert_eq!(Pclass::from_number(4.0), None);
        assert_eq!(Pclass::from_number(1.5), None);
        assert_eq!(Pclass::Third.number(), 3);
    }

    #[test]
    fn test_title_from_raw() {
        assert_eq!(Title::from_raw("Mr"), Title::Mr);
        assert_eq!(Title::from_raw(" Master"), Title::Master);
        assert_eq!(Title::from_raw("Dr"), Title::Other);
        assert_eq!(Title::from_raw("Unknown"), Title::Other);
    }
}
