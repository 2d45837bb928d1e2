//! Form field value objects

use crate::validator::ErrorCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The six fields of the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Nom,
    Prenom,
    Email,
    Dob,
    Postal,
    City,
}

impl FieldName {
    /// All fields, in form order
    pub const ALL: [FieldName; 6] = [
        FieldName::Nom,
        FieldName::Prenom,
        FieldName::Email,
        FieldName::Dob,
        FieldName::Postal,
        FieldName::City,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nom => "nom",
            Self::Prenom => "prenom",
            Self::Email => "email",
            Self::Dob => "dob",
            Self::Postal => "postal",
            Self::City => "city",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Nom => "Nom",
            Self::Prenom => "Prénom",
            Self::Email => "Email",
            Self::Dob => "Date de naissance",
            Self::Postal => "Code Postal",
            Self::City => "Ville",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Nom => 0,
            Self::Prenom => 1,
            Self::Email => 2,
            Self::Dob => 3,
            Self::Postal => 4,
            Self::City => 5,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field `{0}`")]
pub struct UnknownField(pub String);

impl FromStr for FieldName {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Last known validation state of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validity {
    #[default]
    Unvalidated,
    Valid,
    Invalid(ErrorCode),
}

impl Validity {
    pub fn from_error(error: Option<ErrorCode>) -> Self {
        error.map_or(Validity::Valid, Validity::Invalid)
    }

    pub fn error(&self) -> Option<ErrorCode> {
        match self {
            Validity::Invalid(code) => Some(*code),
            _ => None,
        }
    }
}

/// Represents a single form field with its raw value and validation state
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: FieldName,
    pub label: &'static str,
    pub value: String,
    pub validity: Validity,
    pub touched: bool,
}

impl FormField {
    /// Create an empty, untouched field
    pub fn new(name: FieldName) -> Self {
        Self {
            name,
            label: name.label(),
            value: String::new(),
            validity: Validity::Unvalidated,
            touched: false,
        }
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    pub fn set_text(&mut self, value: String) {
        self.value = value;
    }

    pub fn error(&self) -> Option<ErrorCode> {
        self.validity.error()
    }

    /// Empty or last validated as invalid
    pub fn is_blocking(&self) -> bool {
        self.value.is_empty() || self.error().is_some()
    }

    /// Back to the initial empty, untouched, unvalidated state
    pub fn clear(&mut self) {
        self.value.clear();
        self.validity = Validity::Unvalidated;
        self.touched = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_roundtrip_through_str() {
        for field in FieldName::ALL {
            assert_eq!(field.as_str().parse::<FieldName>().unwrap(), field);
        }
    }

    #[test]
    fn test_unknown_field_name() {
        let err = "age".parse::<FieldName>().unwrap_err();
        assert_eq!(err, UnknownField("age".to_string()));
        assert_eq!(err.to_string(), "unknown form field `age`");
    }

    #[test]
    fn test_indices_follow_form_order() {
        for (i, field) in FieldName::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&FieldName::Prenom).unwrap(), "\"prenom\"");
    }

    #[test]
    fn test_new_field_is_blocking() {
        let field = FormField::new(FieldName::City);
        assert_eq!(field.label, "Ville");
        assert!(field.is_blocking());
        assert_eq!(field.validity, Validity::Unvalidated);
        assert!(!field.touched);
    }

    #[test]
    fn test_unvalidated_non_empty_is_not_blocking() {
        let mut field = FormField::new(FieldName::Nom);
        field.set_text("Dupont".to_string());
        assert!(!field.is_blocking());
    }

    #[test]
    fn test_invalid_field_is_blocking() {
        let mut field = FormField::new(FieldName::Email);
        field.set_text("nope".to_string());
        field.validity = Validity::from_error(Some(ErrorCode::InvalidFormat));
        assert!(field.is_blocking());
        assert_eq!(field.error(), Some(ErrorCode::InvalidFormat));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut field = FormField::new(FieldName::Postal);
        field.set_text("75001".to_string());
        field.validity = Validity::Valid;
        field.touched = true;
        field.clear();
        assert_eq!(field.as_text(), "");
        assert_eq!(field.validity, Validity::Unvalidated);
        assert!(!field.touched);
    }
}
