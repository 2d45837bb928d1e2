//! Registration form state and submitted values

use super::field::{FieldName, FormField};
use crate::validator::{Arg, ErrorCode, ValidatorError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Raw values of the six fields, as a caller hands them in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormValues {
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub dob: String,
    pub postal: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormInputError {
    #[error("form payload must be a JSON object")]
    NotAnObject,
    #[error("field `{field}`: {source}")]
    Field {
        field: FieldName,
        source: ValidatorError,
    },
}

impl FormValues {
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Nom => &self.nom,
            FieldName::Prenom => &self.prenom,
            FieldName::Email => &self.email,
            FieldName::Dob => &self.dob,
            FieldName::Postal => &self.postal,
            FieldName::City => &self.city,
        }
    }

    pub fn set(&mut self, field: FieldName, value: String) {
        let slot = match field {
            FieldName::Nom => &mut self.nom,
            FieldName::Prenom => &mut self.prenom,
            FieldName::Email => &mut self.email,
            FieldName::Dob => &mut self.dob,
            FieldName::Postal => &mut self.postal,
            FieldName::City => &mut self.city,
        };
        *slot = value;
    }

    /// Build values from an untyped JSON object.
    ///
    /// Absent and null fields are left empty; any other non-string value is
    /// an `INVALID_TYPE` contract violation. Unknown keys are ignored.
    pub fn from_json(payload: &Value) -> Result<Self, FormInputError> {
        let object = payload.as_object().ok_or(FormInputError::NotAnObject)?;
        let mut values = FormValues::default();

        for field in FieldName::ALL {
            match object.get(field.as_str()).map(Arg::from) {
                None | Some(Arg::Missing) => {}
                Some(Arg::Text(text)) => values.set(field, text.to_string()),
                Some(_) => {
                    return Err(FormInputError::Field {
                        field,
                        source: ValidatorError::InvalidType,
                    })
                }
            }
        }

        Ok(values)
    }
}

/// The six fields with their validation and touched state
#[derive(Debug, Clone)]
pub struct FormState {
    fields: [FormField; 6],
}

impl FormState {
    pub fn new() -> Self {
        Self {
            fields: FieldName::ALL.map(FormField::new),
        }
    }

    pub fn field(&self, name: FieldName) -> &FormField {
        &self.fields[name.index()]
    }

    pub fn field_mut(&mut self, name: FieldName) -> &mut FormField {
        &mut self.fields[name.index()]
    }

    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.fields.iter()
    }

    /// Snapshot of the raw values
    pub fn values(&self) -> FormValues {
        let mut values = FormValues::default();
        for field in &self.fields {
            values.set(field.name, field.value.clone());
        }
        values
    }

    /// Current errors, in form order
    pub fn errors(&self) -> Vec<(FieldName, ErrorCode)> {
        self.fields
            .iter()
            .filter_map(|f| f.error().map(|code| (f.name, code)))
            .collect()
    }

    /// Fields that currently prevent submission
    pub fn blocking_fields(&self) -> Vec<FieldName> {
        self.fields
            .iter()
            .filter(|f| f.is_blocking())
            .map(|f| f.name)
            .collect()
    }

    /// All fields filled and none known to be invalid
    pub fn is_submittable(&self) -> bool {
        self.fields.iter().all(|f| !f.is_blocking())
    }

    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
