//! Persisted form submission

use crate::state::forms::FormValues;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One accepted submission. `city` holds the sanitized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub dob: String,
    pub postal: String,
    pub city: String,
    #[serde(rename = "submittedAt")]
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionRecord {
    /// Build a record from validated values and the already sanitized city
    pub fn new(values: FormValues, sanitized_city: String, submitted_at: DateTime<Utc>) -> Self {
        Self {
            nom: values.nom,
            prenom: values.prenom,
            email: values.email,
            dob: values.dob,
            postal: values.postal,
            city: sanitized_city,
            submitted_at,
        }
    }
}
