//! Form controller
//!
//! Owns the form state, runs the field validators on change and blur,
//! derives the submit gate and hands accepted submissions to a sink.

use crate::sink::{SubmissionRecord, SubmissionSink};
use crate::state::forms::{FieldName, FormState, FormValues, Validity};
use crate::validator::{
    is_adult, is_valid_email, is_valid_name, is_valid_postal_code, sanitize_input, ErrorCode,
    ValidatorError,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{json, Value};

/// What to do with a city that sanitizes to nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyCityPolicy {
    /// Store an empty city
    #[default]
    Accept,
    /// Block submission with `EMPTY_CITY`
    Reject,
}

/// Behaviour switches of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormPolicy {
    pub empty_city: EmptyCityPolicy,
    /// Clear the form when the sink fails, not only on success
    pub reset_on_sink_failure: bool,
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The sink accepted the record and the form was reset
    Submitted(SubmissionRecord),
    /// Validation blocked the submission; nothing was stored
    Invalid {
        errors: Vec<(FieldName, ErrorCode)>,
        missing: Vec<FieldName>,
    },
    /// The sink refused or could not be reached
    SinkFailed { reason: String },
}

impl SubmitOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }

    /// Failure reason for the caller, `None` on success
    pub fn reason(&self) -> Option<String> {
        match self {
            SubmitOutcome::Submitted(_) => None,
            SubmitOutcome::Invalid { errors, missing } => {
                let mut parts = Vec::new();
                if !errors.is_empty() {
                    let list: Vec<String> = errors
                        .iter()
                        .map(|(field, code)| format!("{field}={code}"))
                        .collect();
                    parts.push(format!("invalid fields: {}", list.join(", ")));
                }
                if !missing.is_empty() {
                    let list: Vec<&str> = missing.iter().map(|f| f.as_str()).collect();
                    parts.push(format!("missing fields: {}", list.join(", ")));
                }
                Some(parts.join("; "))
            }
            SubmitOutcome::SinkFailed { reason } => Some(reason.clone()),
        }
    }

    /// `{ok: true, record}` or `{ok: false, reason}`
    pub fn to_json(&self) -> Value {
        match self {
            SubmitOutcome::Submitted(record) => json!({ "ok": true, "record": record }),
            _ => json!({ "ok": false, "reason": self.reason() }),
        }
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp
fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.date_naive())
    })
}

/// Drives one registration form
pub struct FormController<S> {
    state: FormState,
    sink: S,
    policy: FormPolicy,
}

impl<S: SubmissionSink> FormController<S> {
    pub fn new(sink: S) -> Self {
        Self::with_policy(sink, FormPolicy::default())
    }

    pub fn with_policy(sink: S, policy: FormPolicy) -> Self {
        Self {
            state: FormState::new(),
            sink,
            policy,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn policy(&self) -> FormPolicy {
        self.policy
    }

    /// Error code for `raw` in `field`, `None` when it is acceptable.
    ///
    /// Validator failures never escape: a contract violation becomes the
    /// field's error code.
    pub fn validate_field(&self, field: FieldName, raw: &str) -> Option<ErrorCode> {
        match self.check_field(field, raw) {
            Ok(error) => error,
            Err(err) => {
                if err.is_contract_violation() {
                    tracing::warn!(%field, error = %err, "validator contract violated");
                }
                Some(err.code())
            }
        }
    }

    fn check_field(&self, field: FieldName, raw: &str) -> Result<Option<ErrorCode>, ValidatorError> {
        let error = match field {
            FieldName::Nom | FieldName::Prenom => is_valid_name(raw)?.error(),
            FieldName::Email => is_valid_email(raw)?.error(),
            FieldName::Dob => {
                if raw.is_empty() {
                    return Ok(Some(ErrorCode::InvalidArgument));
                }
                let Some(birth) = parse_birth_date(raw) else {
                    return Ok(Some(ErrorCode::InvalidDate));
                };
                let check = is_adult(birth)?;
                if check.is_valid() {
                    None
                } else {
                    Some(check.error().unwrap_or(ErrorCode::Underage))
                }
            }
            FieldName::Postal => is_valid_postal_code(raw)?.error(),
            FieldName::City => {
                let cleaned = sanitize_input(raw)?;
                match self.policy.empty_city {
                    EmptyCityPolicy::Reject if cleaned.sanitized.is_empty() => {
                        Some(ErrorCode::EmptyCity)
                    }
                    _ => None,
                }
            }
        };
        Ok(error)
    }

    fn revalidate(&mut self, field: FieldName) -> Option<ErrorCode> {
        let error = self.validate_field(field, self.state.field(field).as_text());
        self.state.field_mut(field).validity = Validity::from_error(error);
        error
    }

    /// Store a new raw value and validate it
    pub fn change(&mut self, field: FieldName, value: impl Into<String>) -> Option<ErrorCode> {
        self.state.field_mut(field).set_text(value.into());
        self.revalidate(field)
    }

    /// Mark the field touched and validate its current value
    pub fn blur(&mut self, field: FieldName) -> Option<ErrorCode> {
        self.state.field_mut(field).touched = true;
        self.revalidate(field)
    }

    /// Submit gate: every field filled, none known to be invalid
    pub fn is_form_valid(&self) -> bool {
        self.state.is_submittable()
    }

    /// Replace all values, then submit
    pub async fn submit_values(&mut self, values: FormValues) -> SubmitOutcome {
        for field in FieldName::ALL {
            self.change(field, values.get(field));
        }
        self.submit().await
    }

    /// Re-validate every field and, when the form is acceptable, hand a
    /// record to the sink. Invalid forms are left untouched.
    pub async fn submit(&mut self) -> SubmitOutcome {
        for field in FieldName::ALL {
            self.revalidate(field);
        }

        let errors = self.state.errors();
        let missing: Vec<FieldName> = FieldName::ALL
            .into_iter()
            .filter(|f| self.state.field(*f).as_text().is_empty())
            .collect();
        if !errors.is_empty() || !missing.is_empty() {
            let outcome = SubmitOutcome::Invalid { errors, missing };
            tracing::info!(reason = ?outcome.reason(), "submission blocked");
            return outcome;
        }

        let values = self.state.values();
        let city = match sanitize_input(values.city.as_str()) {
            Ok(cleaned) => cleaned.sanitized,
            Err(err) => {
                return SubmitOutcome::Invalid {
                    errors: vec![(FieldName::City, err.code())],
                    missing: Vec::new(),
                }
            }
        };
        let record = SubmissionRecord::new(values, city, Utc::now());

        match self.sink.append(&record).await {
            Ok(()) => {
                tracing::info!(email = %record.email, "submission accepted");
                self.state.reset();
                SubmitOutcome::Submitted(record)
            }
            Err(err) => {
                tracing::warn!(error = %err, "submission sink failed");
                if self.policy.reset_on_sink_failure {
                    self.state.reset();
                }
                SubmitOutcome::SinkFailed {
                    reason: err.to_string(),
                }
            }
        }
    }
}
