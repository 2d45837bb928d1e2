//! Registration form core
//!
//! Validates the fields of a sign-up form (names, email, date of birth,
//! postal code, city), sanitizes free text against markup injection and
//! records accepted submissions in a local store or a remote collection.

pub mod config;
pub mod controller;
pub mod sink;
pub mod state;
pub mod validator;

pub use controller::{EmptyCityPolicy, FormController, FormPolicy, SubmitOutcome};
pub use sink::{LocalStore, RemoteSink, SinkError, SubmissionRecord, SubmissionSink};
pub use state::forms::{FieldName, FormState, FormValues};
pub use validator::{ErrorCode, ValidatorError};
