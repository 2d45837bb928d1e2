//! Form domain layer
//!
//! Field values, per-field validation state and the submit gate.

mod field;
mod form_state;

pub use field::{FieldName, FormField, UnknownField, Validity};
pub use form_state::{FormInputError, FormState, FormValues};
