//! Form state definitions

pub mod forms;

pub use forms::{FieldName, FormField, FormState, FormValues, Validity};
