//! Validation engine
//!
//! Pure, side-effect-free checks for each registration field plus the
//! sanitizer used for free text.

mod arg;
mod error;
mod rules;
mod sanitize;

pub use arg::{Arg, RawDate};
pub use error::{ErrorCode, ValidatorError};
pub use rules::{
    is_adult, is_adult_on, is_valid_email, is_valid_name, is_valid_postal_code, AgeCheck,
    Validation, ADULT_AGE,
};
pub use sanitize::{sanitize_input, Sanitized};
