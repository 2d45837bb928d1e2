//! Error codes shared by the validators and the form controller

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Every code a field can end up displaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidArgument,
    InvalidType,
    InvalidDateType,
    InvalidDate,
    DateInFuture,
    EmptyName,
    XssDetected,
    InvalidCharacters,
    InvalidFormat,
    AgeUnder18,
    Underage,
    EmptyCity,
    /// Fallback when a failure carries no code of its own
    Invalid,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::InvalidType => "INVALID_TYPE",
            Self::InvalidDateType => "INVALID_DATE_TYPE",
            Self::InvalidDate => "INVALID_DATE",
            Self::DateInFuture => "DATE_IN_FUTURE",
            Self::EmptyName => "EMPTY_NAME",
            Self::XssDetected => "XSS_DETECTED",
            Self::InvalidCharacters => "INVALID_CHARACTERS",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::AgeUnder18 => "AGE_UNDER_18",
            Self::Underage => "UNDERAGE",
            Self::EmptyCity => "EMPTY_CITY",
            Self::Invalid => "INVALID",
        }
    }

    /// Contract violations point at a caller bug rather than bad user input.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument | Self::InvalidType | Self::InvalidDateType
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures signalled by a validator instead of returned as an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidatorError {
    /// Argument missing entirely
    #[error("INVALID_ARGUMENT")]
    InvalidArgument,
    /// Text expected, something else given
    #[error("INVALID_TYPE")]
    InvalidType,
    /// Date expected, something else given
    #[error("INVALID_DATE_TYPE")]
    InvalidDateType,
    /// Date components do not form a calendar date
    #[error("INVALID_DATE")]
    InvalidDate,
    #[error("DATE_IN_FUTURE")]
    DateInFuture,
}

impl ValidatorError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidArgument => ErrorCode::InvalidArgument,
            Self::InvalidType => ErrorCode::InvalidType,
            Self::InvalidDateType => ErrorCode::InvalidDateType,
            Self::InvalidDate => ErrorCode::InvalidDate,
            Self::DateInFuture => ErrorCode::DateInFuture,
        }
    }

    pub fn is_contract_violation(&self) -> bool {
        self.code().is_contract_violation()
    }
}
