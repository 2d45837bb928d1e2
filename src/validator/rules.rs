//! Field validators
//!
//! Each validator returns `Err` for contract violations and `Ok` with an
//! outcome for everything else, so per-keystroke failures stay cheap.

use super::arg::Arg;
use super::error::{ErrorCode, ValidatorError};
use chrono::{Datelike, Local, NaiveDate};
use regex::{Regex, RegexSet};
use std::sync::LazyLock;

/// Minimum age, in whole years, to count as an adult
pub const ADULT_AGE: u32 = 18;

static XSS_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"<[^>]*>",
        r"(?i)javascript:",
        r"(?i)vbscript:",
        r"(?i)on[a-z0-9_]+=",
        r"(?i)<(?:script|img|iframe|link|style)",
    ])
    .expect("valid injection patterns")
});

static NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\s'-]+$").expect("valid name regex"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

static POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}$").expect("valid postal code regex"));

/// Outcome of a business-rule check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation<T> {
    /// Accepted, with the value as it will be kept
    Valid(T),
    Invalid(ErrorCode),
}

impl<T> Validation<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }

    pub fn error(&self) -> Option<ErrorCode> {
        match self {
            Validation::Valid(_) => None,
            Validation::Invalid(code) => Some(*code),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Validation::Valid(value) => Some(value),
            Validation::Invalid(_) => None,
        }
    }
}

/// Age computed by [`is_adult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeCheck {
    pub age: u32,
}

impl AgeCheck {
    pub fn is_valid(&self) -> bool {
        self.age >= ADULT_AGE
    }

    pub fn error(&self) -> Option<ErrorCode> {
        if self.is_valid() {
            None
        } else {
            Some(ErrorCode::AgeUnder18)
        }
    }
}

fn expect_text(arg: Arg<'_>) -> Result<&str, ValidatorError> {
    match arg {
        Arg::Missing => Err(ValidatorError::InvalidArgument),
        Arg::Text(text) => Ok(text),
        Arg::Date(_) | Arg::Other(_) => Err(ValidatorError::InvalidType),
    }
}

/// Check that someone born on `birth_date` is an adult today.
pub fn is_adult<'a>(birth_date: impl Into<Arg<'a>>) -> Result<AgeCheck, ValidatorError> {
    is_adult_on(birth_date, Local::now().date_naive())
}

/// Check that someone born on `birth_date` is an adult on `today`.
///
/// The age is the year difference, minus one when `today`'s month/day is
/// still before the birthday. A Feb 29 birthday therefore turns over on
/// Mar 1 in common years.
pub fn is_adult_on<'a>(
    birth_date: impl Into<Arg<'a>>,
    today: NaiveDate,
) -> Result<AgeCheck, ValidatorError> {
    let birth = match birth_date.into() {
        Arg::Missing => return Err(ValidatorError::InvalidArgument),
        Arg::Date(raw) => raw.to_naive().ok_or(ValidatorError::InvalidDate)?,
        Arg::Text(_) | Arg::Other(_) => return Err(ValidatorError::InvalidDateType),
    };

    if birth > today {
        return Err(ValidatorError::DateInFuture);
    }

    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }

    Ok(AgeCheck {
        age: u32::try_from(years).unwrap_or(0),
    })
}

/// Validate a first or last name. The name is kept as given, untrimmed.
pub fn is_valid_name<'a>(name: impl Into<Arg<'a>>) -> Result<Validation<String>, ValidatorError> {
    let name = expect_text(name.into())?;

    if name.trim().is_empty() {
        return Ok(Validation::Invalid(ErrorCode::EmptyName));
    }

    // Injection is reported before the generic character check
    if XSS_PATTERNS.is_match(name) {
        tracing::debug!("markup injection pattern in name");
        return Ok(Validation::Invalid(ErrorCode::XssDetected));
    }

    if NAME_CHARS.is_match(name) {
        Ok(Validation::Valid(name.to_string()))
    } else {
        Ok(Validation::Invalid(ErrorCode::InvalidCharacters))
    }
}

pub fn is_valid_email<'a>(email: impl Into<Arg<'a>>) -> Result<Validation<String>, ValidatorError> {
    let email = expect_text(email.into())?;

    if EMAIL.is_match(email) {
        Ok(Validation::Valid(email.to_string()))
    } else {
        Ok(Validation::Invalid(ErrorCode::InvalidFormat))
    }
}

/// Exactly five ASCII digits.
pub fn is_valid_postal_code<'a>(
    code: impl Into<Arg<'a>>,
) -> Result<Validation<String>, ValidatorError> {
    let code = expect_text(code.into())?;

    if POSTAL_CODE.is_match(code) {
        Ok(Validation::Valid(code.to_string()))
    } else {
        Ok(Validation::Invalid(ErrorCode::InvalidFormat))
    }
}
