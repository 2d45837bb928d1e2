//! Loosely typed validator input
//!
//! Form payloads arrive untyped, so a validator has to be able to tell
//! "nothing given" and "wrong kind of value" apart from a bad value.

use chrono::{Datelike, NaiveDate};
use serde_json::Value;

/// Raw calendar components, not yet checked against the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl RawDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Resolve to a real calendar date, if it is one
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for RawDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

/// A value handed to one of the validators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg<'a> {
    Missing,
    Text(&'a str),
    Date(RawDate),
    /// Any other kind of value; carries its kind for logging
    Other(&'static str),
}

impl Arg<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Arg::Missing => "missing",
            Arg::Text(_) => "text",
            Arg::Date(_) => "date",
            Arg::Other(kind) => *kind,
        }
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(text: &'a str) -> Self {
        Arg::Text(text)
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(text: &'a String) -> Self {
        Arg::Text(text.as_str())
    }
}

impl<'a> From<Option<&'a str>> for Arg<'a> {
    fn from(text: Option<&'a str>) -> Self {
        text.map_or(Arg::Missing, Arg::Text)
    }
}

impl From<NaiveDate> for Arg<'_> {
    fn from(date: NaiveDate) -> Self {
        Arg::Date(date.into())
    }
}

impl From<RawDate> for Arg<'_> {
    fn from(date: RawDate) -> Self {
        Arg::Date(date)
    }
}

impl<'a> From<&'a Value> for Arg<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => Arg::Missing,
            Value::String(s) => Arg::Text(s),
            Value::Bool(_) => Arg::Other("boolean"),
            Value::Number(_) => Arg::Other("number"),
            Value::Array(_) => Arg::Other("array"),
            Value::Object(_) => Arg::Other("object"),
        }
    }
}
