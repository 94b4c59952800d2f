//! Error types for calendar input validation and table lookups.

use chrono::NaiveDate;
use thiserror::Error;

use crate::lunar::LunarDate;

/// Coarse classification of a failure, for callers that map errors to
/// user-facing messages or process exit behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Syntactically or calendrically impossible date.
    InvalidDate,
    /// Birth time outside 00:00..=23:59.
    InvalidTime,
    /// Date or year absent from a required static table.
    NotFound,
    /// A static table could not be loaded. Fatal for the whole process.
    ConfigurationMissing,
    /// Malformed non-date input such as a sex designator or a rule file.
    InvalidInput,
}

/// Errors from date parsing, table loading, or table lookups.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CalendarError {
    /// The date does not exist in the Gregorian calendar, or is malformed.
    #[error("invalid date: {0}")]
    InvalidDate(String),
    /// The time of day is out of range or malformed.
    #[error("invalid time: {0}")]
    InvalidTime(String),
    /// Solar date outside the lunar table's coverage.
    #[error("solar date {0} is not covered by the lunar table")]
    SolarDateNotInTable(NaiveDate),
    /// Lunar date with no solar counterpart in the lunar table.
    #[error("lunar date {0} is not covered by the lunar table")]
    LunarDateNotInTable(LunarDate),
    /// No solar-term entries exist for the year.
    #[error("no solar-term table for year {0}")]
    YearNotInTable(i32),
    /// Table content is malformed.
    #[error("table parse error: {0}")]
    TableParse(String),
    /// I/O error while reading a table.
    #[error("I/O error: {0}")]
    Io(String),
}

impl CalendarError {
    /// Classify the error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDate(_) => ErrorKind::InvalidDate,
            Self::InvalidTime(_) => ErrorKind::InvalidTime,
            Self::SolarDateNotInTable(_)
            | Self::LunarDateNotInTable(_)
            | Self::YearNotInTable(_) => ErrorKind::NotFound,
            Self::TableParse(_) | Self::Io(_) => ErrorKind::ConfigurationMissing,
        }
    }
}

impl From<std::io::Error> for CalendarError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<csv::Error> for CalendarError {
    fn from(e: csv::Error) -> Self {
        Self::TableParse(e.to_string())
    }
}

impl From<serde_json::Error> for CalendarError {
    fn from(e: serde_json::Error) -> Self {
        Self::TableParse(e.to_string())
    }
}
