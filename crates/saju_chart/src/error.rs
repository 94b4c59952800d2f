//! Chart engine errors.

use saju_calendar::{CalendarError, ErrorKind};
use thiserror::Error;

/// Errors surfaced by [`crate::ChartEngine`] and its configuration.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ChartError {
    /// Date/time validation or table lookup failure.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    /// A required static table could not be loaded.
    #[error("configuration missing: {0}")]
    ConfigurationMissing(String),
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// Input that is neither a date nor a time, e.g. a sex designator.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("rule parse error: {0}")]
    RuleParse(String),
}

impl ChartError {
    /// Classify the error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Calendar(e) => e.kind(),
            Self::ConfigurationMissing(_) | Self::InvalidConfig(_) => {
                ErrorKind::ConfigurationMissing
            }
            Self::InvalidInput(_) | Self::RuleParse(_) => ErrorKind::InvalidInput,
        }
    }
}
