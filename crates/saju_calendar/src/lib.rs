//! Calendar conversion for four-pillars charts.
//!
//! This crate provides:
//! - Validated civil birth date/time input
//! - Solar ↔ lunar conversion by exact table lookup
//! - The 24 solar terms and the governing-term lookup used for month
//!   boundaries
//!
//! Both tables are static reference data loaded once at startup. Lookups
//! never fall back to a computed approximation: a date outside a table's
//! coverage is an explicit error.

pub mod civil;
pub mod error;
pub mod lunar;
pub mod solar_term;

pub use civil::{BirthTime, DATE_FORMAT, MINUTES_PER_DAY, civil_date, parse_date};
pub use error::{CalendarError, ErrorKind};
pub use lunar::{LunarDate, LunarTable};
pub use solar_term::{ALL_SOLAR_TERMS, SolarTerm, SolarTermEntry, SolarTermTable, TERMS_PER_YEAR};
