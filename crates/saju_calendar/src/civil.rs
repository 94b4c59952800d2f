//! Civil (Gregorian) birth date and time-of-day input.
//!
//! Dates are `chrono::NaiveDate`; construction goes through [`civil_date`]
//! or [`parse_date`] so that impossible dates (day 31 of a 30-day month,
//! Feb 29 in a common year) surface as [`CalendarError::InvalidDate`].

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CalendarError;

/// Text format of solar dates in tables and user input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Minutes in one civil day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Build a validated Gregorian date.
pub fn civil_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, CalendarError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| CalendarError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
}

/// Parse `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate, CalendarError> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| CalendarError::InvalidDate(s.into()))
}

/// Local birth time, minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BirthTime {
    hour: u32,
    minute: u32,
}

impl BirthTime {
    /// Validated constructor: hour 0..=23, minute 0..=59.
    pub fn new(hour: u32, minute: u32) -> Result<Self, CalendarError> {
        if hour > 23 || minute > 59 {
            return Err(CalendarError::InvalidTime(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self { hour, minute })
    }

    /// On-the-hour time.
    pub fn from_hour(hour: u32) -> Result<Self, CalendarError> {
        Self::new(hour, 0)
    }

    pub const fn hour(self) -> u32 {
        self.hour
    }

    pub const fn minute(self) -> u32 {
        self.minute
    }

    /// Minutes since local midnight (0..1440).
    pub const fn minute_of_day(self) -> u32 {
        self.hour * 60 + self.minute
    }
}

impl FromStr for BirthTime {
    type Err = CalendarError;

    /// Accepts `HH` or `HH:MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || CalendarError::InvalidTime(s.into());
        let (h, m) = match s.split_once(':') {
            Some((h, m)) => (h, m),
            None => (s, "0"),
        };
        let hour = h.trim().parse::<u32>().map_err(|_| invalid())?;
        let minute = m.trim().parse::<u32>().map_err(|_| invalid())?;
        Self::new(hour, minute)
    }
}

impl Display for BirthTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_date() {
        let d = civil_date(1990, 5, 10).unwrap();
        assert_eq!(d.to_string(), "1990-05-10");
    }

    #[test]
    fn day_31_in_30_day_month_rejected() {
        assert_eq!(
            civil_date(1990, 4, 31),
            Err(CalendarError::InvalidDate("1990-04-31".into()))
        );
        assert!(parse_date("1990-04-31").is_err());
    }

    #[test]
    fn leap_day_only_in_leap_years() {
        assert!(civil_date(1992, 2, 29).is_ok());
        assert!(civil_date(1990, 2, 29).is_err());
    }

    #[test]
    fn malformed_date_text() {
        assert!(parse_date("1990/05/10").is_err());
        assert!(parse_date("").is_err());
        assert_eq!(parse_date(" 1990-05-10 ").unwrap(), civil_date(1990, 5, 10).unwrap());
    }

    #[test]
    fn parse_hour_only() {
        let t: BirthTime = "14".parse().unwrap();
        assert_eq!(t.hour(), 14);
        assert_eq!(t.minute(), 0);
    }

    #[test]
    fn parse_hour_minute() {
        let t: BirthTime = "23:30".parse().unwrap();
        assert_eq!(t.minute_of_day(), 1410);
        assert_eq!(t.to_string(), "23:30");
    }

    #[test]
    fn out_of_range_time_rejected() {
        assert!(BirthTime::new(24, 0).is_err());
        assert!(BirthTime::new(12, 60).is_err());
        assert!("noon".parse::<BirthTime>().is_err());
    }
}
