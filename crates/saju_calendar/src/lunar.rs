//! Solar ↔ lunar date conversion by table lookup.
//!
//! The lunar table is a CSV file with one row per solar day:
//!
//! ```text
//! solar,lunar,is_leap
//! 1990-05-10,1990-04-16,False
//! ```
//!
//! Conversion is an exact match against this table. Dates outside the
//! table's coverage are a hard miss; nothing is approximated.

use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::error::CalendarError;

/// A date in the Korean lunisolar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LunarDate {
    pub year: i32,
    /// Lunar month, 1..=12.
    pub month: u32,
    /// Day of the lunar month, 1..=30.
    pub day: u32,
    /// True for an intercalary (윤달) month.
    pub is_leap_month: bool,
}

impl LunarDate {
    pub const fn new(year: i32, month: u32, day: u32, is_leap_month: bool) -> Self {
        Self {
            year,
            month,
            day,
            is_leap_month,
        }
    }

    /// Parse the table's `YYYY-MM-DD` lunar column.
    fn parse_ymd(s: &str, is_leap_month: bool) -> Result<Self, CalendarError> {
        let bad = || CalendarError::TableParse(format!("malformed lunar date {s:?}"));
        let mut parts = s.trim().splitn(3, '-');
        let year = parts.next().ok_or_else(bad)?.parse::<i32>().map_err(|_| bad())?;
        let month = parts.next().ok_or_else(bad)?.parse::<u32>().map_err(|_| bad())?;
        let day = parts.next().ok_or_else(bad)?.parse::<u32>().map_err(|_| bad())?;
        if !(1..=12).contains(&month) || !(1..=30).contains(&day) {
            return Err(bad());
        }
        Ok(Self::new(year, month, day, is_leap_month))
    }
}

impl Display for LunarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)?;
        if self.is_leap_month {
            write!(f, " (leap)")?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct LunarRow {
    solar: NaiveDate,
    lunar: String,
    #[serde(deserialize_with = "leap_flag")]
    is_leap: bool,
}

/// Accepts `True`/`False` as written in the bundled table, plus
/// lowercase and `1`/`0`.
fn leap_flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(d)?;
    match raw.trim() {
        "True" | "true" | "1" => Ok(true),
        "False" | "false" | "0" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid leap flag {other:?}"
        ))),
    }
}

/// Immutable solar → lunar lookup table, with its reverse index.
#[derive(Debug, Clone, Default)]
pub struct LunarTable {
    by_solar: BTreeMap<NaiveDate, LunarDate>,
    by_lunar: HashMap<LunarDate, NaiveDate>,
}

impl LunarTable {
    /// Load a lunar table CSV from a path.
    pub fn load(path: &Path) -> Result<Self, CalendarError> {
        let file = File::open(path)?;
        let table = Self::from_reader(BufReader::new(file))?;
        if let Some((first, last)) = table.coverage() {
            info!(
                path = %path.display(),
                rows = table.len(),
                %first,
                %last,
                "lunar table loaded"
            );
        }
        Ok(table)
    }

    /// Parse a lunar table from CSV content.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CalendarError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut table = Self::default();
        for record in rdr.deserialize::<LunarRow>() {
            let row = record?;
            let lunar = LunarDate::parse_ymd(&row.lunar, row.is_leap)?;
            if table.by_solar.insert(row.solar, lunar).is_some() {
                return Err(CalendarError::TableParse(format!(
                    "duplicate solar date {}",
                    row.solar
                )));
            }
            if table.by_lunar.insert(lunar, row.solar).is_some() {
                return Err(CalendarError::TableParse(format!(
                    "lunar date {lunar} mapped from two solar dates"
                )));
            }
        }

        if table.is_empty() {
            return Err(CalendarError::TableParse("lunar table is empty".into()));
        }
        Ok(table)
    }

    /// Exact lookup of the lunar date for a solar date.
    pub fn solar_to_lunar(&self, date: NaiveDate) -> Result<LunarDate, CalendarError> {
        self.by_solar
            .get(&date)
            .copied()
            .ok_or(CalendarError::SolarDateNotInTable(date))
    }

    /// Exact reverse lookup. The leap flag must match.
    pub fn lunar_to_solar(&self, lunar: LunarDate) -> Result<NaiveDate, CalendarError> {
        self.by_lunar
            .get(&lunar)
            .copied()
            .ok_or(CalendarError::LunarDateNotInTable(lunar))
    }

    /// First and last solar dates covered, if any.
    pub fn coverage(&self) -> Option<(NaiveDate, NaiveDate)> {
        let (first, _) = self.by_solar.first_key_value()?;
        let (last, _) = self.by_solar.last_key_value()?;
        Some((*first, *last))
    }

    pub fn len(&self) -> usize {
        self.by_solar.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_solar.is_empty()
    }
}
