//! The 24 solar terms (절기) and the per-year term table.
//!
//! Terms mark 15-degree steps of the Sun's apparent ecliptic longitude,
//! starting from 소한 (285 deg) in early January. Alternate terms are
//! "sectional" (절) and open a month of the four-pillars calendar; the
//! others fall mid-month (중기).
//!
//! The term table is JSON keyed by year, then by Korean term name:
//!
//! ```text
//! { "1990": { "소한": "1990-01-05", "대한": "1990-01-20", ... } }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use crate::error::CalendarError;

/// The 24 solar terms in Gregorian-year order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SolarTerm {
    Sohan,
    Daehan,
    Ipchun,
    Usu,
    Gyeongchip,
    Chunbun,
    Cheongmyeong,
    Gogu,
    Ipha,
    Soman,
    Mangjong,
    Haji,
    Soseo,
    Daeseo,
    Ipchu,
    Cheoseo,
    Baengno,
    Chubun,
    Hallo,
    Sanggang,
    Ipdong,
    Soseol,
    Daeseol,
    Dongji,
}

/// Number of solar terms in one year.
pub const TERMS_PER_YEAR: usize = 24;

/// All 24 terms in order (index 0 = 소한).
pub const ALL_SOLAR_TERMS: [SolarTerm; TERMS_PER_YEAR] = [
    SolarTerm::Sohan,
    SolarTerm::Daehan,
    SolarTerm::Ipchun,
    SolarTerm::Usu,
    SolarTerm::Gyeongchip,
    SolarTerm::Chunbun,
    SolarTerm::Cheongmyeong,
    SolarTerm::Gogu,
    SolarTerm::Ipha,
    SolarTerm::Soman,
    SolarTerm::Mangjong,
    SolarTerm::Haji,
    SolarTerm::Soseo,
    SolarTerm::Daeseo,
    SolarTerm::Ipchu,
    SolarTerm::Cheoseo,
    SolarTerm::Baengno,
    SolarTerm::Chubun,
    SolarTerm::Hallo,
    SolarTerm::Sanggang,
    SolarTerm::Ipdong,
    SolarTerm::Soseol,
    SolarTerm::Daeseol,
    SolarTerm::Dongji,
];

const SOLAR_TERM_NAMES: [&str; TERMS_PER_YEAR] = [
    "소한", "대한", "입춘", "우수", "경칩", "춘분", "청명", "곡우", "입하", "소만", "망종", "하지",
    "소서", "대서", "입추", "처서", "백로", "추분", "한로", "상강", "입동", "소설", "대설", "동지",
];

const SOLAR_TERM_ENGLISH_NAMES: [&str; TERMS_PER_YEAR] = [
    "Minor Cold",
    "Major Cold",
    "Start of Spring",
    "Rain Water",
    "Awakening of Insects",
    "Spring Equinox",
    "Pure Brightness",
    "Grain Rain",
    "Start of Summer",
    "Grain Buds",
    "Grain in Ear",
    "Summer Solstice",
    "Minor Heat",
    "Major Heat",
    "Start of Autumn",
    "End of Heat",
    "White Dew",
    "Autumn Equinox",
    "Cold Dew",
    "Frost's Descent",
    "Start of Winter",
    "Minor Snow",
    "Major Snow",
    "Winter Solstice",
];

impl SolarTerm {
    /// 0-based index (소한=0 .. 동지=23).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Korean name.
    pub fn name(self) -> &'static str {
        SOLAR_TERM_NAMES[self.index() as usize]
    }

    /// English name.
    pub fn english_name(self) -> &'static str {
        SOLAR_TERM_ENGLISH_NAMES[self.index() as usize]
    }

    /// Look up a term by its Korean name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        SOLAR_TERM_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| ALL_SOLAR_TERMS[i])
    }

    /// Apparent solar longitude at which the term begins, in degrees.
    pub const fn solar_longitude_deg(self) -> u16 {
        (285 + 15 * self.index() as u16) % 360
    }

    /// True for the 12 sectional terms that open a month (입춘, 경칩, ...).
    pub const fn is_sectional(self) -> bool {
        self.index() % 2 == 0
    }

    /// Earthly-branch index (0 = 자) of the month this term belongs to.
    ///
    /// 입춘 and 우수 → 2 (인), 경칩 and 춘분 → 3 (묘), ...,
    /// 대설 and 동지 → 0 (자), 소한 and 대한 → 1 (축).
    pub const fn month_branch_index(self) -> u8 {
        (self.index() / 2 + 1) % 12
    }
}

impl Serialize for SolarTerm {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.name())
    }
}

/// A solar term together with the date it falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SolarTermEntry {
    pub term: SolarTerm,
    pub date: NaiveDate,
}

/// Per-year solar-term dates, each year sorted chronologically.
#[derive(Debug, Clone, Default)]
pub struct SolarTermTable {
    years: BTreeMap<i32, Vec<SolarTermEntry>>,
}

impl SolarTermTable {
    /// Load a term table JSON file.
    pub fn load(path: &Path) -> Result<Self, CalendarError> {
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&content)?;
        info!(
            path = %path.display(),
            years = table.years.len(),
            first = ?table.years.keys().next(),
            last = ?table.years.keys().next_back(),
            "solar-term table loaded"
        );
        Ok(table)
    }

    /// Parse a term table from JSON text.
    ///
    /// Every year must list all 24 terms, each dated within that year.
    pub fn from_json_str(content: &str) -> Result<Self, CalendarError> {
        let raw: BTreeMap<String, BTreeMap<String, NaiveDate>> = serde_json::from_str(content)?;

        let mut years = BTreeMap::new();
        for (year_key, terms) in raw {
            let year = year_key
                .trim()
                .parse::<i32>()
                .map_err(|_| CalendarError::TableParse(format!("bad year key {year_key:?}")))?;

            let mut entries = Vec::with_capacity(TERMS_PER_YEAR);
            for (name, date) in terms {
                let term = SolarTerm::from_name(&name).ok_or_else(|| {
                    CalendarError::TableParse(format!("unknown solar term {name:?} in {year}"))
                })?;
                if date.year() != year {
                    return Err(CalendarError::TableParse(format!(
                        "{name} dated {date} listed under {year}"
                    )));
                }
                entries.push(SolarTermEntry { term, date });
            }
            if entries.len() != TERMS_PER_YEAR {
                return Err(CalendarError::TableParse(format!(
                    "year {year} lists {} terms, expected {TERMS_PER_YEAR}",
                    entries.len()
                )));
            }
            entries.sort_by_key(|e| (e.date, e.term));
            years.insert(year, entries);
        }

        if years.is_empty() {
            return Err(CalendarError::TableParse("solar-term table is empty".into()));
        }
        Ok(Self { years })
    }

    /// The year's 24 entries in chronological order.
    pub fn terms_for_year(&self, year: i32) -> Result<&[SolarTermEntry], CalendarError> {
        self.years
            .get(&year)
            .map(Vec::as_slice)
            .ok_or(CalendarError::YearNotInTable(year))
    }

    /// Years present in the table, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    /// The term governing `date`: the latest term of the date's year whose
    /// date is on or before `date`.
    ///
    /// A date earlier than every term of its year resolves to that year's
    /// 입춘 entry rather than failing.
    pub fn term_for(&self, date: NaiveDate) -> Result<SolarTermEntry, CalendarError> {
        let entries = self.terms_for_year(date.year())?;
        if let Some(entry) = entries.iter().take_while(|e| e.date <= date).last() {
            return Ok(*entry);
        }
        debug!(%date, "date precedes the year's first term, using 입춘");
        entries
            .iter()
            .find(|e| e.term == SolarTerm::Ipchun)
            .copied()
            .ok_or(CalendarError::YearNotInTable(date.year()))
    }

    /// First sectional term strictly after `date`, looking into the next
    /// year's table when needed.
    pub fn next_sectional_after(&self, date: NaiveDate) -> Result<SolarTermEntry, CalendarError> {
        for year in [date.year(), date.year() + 1] {
            let found = self
                .terms_for_year(year)?
                .iter()
                .find(|e| e.term.is_sectional() && e.date > date);
            if let Some(entry) = found {
                return Ok(*entry);
            }
        }
        Err(CalendarError::YearNotInTable(date.year() + 1))
    }

    /// Latest sectional term on or before `date`, looking into the previous
    /// year's table when needed.
    pub fn last_sectional_on_or_before(
        &self,
        date: NaiveDate,
    ) -> Result<SolarTermEntry, CalendarError> {
        for year in [date.year(), date.year() - 1] {
            let found = self
                .terms_for_year(year)?
                .iter()
                .rev()
                .find(|e| e.term.is_sectional() && e.date <= date);
            if let Some(entry) = found {
                return Ok(*entry);
            }
        }
        Err(CalendarError::YearNotInTable(date.year() - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// Build a synthetic year: term i falls on day 1 + 15*i of the year.
    fn synthetic_year(year: i32) -> String {
        let start = d(year, 1, 3);
        let body: Vec<String> = ALL_SOLAR_TERMS
            .iter()
            .map(|t| {
                let date = start + chrono::Duration::days(15 * t.index() as i64);
                format!("\"{}\": \"{}\"", t.name(), date)
            })
            .collect();
        format!("\"{year}\": {{ {} }}", body.join(", "))
    }

    fn table(years: &[i32]) -> SolarTermTable {
        let body: Vec<String> = years.iter().map(|y| synthetic_year(*y)).collect();
        SolarTermTable::from_json_str(&format!("{{ {} }}", body.join(", "))).unwrap()
    }

    #[test]
    fn names_round_trip() {
        for t in ALL_SOLAR_TERMS {
            assert_eq!(SolarTerm::from_name(t.name()), Some(t));
            assert!(!t.english_name().is_empty());
        }
        assert_eq!(SolarTerm::from_name("미상"), None);
    }

    #[test]
    fn indices_sequential() {
        for (i, t) in ALL_SOLAR_TERMS.iter().enumerate() {
            assert_eq!(t.index() as usize, i);
        }
    }

    #[test]
    fn longitudes() {
        assert_eq!(SolarTerm::Sohan.solar_longitude_deg(), 285);
        assert_eq!(SolarTerm::Ipchun.solar_longitude_deg(), 315);
        assert_eq!(SolarTerm::Chunbun.solar_longitude_deg(), 0);
        assert_eq!(SolarTerm::Dongji.solar_longitude_deg(), 270);
    }

    #[test]
    fn sectional_terms_and_branches() {
        let sectional: Vec<&str> = ALL_SOLAR_TERMS
            .iter()
            .filter(|t| t.is_sectional())
            .map(|t| t.name())
            .collect();
        assert_eq!(
            sectional,
            ["소한", "입춘", "경칩", "청명", "입하", "망종", "소서", "입추", "백로", "한로", "입동", "대설"]
        );
        assert_eq!(SolarTerm::Ipchun.month_branch_index(), 2);
        assert_eq!(SolarTerm::Usu.month_branch_index(), 2);
        assert_eq!(SolarTerm::Daeseol.month_branch_index(), 0);
        assert_eq!(SolarTerm::Dongji.month_branch_index(), 0);
        assert_eq!(SolarTerm::Sohan.month_branch_index(), 1);
    }

    #[test]
    fn entries_sorted() {
        let t = table(&[2001]);
        let entries = t.terms_for_year(2001).unwrap();
        assert_eq!(entries.len(), 24);
        assert!(entries.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(entries[0].term, SolarTerm::Sohan);
    }

    #[test]
    fn term_on_its_own_date_governs() {
        let t = table(&[2001]);
        let ipchun = d(2001, 2, 2); // 2001-01-03 + 30 days
        let e = t.term_for(ipchun).unwrap();
        assert_eq!(e.term, SolarTerm::Ipchun);
        assert_eq!(e.date, ipchun);
    }

    #[test]
    fn day_before_term_takes_previous() {
        let t = table(&[2001]);
        let e = t.term_for(d(2001, 2, 1)).unwrap();
        assert_eq!(e.term, SolarTerm::Daehan);
    }

    #[test]
    fn before_first_term_falls_back_to_ipchun() {
        let t = table(&[2001]);
        let e = t.term_for(d(2001, 1, 2)).unwrap();
        assert_eq!(e.term, SolarTerm::Ipchun);
        assert_eq!(e.date, d(2001, 2, 2));
    }

    #[test]
    fn missing_year_not_found() {
        let t = table(&[2001]);
        assert_eq!(
            t.term_for(d(2002, 5, 5)),
            Err(CalendarError::YearNotInTable(2002))
        );
    }

    #[test]
    fn sectional_neighbours_cross_years() {
        let t = table(&[2001, 2002]);
        // 대설 2001 = 2001-01-03 + 330 days = 2001-11-29; 동지 = 2001-12-14.
        let next = t.next_sectional_after(d(2001, 12, 20)).unwrap();
        assert_eq!(next.term, SolarTerm::Sohan);
        assert_eq!(next.date, d(2002, 1, 3));

        let prev = t.last_sectional_on_or_before(d(2002, 1, 2)).unwrap();
        assert_eq!(prev.term, SolarTerm::Daeseol);
        assert_eq!(prev.date, d(2001, 11, 29));
    }

    #[test]
    fn incomplete_year_rejected() {
        let json = r#"{ "1990": { "입춘": "1990-02-04" } }"#;
        assert!(matches!(
            SolarTermTable::from_json_str(json),
            Err(CalendarError::TableParse(_))
        ));
    }

    #[test]
    fn unknown_term_rejected() {
        let json = r#"{ "1990": { "춘절": "1990-02-04" } }"#;
        assert!(SolarTermTable::from_json_str(json).is_err());
    }
}
