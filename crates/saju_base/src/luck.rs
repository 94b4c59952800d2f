//! Ten-year luck cycles (대운).
//!
//! A luck cycle is a run of consecutive sexagenary pillars, one per decade
//! of life. [`LuckCycle`] only describes the run (start, direction, length,
//! first age); entries are produced lazily by [`LuckCycle::iter`], so the
//! same value can be iterated any number of times.
//!
//! Two rules are provided:
//! - [`LuckCycleRule::Flat`]: start at `((year − 4) mod 10 + 1) mod 10`,
//!   step forward, ages 0, 10, 20, ... Sex does not affect it.
//! - [`LuckCycleRule::Polarity`]: forward for a yang year with a male
//!   subject or a yin year with a female subject, backward otherwise,
//!   starting one step away from the month pillar. The first age comes
//!   from the distance to the neighbouring sectional term.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ganji::{Pillar, Polarity, Sexagenary, Stem};

/// Default number of luck-cycle entries (ages 0–80).
pub const DEFAULT_LUCK_CYCLE_LEN: usize = 8;

/// Upper bound on entries per cycle.
pub const MAX_LUCK_CYCLE_LEN: usize = 12;

/// Years covered by one entry.
pub const YEARS_PER_LUCK_CYCLE: u32 = 10;

/// Days of distance to a sectional term that count as one year of age.
pub const DAYS_PER_START_YEAR: i64 = 3;

/// Subject's sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Korean designator (남/여).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Male => "남",
            Self::Female => "여",
        }
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "남" | "M" | "m" | "male" | "Male" => Ok(Self::Male),
            "여" | "F" | "f" | "female" | "Female" => Ok(Self::Female),
            other => Err(format!("unrecognised sex {other:?}")),
        }
    }
}

/// Direction of progression around the sexagenary cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Forward when year polarity and sex agree (yang/male, yin/female).
    pub const fn for_subject(year_stem: Stem, sex: Sex) -> Self {
        match (year_stem.polarity(), sex) {
            (Polarity::Yang, Sex::Male) | (Polarity::Yin, Sex::Female) => Self::Forward,
            _ => Self::Backward,
        }
    }

    pub const fn step(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Which luck-cycle algorithm to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LuckCycleRule {
    #[default]
    Flat,
    Polarity,
}

/// One decade of the luck cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LuckCycleEntry {
    /// 0-based decade position.
    pub order: u8,
    pub pillar: Pillar,
    pub sexagenary: Sexagenary,
    /// Age in years at which this entry begins.
    pub start_age: u32,
}

/// Description of a luck-cycle run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LuckCycle {
    start: Sexagenary,
    direction: Direction,
    first_age: u32,
    len: usize,
}

/// Start index of the flat rule.
pub const fn flat_start_index(birth_year: i32) -> i64 {
    ((birth_year as i64 - 4).rem_euclid(10) + 1) % 10
}

/// Flat luck cycle with the default length.
///
/// The sex argument is accepted for interface parity with the polarity rule
/// but does not change the flat progression.
pub fn generate(birth_year: i32, _sex: Sex) -> LuckCycle {
    LuckCycle::flat(birth_year, DEFAULT_LUCK_CYCLE_LEN)
}

/// Age at which a polarity-rule cycle begins: days to the neighbouring
/// sectional term divided by three, rounded to nearest.
pub const fn start_age_from_days(days: i64) -> u32 {
    let days = days.abs();
    ((days + DAYS_PER_START_YEAR / 2) / DAYS_PER_START_YEAR) as u32
}

impl LuckCycle {
    /// Flat rule: start at [`flat_start_index`], step forward by one per
    /// decade from age 0.
    pub fn flat(birth_year: i32, len: usize) -> Self {
        Self {
            start: Sexagenary::new(flat_start_index(birth_year)),
            direction: Direction::Forward,
            first_age: 0,
            len: len.min(MAX_LUCK_CYCLE_LEN),
        }
    }

    /// Polarity rule: one step from `month` in `direction`, beginning at
    /// `first_age`.
    pub fn polarity(month: Sexagenary, direction: Direction, first_age: u32, len: usize) -> Self {
        Self {
            start: month.offset(direction.step()),
            direction,
            first_age,
            len: len.min(MAX_LUCK_CYCLE_LEN),
        }
    }

    pub const fn start(&self) -> Sexagenary {
        self.start
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }

    pub const fn first_age(&self) -> u32 {
        self.first_age
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Entry at decade `order`, if within the cycle.
    pub fn entry(&self, order: usize) -> Option<LuckCycleEntry> {
        if order >= self.len {
            return None;
        }
        let sexagenary = self.start.offset(order as i64 * self.direction.step());
        Some(LuckCycleEntry {
            order: order as u8,
            pillar: sexagenary.pillar(),
            sexagenary,
            start_age: self.first_age + order as u32 * YEARS_PER_LUCK_CYCLE,
        })
    }

    pub fn iter(&self) -> LuckCycleIter {
        LuckCycleIter {
            cycle: *self,
            next: 0,
        }
    }
}

impl IntoIterator for &LuckCycle {
    type Item = LuckCycleEntry;
    type IntoIter = LuckCycleIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over a [`LuckCycle`].
#[derive(Debug, Clone)]
pub struct LuckCycleIter {
    cycle: LuckCycle,
    next: usize,
}

impl Iterator for LuckCycleIter {
    type Item = LuckCycleEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.cycle.entry(self.next)?;
        self.next += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cycle.len.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LuckCycleIter {}
