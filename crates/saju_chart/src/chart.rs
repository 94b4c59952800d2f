//! The assembled chart record.

use chrono::NaiveDate;
use saju_base::{Branch, Element, ElementCount, LuckCycleEntry, Pillar, Sex, Stem};
use saju_calendar::{BirthTime, LunarDate, SolarTermEntry};
use serde::{Deserialize, Serialize};

/// Which of the four pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PillarPosition {
    Year,
    Month,
    Day,
    Hour,
}

pub const ALL_PILLAR_POSITIONS: [PillarPosition; 4] = [
    PillarPosition::Year,
    PillarPosition::Month,
    PillarPosition::Day,
    PillarPosition::Hour,
];

/// Year, month, day and hour pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl FourPillars {
    pub const fn get(&self, position: PillarPosition) -> Pillar {
        match position {
            PillarPosition::Year => self.year,
            PillarPosition::Month => self.month,
            PillarPosition::Day => self.day,
            PillarPosition::Hour => self.hour,
        }
    }

    /// Pillars in year, month, day, hour order.
    pub const fn as_array(&self) -> [Pillar; 4] {
        [self.year, self.month, self.day, self.hour]
    }

    /// Occurrences of `stem` across the four pillars.
    pub fn stem_count(&self, stem: Stem) -> usize {
        self.as_array().iter().filter(|p| p.stem == stem).count()
    }

    /// Occurrences of `branch` across the four pillars.
    pub fn branch_count(&self, branch: Branch) -> usize {
        self.as_array().iter().filter(|p| p.branch == branch).count()
    }
}

/// A complete four-pillars chart for one birth.
///
/// Built by [`crate::ChartEngine::compute_chart`]; fully determined by its
/// inputs and the loaded tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub birth_date: NaiveDate,
    pub birth_time: BirthTime,
    pub sex: Sex,
    pub lunar_date: LunarDate,
    /// The solar term governing the birth date.
    pub solar_term: SolarTermEntry,
    pub pillars: FourPillars,
    pub luck_cycle: Vec<LuckCycleEntry>,
    pub elements: ElementCount,
}

impl Chart {
    pub fn dominant_element(&self) -> Element {
        self.elements.dominant()
    }

    /// The luck-cycle entry in force at `age`, if the cycle has begun.
    pub fn luck_at_age(&self, age: u32) -> Option<&LuckCycleEntry> {
        self.luck_cycle.iter().rev().find(|e| e.start_age <= age)
    }
}
