//! Pure four-pillars arithmetic on top of the calendar tables.
//!
//! This crate provides:
//! - The 10 stems, 12 branches, and the 60-pair sexagenary cycle
//! - Year, month, day, and hour pillar derivation
//! - Ten-year luck-cycle generation
//! - Five-element classification and tally
//!
//! Everything here is a deterministic function of its arguments; table
//! lookups happen in `saju_calendar` and are passed in.

pub mod element;
pub mod ganji;
pub mod luck;
pub mod pillar;

pub use element::{ALL_ELEMENTS, Element, ElementCount, tally};
pub use ganji::{
    ALL_BRANCHES, ALL_STEMS, Branch, Pillar, Polarity, SEXAGENARY_CYCLE, Sexagenary, Stem,
    branch_at, sexagenary_at, stem_at,
};
pub use luck::{
    DEFAULT_LUCK_CYCLE_LEN, Direction, LuckCycle, LuckCycleEntry, LuckCycleIter, LuckCycleRule,
    MAX_LUCK_CYCLE_LEN, Sex, YEARS_PER_LUCK_CYCLE, flat_start_index, generate,
    start_age_from_days,
};
pub use pillar::{
    DAY_PILLAR_EPOCH_DAYS_FROM_CE, DAY_PILLAR_EPOCH_YMD, MonthStemRule, day_pillar,
    hour_branch_index, hour_pillar, month_cycle_year, month_pillar, year_pillar,
};
