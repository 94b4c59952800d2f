//! Year, month, day, and hour pillar derivation.
//!
//! - Day: days elapsed since a fixed 갑자 anchor date, mod 60.
//! - Year: `(year − 4) mod 60` on the Gregorian year number.
//! - Month: branch from the governing solar term; stem per [`MonthStemRule`].
//! - Hour: twelve two-hour windows starting at 23:30; stem offset from the
//!   day stem so the hour-stem sequence repeats every five days.

use chrono::{Datelike, NaiveDate};
use saju_calendar::{BirthTime, MINUTES_PER_DAY, SolarTermEntry};
use serde::{Deserialize, Serialize};

use crate::ganji::{Pillar, Stem, branch_at, sexagenary_at, stem_at};

/// Calendar date (year, month, day) whose day pillar is 갑자 (index 0).
pub const DAY_PILLAR_EPOCH_YMD: (i32, u32, u32) = (1899, 1, 1);

/// `num_days_from_ce()` of the day-pillar anchor.
pub const DAY_PILLAR_EPOCH_DAYS_FROM_CE: i32 = 693_231;

/// Offset of the year numbering relative to the cycle: CE 4 is 갑자.
pub const YEAR_PILLAR_OFFSET: i32 = 4;

/// The hour windows are shifted this many minutes before the even hours.
pub const HOUR_WINDOW_SHIFT_MIN: u32 = 30;

/// Width of one hour window in minutes.
pub const HOUR_WINDOW_MIN: u32 = 120;

/// How the month stem is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthStemRule {
    /// `(solar month + 1) mod 10`. An approximation: it ignores the year
    /// stem and can pair a stem and branch that never co-occur.
    #[default]
    Simplified,
    /// "Five tigers" rule: the 인 month stem follows from the year stem,
    /// then advances one stem per branch step.
    FiveTigers,
}

/// Day pillar for a civil date.
pub fn day_pillar(date: NaiveDate) -> Pillar {
    let elapsed = date.num_days_from_ce() - DAY_PILLAR_EPOCH_DAYS_FROM_CE;
    sexagenary_at(i64::from(elapsed))
}

/// Year pillar for a Gregorian year.
pub const fn year_pillar(year: i32) -> Pillar {
    sexagenary_at(year as i64 - YEAR_PILLAR_OFFSET as i64)
}

/// Month pillar.
///
/// `governing` is the solar term in force on `date`; its month branch fixes
/// the pillar's branch under every rule.
pub fn month_pillar(
    date: NaiveDate,
    year_stem: Stem,
    governing: &SolarTermEntry,
    rule: MonthStemRule,
) -> Pillar {
    let branch = branch_at(i64::from(governing.term.month_branch_index()));
    let stem = match rule {
        MonthStemRule::Simplified => stem_at(i64::from(date.month()) + 1),
        MonthStemRule::FiveTigers => {
            let tiger = i64::from(year_stem.index() % 5) * 2 + 2;
            let steps = (i64::from(branch.index()) - 2).rem_euclid(12);
            stem_at(tiger + steps)
        }
    };
    Pillar::new(stem, branch)
}

/// Year whose five-tigers month run contains `date`.
///
/// The 축 month opened by 소한, and early-January dates that precede every
/// term of their year, still continue the previous year's run, which only
/// restarts at 인.
pub fn month_cycle_year(date: NaiveDate, governing: &SolarTermEntry) -> i32 {
    let is_chuk = governing.term.month_branch_index() == 1;
    if is_chuk || governing.date > date {
        date.year() - 1
    } else {
        date.year()
    }
}

/// Index (0 = 자) of the two-hour window containing `time`.
///
/// 자 spans 23:30–01:29, 축 01:30–03:29, and so on. A time exactly on a
/// window edge belongs to the later window.
pub const fn hour_branch_index(time: BirthTime) -> u8 {
    (((time.minute_of_day() + HOUR_WINDOW_SHIFT_MIN) % MINUTES_PER_DAY) / HOUR_WINDOW_MIN) as u8
}

/// Hour pillar. The day stem is the given day's stem even for 23:30–23:59;
/// the day pillar does not roll over.
pub fn hour_pillar(day_stem: Stem, time: BirthTime) -> Pillar {
    let bucket = i64::from(hour_branch_index(time));
    let stem = stem_at(i64::from(day_stem.index() % 5) * 2 + bucket);
    Pillar::new(stem, branch_at(bucket))
}
