//! Four-pillars chart engine.
//!
//! [`ChartEngine`] loads the lunar and solar-term tables named by a
//! [`ChartConfig`] and assembles [`Chart`] values from a birth date, time
//! and sex. [`RuleSet`] evaluates typed interpretation rules against a chart.
//!
//! ```rust,ignore
//! let engine = ChartEngine::new(ChartConfig::from_data_dir("data"))?;
//! let chart = engine.compute_chart_from_strs("1990-05-10", "14:00", "남")?;
//! println!("{} {} {} {}", chart.pillars.year, chart.pillars.month,
//!          chart.pillars.day, chart.pillars.hour);
//! ```

pub mod chart;
pub mod config;
pub mod engine;
pub mod error;
pub mod rules;
pub mod tables;

pub use chart::{ALL_PILLAR_POSITIONS, Chart, FourPillars, PillarPosition};
pub use config::{ChartConfig, DEFAULT_DATA_DIR, LUNAR_TABLE_FILE, SOLAR_TERMS_FILE};
pub use engine::{BirthInput, ChartEngine};
pub use error::ChartError;
pub use rules::{Condition, Rule, RuleSet};
pub use tables::CalendarTables;

pub use saju_base::{
    Branch, Direction, Element, ElementCount, LuckCycle, LuckCycleEntry, LuckCycleRule,
    MonthStemRule, Pillar, Sex, Stem,
};
pub use saju_calendar::{
    BirthTime, CalendarError, ErrorKind, LunarDate, SolarTerm, SolarTermEntry, parse_date,
};
