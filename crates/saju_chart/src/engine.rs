//! Chart engine: tables plus configuration, no global state.

use chrono::{Datelike, NaiveDate};
use saju_base::{
    Direction, ElementCount, LuckCycle, LuckCycleRule, MonthStemRule, Pillar, Sex, Stem,
    day_pillar, hour_pillar, month_cycle_year, month_pillar, start_age_from_days, tally,
    year_pillar,
};
use saju_calendar::{BirthTime, LunarDate, SolarTermEntry, parse_date};
use tracing::{debug, debug_span, warn};

use crate::chart::{Chart, FourPillars};
use crate::config::ChartConfig;
use crate::error::ChartError;
use crate::tables::CalendarTables;

/// One birth to chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BirthInput {
    pub date: NaiveDate,
    pub time: BirthTime,
    pub sex: Sex,
}

/// Four-pillars chart engine.
///
/// `ChartEngine` is [`Send`] + [`Sync`] and holds no interior mutability,
/// so one instance can serve any number of threads through
/// `Arc<ChartEngine>`.
///
/// ```rust,ignore
/// let engine = Arc::new(ChartEngine::new(ChartConfig::default())?);
/// let handle = std::thread::spawn({
///     let engine = Arc::clone(&engine);
///     move || engine.compute_chart(date, time, Sex::Female)
/// });
/// ```
#[derive(Debug)]
pub struct ChartEngine {
    config: ChartConfig,
    tables: CalendarTables,
}

impl ChartEngine {
    /// Validate `config` and load both tables from its paths.
    pub fn new(config: ChartConfig) -> Result<Self, ChartError> {
        config.validate()?;
        let tables = CalendarTables::load(&config)?;
        Ok(Self { config, tables })
    }

    /// Build an engine over tables that are already in memory.
    pub fn with_tables(config: ChartConfig, tables: CalendarTables) -> Result<Self, ChartError> {
        config.validate()?;
        Ok(Self { config, tables })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn tables(&self) -> &CalendarTables {
        &self.tables
    }

    pub fn solar_to_lunar(&self, date: NaiveDate) -> Result<LunarDate, ChartError> {
        self.tables.lunar().solar_to_lunar(date).map_err(|e| {
            warn!(%date, "solar date outside lunar table");
            e.into()
        })
    }

    pub fn lunar_to_solar(&self, lunar: LunarDate) -> Result<NaiveDate, ChartError> {
        Ok(self.tables.lunar().lunar_to_solar(lunar)?)
    }

    /// The solar term governing `date`.
    pub fn term_for(&self, date: NaiveDate) -> Result<SolarTermEntry, ChartError> {
        self.tables.terms().term_for(date).map_err(|e| {
            warn!(%date, "year missing from solar-term table");
            e.into()
        })
    }

    pub fn year_pillar(&self, year: i32) -> Pillar {
        year_pillar(year)
    }

    /// Month pillar under the configured stem rule.
    pub fn month_pillar(&self, date: NaiveDate) -> Result<Pillar, ChartError> {
        let term = self.term_for(date)?;
        Ok(month_from_term(date, &term, self.config.month_stem_rule))
    }

    pub fn day_pillar(&self, date: NaiveDate) -> Pillar {
        day_pillar(date)
    }

    pub fn hour_pillar(&self, date: NaiveDate, time: BirthTime) -> Pillar {
        hour_pillar(day_pillar(date).stem, time)
    }

    /// Luck cycle under the configured rule and length.
    pub fn luck_cycle(&self, date: NaiveDate, sex: Sex) -> Result<LuckCycle, ChartError> {
        let year_stem = year_pillar(date.year()).stem;
        match self.config.luck_cycle_rule {
            LuckCycleRule::Flat => Ok(LuckCycle::flat(date.year(), self.config.luck_cycle_len)),
            LuckCycleRule::Polarity => {
                let term = self.term_for(date)?;
                self.polarity_cycle(date, sex, year_stem, &term)
            }
        }
    }

    /// Polarity rule. The start is one step from the lock-step month pillar,
    /// so the five-tigers stem is used here whatever the configured month
    /// rule.
    fn polarity_cycle(
        &self,
        date: NaiveDate,
        sex: Sex,
        year_stem: Stem,
        term: &SolarTermEntry,
    ) -> Result<LuckCycle, ChartError> {
        let direction = Direction::for_subject(year_stem, sex);
        let month = month_from_term(date, term, MonthStemRule::FiveTigers);
        let Some(month) = month.sexagenary() else {
            return Err(ChartError::InvalidInput(format!(
                "month pillar {month} is not on the sexagenary cycle"
            )));
        };

        let terms = self.tables.terms();
        let days = match direction {
            Direction::Forward => (terms.next_sectional_after(date)?.date - date).num_days(),
            Direction::Backward => {
                (date - terms.last_sectional_on_or_before(date)?.date).num_days()
            }
        };
        let first_age = start_age_from_days(days);
        debug!(?direction, days, first_age, "polarity luck cycle");
        Ok(LuckCycle::polarity(
            month,
            direction,
            first_age,
            self.config.luck_cycle_len,
        ))
    }

    pub fn tally(&self, pillars: &FourPillars) -> ElementCount {
        tally(&pillars.as_array())
    }

    /// Assemble the full chart for one birth.
    pub fn compute_chart(
        &self,
        date: NaiveDate,
        time: BirthTime,
        sex: Sex,
    ) -> Result<Chart, ChartError> {
        let span = debug_span!("compute_chart", %date, %time, sex = sex.name());
        let _guard = span.enter();

        let lunar_date = self.solar_to_lunar(date)?;
        let solar_term = self.term_for(date)?;

        let year = year_pillar(date.year());
        let month = month_from_term(date, &solar_term, self.config.month_stem_rule);
        let day = day_pillar(date);
        let hour = hour_pillar(day.stem, time);
        debug!(%year, %month, %day, %hour, term = solar_term.term.name(), "pillars");

        let pillars = FourPillars {
            year,
            month,
            day,
            hour,
        };

        let cycle = match self.config.luck_cycle_rule {
            LuckCycleRule::Flat => LuckCycle::flat(date.year(), self.config.luck_cycle_len),
            LuckCycleRule::Polarity => self.polarity_cycle(date, sex, year.stem, &solar_term)?,
        };
        let elements = tally(&pillars.as_array());
        debug!(dominant = %elements.dominant(), "elements");

        Ok(Chart {
            birth_date: date,
            birth_time: time,
            sex,
            lunar_date,
            solar_term,
            pillars,
            luck_cycle: cycle.iter().collect(),
            elements,
        })
    }

    /// Parse text input (`YYYY-MM-DD`, `HH` or `HH:MM`, `남`/`여`/`M`/`F`)
    /// and compute the chart.
    pub fn compute_chart_from_strs(
        &self,
        date: &str,
        time: &str,
        sex: &str,
    ) -> Result<Chart, ChartError> {
        let date = parse_date(date)?;
        let time: BirthTime = time.parse()?;
        let sex: Sex = sex.parse().map_err(ChartError::InvalidInput)?;
        self.compute_chart(date, time, sex)
    }

    /// Compute several charts. Results are in input order; one failure does
    /// not affect the others.
    pub fn compute_charts(&self, inputs: &[BirthInput]) -> Vec<Result<Chart, ChartError>> {
        inputs
            .iter()
            .map(|i| self.compute_chart(i.date, i.time, i.sex))
            .collect()
    }
}

/// The five-tigers stem follows the year whose month run contains `date`,
/// which differs from the Gregorian year in January.
fn month_from_term(date: NaiveDate, term: &SolarTermEntry, rule: MonthStemRule) -> Pillar {
    let run_stem = year_pillar(month_cycle_year(date, term)).stem;
    month_pillar(date, run_stem, term, rule)
}
