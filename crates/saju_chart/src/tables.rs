//! The two static reference tables, loaded together.

use std::path::Path;

use saju_calendar::{CalendarError, LunarTable, SolarTermTable};
use tracing::error;

use crate::config::ChartConfig;
use crate::error::ChartError;

/// Lunar conversion table and solar-term table.
///
/// Loaded once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct CalendarTables {
    lunar: LunarTable,
    terms: SolarTermTable,
}

impl CalendarTables {
    /// Load both tables from the paths in `config`.
    ///
    /// Any failure (missing file, malformed content) is reported as
    /// [`ChartError::ConfigurationMissing`].
    pub fn load(config: &ChartConfig) -> Result<Self, ChartError> {
        let lunar = LunarTable::load(&config.lunar_table_path)
            .map_err(|e| missing("lunar table", &config.lunar_table_path, e))?;
        let terms = SolarTermTable::load(&config.solar_terms_path)
            .map_err(|e| missing("solar-term table", &config.solar_terms_path, e))?;
        Ok(Self { lunar, terms })
    }

    /// Wrap tables that were parsed elsewhere.
    pub fn new(lunar: LunarTable, terms: SolarTermTable) -> Self {
        Self { lunar, terms }
    }

    pub fn lunar(&self) -> &LunarTable {
        &self.lunar
    }

    pub fn terms(&self) -> &SolarTermTable {
        &self.terms
    }
}

fn missing(what: &str, path: &Path, e: CalendarError) -> ChartError {
    error!(path = %path.display(), error = %e, "failed to load {what}");
    ChartError::ConfigurationMissing(format!("{what} {}: {e}", path.display()))
}
