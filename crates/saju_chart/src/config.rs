//! Engine configuration.

use std::path::{Path, PathBuf};

use saju_base::{DEFAULT_LUCK_CYCLE_LEN, LuckCycleRule, MAX_LUCK_CYCLE_LEN, MonthStemRule};
use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Directory the bundled tables live in, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";
pub const LUNAR_TABLE_FILE: &str = "lunar_table.csv";
pub const SOLAR_TERMS_FILE: &str = "24solar_terms.json";

/// Engine configuration used at startup time.
///
/// Every field has a default, so a JSON config file only needs to name the
/// settings it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub lunar_table_path: PathBuf,
    pub solar_terms_path: PathBuf,
    pub month_stem_rule: MonthStemRule,
    pub luck_cycle_rule: LuckCycleRule,
    /// Number of luck-cycle entries, `1..=12`.
    pub luck_cycle_len: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::from_data_dir(DEFAULT_DATA_DIR)
    }
}

impl ChartConfig {
    /// Default settings with both tables under `dir`.
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            lunar_table_path: dir.join(LUNAR_TABLE_FILE),
            solar_terms_path: dir.join(SOLAR_TERMS_FILE),
            month_stem_rule: MonthStemRule::default(),
            luck_cycle_rule: LuckCycleRule::default(),
            luck_cycle_len: DEFAULT_LUCK_CYCLE_LEN,
        }
    }

    /// Parse a JSON config. Relative table paths stay relative.
    pub fn from_json_str(content: &str) -> Result<Self, ChartError> {
        serde_json::from_str(content)
            .map_err(|e| ChartError::ConfigurationMissing(format!("config: {e}")))
    }

    /// Read a JSON config file. Relative table paths are resolved against
    /// the file's directory.
    pub fn load(path: &Path) -> Result<Self, ChartError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ChartError::ConfigurationMissing(format!("config {}: {e}", path.display()))
        })?;
        let mut config = Self::from_json_str(&content)?;
        if let Some(base) = path.parent() {
            config.lunar_table_path = resolve(base, &config.lunar_table_path);
            config.solar_terms_path = resolve(base, &config.solar_terms_path);
        }
        Ok(config)
    }

    pub fn with_month_stem_rule(mut self, rule: MonthStemRule) -> Self {
        self.month_stem_rule = rule;
        self
    }

    pub fn with_luck_cycle_rule(mut self, rule: LuckCycleRule) -> Self {
        self.luck_cycle_rule = rule;
        self
    }

    pub fn with_luck_cycle_len(mut self, len: usize) -> Self {
        self.luck_cycle_len = len;
        self
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        if self.lunar_table_path.as_os_str().is_empty() {
            return Err(ChartError::InvalidConfig(
                "lunar_table_path must not be empty",
            ));
        }
        if self.solar_terms_path.as_os_str().is_empty() {
            return Err(ChartError::InvalidConfig(
                "solar_terms_path must not be empty",
            ));
        }
        if self.luck_cycle_len == 0 || self.luck_cycle_len > MAX_LUCK_CYCLE_LEN {
            return Err(ChartError::InvalidConfig(
                "luck_cycle_len must be between 1 and 12",
            ));
        }
        Ok(())
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_relative() && !base.as_os_str().is_empty() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_bundled_data() {
        let config = ChartConfig::default();
        assert_eq!(config.lunar_table_path, Path::new("data/lunar_table.csv"));
        assert_eq!(config.solar_terms_path, Path::new("data/24solar_terms.json"));
        assert_eq!(config.luck_cycle_len, 8);
        assert_eq!(config.month_stem_rule, MonthStemRule::Simplified);
        assert_eq!(config.luck_cycle_rule, LuckCycleRule::Flat);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_paths() {
        let mut config = ChartConfig::default();
        config.lunar_table_path = PathBuf::new();
        assert_eq!(
            config.validate(),
            Err(ChartError::InvalidConfig("lunar_table_path must not be empty"))
        );

        let mut config = ChartConfig::default();
        config.solar_terms_path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_length() {
        assert!(ChartConfig::default().with_luck_cycle_len(0).validate().is_err());
        assert!(ChartConfig::default().with_luck_cycle_len(13).validate().is_err());
        assert!(ChartConfig::default().with_luck_cycle_len(12).validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ChartConfig::from_json_str(
            r#"{"month_stem_rule": "five_tigers", "luck_cycle_rule": "polarity"}"#,
        )
        .unwrap();
        assert_eq!(config.month_stem_rule, MonthStemRule::FiveTigers);
        assert_eq!(config.luck_cycle_rule, LuckCycleRule::Polarity);
        assert_eq!(config.luck_cycle_len, 8);
        assert_eq!(config.lunar_table_path, Path::new("data/lunar_table.csv"));
    }

    #[test]
    fn bad_json_is_configuration_missing() {
        let err = ChartConfig::from_json_str(r#"{"luck_cycle_len": "eight"}"#).unwrap_err();
        assert!(matches!(err, ChartError::ConfigurationMissing(_)));
    }

    #[test]
    fn load_resolves_relative_paths() {
        let dir = std::env::temp_dir().join(format!("saju_config_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("saju.json");
        std::fs::write(
            &file,
            r#"{"lunar_table_path": "tables/lunar.csv", "solar_terms_path": "/abs/terms.json"}"#,
        )
        .unwrap();

        let config = ChartConfig::load(&file).unwrap();
        assert_eq!(config.lunar_table_path, dir.join("tables/lunar.csv"));
        assert_eq!(config.solar_terms_path, Path::new("/abs/terms.json"));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_configuration_missing() {
        let err = ChartConfig::load(Path::new("/nonexistent/saju.json")).unwrap_err();
        assert!(matches!(err, ChartError::ConfigurationMissing(_)));
    }
}
