use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analytics::Granularity;
use crate::errors::TallyError;

const CONFIG_FILE: &str = "config.json";
const APP_DIR: &str = "tally_core";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_currency_prefix")]
    pub currency_prefix: String,
    #[serde(default = "default_granularity")]
    pub default_granularity: Granularity,
    #[serde(default = "default_forecast_periods")]
    pub forecast_periods: usize,
}

fn default_currency_prefix() -> String {
    "₹".into()
}

fn default_granularity() -> Granularity {
    Granularity::Monthly
}

fn default_forecast_periods() -> usize {
    4
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_prefix: default_currency_prefix(),
            default_granularity: default_granularity(),
            forecast_periods: default_forecast_periods(),
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, TallyError> {
        let base = dirs::config_dir()
            .ok_or_else(|| TallyError::Config("no config directory available".into()))?;
        Self::from_base(base.join(APP_DIR))
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, TallyError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, TallyError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    /// Loads the config file, falling back to defaults when absent.
    pub fn load(&self) -> Result<Config, TallyError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, config: &Config) -> Result<(), TallyError> {
        let raw = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn ensure_dir(dir: &Path) -> Result<(), TallyError> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
        let config = manager.load().expect("load");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn config_round_trips_through_disk() {
        let dir = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
        let config = Config {
            currency_prefix: "$".into(),
            default_granularity: Granularity::Weekly,
            forecast_periods: 8,
        };
        manager.save(&config).expect("save");
        assert_eq!(manager.load().expect("reload"), config);
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let dir = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
        std::fs::write(manager.path(), r#"{"forecast_periods": 6}"#).expect("write");
        let config = manager.load().expect("load");
        assert_eq!(config.forecast_periods, 6);
        assert_eq!(config.default_granularity, Granularity::Monthly);
    }
}
