use crate::error::{Result, SnipdexError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "config.json";
pub const LOG_DIRNAME: &str = "logs";

/// Drag distance to scroll distance ratio. One column of pointer travel
/// moves the tab strip two columns.
pub const SCROLL_SPEED_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// User settings read from `config.json` in the snipdex directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scroll_speed_multiplier: f64,
    pub catalog_path: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scroll_speed_multiplier: SCROLL_SPEED_MULTIPLIER,
            catalog_path: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Load the config from the default snipdex directory
    pub fn load() -> Result<Config> {
        Config::load_from(&get_config_dir())
    }

    /// Load the config from `dir`, falling back to defaults when the file is
    /// missing or empty
    pub fn load_from(dir: &Path) -> Result<Config> {
        let path = dir.join(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config into `dir`, creating the directory if needed
    pub fn save_to(&self, dir: &Path) -> Result<()> {
        self.validate()?;
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(CONFIG_FILENAME), serialized)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !self.scroll_speed_multiplier.is_finite() || self.scroll_speed_multiplier <= 0.0 {
            return Err(SnipdexError::InvalidConfig(format!(
                "scroll_speed_multiplier must be a positive number, got {}",
                self.scroll_speed_multiplier
            )));
        }
        if self.log_level.trim().is_empty() {
            return Err(SnipdexError::InvalidConfig(
                "log_level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Get the snipdex configuration directory
pub fn get_config_dir() -> PathBuf {
    env::var("HOME")
        .map(|home| PathBuf::from(home).join(".snipdex"))
        .unwrap_or_else(|_| PathBuf::from(".snipdex"))
}

/// Get the path to the config file
pub fn get_config_file_path() -> PathBuf {
    get_config_dir().join(CONFIG_FILENAME)
}

/// Get the directory log files are written to
pub fn get_log_dir() -> PathBuf {
    get_config_dir().join(LOG_DIRNAME)
}
