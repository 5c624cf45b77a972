pub mod models;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

use crate::calendar::{WorkCalendar, WorkPeriod};
use crate::config::models::{ConfigItem, Domains, WorkPeriods};
use crate::core::types::Bool;
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIterDerive, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ConfigKey {
    WorkPeriods,
    DayEnd,
    Domains,
    FileLoggingEnabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    pub work_periods: ConfigItem<WorkPeriods>,
    #[serde(default = "models::default_day_end")]
    pub day_end: ConfigItem<NaiveTime>,
    #[serde(default = "models::default_domains")]
    pub domains: ConfigItem<Domains>,
    #[serde(default = "models::default_file_logging")]
    pub file_logging_enabled: ConfigItem<Bool>,
}

/// (key, description, value) as shown to a user.
pub type ConfigRow = (String, String, String);

#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    data: ConfigFile,
}

impl Config {
    pub fn load_default() -> Result<Self> {
        Self::load_from("config.json")
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::config(format!(
                "Configuration file '{}' not found.",
                path.display()
            )));
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| Error::config(format!("Failed to read {}: {}", path.display(), e)))?;
        let data: ConfigFile = serde_json::from_str(&text)
            .map_err(|e| Error::config(format!("Invalid JSON in '{}': {}", path.display(), e)))?;
        WorkCalendar::new(data.work_periods.value.0.clone())?;
        Ok(Self { path, data })
    }

    pub fn view(&self) -> &ConfigFile {
        &self.data
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn work_periods(&self) -> &[WorkPeriod] {
        &self.data.work_periods.get_value().0
    }
    pub fn day_end(&self) -> NaiveTime {
        *self.data.day_end.get_value()
    }
    pub fn domains(&self) -> &[String] {
        &self.data.domains.get_value().0
    }
    pub fn file_logging_enabled(&self) -> bool {
        self.data.file_logging_enabled.get_value().0
    }

    pub fn calendar(&self) -> Result<WorkCalendar> {
        WorkCalendar::new(self.work_periods().to_vec())
    }

    pub fn rows(&self) -> Vec<ConfigRow> {
        ConfigKey::iter()
            .map(|key| {
                let (description, value) = self.entry(key);
                (key.to_string(), description.to_string(), value)
            })
            .collect()
    }

    /// Description and rendered value of one entry.
    fn entry(&self, key: ConfigKey) -> (&str, String) {
        let d = &self.data;
        match key {
            ConfigKey::WorkPeriods => (d.work_periods.description(), d.work_periods.render()),
            ConfigKey::DayEnd => (d.day_end.description(), d.day_end.render()),
            ConfigKey::Domains => (d.domains.description(), d.domains.render()),
            ConfigKey::FileLoggingEnabled => (
                d.file_logging_enabled.description(),
                d.file_logging_enabled.render(),
            ),
        }
    }

    /// Updates one entry and writes the file back. Returns the previous value.
    pub fn set(&mut self, key_str: &str, new_value: &str) -> Result<String> {
        let key = ConfigKey::from_str(key_str.trim()).map_err(|_| {
            Error::config(format!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key_str,
                valid_csv::<ConfigKey>()
            ))
        })?;
        self.set_key(key, new_value)
    }

    pub fn set_key(&mut self, key: ConfigKey, new_value: &str) -> Result<String> {
        let (_, old) = self.entry(key);
        let mut data = self.data.clone();
        match key {
            ConfigKey::WorkPeriods => data.work_periods.set_value(new_value)?,
            ConfigKey::DayEnd => data.day_end.set_value(new_value)?,
            ConfigKey::Domains => data.domains.set_value(new_value)?,
            ConfigKey::FileLoggingEnabled => data.file_logging_enabled.set_value(new_value)?,
        }
        Self::save(&self.path, &data)?;
        self.data = data;
        Ok(old)
    }

    fn save(path: &Path, data: &ConfigFile) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        fs::write(path, json)?;
        Ok(())
    }
}
