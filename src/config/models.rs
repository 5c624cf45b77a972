use crate::calendar::{WorkCalendar, WorkPeriod};
use crate::core::types::{Bool, Domain, TimeRange};
use crate::errors::Result;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A setting that can be edited from text and shown back to a user.
pub trait ConfigValue: Sized {
    fn parse(raw: &str) -> Result<Self>;
    fn render(&self) -> String;
}

/// One `{ "value": ..., "description": ... }` entry of the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigItem<T> {
    pub value: T,
    pub description: String,
}

impl<T: ConfigValue> ConfigItem<T> {
    pub fn new(value: T, description: impl Into<String>) -> Self {
        Self {
            value,
            description: description.into(),
        }
    }

    pub fn get_value(&self) -> &T {
        &self.value
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Keeps the current value when `raw` is rejected.
    pub fn set_value(&mut self, raw: &str) -> Result<()> {
        self.value = T::parse(raw)?;
        Ok(())
    }

    pub fn render(&self) -> String {
        self.value.render()
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// The weekly cycle, checked as a whole when edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkPeriods(pub Vec<WorkPeriod>);

impl ConfigValue for WorkPeriods {
    /// Comma-separated, e.g. `MON 9AM-12PM, MON 1PM-6PM`.
    fn parse(raw: &str) -> Result<Self> {
        let periods = split_list(raw)
            .map(WorkPeriod::try_from_str)
            .collect::<Result<Vec<_>>>()?;
        WorkCalendar::new(periods.clone())?;
        Ok(Self(periods))
    }

    fn render(&self) -> String {
        self.0
            .iter()
            .map(WorkPeriod::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Domains(pub Vec<String>);

impl ConfigValue for Domains {
    fn parse(raw: &str) -> Result<Self> {
        split_list(raw)
            .map(|name| Domain::try_from_str(name).map(|d| d.as_str().to_string()))
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    fn render(&self) -> String {
        self.0.join(", ")
    }
}

impl ConfigValue for NaiveTime {
    fn parse(raw: &str) -> Result<Self> {
        TimeRange::parse_time(raw)
    }

    fn render(&self) -> String {
        self.format("%-I:%M%p").to_string()
    }
}

impl ConfigValue for Bool {
    fn parse(raw: &str) -> Result<Self> {
        Bool::try_from_str(raw)
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

pub(super) fn default_day_end() -> ConfigItem<NaiveTime> {
    ConfigItem::new(
        NaiveTime::MIN + chrono::Duration::hours(18),
        "End of the workday used to size today's list.",
    )
}

pub(super) fn default_domains() -> ConfigItem<Domains> {
    ConfigItem::new(Domains::default(), "Domains created at start-up.")
}

pub(super) fn default_file_logging() -> ConfigItem<Bool> {
    ConfigItem::new(Bool(true), "Enable writing log messages to file.")
}
