use crate::core::types::{DayOfWeek, TimeRange};
use crate::errors::{Error, Result};
use crate::extensions::chrono::DayOfWeekExt;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One recurring slot of the weekly cycle, e.g. `TUE 9AM-12PM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkPeriod {
    pub day: DayOfWeek,
    pub range: TimeRange,
    /// Non-work time between the end of the previous period in cycle order
    /// and the start of this one. Filled in by `WorkCalendar::new`.
    pub gap_to_previous: Duration,
}

impl WorkPeriod {
    pub fn new(day: DayOfWeek, range: TimeRange) -> Self {
        Self {
            day,
            range,
            gap_to_previous: Duration::zero(),
        }
    }

    pub fn try_from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (day, range) = s.split_once(char::is_whitespace).ok_or_else(|| {
            Error::parse(format!(
                "Invalid work period: '{}'. Expected format: '<day> <start>-<end>'.",
                s
            ))
        })?;
        Ok(Self::new(
            DayOfWeek::try_from(day)?,
            TimeRange::try_from_str(range)?,
        ))
    }

    /// True iff `instant` falls on this period's weekday within
    /// `[start, end]`, both ends inclusive.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant.day_of_week() == self.day && self.range.contains(instant.time())
    }

    pub fn length(&self) -> Duration {
        self.range.end - self.range.start
    }

    /// Offsets of start and end from Monday 00:00.
    pub(crate) fn week_offsets(&self) -> (Duration, Duration) {
        let day = Duration::days(self.day.index());
        let midnight = chrono::NaiveTime::MIN;
        (
            day + (self.range.start - midnight),
            day + (self.range.end - midnight),
        )
    }
}

impl fmt::Display for WorkPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.range)
    }
}

impl Serialize for WorkPeriod {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for WorkPeriod {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<WorkPeriod, <D as Deserializer<'de>>::Error> {
        let s = String::deserialize(deserializer)?;
        WorkPeriod::try_from_str(&s).map_err(serde::de::Error::custom)
    }
}
