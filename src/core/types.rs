use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

/// Deadline sentinel meaning "no real deadline".
pub const FAR_FUTURE: NaiveDateTime = NaiveDateTime::MAX;

/// Weekday of a work period. Parses `tue`, `TUE` or `Tuesday`; prints `TUE`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumString, Display, AsRefStr, EnumIterDerive,
)]
#[strum(ascii_case_insensitive)]
pub enum DayOfWeek {
    #[strum(to_string = "MON", serialize = "monday")]
    Mon,
    #[strum(to_string = "TUE", serialize = "tuesday")]
    Tue,
    #[strum(to_string = "WED", serialize = "wednesday")]
    Wed,
    #[strum(to_string = "THU", serialize = "thursday")]
    Thu,
    #[strum(to_string = "FRI", serialize = "friday")]
    Fri,
    #[strum(to_string = "SAT", serialize = "saturday")]
    Sat,
    #[strum(to_string = "SUN", serialize = "sunday")]
    Sun,
}

impl DayOfWeek {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::parse(format!(
                "Invalid day of the week: '{}'. Valid days: {}",
                s.trim(),
                valid_csv::<DayOfWeek>()
            ))
        })
    }

    /// Days since Monday, 0..=6.
    pub fn index(self) -> i64 {
        self as i64
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Mon,
            Weekday::Tue => DayOfWeek::Tue,
            Weekday::Wed => DayOfWeek::Wed,
            Weekday::Thu => DayOfWeek::Thu,
            Weekday::Fri => DayOfWeek::Fri,
            Weekday::Sat => DayOfWeek::Sat,
            Weekday::Sun => DayOfWeek::Sun,
        }
    }
}

/// Calendar date as typed by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date(pub NaiveDate);

#[derive(Copy, Clone, Debug, EnumIterDerive, AsRefStr)]
enum DateFormat {
    #[strum(to_string = "YYYY-MM-DD")]
    Iso,
    #[strum(to_string = "MM-DD-YYYY")]
    MonthDayYear,
    /// Read in the given year.
    #[strum(to_string = "MM-DD")]
    MonthDay,
}

impl DateFormat {
    fn parse(self, text: &str, year: i32) -> Option<NaiveDate> {
        match self {
            DateFormat::Iso => NaiveDate::parse_from_str(text, "%Y-%m-%d").ok(),
            DateFormat::MonthDayYear => NaiveDate::parse_from_str(text, "%m-%d-%Y").ok(),
            DateFormat::MonthDay => {
                NaiveDate::parse_from_str(&format!("{year}-{text}"), "%Y-%m-%d").ok()
            }
        }
    }
}

impl Date {
    /// Accepts `/` or `-` separators. `MM-DD` means this year.
    pub fn try_from_str(input: &str) -> Result<Self> {
        Self::parse_in_year(input, Local::now().year())
    }

    pub fn parse_in_year(input: &str, year: i32) -> Result<Self> {
        let text = input.trim().replace('/', "-");
        DateFormat::iter()
            .find_map(|format| format.parse(&text, year))
            .map(Date)
            .ok_or_else(|| {
                Error::parse(format!(
                    "Invalid date: '{}'. Accepted formats: {}",
                    text,
                    valid_csv::<DateFormat>()
                ))
            })
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

const CLOCK: &str = "%-I:%M%p";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridian {
    Am,
    Pm,
}

/// Reads a 12-hour clock token: `9`, `9:30`, `9AM` or `9:30PM`. A token
/// without a meridian takes `default`.
fn parse_clock(raw: &str, default: Meridian) -> Result<NaiveTime> {
    let token = raw.trim();
    let invalid = || {
        Error::parse(format!(
            "Invalid time: '{token}'. Use a 12-hour clock such as 9, 9:30, 9AM or 5:30PM."
        ))
    };

    let upper = token.to_ascii_uppercase();
    let (clock, meridian) = if let Some(clock) = upper.strip_suffix("AM") {
        (clock, Meridian::Am)
    } else if let Some(clock) = upper.strip_suffix("PM") {
        (clock, Meridian::Pm)
    } else {
        (upper.as_str(), default)
    };

    let (hour, minute) = clock.trim().split_once(':').unwrap_or((clock.trim(), "00"));
    if minute.len() != 2 {
        return Err(invalid());
    }
    let hour: u32 = hour.parse().map_err(|_| invalid())?;
    let minute: u32 = minute.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&hour) {
        return Err(invalid());
    }

    let hour = match meridian {
        Meridian::Am => hour % 12,
        Meridian::Pm => hour % 12 + 12,
    };
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// Window of clock time within one day. Always `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start >= end {
            return Err(Error::parse(format!(
                "Start time '{}' must be earlier than end time '{}'.",
                start.format(CLOCK),
                end.format(CLOCK)
            )));
        }
        Ok(Self { start, end })
    }

    /// `<start>-<end>`, e.g. `9AM-12PM`. A bare start reads as AM and a bare
    /// end as PM, so `9-5` is a working day.
    pub fn try_from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (start, end) = s.split_once('-').ok_or_else(|| {
            Error::parse(format!(
                "Invalid time range: '{s}'. Expected '<start>-<end>', e.g. 9AM-12PM."
            ))
        })?;
        Self::new(
            parse_clock(start, Meridian::Am)?,
            parse_clock(end, Meridian::Pm)?,
        )
    }

    /// A single clock time such as `6PM` or `5:30PM`; bare hours read as PM.
    pub fn parse_time(raw: &str) -> Result<NaiveTime> {
        parse_clock(raw, Meridian::Pm)
    }

    /// Inclusive on both ends.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start.format(CLOCK), self.end.format(CLOCK))
    }
}

/// Morning or afternoon half of a working day. Noon is the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive)]
pub enum HalfDay {
    #[strum(serialize = "am", serialize = "morning", to_string = "AM")]
    Morning,
    #[strum(serialize = "pm", serialize = "afternoon", to_string = "PM")]
    Afternoon,
}

impl HalfDay {
    pub fn noon() -> NaiveTime {
        NaiveTime::MIN + chrono::Duration::hours(12)
    }

    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::validation(format!(
                "Invalid half-day designator: '{}'. Valid designators: {}",
                s.trim(),
                valid_csv::<HalfDay>()
            ))
        })
    }
}

/// A calendar day narrowed to one of its halves, e.g. `2099-01-06 PM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySpec {
    pub date: NaiveDate,
    pub half: HalfDay,
}

impl DaySpec {
    pub fn new(date: NaiveDate, half: HalfDay) -> Self {
        Self { date, half }
    }

    pub fn try_from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let (Some(date), Some(half), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(Error::validation(format!(
                "Invalid day designator: '{}'. Expected '<date> <AM|PM>'.",
                s.trim()
            )));
        };
        let date = Date::try_from_str(date)?;
        let half = HalfDay::try_from(half)?;
        Ok(Self::new(date.0, half))
    }
}

impl fmt::Display for DaySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format("%Y-%m-%d"), self.half)
    }
}

/// Validated category name tasks are filed under.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Domain(String);

impl Domain {
    pub fn try_from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        if name.is_empty() {
            return Err(Error::validation("Domain name cannot be empty."));
        }
        Ok(Domain(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `True`/`False` flag as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bool(pub bool);

impl Bool {
    pub fn try_from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Bool(true)),
            "false" => Ok(Bool(false)),
            _ => Err(Error::parse(format!(
                "Invalid boolean: '{}'. Use True or False.",
                s.trim()
            ))),
        }
    }
}

impl TryFrom<String> for Bool {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Bool::try_from_str(&s)
    }
}

impl From<Bool> for String {
    fn from(b: Bool) -> String {
        b.to_string()
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0 { "True" } else { "False" })
    }
}
