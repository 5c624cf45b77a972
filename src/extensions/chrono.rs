use crate::core::types::DayOfWeek;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// Weekday of a chrono date or instant, as the calendar's own day type.
pub trait DayOfWeekExt {
    fn day_of_week(&self) -> DayOfWeek;
}

impl DayOfWeekExt for NaiveDate {
    fn day_of_week(&self) -> DayOfWeek {
        DayOfWeek::from(self.weekday())
    }
}

impl DayOfWeekExt for NaiveDateTime {
    fn day_of_week(&self) -> DayOfWeek {
        self.date().day_of_week()
    }
}

pub trait DurationExt {
    /// Fractional hours, the unit the planner reports in.
    fn as_hours_f64(&self) -> f64;
}

impl DurationExt for Duration {
    fn as_hours_f64(&self) -> f64 {
        self.num_milliseconds() as f64 / 3_600_000.0
    }
}
