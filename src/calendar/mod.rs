//! Weekly cycle of work periods and the backward walk over it.
//!
//! The calendar answers one central question: given a moment by which some
//! work must be finished, when must that work start if it can only progress
//! inside work periods? Non-work gaps between periods are precomputed once,
//! so a walk costs one step per period crossed regardless of how much
//! wall-clock time it spans.

mod period;

pub use period::WorkPeriod;

use crate::core::types::{DaySpec, HalfDay};
use crate::errors::{Error, Result};
use crate::extensions::chrono::DayOfWeekExt;
use chrono::{Duration, NaiveDate, NaiveDateTime};

const BOUNDARY: &str = "work window boundary";

#[derive(Debug, Clone)]
pub struct WorkCalendar {
    periods: Vec<WorkPeriod>,
}

impl WorkCalendar {
    /// Builds the cycle from `periods` in any order. Periods are sorted by
    /// weekday and start time, and each one's gap to its predecessor is
    /// derived, wrapping from Monday's first period back to the last period
    /// of the week.
    pub fn new(mut periods: Vec<WorkPeriod>) -> Result<Self> {
        if periods.is_empty() {
            return Err(Error::validation(
                "A work calendar needs at least one work period.",
            ));
        }
        periods.sort_by_key(|p| (p.day, p.range.start));

        for pair in periods.windows(2) {
            if pair[0].day == pair[1].day && pair[0].range.overlaps(&pair[1].range) {
                return Err(Error::validation(format!(
                    "Work periods '{}' and '{}' overlap.",
                    pair[0], pair[1]
                )));
            }
        }

        let n = periods.len();
        let week = Duration::weeks(1);
        let offsets: Vec<_> = periods.iter().map(WorkPeriod::week_offsets).collect();
        for (i, period) in periods.iter_mut().enumerate() {
            let (start, _) = offsets[i];
            let (_, prev_end) = offsets[(i + n - 1) % n];
            let mut gap = start - prev_end;
            if i == 0 {
                gap += week;
            }
            period.gap_to_previous = gap;
        }

        Ok(Self { periods })
    }

    pub fn periods(&self) -> &[WorkPeriod] {
        &self.periods
    }

    /// Total work time in one week of the cycle.
    pub fn weekly_work_time(&self) -> Duration {
        self.periods
            .iter()
            .fold(Duration::zero(), |acc, p| acc + p.length())
    }

    pub fn is_in_period(&self, index: usize, instant: NaiveDateTime) -> bool {
        self.periods
            .get(index)
            .is_some_and(|p| p.contains(instant))
    }

    /// Index of the first period containing `instant`.
    pub fn locate_period(&self, instant: NaiveDateTime) -> Result<usize> {
        (0..self.periods.len())
            .find(|&i| self.is_in_period(i, instant))
            .ok_or_else(|| Error::non_work_instant(BOUNDARY, instant))
    }

    /// The instant `duration` of work time before `end`, skipping every
    /// non-work gap. `end` must lie inside a work period.
    pub fn compute_start(&self, end: NaiveDateTime, duration: Duration) -> Result<NaiveDateTime> {
        if duration < Duration::zero() {
            return Err(Error::validation(format!(
                "Cannot walk back a negative duration ({duration})."
            )));
        }

        let mut cursor = self.locate_period(end)?;
        let mut end = end;
        let mut remaining = duration;

        loop {
            let period = &self.periods[cursor];
            let period_start = end.date().and_time(period.range.start);
            let available = end - period_start;

            if available >= remaining {
                return Ok(end - remaining);
            }

            remaining -= available;
            end = period_start - period.gap_to_previous;
            cursor = if cursor == 0 {
                self.periods.len() - 1
            } else {
                cursor - 1
            };
        }
    }

    /// Work time contained in `[start, end]`, summing only in-period spans.
    pub fn work_time_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Duration {
        let mut total = Duration::zero();
        if end <= start {
            return total;
        }

        let mut day = start.date();
        while day <= end.date() {
            for period in self.periods_on(day) {
                let from = day.and_time(period.range.start).max(start);
                let to = day.and_time(period.range.end).min(end);
                if to > from {
                    total += to - from;
                }
            }
            day += Duration::days(1);
        }
        total
    }

    /// First work instant of the given half day.
    pub fn half_day_start(&self, spec: DaySpec) -> Result<NaiveDateTime> {
        let noon = HalfDay::noon();
        let time = match spec.half {
            HalfDay::Morning => self
                .periods_on(spec.date)
                .find(|p| p.range.start < noon)
                .map(|p| p.range.start),
            HalfDay::Afternoon => self
                .periods_on(spec.date)
                .find(|p| p.range.end > noon)
                .map(|p| p.range.start.max(noon)),
        };
        time.map(|t| spec.date.and_time(t))
            .ok_or_else(|| Self::no_half_day(spec))
    }

    /// Last work instant of the given half day.
    pub fn half_day_end(&self, spec: DaySpec) -> Result<NaiveDateTime> {
        let noon = HalfDay::noon();
        let time = match spec.half {
            HalfDay::Morning => self
                .periods_on(spec.date)
                .filter(|p| p.range.start < noon)
                .last()
                .map(|p| p.range.end.min(noon)),
            HalfDay::Afternoon => self
                .periods_on(spec.date)
                .filter(|p| p.range.end > noon)
                .last()
                .map(|p| p.range.end),
        };
        time.map(|t| spec.date.and_time(t))
            .ok_or_else(|| Self::no_half_day(spec))
    }

    fn periods_on(&self, date: NaiveDate) -> impl Iterator<Item = &WorkPeriod> {
        let day = date.day_of_week();
        self.periods.iter().filter(move |p| p.day == day)
    }

    fn no_half_day(spec: DaySpec) -> Error {
        Error::validation(format!("No work period covers {spec}."))
    }
}
