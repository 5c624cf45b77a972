use crate::core::priority::priority;
use crate::core::types::{Domain, FAR_FUTURE};
use crate::errors::{Error, Result};
use crate::extensions::chrono::DurationExt;
use chrono::{Duration, Local, NaiveDateTime};
use std::fmt;

pub trait BaseEntity {
    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
}

/// Anything that takes a slot in the deadline chain.
pub trait Schedulable {
    fn title(&self) -> &str;
    fn deadline(&self) -> NaiveDateTime;
    fn priority(&self) -> f64;
    fn placement(&self) -> Option<&Placement>;
    fn set_placement(&mut self, placement: Option<Placement>);
}

/// Window stamped on an item by a placement pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// The deadline falls before the start of the next item in the chain.
    /// Always set on the latest item, which has no successor.
    pub gap_before_next: bool,
}

impl Placement {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}{}",
            self.start.format("%a %Y-%m-%d %H:%M"),
            self.end.format("%a %Y-%m-%d %H:%M"),
            if self.gap_before_next { " (gap)" } else { "" }
        )
    }
}

// =====
// Task
// =====

#[derive(Debug, Clone)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub domain: Domain,
    deadline: NaiveDateTime,
    effort: Duration,
    percent_done: u8,
    remaining: Duration,
    priority: f64,
    placement: Option<Placement>,
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        domain: Domain,
        deadline: NaiveDateTime,
        effort: Duration,
    ) -> Result<Self> {
        Self::new_at(
            title,
            description,
            domain,
            deadline,
            effort,
            Local::now().naive_local(),
        )
    }

    /// Same as [`Task::new`] with the priority computed relative to `now`.
    ///
    /// Fails when `effort` is negative.
    pub fn new_at(
        title: impl Into<String>,
        description: impl Into<String>,
        domain: Domain,
        deadline: NaiveDateTime,
        effort: Duration,
        now: NaiveDateTime,
    ) -> Result<Self> {
        let title = title.into();
        if effort < Duration::zero() {
            return Err(Error::validation(format!(
                "Effort of '{}' cannot be negative, got {}h.",
                title,
                effort.as_hours_f64()
            )));
        }
        let mut task = Self {
            id: 1,
            title,
            description: description.into(),
            domain,
            deadline,
            effort,
            percent_done: 0,
            remaining: effort,
            priority: 0.0,
            placement: None,
        };
        task.refresh_priority(now);
        Ok(task)
    }

    pub fn deadline(&self) -> NaiveDateTime {
        self.deadline
    }

    pub fn has_deadline(&self) -> bool {
        self.deadline != FAR_FUTURE
    }

    pub fn effort(&self) -> Duration {
        self.effort
    }

    pub fn percent_done(&self) -> u8 {
        self.percent_done
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn remaining_hours(&self) -> f64 {
        self.remaining.as_hours_f64()
    }

    pub fn priority(&self) -> f64 {
        self.priority
    }

    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    pub fn update_completion(&mut self, percent: i32) -> Result<()> {
        self.update_completion_at(percent, Local::now().naive_local())
    }

    /// Sets the completion percentage, then recomputes remaining work and
    /// priority relative to `now`. Out-of-range values leave the task untouched.
    pub fn update_completion_at(&mut self, percent: i32, now: NaiveDateTime) -> Result<()> {
        let percent = u8::try_from(percent)
            .ok()
            .filter(|p| *p <= 100)
            .ok_or_else(|| {
                Error::validation(format!(
                    "Completion of '{}' must be between 0 and 100, got {}.",
                    self.title, percent
                ))
            })?;
        self.percent_done = percent;
        self.remaining = self.effort * (100 - i32::from(percent)) / 100;
        self.refresh_priority(now);
        Ok(())
    }

    pub fn refresh_priority(&mut self, now: NaiveDateTime) {
        self.priority = priority(self.remaining, self.deadline, now);
    }
}

impl BaseEntity for Task {
    fn id(&self) -> i32 {
        self.id
    }
    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

impl Schedulable for Task {
    fn title(&self) -> &str {
        &self.title
    }
    fn deadline(&self) -> NaiveDateTime {
        self.deadline
    }
    fn priority(&self) -> f64 {
        self.priority
    }
    fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }
    fn set_placement(&mut self, placement: Option<Placement>) {
        self.placement = placement;
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({:.1}h | P {:.2})",
            self.title,
            self.description,
            self.remaining_hours(),
            self.priority
        )
    }
}

// ================
// ReservedInterval
// ================

/// Calendar time blocked off as a whole (a holiday). Its end is its deadline.
#[derive(Debug, Clone)]
pub struct ReservedInterval {
    pub title: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    placement: Option<Placement>,
}

impl ReservedInterval {
    pub fn new(
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self> {
        let title = title.into();
        if start > end {
            return Err(Error::validation(format!(
                "Reserved interval '{}' starts after it ends ({} > {}).",
                title, start, end
            )));
        }
        Ok(Self {
            title,
            start,
            end,
            placement: None,
        })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

impl Schedulable for ReservedInterval {
    fn title(&self) -> &str {
        &self.title
    }
    fn deadline(&self) -> NaiveDateTime {
        self.end
    }
    fn priority(&self) -> f64 {
        0.0
    }
    fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }
    fn set_placement(&mut self, placement: Option<Placement>) {
        self.placement = placement;
    }
}

impl fmt::Display for ReservedInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: reserved {} -> {}",
            self.title,
            self.start.format("%a %Y-%m-%d %H:%M"),
            self.end.format("%a %Y-%m-%d %H:%M")
        )
    }
}
