use crate::calendar::WorkCalendar;
use crate::config::Config;
use crate::core::models::{ReservedInterval, Schedulable, Task};
use crate::core::repository::Repository;
use crate::core::types::{DaySpec, Domain};
use crate::errors::{Error, Result};
use crate::logging::{LogTarget, Logger};
use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;

pub mod comparator;
pub mod placement;
pub mod report;
pub mod selection;
#[cfg(test)]
mod tests;

pub use placement::{ItemKind, PlacedItem, PlacementObserver};
pub use report::{DomainTotal, Report};

use comparator::by_priority;
use placement::{ChainEntry, place_chain};
use selection::capacity_until;

struct LoggerObserver {
    logger: Logger,
}

impl PlacementObserver for LoggerObserver {
    fn item_placed(&self, item: &PlacedItem) {
        let what = match &item.kind {
            ItemKind::Task { id, domain } => format!("Task {} '{}' [{}]", id, item.title, domain),
            ItemKind::Reserved => format!("Reserved interval '{}'", item.title),
        };
        self.logger.info(
            format!("{} placed {}", what, item.placement),
            LogTarget::FileOnly,
        );
    }

    fn pass_aborted(&self, error: &Error) {
        self.logger.error(
            format!("Placement aborted, earlier items left unplaced: {error}"),
            LogTarget::ConsoleAndFile,
        );
    }
}

/// Owns the tasks, grouped by domain, plus reserved intervals and the work
/// calendar they are placed against.
pub struct Planner {
    calendar: WorkCalendar,
    day_end: NaiveTime,
    domains: BTreeMap<Domain, Vec<i32>>,
    tasks: Repository<Task>,
    reserved: Vec<ReservedInterval>,
    logger: Logger,
    observer: LoggerObserver,
}

impl Planner {
    pub fn new(calendar: WorkCalendar, day_end: NaiveTime, logger: Logger) -> Self {
        Self {
            calendar,
            day_end,
            domains: BTreeMap::new(),
            tasks: Repository::new(),
            reserved: Vec::new(),
            observer: LoggerObserver {
                logger: logger.scoped("placement"),
            },
            logger,
        }
    }

    /// Builds a planner from the configured calendar, workday end and domains.
    pub fn from_config(config: &Config, logger: Logger) -> Result<Self> {
        logger.set_file_logging_enabled(config.file_logging_enabled());
        let mut planner = Self::new(config.calendar()?, config.day_end(), logger);
        for name in config.domains() {
            planner.ensure_domain(name)?;
        }
        Ok(planner)
    }

    pub fn calendar(&self) -> &WorkCalendar {
        &self.calendar
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Creates the domain if it does not exist yet.
    pub fn ensure_domain(&mut self, name: &str) -> Result<Domain> {
        let domain = Domain::try_from_str(name)?;
        self.domains.entry(domain.clone()).or_default();
        Ok(domain)
    }

    pub fn domains(&self) -> impl Iterator<Item = &Domain> {
        self.domains.keys()
    }

    fn domain(&self, name: &str) -> Result<Domain> {
        let domain = Domain::try_from_str(name)?;
        if !self.domains.contains_key(&domain) {
            return Err(Error::UnknownDomain(domain.to_string()));
        }
        Ok(domain)
    }

    pub fn add_task(
        &mut self,
        title: &str,
        description: &str,
        domain: &str,
        deadline: NaiveDateTime,
        effort: Duration,
    ) -> Result<i32> {
        let domain = self.domain(domain)?;
        let task = Task::new(title, description, domain.clone(), deadline, effort)?;
        let id = self.tasks.insert(task);
        self.domains.entry(domain).or_default().push(id);
        Ok(id)
    }

    pub fn task(&self, id: i32) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn tasks(&self) -> Vec<&Task> {
        self.tasks.values().collect()
    }

    pub fn find_task(&self, title: &str, domain: &str) -> Option<&Task> {
        let id = self.find_task_id(title, domain)?;
        self.tasks.get(id)
    }

    fn find_task_id(&self, title: &str, domain: &str) -> Option<i32> {
        let domain = Domain::try_from_str(domain).ok()?;
        self.domains
            .get(&domain)?
            .iter()
            .copied()
            .find(|id| self.tasks.get(*id).is_some_and(|t| t.title == title))
    }

    pub fn update_task(&mut self, title: &str, domain: &str, percent: i32) -> Result<bool> {
        self.update_task_at(title, domain, percent, Local::now().naive_local())
    }

    /// Sets the completion of the task named `title` in `domain`.
    ///
    /// Returns `Ok(false)` and logs a warning when no such task exists.
    pub fn update_task_at(
        &mut self,
        title: &str,
        domain: &str,
        percent: i32,
        now: NaiveDateTime,
    ) -> Result<bool> {
        let domain = self.domain(domain)?;
        let Some(task) = self
            .find_task_id(title, domain.as_str())
            .and_then(|id| self.tasks.get_mut(id))
        else {
            self.logger.warn(
                format!("Task '{}' doesn't exist in {}", title, domain),
                LogTarget::ConsoleAndFile,
            );
            return Ok(false);
        };
        task.update_completion_at(percent, now)?;
        Ok(true)
    }

    /// Blocks the calendar from the start of `from` to the end of `to`.
    pub fn add_reserved_interval(&mut self, title: &str, from: DaySpec, to: DaySpec) -> Result<()> {
        let start = self.calendar.half_day_start(from)?;
        let end = self.calendar.half_day_end(to)?;
        self.reserved.push(ReservedInterval::new(title, start, end)?);
        Ok(())
    }

    pub fn reserved_intervals(&self) -> &[ReservedInterval] {
        &self.reserved
    }

    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    /// Remaining hours summed over one domain.
    pub fn domain_hours(&self, domain: &str) -> Result<f64> {
        let domain = self.domain(domain)?;
        Ok(self.domain_total(&domain).hours)
    }

    fn domain_total(&self, domain: &Domain) -> DomainTotal {
        let hours = self
            .domains
            .get(domain)
            .into_iter()
            .flatten()
            .filter_map(|id| self.tasks.get(*id))
            .map(|t| t.remaining_hours())
            .sum();
        DomainTotal {
            domain: domain.clone(),
            hours,
        }
    }

    pub fn refresh_priorities(&mut self, now: NaiveDateTime) {
        for task in self.tasks.values_mut() {
            task.refresh_priority(now);
        }
    }

    pub fn run_placement(&mut self) -> Result<Vec<PlacedItem>> {
        self.run_placement_at(Local::now().naive_local())
    }

    /// Places every task with a real deadline and every reserved interval
    /// backward from the latest deadline.
    ///
    /// Fails on the first item whose end is not a work instant; later items
    /// keep their placement and the rest stay unplaced.
    pub fn run_placement_at(&mut self, now: NaiveDateTime) -> Result<Vec<PlacedItem>> {
        self.refresh_priorities(now);

        let calendar = &self.calendar;
        let mut entries: Vec<ChainEntry<'_>> = Vec::new();
        for task in self.tasks.values_mut() {
            task.set_placement(None);
            if !task.has_deadline() {
                continue;
            }
            let work = task.remaining();
            let kind = ItemKind::Task {
                id: task.id,
                domain: task.domain.clone(),
            };
            entries.push(ChainEntry {
                item: task,
                work,
                kind,
            });
        }
        for interval in self.reserved.iter_mut() {
            interval.set_placement(None);
            let work = calendar.work_time_between(interval.start(), interval.end());
            entries.push(ChainEntry {
                item: interval,
                work,
                kind: ItemKind::Reserved,
            });
        }

        self.observer.logger.info(
            format!("Placing {} item(s)...", entries.len()),
            LogTarget::FileOnly,
        );
        let result = place_chain(calendar, entries, &self.observer);
        if let Err(err) = &result {
            self.observer.pass_aborted(err);
        }
        result
    }

    /// Items stamped by the last placement pass, earliest start first.
    pub fn placed_chain(&self) -> Vec<PlacedItem> {
        let tasks = self.tasks.values().filter_map(|t| {
            t.placement().map(|p| PlacedItem {
                kind: ItemKind::Task {
                    id: t.id,
                    domain: t.domain.clone(),
                },
                title: t.title.clone(),
                deadline: t.deadline(),
                placement: *p,
            })
        });
        let reserved = self.reserved.iter().filter_map(|r| {
            r.placement().map(|p| PlacedItem {
                kind: ItemKind::Reserved,
                title: r.title.clone(),
                deadline: r.end(),
                placement: *p,
            })
        });
        let mut chain: Vec<_> = tasks.chain(reserved).collect();
        chain.sort_by_key(|item| (item.placement.start, item.placement.end));
        chain
    }

    /// Hours left today before the end of the workday.
    pub fn capacity_today(&self, now: NaiveDateTime) -> f64 {
        capacity_until(self.day_end, now)
    }

    /// Most urgent tasks that fill the hours left today.
    pub fn today_at(&mut self, now: NaiveDateTime) -> Vec<&Task> {
        self.report_at(now).today
    }

    pub fn report(&mut self) -> Report<'_> {
        self.report_at(Local::now().naive_local())
    }

    /// Ranked tasks over all domains with per-domain totals, emergencies and
    /// today's shortlist.
    pub fn report_at(&mut self, now: NaiveDateTime) -> Report<'_> {
        self.refresh_priorities(now);
        let this = &*self;
        let ranked = this.tasks.query().order_with(by_priority).collect();
        let totals = this.domains.keys().map(|d| this.domain_total(d)).collect();
        Report::new(ranked, totals, this.capacity_today(now))
    }

    /// Same as [`Planner::report_at`] restricted to one domain.
    pub fn domain_report_at(&mut self, domain: &str, now: NaiveDateTime) -> Result<Report<'_>> {
        let domain = self.domain(domain)?;
        self.refresh_priorities(now);
        let this = &*self;
        let key = domain.clone();
        let ranked = this
            .tasks
            .query()
            .r#where(move |t| t.domain == key)
            .order_with(by_priority)
            .collect();
        let totals = vec![this.domain_total(&domain)];
        Ok(Report::new(ranked, totals, this.capacity_today(now)))
    }
}
