
use crate::calendar::{WorkCalendar, WorkPeriod};
use crate::core::models::Task;
use crate::core::types::Domain;
use crate::logging::Logger;
use crate::scheduler::Planner;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

// 2099-01-05 is a Monday.
pub(super) fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2099, 1, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub(super) fn calendar(specs: &[&str]) -> WorkCalendar {
    let periods = specs
        .iter()
        .map(|s| WorkPeriod::try_from_str(s).unwrap())
        .collect();
    WorkCalendar::new(periods).unwrap()
}

/// Tue 9-12, Tue 13-18, Wed 9-12.
pub(super) fn tue_wed() -> WorkCalendar {
    calendar(&["TUE 9AM-12PM", "TUE 1PM-6PM", "WED 9AM-12PM"])
}

pub(super) fn test_logger() -> Logger {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let uniq = DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
    let logger = Logger::new();
    logger.set_log_dir(std::env::temp_dir().join(format!("backplan-scheduler-logs-{nanos}-{uniq}")));
    logger
}

/// Planner over [`tue_wed`] with a `work` and a `home` domain.
pub(super) fn make_planner() -> Planner {
    let mut planner = Planner::new(
        tue_wed(),
        NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        test_logger(),
    );
    planner.ensure_domain("work").unwrap();
    planner.ensure_domain("home").unwrap();
    planner
}

pub(super) fn task(title: &str, deadline: NaiveDateTime, hours: i64, now: NaiveDateTime) -> Task {
    Task::new_at(
        title,
        "",
        Domain::try_from_str("work").unwrap(),
        deadline,
        Duration::hours(hours),
        now,
    )
    .unwrap()
}
