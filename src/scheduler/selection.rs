use crate::core::models::Task;
use crate::extensions::chrono::DurationExt;
use chrono::{NaiveDateTime, NaiveTime};
use std::collections::VecDeque;

/// Hours left between `now` and `day_end` on the same day. Negative once the
/// workday is over.
pub fn capacity_until(day_end: NaiveTime, now: NaiveDateTime) -> f64 {
    (now.date().and_time(day_end) - now).as_hours_f64()
}

/// Takes tasks from the front of `ordered` until their remaining hours add
/// up to `capacity_hours` or the list runs out.
///
/// The result is the shortest prefix reaching the capacity; no backtracking.
pub fn select_for_today<'a>(capacity_hours: f64, ordered: Vec<&'a Task>) -> Vec<&'a Task> {
    let mut queue = VecDeque::from(ordered);
    let mut picked = Vec::new();
    let mut total = 0.0;

    while total < capacity_hours {
        let Some(task) = queue.pop_front() else {
            break;
        };
        total += task.remaining_hours();
        picked.push(task);
    }
    picked
}
