//! The two orderings the planner needs. Both are plain functions so callers
//! pick one explicitly wherever they sort.

use crate::core::models::Schedulable;
use std::cmp::Ordering;

/// Most urgent first: priority descending, then title descending.
pub fn by_priority<T: Schedulable + ?Sized>(a: &T, b: &T) -> Ordering {
    b.priority()
        .total_cmp(&a.priority())
        .then_with(|| b.title().cmp(a.title()))
}

/// Earliest deadline first; equal deadlines put the more urgent item first,
/// then order by title.
pub fn by_deadline<T: Schedulable + ?Sized>(a: &T, b: &T) -> Ordering {
    a.deadline()
        .cmp(&b.deadline())
        .then_with(|| by_priority(a, b))
}
