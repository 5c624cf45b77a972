use crate::calendar::WorkCalendar;
use crate::core::models::{Placement, Schedulable};
use crate::core::types::{Domain, FAR_FUTURE};
use crate::errors::{Error, Result};
use crate::scheduler::comparator::by_deadline;
use chrono::{Duration, NaiveDateTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Task { id: i32, domain: Domain },
    Reserved,
}

/// One stamped link of the deadline chain.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem {
    pub kind: ItemKind,
    pub title: String,
    pub deadline: NaiveDateTime,
    pub placement: Placement,
}

/// Observer to capture placements (e.g., for logging).
pub trait PlacementObserver {
    fn item_placed(&self, item: &PlacedItem);
    fn pass_aborted(&self, error: &Error);
}

/// An item waiting to be placed, with the work time it has to occupy.
pub(crate) struct ChainEntry<'a> {
    pub item: &'a mut dyn Schedulable,
    pub work: Duration,
    pub kind: ItemKind,
}

/// Places `entries` backward from the latest deadline, each one ending no
/// later than its own deadline nor after the start of the item following it.
///
/// Stops at the first item whose end is not a work instant. Items placed
/// before the failure keep their stamps.
pub(crate) fn place_chain(
    calendar: &WorkCalendar,
    mut entries: Vec<ChainEntry<'_>>,
    observer: &dyn PlacementObserver,
) -> Result<Vec<PlacedItem>> {
    entries.sort_by(|a, b| by_deadline(&*a.item, &*b.item));

    let mut placed = Vec::with_capacity(entries.len());
    let mut cursor_end = FAR_FUTURE;

    for ChainEntry { item, work, kind } in entries.into_iter().rev() {
        let deadline = item.deadline();
        let end = deadline.min(cursor_end);
        let gap_before_next = deadline < cursor_end;

        let start = calendar.compute_start(end, work).map_err(|err| match err {
            Error::NonWorkInstant { instant, .. } => Error::non_work_instant(item.title(), instant),
            other => other,
        })?;

        let placement = Placement {
            start,
            end,
            gap_before_next,
        };
        item.set_placement(Some(placement));

        let placed_item = PlacedItem {
            kind,
            title: item.title().to_string(),
            deadline,
            placement,
        };
        observer.item_placed(&placed_item);
        placed.push(placed_item);
        cursor_end = start;
    }

    placed.reverse();
    Ok(placed)
}
