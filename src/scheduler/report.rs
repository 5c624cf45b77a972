use crate::core::models::Task;
use crate::core::priority::EMERGENCY_THRESHOLD;
use crate::core::types::Domain;
use crate::scheduler::selection::select_for_today;

#[derive(Debug, Clone, PartialEq)]
pub struct DomainTotal {
    pub domain: Domain,
    pub hours: f64,
}

/// Snapshot of what needs doing, most urgent first.
#[derive(Debug)]
pub struct Report<'a> {
    pub ranked: Vec<&'a Task>,
    pub domain_totals: Vec<DomainTotal>,
    /// Tasks that are overdue or can no longer be finished in time.
    pub emergencies: Vec<&'a Task>,
    pub today: Vec<&'a Task>,
    pub capacity_hours: f64,
}

impl<'a> Report<'a> {
    /// `ranked` must already be ordered most urgent first.
    pub fn new(ranked: Vec<&'a Task>, domain_totals: Vec<DomainTotal>, capacity_hours: f64) -> Self {
        let emergencies = ranked
            .iter()
            .copied()
            .filter(|t| t.priority() > EMERGENCY_THRESHOLD)
            .collect();
        let today = select_for_today(capacity_hours, ranked.clone());
        Self {
            ranked,
            domain_totals,
            emergencies,
            today,
            capacity_hours,
        }
    }

    pub fn total_hours(&self) -> f64 {
        self.domain_totals.iter().map(|d| d.hours).sum()
    }

    pub fn today_hours(&self) -> f64 {
        self.today.iter().map(|t| t.remaining_hours()).sum()
    }
}
