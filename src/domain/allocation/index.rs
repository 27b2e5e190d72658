use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::domain::allocation::Allocation;
use crate::domain::calendar::range::{DateRange, is_working_day};
use crate::domain::calendar::Holiday;
use crate::domain::employee::Country;
use crate::domain::ids::{AllocationId, EmployeeId, ProjectId};

/// Read-only queries over an allocation collection.
///
/// Borrows the slice for the duration of one evaluate-then-mutate cycle;
/// nothing here mutates or blocks.
pub struct AllocationIndex<'a> {
    allocations: &'a [Allocation],
}

impl<'a> AllocationIndex<'a> {
    pub fn new(allocations: &'a [Allocation]) -> Self {
        AllocationIndex { allocations }
    }

    /// All active allocations of the employee whose range covers `date`,
    /// ordered by creation sequence ascending. The order is the stacking
    /// order of the calendar cell, so it must stay stable and deterministic.
    pub fn allocations_on_day(&self, employee_id: &EmployeeId, date: NaiveDate) -> Vec<&'a Allocation> {
        let mut hits: Vec<&Allocation> = self
            .allocations
            .iter()
            .filter(|a| a.is_active() && a.employee_id == *employee_id && a.covers(date))
            .collect();
        hits.sort_by_key(|a| a.created_seq);
        hits
    }

    /// Total committed hours for the employee inside the period.
    ///
    /// Weekend days never count. Holiday dates applying to the employee's
    /// country are excluded as well, mirroring the capacity side.
    pub fn allocated_hours_for_period(
        &self,
        employee_id: &EmployeeId,
        period: &DateRange,
        holidays: &[Holiday],
        country: Country,
    ) -> f64 {
        let holiday_dates: BTreeSet<NaiveDate> = holidays
            .iter()
            .filter(|h| h.scope.applies_to(country))
            .map(|h| h.date)
            .collect();

        self.allocations
            .iter()
            .filter(|a| a.is_active() && a.employee_id == *employee_id)
            .filter_map(|a| a.range.overlap(period).map(|overlap| (a, overlap)))
            .map(|(a, overlap)| {
                let countable_days = overlap
                    .days()
                    .filter(|d| is_working_day(*d))
                    .filter(|d| !holiday_dates.contains(d))
                    .count();
                a.hours_per_day * countable_days as f64
            })
            .sum()
    }

    /// Every *other* active allocation of the same employee+project pair
    /// whose range overlaps `range`. Containment, partial overlap and
    /// identical ranges all conflict; adjacent-but-disjoint ranges do not.
    pub fn duplicate_conflicts(
        &self,
        employee_id: &EmployeeId,
        project_id: &ProjectId,
        range: &DateRange,
        exclude: Option<&AllocationId>,
    ) -> Vec<&'a Allocation> {
        self.allocations
            .iter()
            .filter(|a| a.is_active())
            .filter(|a| a.employee_id == *employee_id && a.project_id == *project_id)
            .filter(|a| exclude != Some(&a.id))
            .filter(|a| a.range.overlaps(range))
            .collect()
    }

    pub fn has_duplicate_conflict(
        &self,
        employee_id: &EmployeeId,
        project_id: &ProjectId,
        range: &DateRange,
        exclude: Option<&AllocationId>,
    ) -> bool {
        !self.duplicate_conflicts(employee_id, project_id, range, exclude).is_empty()
    }

    /// Committed hours and their contributing allocations on one day,
    /// excluding at most one allocation (the one being moved or resized).
    pub fn hours_on_day(
        &self,
        employee_id: &EmployeeId,
        date: NaiveDate,
        exclude: Option<&AllocationId>,
    ) -> (f64, Vec<&'a Allocation>) {
        let contributors: Vec<&Allocation> = self
            .allocations_on_day(employee_id, date)
            .into_iter()
            .filter(|a| exclude != Some(&a.id))
            .collect();
        let total = contributors.iter().map(|a| a.hours_per_day).sum();
        (total, contributors)
    }
}
