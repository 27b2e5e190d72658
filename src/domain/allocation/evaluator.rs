use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::allocation::index::AllocationIndex;
use crate::domain::allocation::{Allocation, validate_hours};
use crate::domain::calendar::range::{DateRange, is_working_day};
use crate::domain::employee::Employee;
use crate::domain::ids::{AllocationId, EmployeeId, ProjectId};
use crate::domain::settings::Settings;
use crate::error::{Result, ValidationError};

/// Tolerance for summing decimal hour values.
const HOURS_EPSILON: f64 = 1e-9;

/// A proposed create, move or resize, described independently of how the
/// UI produced it. `exclude_allocation` names the allocation being moved
/// or resized so it never conflicts with itself.
#[derive(Debug, Clone)]
pub struct AllocationProposal {
    pub employee_id: EmployeeId,
    pub project_id: ProjectId,
    pub range: DateRange,
    pub hours_per_day: f64,
    pub exclude_allocation: Option<AllocationId>,
}

/// Identity overlap: a second active allocation for the same employee and
/// project. Always rejected outright; there is no override path.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DuplicateProjectConflict {
    pub employee_id: EmployeeId,
    pub project_id: ProjectId,
    pub range: DateRange,
    /// The existing allocations the proposal collides with.
    pub conflicting: Vec<AllocationId>,
}

impl fmt::Display for DuplicateProjectConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "employee '{}' already has an active allocation for project '{}' overlapping {}..{}",
            self.employee_id,
            self.project_id,
            self.range.start(),
            self.range.end()
        )
    }
}

/// One already-committed allocation contributing hours to an overallocated
/// day, with its current rate so the caller can offer an adjustment.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AllocationShare {
    pub allocation_id: AllocationId,
    pub project_id: ProjectId,
    pub hours_per_day: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OverallocatedDay {
    pub date: NaiveDate,
    /// Hours already committed on this day before the proposal.
    pub current_allocated_hours: f64,
    pub contributors: Vec<AllocationShare>,
}

/// Soft warning: the proposal would push one or more days past the
/// employee's maximum daily hours. Carries everything the caller needs to
/// resolve the situation by adjusting rates and re-submitting.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OverallocationWarning {
    pub employee_id: EmployeeId,
    pub project_id: ProjectId,
    pub proposed_hours_per_day: f64,
    pub max_daily_hours: f64,
    pub days: Vec<OverallocatedDay>,
}

/// Outcome of classifying a proposed allocation change. First match wins:
/// duplicate conflict, then capacity, then clean.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Clean,
    Duplicate(DuplicateProjectConflict),
    Overallocated(OverallocationWarning),
}

pub fn evaluate_allocation_change(
    proposal: &AllocationProposal,
    allocations: &[Allocation],
    employees: &[Employee],
    settings: &Settings,
) -> Result<Evaluation> {
    validate_hours(proposal.hours_per_day)?;

    let employee = employees
        .iter()
        .find(|e| e.id == proposal.employee_id)
        .ok_or_else(|| ValidationError::UnknownEmployee(proposal.employee_id.clone()))?;

    let index = AllocationIndex::new(allocations);

    // 1. Identity overlap is never valid.
    let conflicting = index.duplicate_conflicts(
        &proposal.employee_id,
        &proposal.project_id,
        &proposal.range,
        proposal.exclude_allocation.as_ref(),
    );
    if !conflicting.is_empty() {
        return Ok(Evaluation::Duplicate(DuplicateProjectConflict {
            employee_id: proposal.employee_id.clone(),
            project_id: proposal.project_id.clone(),
            range: proposal.range,
            conflicting: conflicting.into_iter().map(|a| a.id.clone()).collect(),
        }));
    }

    // 2. Capacity check per working day. Weekend days carry no committed
    // workload anywhere in the engine, so they are skipped here too; a
    // weekend drop defaults to 0 hours and never triggers this.
    let max_daily_hours = settings.daily_hours_for(employee.country)?;

    let mut days = Vec::new();
    for date in proposal.range.days().filter(|d| is_working_day(*d)) {
        let (current, contributors) =
            index.hours_on_day(&proposal.employee_id, date, proposal.exclude_allocation.as_ref());
        if current + proposal.hours_per_day > max_daily_hours + HOURS_EPSILON {
            days.push(OverallocatedDay {
                date,
                current_allocated_hours: current,
                contributors: contributors
                    .into_iter()
                    .map(|a| AllocationShare {
                        allocation_id: a.id.clone(),
                        project_id: a.project_id.clone(),
                        hours_per_day: a.hours_per_day,
                    })
                    .collect(),
            });
        }
    }

    if !days.is_empty() {
        return Ok(Evaluation::Overallocated(OverallocationWarning {
            employee_id: proposal.employee_id.clone(),
            project_id: proposal.project_id.clone(),
            proposed_hours_per_day: proposal.hours_per_day,
            max_daily_hours,
            days,
        }));
    }

    // 3. Nothing objects.
    Ok(Evaluation::Clean)
}
