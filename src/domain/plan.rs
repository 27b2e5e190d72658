use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::allocation::evaluator::{
    AllocationProposal, Evaluation, OverallocationWarning, evaluate_allocation_change,
};
use crate::domain::allocation::index::AllocationIndex;
use crate::domain::allocation::{Allocation, AllocationStatus, validate_hours};
use crate::domain::calendar::range::{DateRange, is_working_day};
use crate::domain::calendar::{Holiday, Vacation};
use crate::domain::employee::{Country, Employee};
use crate::domain::ids::{AllocationId, EmployeeId, ProjectId};
use crate::domain::project::Project;
use crate::domain::settings::Settings;
use crate::error::{Error, Result, ValidationError};

/// Instruction for the caller's persistence layer. The engine recomputes
/// nothing on its own and never persists; it only says what became stale.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    RecomputeEmployeeTotal(EmployeeId),
    RecomputeProjectTotal(ProjectId),
}

/// Caller-supplied new rate for one contributing allocation, used when
/// confirming an overallocation warning.
#[derive(Debug, Clone)]
pub struct HourAdjustment {
    pub allocation_id: AllocationId,
    pub hours_per_day: f64,
}

/// A committed mutation: the resulting allocation (None for deletions) and
/// the recompute instructions it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedChange {
    pub allocation: Option<Allocation>,
    pub side_effects: Vec<SideEffect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Start,
    End,
}

/// The change a mutation would make, held back while an overallocation
/// warning waits for the caller. Moves and resizes both reduce to a range
/// replacement on an existing allocation.
#[derive(Debug, Clone)]
enum StagedChange {
    Create {
        employee_id: EmployeeId,
        project_id: ProjectId,
        range: DateRange,
        hours_per_day: f64,
    },
    Reshape {
        id: AllocationId,
        range: DateRange,
    },
}

/// An overallocating mutation suspended until the caller confirms or
/// cancels. Cancelling is simply dropping this value; there is no timeout.
#[derive(Debug, Clone)]
pub struct PendingChange {
    pub token: Uuid,
    pub warning: OverallocationWarning,
    staged: StagedChange,
}

#[derive(Debug, Clone)]
pub enum MutationOutcome {
    Applied(AppliedChange),
    /// Soft overallocation warning; resolve via `Plan::confirm_pending`.
    NeedsConfirmation(PendingChange),
}

/// In-memory snapshot of the planning state for one evaluate-then-mutate
/// cycle: entities, settings and the allocation collection, plus the
/// monotonic creation counter. Concurrent snapshots are merged by the
/// persistence layer, not here.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    settings: Settings,
    employees: Vec<Employee>,
    projects: Vec<Project>,
    holidays: Vec<Holiday>,
    vacations: Vec<Vacation>,
    allocations: Vec<Allocation>,
    next_seq: u64,
}

impl Plan {
    pub fn new(settings: Settings) -> Self {
        Plan { settings, ..Plan::default() }
    }

    //-----------------------
    // --- Entity loading ---
    //-----------------------

    pub fn add_employee(&mut self, employee: Employee) {
        self.employees.push(employee);
    }

    pub fn add_project(&mut self, project: Project) {
        self.projects.push(project);
    }

    pub fn add_holiday(&mut self, holiday: Holiday) {
        self.holidays.push(holiday);
    }

    pub fn add_vacation(&mut self, vacation: Vacation) -> Result<()> {
        if self.employee(&vacation.employee_id).is_none() {
            return Err(ValidationError::UnknownVacationOwner(vacation.employee_id.clone()).into());
        }
        self.vacations.push(vacation);
        Ok(())
    }

    /// Inserts an allocation loaded from a snapshot, enforcing the same
    /// invariants a fresh create would: known references, hours in range
    /// and no active identity overlap.
    pub fn insert_allocation(&mut self, allocation: Allocation) -> Result<()> {
        validate_hours(allocation.hours_per_day)?;
        if self.employee(&allocation.employee_id).is_none() {
            return Err(ValidationError::UnknownEmployee(allocation.employee_id.clone()).into());
        }
        if self.project(&allocation.project_id).is_none() {
            return Err(ValidationError::UnknownProject(allocation.project_id.clone()).into());
        }
        if allocation.is_active() {
            let index = AllocationIndex::new(&self.allocations);
            let conflicting = index.duplicate_conflicts(
                &allocation.employee_id,
                &allocation.project_id,
                &allocation.range,
                Some(&allocation.id),
            );
            if !conflicting.is_empty() {
                return Err(Error::DuplicateConflict(
                    crate::domain::allocation::evaluator::DuplicateProjectConflict {
                        employee_id: allocation.employee_id.clone(),
                        project_id: allocation.project_id.clone(),
                        range: allocation.range,
                        conflicting: conflicting.into_iter().map(|a| a.id.clone()).collect(),
                    },
                ));
            }
        }
        self.next_seq = self.next_seq.max(allocation.created_seq.saturating_add(1));
        self.allocations.push(allocation);
        Ok(())
    }

    //-----------------
    // --- Accessors ---
    //-----------------

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Effective immediately for every subsequent computation.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    pub fn vacations(&self) -> &[Vacation] {
        &self.vacations
    }

    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    pub fn employee(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == *id)
    }

    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == *id)
    }

    pub fn allocation(&self, id: &AllocationId) -> Option<&Allocation> {
        self.allocations.iter().find(|a| a.id == *id)
    }

    //------------------
    // --- Mutations ---
    //------------------

    /// Drops one project onto one calendar cell: a single-day allocation at
    /// the country's standard daily rate, or 0 hours on a weekend cell so
    /// weekend drops never trip the capacity check.
    pub fn create_allocation(
        &mut self,
        employee_id: EmployeeId,
        project_id: ProjectId,
        date: NaiveDate,
    ) -> Result<MutationOutcome> {
        let employee = self
            .employee(&employee_id)
            .ok_or_else(|| ValidationError::UnknownEmployee(employee_id.clone()))?;
        if self.project(&project_id).is_none() {
            return Err(ValidationError::UnknownProject(project_id.clone()).into());
        }

        let hours_per_day =
            if is_working_day(date) { self.settings.daily_hours_for(employee.country)? } else { 0.0 };

        self.evaluate_and_stage(StagedChange::Create {
            employee_id,
            project_id,
            range: DateRange::single(date),
            hours_per_day,
        })
    }

    /// Shifts both edges by the same delta so the duration is preserved
    /// exactly. Cross-employee reassignment is not a move; that is a
    /// delete plus a create.
    pub fn move_allocation(&mut self, id: AllocationId, new_start: NaiveDate) -> Result<MutationOutcome> {
        let allocation = self
            .allocation(&id)
            .ok_or_else(|| ValidationError::UnknownAllocation(id.clone()))?;
        let delta = (new_start - allocation.range.start()).num_days();
        let range = allocation.range.shift(delta)?;
        self.evaluate_and_stage(StagedChange::Reshape { id, range })
    }

    /// Adjusts only the dragged edge. A drag past the opposite edge clamps
    /// to a single-day range; the range never inverts.
    pub fn resize_allocation(
        &mut self,
        id: AllocationId,
        edge: ResizeEdge,
        new_date: NaiveDate,
    ) -> Result<MutationOutcome> {
        let allocation = self
            .allocation(&id)
            .ok_or_else(|| ValidationError::UnknownAllocation(id.clone()))?;
        let range = match edge {
            ResizeEdge::Start => allocation.range.with_start_clamped(new_date),
            ResizeEdge::End => allocation.range.with_end_clamped(new_date),
        };
        self.evaluate_and_stage(StagedChange::Reshape { id, range })
    }

    pub fn delete_allocation(&mut self, id: &AllocationId) -> Result<AppliedChange> {
        let pos = self
            .allocations
            .iter()
            .position(|a| a.id == *id)
            .ok_or_else(|| ValidationError::UnknownAllocation(id.clone()))?;
        let removed = self.allocations.remove(pos);
        Ok(AppliedChange {
            allocation: None,
            side_effects: vec![
                SideEffect::RecomputeEmployeeTotal(removed.employee_id),
                SideEffect::RecomputeProjectTotal(removed.project_id),
            ],
        })
    }

    /// Commits a mutation that was suspended on an overallocation warning.
    ///
    /// `adjustments` rewrite the rates of the contributing allocations the
    /// warning listed; `hours_per_day` overrides the staged change's own
    /// rate (e.g. 4h+4h instead of 8h+8h). The duplicate invariant and the
    /// staged change's references are re-checked because the plan may have
    /// mutated since staging; a cascade must not be undone by a late
    /// confirmation.
    pub fn confirm_pending(
        &mut self,
        pending: PendingChange,
        hours_per_day: Option<f64>,
        adjustments: &[HourAdjustment],
    ) -> Result<AppliedChange> {
        for adjustment in adjustments {
            validate_hours(adjustment.hours_per_day)?;
        }
        if let Some(hours) = hours_per_day {
            validate_hours(hours)?;
        }

        // A cascade may have removed the staged change's employee or
        // project while the warning was pending. Reject before touching
        // anything so a failed confirm has no partial effect.
        if let StagedChange::Create { employee_id, project_id, .. } = &pending.staged {
            if self.employee(employee_id).is_none() {
                return Err(ValidationError::UnknownEmployee(employee_id.clone()).into());
            }
            if self.project(project_id).is_none() {
                return Err(ValidationError::UnknownProject(project_id.clone()).into());
            }
        }

        let mut extra_effects = Vec::new();
        for adjustment in adjustments {
            let allocation = self
                .allocations
                .iter_mut()
                .find(|a| a.id == adjustment.allocation_id)
                .ok_or_else(|| ValidationError::UnknownAllocation(adjustment.allocation_id.clone()))?;
            allocation.hours_per_day = adjustment.hours_per_day;
            extra_effects.push(SideEffect::RecomputeProjectTotal(allocation.project_id.clone()));
        }

        let staged = match pending.staged {
            StagedChange::Create { employee_id, project_id, range, hours_per_day: staged_hours } => {
                StagedChange::Create {
                    employee_id,
                    project_id,
                    range,
                    hours_per_day: hours_per_day.unwrap_or(staged_hours),
                }
            }
            reshape @ StagedChange::Reshape { .. } => reshape,
        };

        self.reject_if_duplicate(&staged)?;
        let mut applied = self.apply_staged(staged, hours_per_day)?;
        let mut all_effects = std::mem::take(&mut applied.side_effects);
        all_effects.extend(extra_effects);
        applied.side_effects = dedupe(all_effects);
        Ok(applied)
    }

    //------------------
    // --- Cascades ---
    //------------------

    /// Removes the employee together with their allocations and vacations.
    /// Returns the project-total recompute instructions for the caller.
    pub fn remove_employee(&mut self, id: &EmployeeId) -> Result<Vec<SideEffect>> {
        let pos = self
            .employees
            .iter()
            .position(|e| e.id == *id)
            .ok_or_else(|| ValidationError::UnknownEmployee(id.clone()))?;
        self.employees.remove(pos);
        self.vacations.retain(|v| v.employee_id != *id);

        let mut effects = Vec::new();
        self.allocations.retain(|a| {
            if a.employee_id == *id {
                effects.push(SideEffect::RecomputeProjectTotal(a.project_id.clone()));
                false
            } else {
                true
            }
        });
        Ok(dedupe(effects))
    }

    /// Removes the project together with its allocations.
    pub fn remove_project(&mut self, id: &ProjectId) -> Result<Vec<SideEffect>> {
        let pos = self
            .projects
            .iter()
            .position(|p| p.id == *id)
            .ok_or_else(|| ValidationError::UnknownProject(id.clone()))?;
        self.projects.remove(pos);

        let mut effects = Vec::new();
        self.allocations.retain(|a| {
            if a.project_id == *id {
                effects.push(SideEffect::RecomputeEmployeeTotal(a.employee_id.clone()));
                false
            } else {
                true
            }
        });
        Ok(dedupe(effects))
    }

    //--------------------------
    // --- Cached-total math ---
    //--------------------------

    /// Total committed hours of the employee's active allocations over
    /// their full ranges, weekends and country holidays excluded. This is
    /// the value a `RecomputeEmployeeTotal` side effect asks for.
    pub fn employee_allocated_hours(&self, id: &EmployeeId) -> Result<f64> {
        let employee = self.employee(id).ok_or_else(|| ValidationError::UnknownEmployee(id.clone()))?;
        let holiday_dates = self.holiday_dates_for(employee.country);

        Ok(self
            .allocations
            .iter()
            .filter(|a| a.is_active() && a.employee_id == *id)
            .map(|a| a.hours_per_day * countable_days(&a.range, &holiday_dates) as f64)
            .sum())
    }

    /// The `RecomputeProjectTotal` counterpart, summed across employees.
    pub fn project_allocated_hours(&self, id: &ProjectId) -> Result<f64> {
        if self.project(id).is_none() {
            return Err(ValidationError::UnknownProject(id.clone()).into());
        }
        let mut total = 0.0;
        for allocation in self.allocations.iter().filter(|a| a.is_active() && a.project_id == *id) {
            let employee = self
                .employee(&allocation.employee_id)
                .ok_or_else(|| ValidationError::UnknownEmployee(allocation.employee_id.clone()))?;
            let holiday_dates = self.holiday_dates_for(employee.country);
            total += allocation.hours_per_day * countable_days(&allocation.range, &holiday_dates) as f64;
        }
        Ok(total)
    }

    /// Applies recompute instructions to the cached totals held in this
    /// snapshot. Persisting the refreshed values stays the caller's job.
    pub fn apply_side_effects(&mut self, effects: &[SideEffect]) -> Result<()> {
        for effect in effects {
            match effect {
                SideEffect::RecomputeEmployeeTotal(id) => {
                    let total = self.employee_allocated_hours(id)?;
                    if let Some(employee) = self.employees.iter_mut().find(|e| e.id == *id) {
                        employee.allocated_hours = total;
                    }
                }
                SideEffect::RecomputeProjectTotal(id) => {
                    let total = self.project_allocated_hours(id)?;
                    if let Some(project) = self.projects.iter_mut().find(|p| p.id == *id) {
                        project.allocated_hours = total;
                    }
                }
            }
        }
        Ok(())
    }

    //-----------------
    // --- Internals ---
    //-----------------

    fn evaluate_and_stage(&mut self, staged: StagedChange) -> Result<MutationOutcome> {
        let proposal = self.proposal_for(&staged)?;
        match evaluate_allocation_change(&proposal, &self.allocations, &self.employees, &self.settings)? {
            Evaluation::Clean => Ok(MutationOutcome::Applied(self.apply_staged(staged, None)?)),
            Evaluation::Duplicate(conflict) => Err(Error::DuplicateConflict(conflict)),
            Evaluation::Overallocated(warning) => Ok(MutationOutcome::NeedsConfirmation(PendingChange {
                token: Uuid::new_v4(),
                warning,
                staged,
            })),
        }
    }

    fn proposal_for(&self, staged: &StagedChange) -> Result<AllocationProposal> {
        match staged {
            StagedChange::Create { employee_id, project_id, range, hours_per_day } => Ok(AllocationProposal {
                employee_id: employee_id.clone(),
                project_id: project_id.clone(),
                range: *range,
                hours_per_day: *hours_per_day,
                exclude_allocation: None,
            }),
            StagedChange::Reshape { id, range } => {
                let allocation = self
                    .allocation(id)
                    .ok_or_else(|| ValidationError::UnknownAllocation(id.clone()))?;
                Ok(AllocationProposal {
                    employee_id: allocation.employee_id.clone(),
                    project_id: allocation.project_id.clone(),
                    range: *range,
                    hours_per_day: allocation.hours_per_day,
                    exclude_allocation: Some(id.clone()),
                })
            }
        }
    }

    fn reject_if_duplicate(&self, staged: &StagedChange) -> Result<()> {
        let proposal = self.proposal_for(staged)?;
        let index = AllocationIndex::new(&self.allocations);
        let conflicting = index.duplicate_conflicts(
            &proposal.employee_id,
            &proposal.project_id,
            &proposal.range,
            proposal.exclude_allocation.as_ref(),
        );
        if conflicting.is_empty() {
            Ok(())
        } else {
            Err(Error::DuplicateConflict(
                crate::domain::allocation::evaluator::DuplicateProjectConflict {
                    employee_id: proposal.employee_id,
                    project_id: proposal.project_id,
                    range: proposal.range,
                    conflicting: conflicting.into_iter().map(|a| a.id.clone()).collect(),
                },
            ))
        }
    }

    fn apply_staged(&mut self, staged: StagedChange, hours_override: Option<f64>) -> Result<AppliedChange> {
        match staged {
            StagedChange::Create { employee_id, project_id, range, hours_per_day } => {
                let allocation = Allocation {
                    id: AllocationId::new(Uuid::new_v4().to_string()),
                    employee_id: employee_id.clone(),
                    project_id: project_id.clone(),
                    range,
                    hours_per_day,
                    status: AllocationStatus::Active,
                    created_seq: self.next_seq,
                };
                self.next_seq = self.next_seq.saturating_add(1);
                self.allocations.push(allocation.clone());
                Ok(AppliedChange {
                    allocation: Some(allocation),
                    side_effects: vec![
                        SideEffect::RecomputeEmployeeTotal(employee_id),
                        SideEffect::RecomputeProjectTotal(project_id),
                    ],
                })
            }
            StagedChange::Reshape { id, range } => {
                let allocation = self
                    .allocations
                    .iter_mut()
                    .find(|a| a.id == id)
                    .ok_or_else(|| ValidationError::UnknownAllocation(id.clone()))?;
                allocation.range = range;
                if let Some(hours) = hours_override {
                    allocation.hours_per_day = hours;
                }
                let allocation = allocation.clone();
                let employee_id = allocation.employee_id.clone();
                Ok(AppliedChange {
                    allocation: Some(allocation),
                    side_effects: vec![SideEffect::RecomputeEmployeeTotal(employee_id)],
                })
            }
        }
    }

    fn holiday_dates_for(&self, country: Country) -> BTreeSet<NaiveDate> {
        self.holidays
            .iter()
            .filter(|h| h.scope.applies_to(country))
            .map(|h| h.date)
            .collect()
    }
}

fn countable_days(range: &DateRange, holiday_dates: &BTreeSet<NaiveDate>) -> usize {
    range
        .days()
        .filter(|d| is_working_day(*d))
        .filter(|d| !holiday_dates.contains(d))
        .count()
}

fn dedupe(effects: impl IntoIterator<Item = SideEffect>) -> Vec<SideEffect> {
    let mut out: Vec<SideEffect> = Vec::new();
    for effect in effects {
        if !out.contains(&effect) {
            out.push(effect);
        }
    }
    out
}
