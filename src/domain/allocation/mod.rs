pub mod evaluator;
pub mod index;

use serde::{Deserialize, Serialize};

use crate::domain::calendar::range::DateRange;
use crate::domain::ids::{AllocationId, EmployeeId, ProjectId};
use crate::error::{Result, ValidationError};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationStatus {
    Active,
    Completed,
    Cancelled,
}

/// A date-ranged, hours-per-day assignment of one employee to one project.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Allocation {
    pub id: AllocationId,
    pub employee_id: EmployeeId,
    pub project_id: ProjectId,

    /// Inclusive on both ends; `start <= end` by construction.
    pub range: DateRange,

    /// Decimal hours committed per working day, 0..=24.
    pub hours_per_day: f64,

    pub status: AllocationStatus,

    /// Monotonic creation sequence assigned by the plan store. Used as the
    /// tie-break when several allocations stack on the same calendar cell;
    /// first created displays first.
    pub created_seq: u64,
}

impl Allocation {
    pub fn is_active(&self) -> bool {
        self.status == AllocationStatus::Active
    }

    pub fn covers(&self, date: chrono::NaiveDate) -> bool {
        self.range.contains(date)
    }
}

/// Hours-per-day must be a finite value inside 0..=24.
pub fn validate_hours(hours_per_day: f64) -> Result<()> {
    if !hours_per_day.is_finite() || !(0.0..=24.0).contains(&hours_per_day) {
        return Err(ValidationError::HoursOutOfRange(hours_per_day).into());
    }
    Ok(())
}
