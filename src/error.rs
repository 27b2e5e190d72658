use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::allocation::evaluator::DuplicateProjectConflict;
use crate::domain::ids::{AllocationId, EmployeeId, ProjectId};

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse plan snapshot JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Hard rejection. Two active allocations for the same employee and
    /// project may never overlap; there is no override path.
    #[error("Duplicate project conflict: {0}")]
    DuplicateConflict(DuplicateProjectConflict),

    #[error("Capacity computation failed: {0}")]
    CapacityComputation(String),
}

/// Structural problems rejected before any evaluation takes place.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("range end {end} lies before start {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error("hours per day {0} outside the allowed range 0..=24")]
    HoursOutOfRange(f64),

    #[error("buffer percentage {0} outside the allowed range 0..=100")]
    BufferOutOfRange(f64),

    #[error("unknown employee '{0}'")]
    UnknownEmployee(EmployeeId),

    #[error("unknown project '{0}'")]
    UnknownProject(ProjectId),

    #[error("unknown allocation '{0}'")]
    UnknownAllocation(AllocationId),

    #[error("vacation owner '{0}' does not exist")]
    UnknownVacationOwner(EmployeeId),

    #[error("malformed calendar date: {0}")]
    MalformedDate(String),
}

pub type Result<T> = std::result::Result<T, Error>;
