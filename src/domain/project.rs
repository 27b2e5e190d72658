use serde::{Deserialize, Serialize};

use crate::domain::calendar::range::DateRange;
use crate::domain::ids::ProjectId;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Active,
    OnHold,
    Finished,
    Cancelled,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,

    /// Display color for the calendar grid, passed through untouched.
    pub color: String,

    /// Optional planned date bounds. Purely informational for the engine;
    /// allocations are not clipped against them.
    pub bounds: Option<DateRange>,

    pub status: ProjectStatus,

    /// Cached total of committed hours, recomputed via
    /// `RecomputeProjectTotal` side effects.
    pub allocated_hours: f64,
}
