use serde::{Deserialize, Serialize};

use crate::domain::ids::EmployeeId;

/// Country a contract is governed by. Each country carries its own
/// standard weekly-hours policy (see `Settings::weekly_hours_for`).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Country {
    /// 37.5 hours per week by default.
    Norway,
    /// 44 hours per week by default.
    Brazil,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub role: String,
    pub country: Country,

    /// Cached total of committed hours across the employee's active
    /// allocations. Derived; recomputed when the caller applies a
    /// `RecomputeEmployeeTotal` side effect.
    pub allocated_hours: f64,
}
