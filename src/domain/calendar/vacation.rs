use serde::{Deserialize, Serialize};

use crate::domain::calendar::range::DateRange;
use crate::domain::ids::{EmployeeId, VacationId};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VacationKind {
    Vacation,
    Sick,
    Personal,
    Other,
}

/// A date-ranged absence owned by one employee. Only the working days
/// inside the range count against capacity.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Vacation {
    pub id: VacationId,
    pub employee_id: EmployeeId,
    pub range: DateRange,
    pub kind: VacationKind,
}
