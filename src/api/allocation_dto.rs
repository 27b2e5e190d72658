use serde::{Deserialize, Serialize};

use crate::api::id_dto::IdDto;
use crate::api::parse_date;
use crate::domain::allocation::{Allocation, AllocationStatus};
use crate::domain::calendar::range::DateRange;
use crate::error::Result;

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub enum AllocationStatusDto {
    Active,
    Completed,
    Cancelled,
}

fn map_status(dto: AllocationStatusDto) -> AllocationStatus {
    match dto {
        AllocationStatusDto::Active => AllocationStatus::Active,
        AllocationStatusDto::Completed => AllocationStatus::Completed,
        AllocationStatusDto::Cancelled => AllocationStatus::Cancelled,
    }
}

fn default_status() -> AllocationStatusDto {
    AllocationStatusDto::Active
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AllocationDto {
    pub id: IdDto,
    pub employee_id: IdDto,
    pub project_id: IdDto,
    pub start_date: String,
    pub end_date: String,
    pub hours_per_day: f64,
    #[serde(default = "default_status")]
    pub status: AllocationStatusDto,

    /// Snapshots written before the explicit sequence field existed carry
    /// no value here; those fall back to file order on load.
    #[serde(default)]
    pub created_seq: Option<u64>,
}

impl AllocationDto {
    pub fn into_domain(self, fallback_seq: u64) -> Result<Allocation> {
        Ok(Allocation {
            id: self.id.normalize(),
            employee_id: self.employee_id.normalize(),
            project_id: self.project_id.normalize(),
            range: DateRange::new(parse_date(&self.start_date)?, parse_date(&self.end_date)?)?,
            hours_per_day: self.hours_per_day,
            status: map_status(self.status),
            created_seq: self.created_seq.unwrap_or(fallback_seq),
        })
    }
}
