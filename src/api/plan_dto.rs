use serde::{Deserialize, Serialize};

use crate::api::allocation_dto::AllocationDto;
use crate::api::calendar_dto::{HolidayDto, VacationDto};
use crate::api::employee_dto::EmployeeDto;
use crate::api::project_dto::ProjectDto;
use crate::api::settings_dto::SettingsDto;
use crate::domain::calendar::{Holiday, Vacation};
use crate::domain::employee::Employee;
use crate::domain::plan::Plan;
use crate::domain::project::Project;
use crate::domain::settings::Settings;
use crate::error::Error;

/// One consistent snapshot of the planning state, as the persistence
/// layer hands it over.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlanDto {
    #[serde(default)]
    pub settings: Option<SettingsDto>,
    #[serde(default)]
    pub employees: Vec<EmployeeDto>,
    #[serde(default)]
    pub projects: Vec<ProjectDto>,
    #[serde(default)]
    pub holidays: Vec<HolidayDto>,
    #[serde(default)]
    pub vacations: Vec<VacationDto>,
    #[serde(default)]
    pub allocations: Vec<AllocationDto>,
}

/// Constructs the domain plan from a snapshot, enforcing every invariant
/// a live mutation would: reference integrity, hour bounds, range order
/// and the no-identity-overlap rule.
impl TryFrom<PlanDto> for Plan {
    type Error = Error;

    fn try_from(dto: PlanDto) -> Result<Self, Self::Error> {
        let settings = match dto.settings {
            Some(settings_dto) => Settings::try_from(settings_dto)?,
            None => Settings::default(),
        };
        let mut plan = Plan::new(settings);

        for employee_dto in dto.employees {
            plan.add_employee(Employee::from(employee_dto));
        }
        for project_dto in dto.projects {
            plan.add_project(Project::try_from(project_dto)?);
        }
        for holiday_dto in dto.holidays {
            plan.add_holiday(Holiday::try_from(holiday_dto)?);
        }
        for vacation_dto in dto.vacations {
            plan.add_vacation(Vacation::try_from(vacation_dto)?)?;
        }
        for (position, allocation_dto) in dto.allocations.into_iter().enumerate() {
            let allocation = allocation_dto.into_domain(position as u64)?;
            plan.insert_allocation(allocation)?;
        }

        Ok(plan)
    }
}
