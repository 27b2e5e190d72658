use serde::{Deserialize, Serialize};

use crate::api::id_dto::IdDto;
use crate::domain::employee::{Country, Employee};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum CountryDto {
    Norway,
    Brazil,
}

// Helper to map DTO country to the internal policy enum
pub(crate) fn map_country(dto: CountryDto) -> Country {
    match dto {
        CountryDto::Norway => Country::Norway,
        CountryDto::Brazil => Country::Brazil,
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: IdDto,
    pub name: String,
    #[serde(default)]
    pub role: String,
    pub country: CountryDto,
    #[serde(default)]
    pub allocated_hours: f64,
}

impl From<EmployeeDto> for Employee {
    fn from(dto: EmployeeDto) -> Self {
        Employee {
            id: dto.id.normalize(),
            name: dto.name,
            role: dto.role,
            country: map_country(dto.country),
            allocated_hours: dto.allocated_hours,
        }
    }
}
