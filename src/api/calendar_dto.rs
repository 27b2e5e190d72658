use serde::{Deserialize, Serialize};

use crate::api::id_dto::IdDto;
use crate::api::parse_date;
use crate::domain::calendar::range::DateRange;
use crate::domain::calendar::{Holiday, HolidayScope, Vacation, VacationKind};
use crate::error::Error;

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub enum HolidayScopeDto {
    Norway,
    Brazil,
    Global,
}

fn map_scope(dto: HolidayScopeDto) -> HolidayScope {
    match dto {
        HolidayScopeDto::Norway => HolidayScope::Norway,
        HolidayScopeDto::Brazil => HolidayScope::Brazil,
        HolidayScopeDto::Global => HolidayScope::Global,
    }
}

fn default_scope() -> HolidayScopeDto {
    HolidayScopeDto::Global
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HolidayDto {
    pub id: IdDto,
    pub name: String,
    pub date: String,
    #[serde(default = "default_scope")]
    pub scope: HolidayScopeDto,
}

impl TryFrom<HolidayDto> for Holiday {
    type Error = Error;

    fn try_from(dto: HolidayDto) -> Result<Self, Self::Error> {
        Ok(Holiday {
            id: dto.id.normalize(),
            name: dto.name,
            date: parse_date(&dto.date)?,
            scope: map_scope(dto.scope),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub enum VacationKindDto {
    Vacation,
    Sick,
    Personal,
    Other,
}

fn map_kind(dto: VacationKindDto) -> VacationKind {
    match dto {
        VacationKindDto::Vacation => VacationKind::Vacation,
        VacationKindDto::Sick => VacationKind::Sick,
        VacationKindDto::Personal => VacationKind::Personal,
        VacationKindDto::Other => VacationKind::Other,
    }
}

fn default_kind() -> VacationKindDto {
    VacationKindDto::Vacation
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VacationDto {
    pub id: IdDto,
    pub employee_id: IdDto,
    pub start_date: String,
    pub end_date: String,
    #[serde(default = "default_kind")]
    pub kind: VacationKindDto,
}

impl TryFrom<VacationDto> for Vacation {
    type Error = Error;

    fn try_from(dto: VacationDto) -> Result<Self, Self::Error> {
        Ok(Vacation {
            id: dto.id.normalize(),
            employee_id: dto.employee_id.normalize(),
            range: DateRange::new(parse_date(&dto.start_date)?, parse_date(&dto.end_date)?)?,
            kind: map_kind(dto.kind),
        })
    }
}
