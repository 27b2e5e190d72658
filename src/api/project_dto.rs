use serde::{Deserialize, Serialize};

use crate::api::id_dto::IdDto;
use crate::api::parse_date;
use crate::domain::calendar::range::DateRange;
use crate::domain::project::{Project, ProjectStatus};
use crate::error::{Error, ValidationError};

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub enum ProjectStatusDto {
    Active,
    OnHold,
    Finished,
    Cancelled,
}

fn map_status(dto: ProjectStatusDto) -> ProjectStatus {
    match dto {
        ProjectStatusDto::Active => ProjectStatus::Active,
        ProjectStatusDto::OnHold => ProjectStatus::OnHold,
        ProjectStatusDto::Finished => ProjectStatus::Finished,
        ProjectStatusDto::Cancelled => ProjectStatus::Cancelled,
    }
}

fn default_status() -> ProjectStatusDto {
    ProjectStatusDto::Active
}

fn default_color() -> String {
    "#888888".to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub id: IdDto,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,

    #[serde(default = "default_status")]
    pub status: ProjectStatusDto,
    #[serde(default)]
    pub allocated_hours: f64,
}

impl TryFrom<ProjectDto> for Project {
    type Error = Error;

    fn try_from(dto: ProjectDto) -> Result<Self, Self::Error> {
        let bounds = match (&dto.start_date, &dto.end_date) {
            (Some(start), Some(end)) => Some(DateRange::new(parse_date(start)?, parse_date(end)?)?),
            (None, None) => None,
            _ => {
                return Err(ValidationError::MalformedDate(format!(
                    "project '{}' needs either both startDate and endDate or neither",
                    dto.name
                ))
                .into());
            }
        };

        Ok(Project {
            id: dto.id.normalize(),
            name: dto.name,
            color: dto.color,
            bounds,
            status: map_status(dto.status),
            allocated_hours: dto.allocated_hours,
        })
    }
}
