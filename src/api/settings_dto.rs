use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::employee_dto::{CountryDto, map_country};
use crate::domain::settings::{DEFAULT_BUFFER_PERCENT, Settings};
use crate::error::Error;

fn default_buffer() -> f64 {
    DEFAULT_BUFFER_PERCENT
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDto {
    #[serde(default = "default_buffer")]
    pub buffer_percent: f64,

    /// Country policies present here override the crate defaults; absent
    /// countries keep 37.5 (Norway) / 44 (Brazil).
    #[serde(default)]
    pub weekly_hours: HashMap<CountryDto, f64>,
}

impl TryFrom<SettingsDto> for Settings {
    type Error = Error;

    fn try_from(dto: SettingsDto) -> Result<Self, Self::Error> {
        let mut weekly_hours = Settings::default().weekly_hours;
        for (country, hours) in dto.weekly_hours {
            weekly_hours.insert(map_country(country), hours);
        }
        Settings::new(dto.buffer_percent, weekly_hours)
    }
}
