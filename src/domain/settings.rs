use std::collections::HashMap;

use serde::Serialize;

use crate::domain::employee::Country;
use crate::error::{Error, Result, ValidationError};

pub const DEFAULT_BUFFER_PERCENT: f64 = 10.0;
pub const DEFAULT_WEEKLY_HOURS_NORWAY: f64 = 37.5;
pub const DEFAULT_WEEKLY_HOURS_BRAZIL: f64 = 44.0;

/// Process-wide planning settings, passed explicitly into every capacity
/// computation. The engine never reads them from ambient state, so a
/// settings change is visible to the next computation with no staleness.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Percentage of capacity reserved for unplanned work, 0..=100.
    pub buffer_percent: f64,
    /// Standard weekly hours per country policy.
    pub weekly_hours: HashMap<Country, f64>,
}

impl Default for Settings {
    fn default() -> Self {
        let mut weekly_hours = HashMap::new();
        weekly_hours.insert(Country::Norway, DEFAULT_WEEKLY_HOURS_NORWAY);
        weekly_hours.insert(Country::Brazil, DEFAULT_WEEKLY_HOURS_BRAZIL);
        Settings { buffer_percent: DEFAULT_BUFFER_PERCENT, weekly_hours }
    }
}

impl Settings {
    pub fn new(buffer_percent: f64, weekly_hours: HashMap<Country, f64>) -> Result<Self> {
        if !(0.0..=100.0).contains(&buffer_percent) {
            return Err(ValidationError::BufferOutOfRange(buffer_percent).into());
        }
        Ok(Settings { buffer_percent, weekly_hours })
    }

    /// The standard weekly hours for a country. A missing or non-positive
    /// policy is a configuration fault the caller must fix in Settings.
    pub fn weekly_hours_for(&self, country: Country) -> Result<f64> {
        match self.weekly_hours.get(&country) {
            Some(hours) if *hours > 0.0 => Ok(*hours),
            Some(hours) => Err(Error::Configuration(format!(
                "weekly hours for {:?} must be positive, got {}",
                country, hours
            ))),
            None => Err(Error::Configuration(format!("no weekly hours configured for {:?}", country))),
        }
    }

    /// Standard daily rate, weekly hours spread over a five-day week.
    pub fn daily_hours_for(&self, country: Country) -> Result<f64> {
        Ok(self.weekly_hours_for(country)? / 5.0)
    }
}
