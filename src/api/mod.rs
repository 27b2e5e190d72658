//! Serde DTOs for the engine boundary.
//!
//! Dates cross the boundary as ISO `YYYY-MM-DD` strings, ids as either
//! JSON strings or numbers; both are normalized into the canonical domain
//! types before any engine code sees them.

pub mod allocation_dto;
pub mod calendar_dto;
pub mod employee_dto;
pub mod id_dto;
pub mod plan_dto;
pub mod project_dto;
pub mod settings_dto;

use chrono::NaiveDate;

use crate::error::{Result, ValidationError};

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ValidationError::MalformedDate(format!("'{}' is not a YYYY-MM-DD calendar date", value)).into()
    })
}
