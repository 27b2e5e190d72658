use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::calendar::range::{DateRange, is_working_day};
use crate::domain::calendar::{Holiday, Vacation};
use crate::domain::employee::Employee;
use crate::domain::settings::Settings;
use crate::error::Result;

/// Auditable breakdown of an employee's capacity for one period.
///
/// `total_calendar_hours` counts every calendar day (weekends included) at
/// the daily rate; weekend hours are then subtracted as their own term so
/// each deduction stays visible. `available_hours` can legitimately be zero
/// or negative for a heavily-vacationed employee and is never clamped.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct CapacityBreakdown {
    pub daily_hours: f64,
    pub total_calendar_hours: f64,
    pub buffer_hours: f64,
    pub holiday_hours: f64,
    pub vacation_hours: f64,
    pub weekend_hours: f64,
    pub available_hours: f64,
}

/// Computes the capacity breakdown for one employee over an arbitrary
/// period. Pure and deterministic; the only failure mode is a missing or
/// zero weekly-hours policy for the employee's country.
pub fn compute_capacity(
    employee: &Employee,
    period: &DateRange,
    settings: &Settings,
    holidays: &[Holiday],
    vacations: &[Vacation],
) -> Result<CapacityBreakdown> {
    let daily_hours = settings.daily_hours_for(employee.country)?;

    let total_calendar_hours = period.num_days() as f64 * daily_hours;
    let buffer_hours = total_calendar_hours * settings.buffer_percent / 100.0;

    // Holiday dates are deduplicated so two entries on the same date
    // cannot deduct twice.
    let holiday_dates: BTreeSet<_> = holidays
        .iter()
        .filter(|h| h.scope.applies_to(employee.country))
        .filter(|h| period.contains(h.date))
        .filter(|h| is_working_day(h.date))
        .map(|h| h.date)
        .collect();
    let holiday_hours = holiday_dates.len() as f64 * daily_hours;

    let vacation_days: i64 = vacations
        .iter()
        .filter(|v| v.employee_id == employee.id)
        .filter_map(|v| v.range.overlap(period))
        .map(|overlap| overlap.working_days())
        .sum();
    let vacation_hours = vacation_days as f64 * daily_hours;

    let weekend_hours = period.weekend_days() as f64 * daily_hours;

    let available_hours = total_calendar_hours - buffer_hours - holiday_hours - vacation_hours - weekend_hours;

    Ok(CapacityBreakdown {
        daily_hours,
        total_calendar_hours,
        buffer_hours,
        holiday_hours,
        vacation_hours,
        weekend_hours,
        available_hours,
    })
}
