use std::collections::HashMap;

use chrono::NaiveDate;

use allocation_engine::domain::calendar::range::DateRange;
use allocation_engine::domain::calendar::{Holiday, HolidayScope, Vacation, VacationKind};
use allocation_engine::domain::capacity::compute_capacity;
use allocation_engine::domain::employee::{Country, Employee};
use allocation_engine::domain::ids::{EmployeeId, HolidayId, VacationId};
use allocation_engine::domain::settings::Settings;
use allocation_engine::error::Error;

const EPSILON: f64 = 0.0001;

fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn employee(id: &str, country: Country) -> Employee {
    Employee {
        id: EmployeeId::new(id),
        name: format!("Employee {}", id),
        role: "Engineer".to_string(),
        country,
        allocated_hours: 0.0,
    }
}

fn settings(buffer_percent: f64) -> Settings {
    let mut weekly_hours = HashMap::new();
    weekly_hours.insert(Country::Norway, 37.5);
    weekly_hours.insert(Country::Brazil, 44.0);
    Settings::new(buffer_percent, weekly_hours).unwrap()
}

#[test]
fn test_thirty_day_month_with_twenty_percent_buffer() {
    // Setup: Norwegian policy (37.5 h/week -> 7.5 h/day), June 2024 is a
    // 30-day month with 10 weekend days, no holidays or vacations.
    let employee = employee("e1", Country::Norway);
    let period = DateRange::month(2024, 6).unwrap();

    // Execution
    let breakdown = compute_capacity(&employee, &period, &settings(20.0), &[], &[]).unwrap();

    // Verification
    assert!((breakdown.daily_hours - 7.5).abs() < EPSILON);
    assert!((breakdown.total_calendar_hours - 225.0).abs() < EPSILON, "30 x 7.5 = 225, got {}", breakdown.total_calendar_hours);
    assert!((breakdown.buffer_hours - 45.0).abs() < EPSILON);
    assert!((breakdown.weekend_hours - 75.0).abs() < EPSILON, "10 weekend days x 7.5 = 75");
    assert!((breakdown.holiday_hours).abs() < EPSILON);
    assert!((breakdown.vacation_hours).abs() < EPSILON);
    assert!((breakdown.available_hours - 105.0).abs() < EPSILON, "225 - 45 - 75 = 105, got {}", breakdown.available_hours);
}

#[test]
fn test_breakdown_terms_always_reconcile() {
    let employee = employee("e1", Country::Brazil);
    let period = DateRange::month(2024, 2).unwrap();
    let holidays = vec![Holiday {
        id: HolidayId::new("h1"),
        name: "Carnival".to_string(),
        date: d(2024, 2, 13), // a Tuesday
        scope: HolidayScope::Brazil,
    }];
    let vacations = vec![Vacation {
        id: VacationId::new("v1"),
        employee_id: employee.id.clone(),
        range: DateRange::new(d(2024, 2, 19), d(2024, 2, 23)).unwrap(),
        kind: VacationKind::Vacation,
    }];

    let breakdown = compute_capacity(&employee, &period, &settings(15.0), &holidays, &vacations).unwrap();

    let recomputed = breakdown.total_calendar_hours
        - breakdown.buffer_hours
        - breakdown.holiday_hours
        - breakdown.vacation_hours
        - breakdown.weekend_hours;
    assert!((breakdown.available_hours - recomputed).abs() < EPSILON);

    // Each deduction term is independently non-negative.
    assert!(breakdown.buffer_hours >= 0.0);
    assert!(breakdown.holiday_hours >= 0.0);
    assert!(breakdown.vacation_hours >= 0.0);
    assert!(breakdown.weekend_hours >= 0.0);
}

#[test]
fn test_holidays_only_count_for_matching_country_and_working_days() {
    let period = DateRange::month(2024, 6).unwrap();
    let holidays = vec![
        Holiday {
            id: HolidayId::new("h1"),
            name: "Midsummer".to_string(),
            date: d(2024, 6, 24), // Monday
            scope: HolidayScope::Norway,
        },
        Holiday {
            id: HolidayId::new("h2"),
            name: "Saturday holiday".to_string(),
            date: d(2024, 6, 8), // Saturday: absorbed by the weekend term
            scope: HolidayScope::Global,
        },
    ];

    let norwegian = compute_capacity(&employee("e1", Country::Norway), &period, &settings(0.0), &holidays, &[]).unwrap();
    assert!((norwegian.holiday_hours - 7.5).abs() < EPSILON, "only the Monday holiday deducts, got {}", norwegian.holiday_hours);

    // The Brazilian policy does not observe a Norway-scoped holiday.
    let brazilian = compute_capacity(&employee("e2", Country::Brazil), &period, &settings(0.0), &holidays, &[]).unwrap();
    assert!(brazilian.holiday_hours.abs() < EPSILON);
}

#[test]
fn test_duplicate_holiday_dates_deduct_once() {
    let period = DateRange::month(2024, 6).unwrap();
    let holidays = vec![
        Holiday { id: HolidayId::new("h1"), name: "A".to_string(), date: d(2024, 6, 24), scope: HolidayScope::Global },
        Holiday { id: HolidayId::new("h2"), name: "B".to_string(), date: d(2024, 6, 24), scope: HolidayScope::Norway },
    ];

    let breakdown = compute_capacity(&employee("e1", Country::Norway), &period, &settings(0.0), &holidays, &[]).unwrap();
    assert!((breakdown.holiday_hours - 7.5).abs() < EPSILON);
}

#[test]
fn test_vacation_counts_working_days_clipped_to_period() {
    let employee = employee("e1", Country::Norway);
    let period = DateRange::month(2024, 6).unwrap();

    // Vacation runs from late May into the first June week; only the June
    // part counts, and of that only Mon Jun 3 .. Fri Jun 7.
    let vacations = vec![Vacation {
        id: VacationId::new("v1"),
        employee_id: employee.id.clone(),
        range: DateRange::new(d(2024, 5, 27), d(2024, 6, 7)).unwrap(),
        kind: VacationKind::Personal,
    }];

    let breakdown = compute_capacity(&employee, &period, &settings(0.0), &[], &vacations).unwrap();
    assert!((breakdown.vacation_hours - 37.5).abs() < EPSILON, "5 working days x 7.5, got {}", breakdown.vacation_hours);
}

#[test]
fn test_other_employees_vacations_are_ignored() {
    let employee = employee("e1", Country::Norway);
    let period = DateRange::month(2024, 6).unwrap();
    let vacations = vec![Vacation {
        id: VacationId::new("v1"),
        employee_id: EmployeeId::new("someone-else"),
        range: DateRange::new(d(2024, 6, 10), d(2024, 6, 14)).unwrap(),
        kind: VacationKind::Sick,
    }];

    let breakdown = compute_capacity(&employee, &period, &settings(0.0), &[], &vacations).unwrap();
    assert!(breakdown.vacation_hours.abs() < EPSILON);
}

#[test]
fn test_available_hours_can_go_negative() {
    // A full-month vacation plus a 20% buffer leaves less than nothing;
    // the calculator must report that honestly instead of clamping.
    let employee = employee("e1", Country::Norway);
    let period = DateRange::month(2024, 6).unwrap();
    let vacations = vec![Vacation {
        id: VacationId::new("v1"),
        employee_id: employee.id.clone(),
        range: period,
        kind: VacationKind::Vacation,
    }];

    let breakdown = compute_capacity(&employee, &period, &settings(20.0), &[], &vacations).unwrap();

    // 225 - 45 (buffer) - 150 (20 working days) - 75 (weekends) = -45
    assert!((breakdown.available_hours + 45.0).abs() < EPSILON, "expected -45, got {}", breakdown.available_hours);
}

#[test]
fn test_missing_country_policy_is_a_configuration_error() {
    let employee = employee("e1", Country::Brazil);
    let period = DateRange::month(2024, 6).unwrap();
    let settings = Settings::new(10.0, HashMap::new()).unwrap();

    let result = compute_capacity(&employee, &period, &settings, &[], &[]);
    assert!(matches!(result, Err(Error::Configuration(_))), "Expected Configuration error, got {:?}", result);
}

#[test]
fn test_zero_weekly_hours_is_a_configuration_error() {
    let employee = employee("e1", Country::Norway);
    let period = DateRange::month(2024, 6).unwrap();
    let mut weekly_hours = HashMap::new();
    weekly_hours.insert(Country::Norway, 0.0);
    let settings = Settings::new(10.0, weekly_hours).unwrap();

    let result = compute_capacity(&employee, &period, &settings, &[], &[]);
    assert!(matches!(result, Err(Error::Configuration(_))));
}
