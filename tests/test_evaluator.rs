use std::collections::HashMap;

use chrono::NaiveDate;

use allocation_engine::domain::allocation::evaluator::{
    AllocationProposal, Evaluation, evaluate_allocation_change,
};
use allocation_engine::domain::allocation::{Allocation, AllocationStatus};
use allocation_engine::domain::calendar::range::DateRange;
use allocation_engine::domain::employee::{Country, Employee};
use allocation_engine::domain::ids::{AllocationId, EmployeeId, ProjectId};
use allocation_engine::domain::settings::Settings;
use allocation_engine::error::Error;

const EPSILON: f64 = 0.0001;

fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn employees() -> Vec<Employee> {
    vec![Employee {
        id: EmployeeId::new("e1"),
        name: "Employee e1".to_string(),
        role: "Engineer".to_string(),
        country: Country::Norway,
        allocated_hours: 0.0,
    }]
}

/// 40 h/week -> a round 8 h/day maximum.
fn settings() -> Settings {
    let mut weekly_hours = HashMap::new();
    weekly_hours.insert(Country::Norway, 40.0);
    Settings::new(10.0, weekly_hours).unwrap()
}

fn allocation(id: &str, project: &str, start: NaiveDate, end: NaiveDate, hours: f64, seq: u64) -> Allocation {
    Allocation {
        id: AllocationId::new(id),
        employee_id: EmployeeId::new("e1"),
        project_id: ProjectId::new(project),
        range: DateRange::new(start, end).unwrap(),
        hours_per_day: hours,
        status: AllocationStatus::Active,
        created_seq: seq,
    }
}

fn proposal(project: &str, start: NaiveDate, end: NaiveDate, hours: f64) -> AllocationProposal {
    AllocationProposal {
        employee_id: EmployeeId::new("e1"),
        project_id: ProjectId::new(project),
        range: DateRange::new(start, end).unwrap(),
        hours_per_day: hours,
        exclude_allocation: None,
    }
}

#[test]
fn test_same_project_overlap_is_a_duplicate_conflict() {
    // Setup: project p1 already covers Jan 1 .. Jan 5.
    let allocations = vec![allocation("a1", "p1", d(2024, 1, 1), d(2024, 1, 5), 8.0, 0)];

    // Execution: dropping p1 again onto Jan 3.
    let result = evaluate_allocation_change(
        &proposal("p1", d(2024, 1, 3), d(2024, 1, 3), 8.0),
        &allocations,
        &employees(),
        &settings(),
    )
    .unwrap();

    // Verification
    match result {
        Evaluation::Duplicate(conflict) => {
            assert_eq!(conflict.conflicting, vec![AllocationId::new("a1")]);
        }
        other => panic!("Expected a duplicate conflict, got {:?}", other),
    }
}

#[test]
fn test_duplicate_check_wins_over_capacity_check() {
    // The overlap would also overallocate; the duplicate classification
    // must come first because it is the harder rejection.
    let allocations = vec![allocation("a1", "p1", d(2024, 1, 1), d(2024, 1, 5), 8.0, 0)];

    let result = evaluate_allocation_change(
        &proposal("p1", d(2024, 1, 3), d(2024, 1, 3), 8.0),
        &allocations,
        &employees(),
        &settings(),
    )
    .unwrap();

    assert!(matches!(result, Evaluation::Duplicate(_)));
}

#[test]
fn test_exceeding_daily_hours_is_a_soft_warning() {
    // Setup: e1 is already at the 8 h/day maximum on Mon Jan 15 from p1.
    let allocations = vec![allocation("a1", "p1", d(2024, 1, 15), d(2024, 1, 15), 8.0, 0)];

    // Execution: dropping p2 at 8 h/day onto the same day.
    let result = evaluate_allocation_change(
        &proposal("p2", d(2024, 1, 15), d(2024, 1, 15), 8.0),
        &allocations,
        &employees(),
        &settings(),
    )
    .unwrap();

    // Verification: a warning carrying enough data to resolve it.
    match result {
        Evaluation::Overallocated(warning) => {
            assert!((warning.max_daily_hours - 8.0).abs() < EPSILON);
            assert!((warning.proposed_hours_per_day - 8.0).abs() < EPSILON);
            assert_eq!(warning.days.len(), 1);

            let day = &warning.days[0];
            assert_eq!(day.date, d(2024, 1, 15));
            assert!((day.current_allocated_hours - 8.0).abs() < EPSILON);
            assert_eq!(day.contributors.len(), 1);
            assert_eq!(day.contributors[0].allocation_id, AllocationId::new("a1"));
            assert!((day.contributors[0].hours_per_day - 8.0).abs() < EPSILON);
        }
        other => panic!("Expected an overallocation warning, got {:?}", other),
    }
}

#[test]
fn test_fitting_within_daily_hours_is_clean() {
    let allocations = vec![allocation("a1", "p1", d(2024, 1, 15), d(2024, 1, 15), 4.0, 0)];

    let result = evaluate_allocation_change(
        &proposal("p2", d(2024, 1, 15), d(2024, 1, 15), 4.0),
        &allocations,
        &employees(),
        &settings(),
    )
    .unwrap();

    assert_eq!(result, Evaluation::Clean);
}

#[test]
fn test_only_overallocated_days_are_reported() {
    // Only Mon Jan 15 is loaded; the rest of the proposed week is free.
    let allocations = vec![allocation("a1", "p1", d(2024, 1, 15), d(2024, 1, 15), 8.0, 0)];

    let result = evaluate_allocation_change(
        &proposal("p2", d(2024, 1, 15), d(2024, 1, 19), 8.0),
        &allocations,
        &employees(),
        &settings(),
    )
    .unwrap();

    match result {
        Evaluation::Overallocated(warning) => {
            assert_eq!(warning.days.len(), 1);
            assert_eq!(warning.days[0].date, d(2024, 1, 15));
        }
        other => panic!("Expected an overallocation warning, got {:?}", other),
    }
}

#[test]
fn test_zero_hour_weekend_drop_is_clean() {
    // A drop onto Sat Jan 13 defaults to 0 h/day, which can never exceed
    // the maximum even on a fully booked week.
    let allocations = vec![allocation("a1", "p1", d(2024, 1, 8), d(2024, 1, 19), 8.0, 0)];

    let result = evaluate_allocation_change(
        &proposal("p2", d(2024, 1, 13), d(2024, 1, 13), 0.0),
        &allocations,
        &employees(),
        &settings(),
    )
    .unwrap();

    assert_eq!(result, Evaluation::Clean);
}

#[test]
fn test_excluded_allocation_does_not_count_against_itself() {
    // Moving a1 one day forward: its own hours must not be double counted.
    let allocations = vec![allocation("a1", "p1", d(2024, 1, 15), d(2024, 1, 15), 8.0, 0)];

    let mut move_proposal = proposal("p1", d(2024, 1, 16), d(2024, 1, 16), 8.0);
    move_proposal.exclude_allocation = Some(AllocationId::new("a1"));

    let result = evaluate_allocation_change(&move_proposal, &allocations, &employees(), &settings()).unwrap();
    assert_eq!(result, Evaluation::Clean);
}

#[test]
fn test_unknown_employee_is_rejected_before_evaluation() {
    let mut bad = proposal("p1", d(2024, 1, 15), d(2024, 1, 15), 8.0);
    bad.employee_id = EmployeeId::new("ghost");

    let result = evaluate_allocation_change(&bad, &[], &employees(), &settings());
    assert!(matches!(result, Err(Error::Validation(_))), "Expected a validation error, got {:?}", result);
}

#[test]
fn test_out_of_range_hours_are_rejected() {
    let result = evaluate_allocation_change(
        &proposal("p1", d(2024, 1, 15), d(2024, 1, 15), 25.0),
        &[],
        &employees(),
        &settings(),
    );
    assert!(matches!(result, Err(Error::Validation(_))));
}
