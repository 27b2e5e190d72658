use crate::api::plan_dto::PlanDto;
use crate::domain::plan::Plan;
use crate::error::Result;
use crate::loader::parser::parse_json_file;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

/// Loads a plan snapshot from a JSON file and constructs the domain model,
/// enforcing all allocation invariants along the way.
pub fn load_plan(file_path: &str) -> Result<Plan> {
    logger::init();
    log::info!("Logger initialized. Loading plan snapshot.");

    let plan_dto: PlanDto = parse_json_file::<PlanDto>(file_path)?;
    log::info!("JSON snapshot parsed successfully.");

    let plan = Plan::try_from(plan_dto)?;
    log::info!(
        "Plan constructed: {} employees, {} projects, {} allocations.",
        plan.employees().len(),
        plan.projects().len(),
        plan.allocations().len()
    );

    Ok(plan)
}
