use clap::Parser;
use colored::Colorize;

use allocation_engine::domain::allocation::index::AllocationIndex;
use allocation_engine::domain::calendar::range::DateRange;
use allocation_engine::domain::capacity::compute_capacity;

/// Prints a monthly capacity and utilization report for every employee in
/// a plan snapshot.
#[derive(Parser, Debug)]
#[command(name = "allocation-report")]
struct Args {
    /// Path to the plan snapshot JSON
    plan: String,

    /// Report year
    #[arg(long)]
    year: i32,

    /// Report month (1-12)
    #[arg(long)]
    month: u32,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let plan = allocation_engine::load_plan(&args.plan)?;
    let period = DateRange::month(args.year, args.month)?;
    let index = AllocationIndex::new(plan.allocations());

    println!("{}", format!("Capacity report {} .. {}", period.start(), period.end()).bold());

    for employee in plan.employees() {
        let breakdown =
            compute_capacity(employee, &period, plan.settings(), plan.holidays(), plan.vacations())?;
        let allocated =
            index.allocated_hours_for_period(&employee.id, &period, plan.holidays(), employee.country);

        let line = format!(
            "{:<24} available {:>8.1} h   allocated {:>8.1} h",
            employee.name, breakdown.available_hours, allocated
        );
        if allocated > breakdown.available_hours {
            println!("{}", line.red());
        } else {
            println!("{}", line.green());
        }
    }

    Ok(())
}
