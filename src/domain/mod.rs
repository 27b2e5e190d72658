pub mod allocation;
pub mod calendar;
pub mod capacity;
pub mod employee;
pub mod ids;
pub mod plan;
pub mod project;
pub mod settings;
