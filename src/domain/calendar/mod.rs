pub mod holiday;
pub mod range;
pub mod vacation;

pub use holiday::{Holiday, HolidayScope};
pub use range::{DateRange, is_working_day, overlap_days};
pub use vacation::{Vacation, VacationKind};
