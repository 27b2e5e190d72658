use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::employee::Country;
use crate::domain::ids::HolidayId;

/// Which country a public holiday applies to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidayScope {
    /// Only employees on the Norwegian policy observe it.
    Norway,
    /// Only employees on the Brazilian policy observe it.
    Brazil,
    /// Everybody observes it.
    Global,
}

impl HolidayScope {
    pub fn applies_to(&self, country: Country) -> bool {
        match self {
            HolidayScope::Global => true,
            HolidayScope::Norway => country == Country::Norway,
            HolidayScope::Brazil => country == Country::Brazil,
        }
    }
}

/// A public holiday. It reduces capacity only when it falls on a
/// non-weekend day; weekend holidays are already absorbed by the
/// weekend deduction.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Holiday {
    pub id: HolidayId,
    pub name: String,
    pub date: NaiveDate,
    pub scope: HolidayScope,
}
