use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

use crate::error::{Error, Result, ValidationError};

/// Returns false on Saturday and Sunday, true otherwise.
///
/// Date-only granularity; no time-of-day component is ever considered.
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// A closed calendar-day range. Both ends are inclusive and
/// `start <= end` holds for every constructed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(ValidationError::EndBeforeStart { start, end }.into());
        }
        Ok(DateRange { start, end })
    }

    /// A range covering exactly one calendar day.
    pub fn single(date: NaiveDate) -> Self {
        DateRange { start: date, end: date }
    }

    /// The full calendar month, first day through last day.
    pub fn month(year: i32, month: u32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| ValidationError::MalformedDate(format!("{}-{:02} is not a calendar month", year, month)))?;
        // Last day of the month = day before the first of the next month.
        let next_month_start = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end = next_month_start
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| ValidationError::MalformedDate(format!("{}-{:02} has no last day", year, month)))?;
        Ok(DateRange { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Lazy inclusive iterator over every calendar day of the range.
    /// Calling it again restarts from the first day.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Inclusive calendar-day count, always >= 1.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn working_days(&self) -> i64 {
        self.days().filter(|d| is_working_day(*d)).count() as i64
    }

    pub fn weekend_days(&self) -> i64 {
        self.num_days() - self.working_days()
    }

    /// Duration in whole days between the two edges (0 for a single day).
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// The closed-range intersection, or None when the ranges are disjoint.
    pub fn overlap(&self, other: &DateRange) -> Option<DateRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start <= end { Some(DateRange { start, end }) } else { None }
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Shifts both edges by the same day delta, preserving the duration.
    pub fn shift(&self, delta_days: i64) -> Result<DateRange> {
        let delta = Duration::days(delta_days);
        let start = self
            .start
            .checked_add_signed(delta)
            .ok_or_else(|| Error::CapacityComputation(format!("shifting {} by {} days overflows", self.start, delta_days)))?;
        let end = self
            .end
            .checked_add_signed(delta)
            .ok_or_else(|| Error::CapacityComputation(format!("shifting {} by {} days overflows", self.end, delta_days)))?;
        Ok(DateRange { start, end })
    }

    /// Replaces the start edge. A date past the end edge clamps to it,
    /// so the range can shrink to a single day but never invert.
    pub fn with_start_clamped(&self, new_start: NaiveDate) -> DateRange {
        DateRange { start: new_start.min(self.end), end: self.end }
    }

    /// Replaces the end edge, clamped against the start edge.
    pub fn with_end_clamped(&self, new_end: NaiveDate) -> DateRange {
        DateRange { start: self.start, end: new_end.max(self.start) }
    }
}

/// Inclusive day count of the intersection of two closed ranges, 0 if
/// disjoint. Symmetric in its arguments.
pub fn overlap_days(a: &DateRange, b: &DateRange) -> i64 {
    a.overlap(b).map_or(0, |r| r.num_days())
}
