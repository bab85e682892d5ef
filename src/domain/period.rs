// ============================================================
// Layer 3 — MonthPeriod Domain Type
// ============================================================
// Represents a single calendar month (year + month), the unit
// the data-selection convention works in. Trip files arrive one
// per month, so the flow never cares about the day of month in
// the reference date — only which months sit 2 and 1 steps back:
//
//   reference = 2021-08-15
//     training   month = 2021-06   (reference - 2 months)
//     validation month = 2021-07   (reference - 1 month)
//
// The chrono crate handles the calendar arithmetic, including
// year roll-over (2021-01 minus 2 months → 2020-11).
//
// Reference: Rust Book §5 (Structs)
//            chrono crate documentation (Months)

use std::fmt;

use anyhow::{Context, Result};
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month, formatted as `YYYY-MM` in file names and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthPeriod {
    /// Calendar year, e.g. 2021
    pub year: i32,

    /// Calendar month, 1-12
    pub month: u32,
}

impl MonthPeriod {
    /// The month a given date falls in. The day is discarded.
    pub fn from_date(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }
}

/// Display as the `YYYY-MM` token used in trip file names.
impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// The month whose file is used for TRAINING: reference - 2 months.
pub fn training_period(reference: NaiveDate) -> Result<MonthPeriod> {
    months_back(reference, 2)
}

/// The month whose file is used for VALIDATION: reference - 1 month.
pub fn validation_period(reference: NaiveDate) -> Result<MonthPeriod> {
    months_back(reference, 1)
}

/// Subtract whole calendar months from a date and keep only the month.
///
/// chrono clamps the day when the target month is shorter
/// (e.g. 2021-03-31 minus 1 month → 2021-02-28), which is fine
/// here because the day is discarded anyway.
fn months_back(reference: NaiveDate, months: u32) -> Result<MonthPeriod> {
    let shifted = reference
        .checked_sub_months(Months::new(months))
        .with_context(|| {
            format!("Cannot subtract {} months from {}", months, reference)
        })?;

    Ok(MonthPeriod::from_date(shifted))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fixed_month_offsets() {
        // 2021-08-15 → train on 2021-06, validate on 2021-07
        let reference = date(2021, 8, 15);
        assert_eq!(training_period(reference).unwrap().to_string(),   "2021-06");
        assert_eq!(validation_period(reference).unwrap().to_string(), "2021-07");
    }

    #[test]
    fn test_day_of_month_is_irrelevant() {
        // Any day in August selects the same months
        let first = date(2021, 8, 1);
        let last  = date(2021, 8, 31);
        assert_eq!(training_period(first).unwrap(), training_period(last).unwrap());
        assert_eq!(validation_period(first).unwrap(), validation_period(last).unwrap());
    }

    #[test]
    fn test_year_rollover() {
        // January reference reaches back into the previous year
        let reference = date(2021, 1, 15);
        assert_eq!(training_period(reference).unwrap().to_string(),   "2020-11");
        assert_eq!(validation_period(reference).unwrap().to_string(), "2020-12");
    }

    #[test]
    fn test_display_pads_single_digit_months() {
        let p = MonthPeriod { year: 2021, month: 6 };
        assert_eq!(p.to_string(), "2021-06");
    }

    #[test]
    fn test_clamped_end_of_month_still_selects_right_period() {
        // 2021-03-31 minus 1 month clamps to 2021-02-28;
        // the period is still February
        let reference = date(2021, 3, 31);
        assert_eq!(validation_period(reference).unwrap().to_string(), "2021-02");
    }
}
