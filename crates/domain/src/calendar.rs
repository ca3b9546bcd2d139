// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Default grading period layout.
//!
//! New years are seeded with four bimestres covering the southern
//! hemisphere school calendar (March to December). Nothing else in the
//! engine assumes four periods.

use crate::error::DomainError;
use crate::types::NewPeriod;
use time::{Date, Month};

/// `(name, start month, start day, end month, end day)` for each default period.
const DEFAULT_LAYOUT: [(&str, Month, u8, Month, u8); 4] = [
    ("I", Month::March, 1, Month::May, 15),
    ("II", Month::May, 16, Month::July, 31),
    ("III", Month::August, 1, Month::October, 15),
    ("IV", Month::October, 16, Month::December, 20),
];

/// Builds the default periods for `year`.
///
/// # Errors
///
/// Returns an error if a seeded date cannot be represented for the year.
pub fn default_periods(year: u16) -> Result<Vec<NewPeriod>, DomainError> {
    let calendar_year: i32 = i32::from(year);

    DEFAULT_LAYOUT
        .iter()
        .map(|&(name, start_month, start_day, end_month, end_day)| {
            let start_date: Date = seeded_date(calendar_year, start_month, start_day)?;
            let end_date: Date = seeded_date(calendar_year, end_month, end_day)?;
            Ok(NewPeriod::new(name.to_string(), start_date, end_date))
        })
        .collect()
}

fn seeded_date(year: i32, month: Month, day: u8) -> Result<Date, DomainError> {
    Date::from_calendar_date(year, month, day).map_err(|e| DomainError::DateParseError {
        date_string: format!("{year}-{month}-{day}"),
        error: e.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::validation::validate_periods_disjoint;
    use time::macros::date;

    #[test]
    fn test_default_periods_are_four_bimestres() {
        let periods: Vec<NewPeriod> = default_periods(2026).unwrap();
        let names: Vec<&str> = periods.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["I", "II", "III", "IV"]);
    }

    #[test]
    fn test_default_periods_do_not_overlap() {
        let periods: Vec<NewPeriod> = default_periods(2026).unwrap();
        assert!(validate_periods_disjoint(&periods).is_ok());
    }

    #[test]
    fn test_default_periods_are_in_order() {
        let periods: Vec<NewPeriod> = default_periods(2025).unwrap();
        for pair in periods.windows(2) {
            assert!(pair[0].end_date < pair[1].start_date);
        }
    }

    #[test]
    fn test_default_first_period_window() {
        let periods: Vec<NewPeriod> = default_periods(2025).unwrap();
        assert_eq!(periods[0].start_date, date!(2025 - 03 - 01));
        assert_eq!(periods[0].end_date, date!(2025 - 05 - 15));
        assert_eq!(periods[3].end_date, date!(2025 - 12 - 20));
    }
}
