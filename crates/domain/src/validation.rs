// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{NewAcademicYear, NewPeriod, Period};
use time::Date;

/// Smallest accepted academic year label.
const MIN_YEAR: u16 = 1900;
/// Largest accepted academic year label.
const MAX_YEAR: u16 = 2200;

/// Validates that an academic year label is a plausible calendar year.
///
/// # Errors
///
/// Returns an error if the year is outside `1900..=2200`.
pub fn validate_year_label(year: u16) -> Result<(), DomainError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(DomainError::InvalidYearLabel(format!(
            "Year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
        )));
    }
    Ok(())
}

/// Validates that a date range does not end before it starts.
///
/// A single-day range (`start == end`) is valid.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateRange` if `start_date > end_date`.
pub fn validate_date_range(
    subject: &str,
    start_date: Date,
    end_date: Date,
) -> Result<(), DomainError> {
    if start_date > end_date {
        return Err(DomainError::InvalidDateRange {
            subject: subject.to_string(),
            start_date,
            end_date,
        });
    }
    Ok(())
}

/// Validates that a period name is not blank.
///
/// # Errors
///
/// Returns an error if the name is empty or whitespace.
pub fn validate_period_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidPeriodName(String::from(
            "Name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates that `candidate` shares no calendar day with any sibling.
///
/// The candidate itself (same `period_id`) is skipped.
///
/// # Errors
///
/// Returns `DomainError::PeriodOverlap` naming the first colliding sibling.
pub fn validate_period_fits(candidate: &Period, siblings: &[Period]) -> Result<(), DomainError> {
    if let Some(conflict) = siblings
        .iter()
        .filter(|p| p.period_id != candidate.period_id)
        .find(|p| p.overlaps(candidate))
    {
        return Err(DomainError::PeriodOverlap {
            period: candidate.name.clone(),
            conflicting: conflict.name.clone(),
        });
    }
    Ok(())
}

/// Validates that no two draft periods share a calendar day.
///
/// # Errors
///
/// Returns `DomainError::PeriodOverlap` for the first colliding pair.
pub fn validate_periods_disjoint(periods: &[NewPeriod]) -> Result<(), DomainError> {
    for (index, period) in periods.iter().enumerate() {
        for other in &periods[index + 1..] {
            if period.start_date <= other.end_date && other.start_date <= period.end_date {
                return Err(DomainError::PeriodOverlap {
                    period: other.name.clone(),
                    conflicting: period.name.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Validates a new academic year draft together with its resolved periods.
///
/// # Errors
///
/// Returns an error if:
/// - The year label is out of range
/// - The year bounds are inverted
/// - The period list is empty
/// - Any period has a blank name or an inverted window
/// - Two periods overlap
pub fn validate_new_year(draft: &NewAcademicYear, periods: &[NewPeriod]) -> Result<(), DomainError> {
    validate_year_label(draft.year)?;

    if let (Some(start_date), Some(end_date)) = (draft.start_date, draft.end_date) {
        validate_date_range(&format!("academic year {}", draft.year), start_date, end_date)?;
    }

    if periods.is_empty() {
        return Err(DomainError::NoPeriods { year: draft.year });
    }

    for period in periods {
        validate_period_name(&period.name)?;
        validate_date_range(
            &format!("grading period {}", period.name),
            period.start_date,
            period.end_date,
        )?;
    }

    validate_periods_disjoint(periods)
}
