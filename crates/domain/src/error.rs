// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::gate::DependentModule;
use crate::transition::explain_invalid;
use crate::types::YearStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The requested status change is not an edge of the transition table.
    InvalidTransition {
        /// The current status.
        from: YearStatus,
        /// The requested status.
        to: YearStatus,
    },
    /// Academic year does not exist.
    YearNotFound(i64),
    /// Grading period does not exist in any loaded year.
    PeriodNotFound(i64),
    /// A period edit was attempted while its owning year is closed.
    PeriodFrozen {
        /// The period being edited.
        period_id: i64,
        /// The owning year label.
        year: u16,
    },
    /// Two periods of the same year share at least one calendar day.
    PeriodOverlap {
        /// The period being created or edited.
        period: String,
        /// The sibling period it collides with.
        conflicting: String,
    },
    /// A date range ends before it starts.
    InvalidDateRange {
        /// What the range belongs to (e.g. "period II").
        subject: String,
        /// The start date.
        start_date: time::Date,
        /// The end date.
        end_date: time::Date,
    },
    /// Year label is not a plausible four digit calendar year.
    InvalidYearLabel(String),
    /// Period name is empty.
    InvalidPeriodName(String),
    /// A year was supplied with an explicitly empty period list.
    NoPeriods {
        /// The year label.
        year: u16,
    },
    /// A status string could not be mapped onto a known status.
    InvalidYearStatus(String),
    /// A dependent module attempted a write against a closed year.
    YearReadOnly {
        /// The year label.
        year: u16,
        /// The module that attempted the write.
        module: DependentModule,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTransition { from, to } => write!(f, "{}", explain_invalid(*from, *to)),
            Self::YearNotFound(year_id) => write!(f, "Academic year {year_id} not found"),
            Self::PeriodNotFound(period_id) => write!(f, "Grading period {period_id} not found"),
            Self::PeriodFrozen { period_id, year } => write!(
                f,
                "Grading period {period_id} cannot be modified: academic year {year} is closed"
            ),
            Self::PeriodOverlap {
                period,
                conflicting,
            } => write!(
                f,
                "Grading period '{period}' overlaps with grading period '{conflicting}'"
            ),
            Self::InvalidDateRange {
                subject,
                start_date,
                end_date,
            } => write!(
                f,
                "Invalid date range for {subject}: {start_date} is after {end_date}"
            ),
            Self::InvalidYearLabel(msg) => write!(f, "Invalid academic year: {msg}"),
            Self::InvalidPeriodName(msg) => write!(f, "Invalid grading period name: {msg}"),
            Self::NoPeriods { year } => {
                write!(f, "Academic year {year} must have at least one grading period")
            }
            Self::InvalidYearStatus(status) => write!(f, "Unknown academic year status: '{status}'"),
            Self::YearReadOnly { year, module } => write!(
                f,
                "Academic year {year} is closed: {module} changes are not allowed"
            ),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
