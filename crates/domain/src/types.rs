// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;
use time::macros::format_description;

/// Represents the lifecycle stage of an academic year.
///
/// The set of legal moves between stages lives in the transition table
/// (see `YearStatus::valid_transitions`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum YearStatus {
    /// Initial stage after creation. Enrollment is allowed, grading is not.
    #[default]
    Planning,
    /// The year is running.
    Open,
    /// The year is finished. Every dependent module is read-only.
    Closed,
}

impl YearStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Planning, Self::Open, Self::Closed];

    /// Converts this status to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl FromStr for YearStatus {
    type Err = DomainError;

    /// Parses a status string.
    ///
    /// Accepts the storage representation as well as the labels used by
    /// the legacy school console (`planificación`, `abierto`, `cerrado`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "planning" | "planificación" | "planificacion" => Ok(Self::Planning),
            "open" | "abierto" => Ok(Self::Open),
            "closed" | "cerrado" => Ok(Self::Closed),
            _ => Err(DomainError::InvalidYearStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for YearStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label: &str = match self {
            Self::Planning => "Planning",
            Self::Open => "Open",
            Self::Closed => "Closed",
        };
        write!(f, "{label}")
    }
}

/// A grading period ("bimestre") inside an academic year.
///
/// The identity of a period never changes; its fields are mutable through
/// `PeriodPatch` while the owning year is not closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// The canonical identifier assigned by persistence.
    pub period_id: i64,
    /// Display label (e.g. "I", "II").
    pub name: String,
    /// First day on which entry is normally permitted (inclusive).
    pub start_date: Date,
    /// Last day on which entry is normally permitted (inclusive).
    pub end_date: Date,
    /// Administrative hard lock.
    pub is_locked: bool,
    /// Administrative override that opens the period regardless of window and lock.
    pub is_force_open: bool,
}

impl Period {
    /// Returns true if `date` falls inside `[start_date, end_date]`.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Returns true if the two periods share at least one calendar day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }
}

/// An academic year ("año académico") and the periods it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicYear {
    /// The canonical identifier assigned by persistence.
    pub year_id: i64,
    /// The calendar year label (e.g. 2026).
    pub year: u16,
    /// Lifecycle stage.
    pub status: YearStatus,
    /// True for the single year treated as live system-wide.
    pub is_operating: bool,
    /// Optional first day of the year.
    pub start_date: Option<Date>,
    /// Optional last day of the year.
    pub end_date: Option<Date>,
    /// Grading periods, ordered by position.
    pub periods: Vec<Period>,
}

impl AcademicYear {
    /// Finds one of this year's periods by id.
    #[must_use]
    pub fn period(&self, period_id: i64) -> Option<&Period> {
        self.periods.iter().find(|p| p.period_id == period_id)
    }

    /// Short textual summary used for audit snapshots.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "year={},status={},is_operating={},periods={}",
            self.year,
            self.status.as_str(),
            self.is_operating,
            self.periods.len()
        )
    }
}

/// A grading period that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPeriod {
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
}

impl NewPeriod {
    #[must_use]
    pub const fn new(name: String, start_date: Date, end_date: Date) -> Self {
        Self {
            name,
            start_date,
            end_date,
        }
    }
}

/// An academic year that has not been persisted yet.
///
/// `periods` of `None` asks for the default bimestre layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAcademicYear {
    pub year: u16,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub periods: Option<Vec<NewPeriod>>,
}

impl NewAcademicYear {
    /// A draft with no date bounds and the default periods.
    #[must_use]
    pub const fn new(year: u16) -> Self {
        Self {
            year,
            start_date: None,
            end_date: None,
            periods: None,
        }
    }
}

/// Parses an ISO calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}
