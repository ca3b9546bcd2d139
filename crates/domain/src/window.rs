// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Grade and attendance entry windows.
//!
//! This module decides whether data entry is permitted for a grading
//! period on a given day. Checks run in a fixed order and the first
//! failing check determines the reason:
//!
//! 1. The owning year must be the operating year.
//! 2. A locked period refuses entry unless it is force-open.
//! 3. The day must fall within the period window (inclusive, whole days),
//!    unless the period is force-open.
//!
//! ## Invariants
//!
//! - Granularity is the calendar date; time of day never matters
//! - Force-open beats both the window and the lock
//! - A non-operating year refuses entry regardless of period fields
//!
//! Enrollment and academic-data predicates live here too. They encode two
//! different rules and are intentionally kept apart.

use crate::types::{AcademicYear, Period, YearStatus};
use serde::{Deserialize, Serialize};
use time::Date;

/// Why entry was or was not permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryReason {
    /// Entry is allowed.
    Permitted,
    /// The owning year is not the operating year.
    YearNotOperating,
    /// The period is locked and not force-open.
    PeriodLocked,
    /// The day falls outside the period window.
    OutsideWindow,
}

impl EntryReason {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Permitted => "permitted",
            Self::YearNotOperating => "year_not_operating",
            Self::PeriodLocked => "period_locked",
            Self::OutsideWindow => "outside_window",
        }
    }
}

/// The full outcome of an entry check.
///
/// All four flags are reported because consumers render them separately
/// (a force-open period looks different from a naturally open one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDecision {
    /// Whether entry is permitted.
    pub allowed: bool,
    /// The first failing check, or `Permitted`.
    pub reason: EntryReason,
    /// Whether the day falls inside the period window.
    pub in_window: bool,
    /// Whether the period carries the force-open override.
    pub forced: bool,
    /// Whether the owning year is the operating year.
    pub year_active: bool,
}

/// Decides whether grades or attendance may be entered for `period` on `today`.
#[must_use]
pub fn can_enter_data(period: &Period, year: &AcademicYear, today: Date) -> EntryDecision {
    let in_window: bool = period.contains(today);
    let forced: bool = period.is_force_open;
    let year_active: bool = year.is_operating;

    let reason: EntryReason = if !year_active {
        EntryReason::YearNotOperating
    } else if period.is_locked && !forced {
        EntryReason::PeriodLocked
    } else if in_window || forced {
        EntryReason::Permitted
    } else {
        EntryReason::OutsideWindow
    };

    EntryDecision {
        allowed: reason == EntryReason::Permitted,
        reason,
        in_window,
        forced,
        year_active,
    }
}

/// Returns true if students may be enrolled into `year`.
///
/// Enrollment is open while the year is being planned and while it runs.
#[must_use]
pub const fn can_enroll(year: &AcademicYear) -> bool {
    matches!(year.status, YearStatus::Planning | YearStatus::Open)
}

/// Returns true if grades, attendance and similar academic data may change.
#[must_use]
pub const fn can_modify_academic_data(year: &AcademicYear) -> bool {
    matches!(year.status, YearStatus::Open) && year.is_operating
}

/// Returns the period whose window contains `today`, if any.
///
/// Lock and override flags are not considered.
#[must_use]
pub fn current_period(year: &AcademicYear, today: Date) -> Option<&Period> {
    year.periods.iter().find(|p| p.contains(today))
}

/// Evaluates `can_enter_data` for every period of `year`, in period order.
#[must_use]
pub fn entry_decisions(year: &AcademicYear, today: Date) -> Vec<(i64, EntryDecision)> {
    year.periods
        .iter()
        .map(|p| (p.period_id, can_enter_data(p, year, today)))
        .collect()
}
