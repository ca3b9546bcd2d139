// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ciclo_audit::{AuditEvent, StateSnapshot};
use ciclo_domain::{
    AcademicYear, NewAcademicYear, NewPeriod, Period, PeriodPatch, YearPatch, operating_year,
};

/// The loaded collection of academic years.
///
/// A calendar is a read model. It is rebuilt from persistence for every
/// operation and never cached between calls, so derived answers (the
/// operating year, read-only flags, entry windows) cannot go stale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Calendar {
    /// All years, in persistence order.
    pub years: Vec<AcademicYear>,
}

impl Calendar {
    /// Creates a calendar over `years`.
    #[must_use]
    pub const fn new(years: Vec<AcademicYear>) -> Self {
        Self { years }
    }

    /// Looks up a year by id.
    #[must_use]
    pub fn find_year(&self, year_id: i64) -> Option<&AcademicYear> {
        self.years.iter().find(|y| y.year_id == year_id)
    }

    /// Looks up a period by id, together with its owning year.
    #[must_use]
    pub fn find_period(&self, period_id: i64) -> Option<(&AcademicYear, &Period)> {
        self.years
            .iter()
            .find_map(|y| y.period(period_id).map(|p| (y, p)))
    }

    /// Returns the operating year, if any.
    #[must_use]
    pub fn operating_year(&self) -> Option<&AcademicYear> {
        operating_year(&self.years)
    }

    /// Converts the calendar to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "years_count={},operating={}",
            self.years.len(),
            self.operating_year()
                .map_or_else(|| String::from("none"), |y| y.year.to_string())
        ))
    }
}

/// The write a successful command asks persistence to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Insert a new year with its periods.
    CreateYear {
        /// The validated draft.
        draft: NewAcademicYear,
        /// The resolved periods (explicit or default layout).
        periods: Vec<NewPeriod>,
    },
    /// Update one year.
    YearPatch(YearPatch),
    /// Update several years as one atomic unit, in the given order.
    YearPatches(Vec<YearPatch>),
    /// Update one grading period.
    PeriodPatch {
        /// The period being edited.
        period_id: i64,
        /// The fields to change.
        patch: PeriodPatch,
    },
}

/// Work that must happen in another bounded context after a change commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    /// Mark every student enrolled in the year as no longer currently enrolled.
    ResetEnrollments {
        /// The year that was closed.
        year_id: i64,
    },
}

/// The result of a successful command.
///
/// Applying a command is pure: nothing has been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The write to perform.
    pub change: Change,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
    /// Follow-up work, run after the change commits.
    pub side_effects: Vec<SideEffect>,
}
