// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ciclo_domain::{NewAcademicYear, PeriodPatch, YearStatus};

/// A command represents operator intent as data only.
///
/// Commands are the only way to request lifecycle changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new academic year in `Planning`.
    CreateYear {
        /// The year label, optional bounds and optional explicit periods.
        draft: NewAcademicYear,
    },
    /// Move a year along one edge of the transition table.
    ChangeStatus {
        /// The year to change.
        year_id: i64,
        /// The requested status.
        status: YearStatus,
    },
    /// Make a year the sole operating year.
    ActivateYear {
        /// The year to activate.
        year_id: i64,
    },
    /// Edit the window or flags of a grading period.
    UpdatePeriod {
        /// The period to edit.
        period_id: i64,
        /// The fields to change.
        patch: PeriodPatch,
    },
}

impl Command {
    /// The audit action name for this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateYear { .. } => "CreateYear",
            Self::ChangeStatus { .. } => "ChangeStatus",
            Self::ActivateYear { .. } => "ActivateYear",
            Self::UpdatePeriod { .. } => "UpdatePeriod",
        }
    }
}
