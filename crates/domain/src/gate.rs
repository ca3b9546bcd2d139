// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only gate shared by every module that writes year-scoped data.
//!
//! Enrollment, staffing and course-load edits must all ask this module
//! instead of deriving read-only-ness themselves, so they can never
//! disagree about a year.

use crate::error::DomainError;
use crate::types::{AcademicYear, YearStatus};
use serde::{Deserialize, Serialize};

/// Modules that consume the read-only flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependentModule {
    /// Student enrollment.
    Enrollment,
    /// Staff and role assignments.
    Staffing,
    /// Course-load assignments for teaching staff.
    CourseLoad,
}

impl std::fmt::Display for DependentModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &str = match self {
            Self::Enrollment => "enrollment",
            Self::Staffing => "staffing",
            Self::CourseLoad => "course load",
        };
        write!(f, "{name}")
    }
}

/// Returns true if every dependent module must refuse writes for `year`.
///
/// Only `Closed` years are read-only. The operating flag is ignored: a
/// non-operating `Planning` or `Open` year is still writable.
#[must_use]
pub const fn is_read_only(year: &AcademicYear) -> bool {
    matches!(year.status, YearStatus::Closed)
}

/// Guards a write by `module` against `year`.
///
/// # Errors
///
/// Returns `DomainError::YearReadOnly` if the year is read-only.
pub const fn ensure_writable(year: &AcademicYear, module: DependentModule) -> Result<(), DomainError> {
    if is_read_only(year) {
        return Err(DomainError::YearReadOnly {
            year: year.year,
            module,
        });
    }
    Ok(())
}
