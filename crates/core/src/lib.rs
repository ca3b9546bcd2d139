// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod service;
mod state;
mod store;

#[cfg(test)]
mod tests;

use ciclo_domain::{AcademicYear, DependentModule, DomainError, ensure_writable};

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use error::{CoreError, LifecycleError};
pub use service::LifecycleService;
pub use state::{Calendar, Change, SideEffect, TransitionResult};
pub use store::{CalendarStore, EnrollmentReset};

/// Validates that a dependent module may write data scoped to `year_id`.
///
/// This is a read-only check that does not create audit events. Enrollment,
/// staffing and course-load writers call it with the calendar they just
/// loaded.
///
/// # Errors
///
/// Returns an error if:
/// - The year does not exist
/// - The year is closed
pub fn validate_year_writable(
    calendar: &Calendar,
    year_id: i64,
    module: DependentModule,
) -> Result<(), DomainError> {
    let year: &AcademicYear = calendar
        .find_year(year_id)
        .ok_or(DomainError::YearNotFound(year_id))?;
    ensure_writable(year, module)
}
