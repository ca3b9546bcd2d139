// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Collaborator seams used by `LifecycleService`.
//!
//! Every write receives the audit event describing it and must record both
//! in one transaction: a write without its event, or an event without its
//! write, is never observable.

use ciclo_audit::AuditEvent;
use ciclo_domain::{AcademicYear, NewAcademicYear, NewPeriod, PeriodPatch, YearPatch};

/// Storage for years, periods and their audit trail.
pub trait CalendarStore {
    /// The store's own failure type, surfaced to callers unchanged.
    type Error;

    /// Loads every year with its periods.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn load_years(&mut self) -> Result<Vec<AcademicYear>, Self::Error>;

    /// Inserts a new `Planning` year with `periods`.
    ///
    /// The audit event is scoped to the new year id before it is recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn create_year(
        &mut self,
        draft: &NewAcademicYear,
        periods: &[NewPeriod],
        event: &AuditEvent,
    ) -> Result<AcademicYear, Self::Error>;

    /// Writes one year patch.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save_year_patch(&mut self, patch: &YearPatch, event: &AuditEvent) -> Result<(), Self::Error>;

    /// Writes several year patches as one atomic unit, in order.
    ///
    /// Either every patch is applied or none is.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; nothing is applied in that case.
    fn save_year_patches(
        &mut self,
        patches: &[YearPatch],
        event: &AuditEvent,
    ) -> Result<(), Self::Error>;

    /// Writes one period patch.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save_period_patch(
        &mut self,
        period_id: i64,
        patch: &PeriodPatch,
        event: &AuditEvent,
    ) -> Result<(), Self::Error>;
}

/// The student-status-reset collaborator, invoked when a year closes.
pub trait EnrollmentReset {
    /// The collaborator's failure type.
    type Error: std::fmt::Display;

    /// Marks every student enrolled in `year_id` as no longer currently enrolled.
    ///
    /// Returns the number of enrollments reset.
    ///
    /// # Errors
    ///
    /// Returns an error if the reset could not be performed.
    fn reset_enrollments(&mut self, year_id: i64) -> Result<usize, Self::Error>;
}
