// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The lifecycle orchestrator.
//!
//! `LifecycleService` is the only component that writes `status`,
//! `is_operating`, `is_locked` or `is_force_open`. Each operation loads a
//! fresh calendar, validates through `apply`, persists the resulting change
//! together with its audit event, runs side effects, and returns a freshly
//! loaded calendar.

use crate::apply::apply;
use crate::command::Command;
use crate::error::{CoreError, LifecycleError};
use crate::state::{Calendar, Change, SideEffect, TransitionResult};
use crate::store::{CalendarStore, EnrollmentReset};
use ciclo_audit::{Actor, Cause};
use ciclo_domain::{AcademicYear, NewAcademicYear, PeriodPatch, YearStatus};
use tracing::{debug, info, warn};

/// Orchestrates lifecycle commands against a store.
#[derive(Debug)]
pub struct LifecycleService<S> {
    store: S,
}

impl<S> LifecycleService<S>
where
    S: CalendarStore + EnrollmentReset,
{
    /// Creates a service over `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrows the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrows the underlying store.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Loads the current calendar.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn calendar(&mut self) -> Result<Calendar, LifecycleError<<S as CalendarStore>::Error>> {
        self.store
            .load_years()
            .map(Calendar::new)
            .map_err(LifecycleError::Persistence)
    }

    /// Moves a year along one edge of the transition table.
    ///
    /// Closing an open year resets its enrollments afterwards. That reset
    /// is best-effort: a failure is logged and the status change stands.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The year does not exist
    /// - The transition is not allowed
    /// - The store fails
    pub fn change_status(
        &mut self,
        year_id: i64,
        status: YearStatus,
        actor: Actor,
        cause: Cause,
    ) -> Result<Calendar, LifecycleError<<S as CalendarStore>::Error>> {
        self.execute(Command::ChangeStatus { year_id, status }, actor, cause)?;
        self.calendar()
    }

    /// Makes a year the sole operating year.
    ///
    /// All patches are written in one transaction, demotions first.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The year does not exist
    /// - The year is closed
    /// - The store fails (nothing is applied)
    pub fn activate_year(
        &mut self,
        year_id: i64,
        actor: Actor,
        cause: Cause,
    ) -> Result<Calendar, LifecycleError<<S as CalendarStore>::Error>> {
        self.execute(Command::ActivateYear { year_id }, actor, cause)?;
        self.calendar()
    }

    /// Edits a grading period.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The period does not exist
    /// - The owning year is closed
    /// - The edited period is invalid or overlaps a sibling
    /// - The store fails
    pub fn update_period(
        &mut self,
        period_id: i64,
        patch: PeriodPatch,
        actor: Actor,
        cause: Cause,
    ) -> Result<Calendar, LifecycleError<<S as CalendarStore>::Error>> {
        self.execute(Command::UpdatePeriod { period_id, patch }, actor, cause)?;
        self.calendar()
    }

    /// Creates a year in `Planning` with explicit or default periods.
    ///
    /// Other years are not touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is invalid or the store fails.
    pub fn create_year(
        &mut self,
        draft: NewAcademicYear,
        actor: Actor,
        cause: Cause,
    ) -> Result<AcademicYear, LifecycleError<<S as CalendarStore>::Error>> {
        let label: u16 = draft.year;
        let year: AcademicYear = self
            .execute(Command::CreateYear { draft }, actor, cause)?
            .ok_or(LifecycleError::Rejected(CoreError::YearNotCreated(label)))?;
        info!(year_id = year.year_id, year = year.year, "Created academic year");
        Ok(year)
    }

    /// Validates, persists and runs the side effects of `command`.
    ///
    /// Returns the inserted year when the command created one.
    fn execute(
        &mut self,
        command: Command,
        actor: Actor,
        cause: Cause,
    ) -> Result<Option<AcademicYear>, LifecycleError<<S as CalendarStore>::Error>> {
        let calendar: Calendar = self.calendar()?;
        let name: &'static str = command.name();

        let result: TransitionResult = apply(&calendar, command, actor, cause).map_err(|e| {
            debug!(command = name, error = %e, "Command rejected");
            LifecycleError::Rejected(e)
        })?;

        let created: Option<AcademicYear> = self.persist(&result)?;
        info!(
            command = name,
            year_id = ?result.audit_event.year_id,
            "Command committed"
        );

        self.run_side_effects(&result.side_effects);
        Ok(created)
    }

    fn persist(
        &mut self,
        result: &TransitionResult,
    ) -> Result<Option<AcademicYear>, LifecycleError<<S as CalendarStore>::Error>> {
        let event = &result.audit_event;
        match &result.change {
            Change::CreateYear { draft, periods } => {
                self.store.create_year(draft, periods, event).map(Some)
            }
            Change::YearPatch(patch) => self.store.save_year_patch(patch, event).map(|()| None),
            Change::YearPatches(patches) => {
                self.store.save_year_patches(patches, event).map(|()| None)
            }
            Change::PeriodPatch { period_id, patch } => self
                .store
                .save_period_patch(*period_id, patch, event)
                .map(|()| None),
        }
        .map_err(LifecycleError::Persistence)
    }

    fn run_side_effects(&mut self, side_effects: &[SideEffect]) {
        for effect in side_effects {
            match *effect {
                SideEffect::ResetEnrollments { year_id } => {
                    match self.store.reset_enrollments(year_id) {
                        Ok(count) => {
                            info!(year_id, count, "Reset enrollments for closed year");
                        }
                        Err(e) => {
                            warn!(
                                year_id,
                                error = %e,
                                "Enrollment reset failed; year stays closed"
                            );
                        }
                    }
                }
            }
        }
    }
}
