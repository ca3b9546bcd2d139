// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Ciclo school calendar engine.
//!
//! This crate stores academic years, grading periods, enrollments and the
//! audit trail in `SQLite` through Diesel, and implements the `CalendarStore`
//! and `EnrollmentReset` seams the lifecycle service runs against.
//!
//! ## Atomicity
//!
//! Every lifecycle write runs in one transaction with the audit event that
//! describes it. An activation batch is one transaction as well, so a
//! failure part-way through leaves every year exactly as it was.
//!
//! The schema backs the single-operating-year rule with a partial unique
//! index on `academic_years(is_operating) WHERE is_operating = 1`. Batches
//! must therefore be written with demotions before the promotion.
//!
//! ## Testing
//!
//! Tests run against isolated shared-cache in-memory databases created by
//! `Persistence::new_in_memory`. No external infrastructure is needed.

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
#![allow(clippy::multiple_crate_versions)]

use ciclo::{CalendarStore, EnrollmentReset};
use ciclo_audit::AuditEvent;
use ciclo_domain::{
    AcademicYear, DependentModule, NewAcademicYear, NewPeriod, PeriodPatch, YearPatch,
    ensure_writable,
};
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

use backend::{ConnectionExt, DatabaseLocation};

/// Sequence for naming in-memory databases, so no two instances share one.
static MEMORY_DB_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// `SQLite` store for the calendar, enrollments and audit trail.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    fn open(location: &DatabaseLocation) -> Result<Self, PersistenceError> {
        let conn: SqliteConnection = backend::sqlite::open(location)?;
        Ok(Self { conn })
    }

    /// Opens a fresh, private in-memory calendar.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let sequence: u64 = MEMORY_DB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self::open(&DatabaseLocation::Memory(format!("ciclo_calendar_{sequence}")))
    }

    /// Opens (or creates) the calendar stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not valid UTF-8, or the database
    /// cannot be opened or migrated.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path: &Path = path.as_ref();
        let Some(path_str) = path.to_str() else {
            return Err(PersistenceError::InitializationError(format!(
                "database path {} is not valid UTF-8",
                path.display()
            )));
        };

        let persistence: Self = Self::open(&DatabaseLocation::File(path_str.to_string()))?;
        info!(path = path_str, "Calendar database ready");
        Ok(persistence)
    }

    /// Checks that the connection still enforces foreign keys.
    ///
    /// # Errors
    ///
    /// Returns an error if enforcement is off or the PRAGMA cannot be read.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.ensure_foreign_keys()
    }

    // ========================================================================
    // Calendar
    // ========================================================================

    /// Loads every academic year with its periods.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_years(&mut self) -> Result<Vec<AcademicYear>, PersistenceError> {
        queries::list_years(&mut self.conn)
    }

    /// Loads one academic year with its periods.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::YearNotFound` if the year does not exist.
    pub fn get_year(&mut self, year_id: i64) -> Result<AcademicYear, PersistenceError> {
        queries::get_year(&mut self.conn, year_id)
    }

    /// Inserts a year with its periods and the audit event recording it.
    ///
    /// The event is scoped to the new year id.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is written in that case.
    pub fn insert_year(
        &mut self,
        draft: &NewAcademicYear,
        periods: &[NewPeriod],
        event: &AuditEvent,
    ) -> Result<AcademicYear, PersistenceError> {
        let year_id: i64 = self.conn.transaction::<_, PersistenceError, _>(|conn| {
            let year_id: i64 = mutations::insert_year(conn, draft, periods)?;
            mutations::persist_audit_event(conn, event, Some(year_id))?;
            Ok(year_id)
        })?;

        self.get_year(year_id)
    }

    /// Writes year patches in order, with their audit event, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; nothing is written in that case.
    pub fn persist_year_patches(
        &mut self,
        patches: &[YearPatch],
        event: &AuditEvent,
    ) -> Result<i64, PersistenceError> {
        let event_id: i64 = self.conn.transaction::<_, PersistenceError, _>(|conn| {
            for patch in patches {
                mutations::apply_year_patch(conn, patch)?;
            }
            mutations::persist_audit_event(conn, event, None)
        })?;

        debug!(event_id, patches = patches.len(), "Committed year patches");
        Ok(event_id)
    }

    /// Writes a period patch with its audit event in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; nothing is written in that case.
    pub fn persist_period_patch(
        &mut self,
        period_id: i64,
        patch: &PeriodPatch,
        event: &AuditEvent,
    ) -> Result<i64, PersistenceError> {
        self.conn.transaction::<_, PersistenceError, _>(|conn| {
            mutations::apply_period_patch(conn, period_id, patch)?;
            mutations::persist_audit_event(conn, event, None)
        })
    }

    // ========================================================================
    // Audit Event Queries
    // ========================================================================

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be deserialized.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves every audit event of a year, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if events cannot be retrieved or deserialized.
    pub fn get_audit_timeline(&mut self, year_id: i64) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::get_audit_timeline(&mut self.conn, year_id)
    }

    // ========================================================================
    // Enrollments
    // ========================================================================

    /// Enrolls a student in a year.
    ///
    /// The year is checked against the read-only gate in the same
    /// transaction as the insert.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The year does not exist
    /// - The year is closed (`PersistenceError::WriteRefused`)
    /// - The insert fails
    pub fn enroll_student(
        &mut self,
        year_id: i64,
        student_name: &str,
    ) -> Result<i64, PersistenceError> {
        self.conn.transaction::<_, PersistenceError, _>(|conn| {
            let year: AcademicYear = queries::get_year(conn, year_id)?;
            ensure_writable(&year, DependentModule::Enrollment)
                .map_err(PersistenceError::WriteRefused)?;
            mutations::insert_enrollment(conn, year_id, student_name)
        })
    }

    /// Counts students still currently enrolled in a year.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_current_enrollments(&mut self, year_id: i64) -> Result<usize, PersistenceError> {
        queries::count_current_enrollments(&mut self.conn, year_id)
    }
}

impl CalendarStore for Persistence {
    type Error = PersistenceError;

    fn load_years(&mut self) -> Result<Vec<AcademicYear>, Self::Error> {
        self.list_years()
    }

    fn create_year(
        &mut self,
        draft: &NewAcademicYear,
        periods: &[NewPeriod],
        event: &AuditEvent,
    ) -> Result<AcademicYear, Self::Error> {
        self.insert_year(draft, periods, event)
    }

    fn save_year_patch(&mut self, patch: &YearPatch, event: &AuditEvent) -> Result<(), Self::Error> {
        self.persist_year_patches(std::slice::from_ref(patch), event)
            .map(|_| ())
    }

    fn save_year_patches(
        &mut self,
        patches: &[YearPatch],
        event: &AuditEvent,
    ) -> Result<(), Self::Error> {
        self.persist_year_patches(patches, event).map(|_| ())
    }

    fn save_period_patch(
        &mut self,
        period_id: i64,
        patch: &PeriodPatch,
        event: &AuditEvent,
    ) -> Result<(), Self::Error> {
        self.persist_period_patch(period_id, patch, event)
            .map(|_| ())
    }
}

impl EnrollmentReset for Persistence {
    type Error = PersistenceError;

    fn reset_enrollments(&mut self, year_id: i64) -> Result<usize, Self::Error> {
        let count: usize = mutations::reset_enrollments(&mut self.conn, year_id)?;
        debug!(year_id, count, "Reset current enrollments");
        Ok(count)
    }
}
