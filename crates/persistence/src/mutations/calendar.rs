// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Academic year and grading period writes.
//!
//! Dates are stored as ISO `YYYY-MM-DD` text so they compare correctly as
//! strings in the schema's `CHECK` constraints. Flags are stored as 0/1.

use ciclo_domain::{NewAcademicYear, NewPeriod, PeriodPatch, YearPatch, YearStatus};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::backend::ConnectionExt;
use crate::data_models::{PeriodChangeset, YearChangeset};
use crate::diesel_schema::{academic_years, periods};
use crate::error::PersistenceError;

/// Inserts a `Planning`, non-operating year and its periods.
///
/// # Returns
///
/// The year ID assigned by the database.
///
/// # Errors
///
/// Returns an error if an insert fails.
pub fn insert_year(
    conn: &mut SqliteConnection,
    draft: &NewAcademicYear,
    new_periods: &[NewPeriod],
) -> Result<i64, PersistenceError> {
    diesel::insert_into(academic_years::table)
        .values((
            academic_years::year.eq(i32::from(draft.year)),
            academic_years::status.eq(YearStatus::Planning.as_str()),
            academic_years::is_operating.eq(0),
            academic_years::start_date.eq(draft.start_date.map(|d| d.to_string())),
            academic_years::end_date.eq(draft.end_date.map(|d| d.to_string())),
        ))
        .execute(conn)?;

    let year_id: i64 = conn.last_rowid()?;

    for (position, period) in (1_i32..).zip(new_periods) {
        diesel::insert_into(periods::table)
            .values((
                periods::year_id.eq(year_id),
                periods::position.eq(position),
                periods::name.eq(&period.name),
                periods::start_date.eq(period.start_date.to_string()),
                periods::end_date.eq(period.end_date.to_string()),
                periods::is_locked.eq(0),
                periods::is_force_open.eq(0),
            ))
            .execute(conn)?;
    }

    debug!(year_id, year = draft.year, periods = new_periods.len(), "Inserted academic year");
    Ok(year_id)
}

/// Writes one year patch.
///
/// # Errors
///
/// Returns `PersistenceError::YearNotFound` if no row was updated.
pub fn apply_year_patch(
    conn: &mut SqliteConnection,
    patch: &YearPatch,
) -> Result<(), PersistenceError> {
    let changeset: YearChangeset = YearChangeset {
        status: patch.status.map(|s| s.as_str().to_string()),
        is_operating: patch.is_operating.map(i32::from),
    };

    if changeset.is_empty() {
        return ensure_year_exists(conn, patch.year_id);
    }

    let updated: usize = diesel::update(academic_years::table.find(patch.year_id))
        .set(&changeset)
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::YearNotFound(patch.year_id));
    }

    debug!(year_id = patch.year_id, ?changeset, "Applied year patch");
    Ok(())
}

/// Writes one period patch.
///
/// # Errors
///
/// Returns `PersistenceError::PeriodNotFound` if no row was updated.
pub fn apply_period_patch(
    conn: &mut SqliteConnection,
    period_id: i64,
    patch: &PeriodPatch,
) -> Result<(), PersistenceError> {
    let changeset: PeriodChangeset = PeriodChangeset {
        name: patch.name.clone(),
        start_date: patch.start_date.map(|d| d.to_string()),
        end_date: patch.end_date.map(|d| d.to_string()),
        is_locked: patch.is_locked.map(i32::from),
        is_force_open: patch.is_force_open.map(i32::from),
    };

    if changeset.is_empty() {
        let exists: i64 = periods::table
            .filter(periods::period_id.eq(period_id))
            .count()
            .get_result(conn)?;
        if exists == 0 {
            return Err(PersistenceError::PeriodNotFound(period_id));
        }
        return Ok(());
    }

    let updated: usize = diesel::update(periods::table.find(period_id))
        .set(&changeset)
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::PeriodNotFound(period_id));
    }

    debug!(period_id, ?changeset, "Applied period patch");
    Ok(())
}

fn ensure_year_exists(conn: &mut SqliteConnection, year_id: i64) -> Result<(), PersistenceError> {
    let exists: i64 = academic_years::table
        .filter(academic_years::year_id.eq(year_id))
        .count()
        .get_result(conn)?;
    if exists == 0 {
        return Err(PersistenceError::YearNotFound(year_id));
    }
    Ok(())
}
