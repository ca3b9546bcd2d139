// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::backend::ConnectionExt;
use crate::diesel_schema::enrollments;
use crate::error::PersistenceError;

/// Enrolls a student in a year as currently enrolled.
///
/// # Returns
///
/// The enrollment ID assigned by the database.
///
/// # Errors
///
/// Returns an error if the insert fails (including an unknown year).
pub fn insert_enrollment(
    conn: &mut SqliteConnection,
    year_id: i64,
    student_name: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(enrollments::table)
        .values((
            enrollments::year_id.eq(year_id),
            enrollments::student_name.eq(student_name),
            enrollments::is_current.eq(1),
        ))
        .execute(conn)?;

    conn.last_rowid()
}

/// Marks every current enrollment of `year_id` as no longer current.
///
/// # Returns
///
/// The number of enrollments reset.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn reset_enrollments(
    conn: &mut SqliteConnection,
    year_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(
        enrollments::table
            .filter(enrollments::year_id.eq(year_id))
            .filter(enrollments::is_current.eq(1)),
    )
    .set(enrollments::is_current.eq(0))
    .execute(conn)?)
}
