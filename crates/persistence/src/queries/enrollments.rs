// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;

use crate::diesel_schema::enrollments;
use crate::error::PersistenceError;

/// Counts students still marked as currently enrolled in `year_id`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_current_enrollments(
    conn: &mut SqliteConnection,
    year_id: i64,
) -> Result<usize, PersistenceError> {
    let count: i64 = enrollments::table
        .filter(enrollments::year_id.eq(year_id))
        .filter(enrollments::is_current.eq(1))
        .count()
        .get_result(conn)?;

    count
        .to_usize()
        .ok_or_else(|| PersistenceError::ReconstructionError(format!("Invalid count: {count}")))
}
