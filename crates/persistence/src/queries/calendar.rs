// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Academic year and grading period queries.

use std::collections::HashMap;

use ciclo_domain::{AcademicYear, Period, YearStatus, parse_date};
use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;

use crate::data_models::{AcademicYearRow, PeriodRow};
use crate::diesel_schema::{academic_years, periods};
use crate::error::PersistenceError;

/// Loads every academic year with its periods.
///
/// Years are ordered by label then id; periods by position.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_years(conn: &mut SqliteConnection) -> Result<Vec<AcademicYear>, PersistenceError> {
    let year_rows: Vec<AcademicYearRow> = academic_years::table
        .order((academic_years::year.asc(), academic_years::year_id.asc()))
        .select(AcademicYearRow::as_select())
        .load(conn)?;

    let period_rows: Vec<PeriodRow> = periods::table
        .order((periods::year_id.asc(), periods::position.asc()))
        .select(PeriodRow::as_select())
        .load(conn)?;

    let mut by_year: HashMap<i64, Vec<Period>> = HashMap::new();
    for row in period_rows {
        let year_id: i64 = row.year_id;
        by_year.entry(year_id).or_default().push(period_from_row(row)?);
    }

    year_rows
        .into_iter()
        .map(|row| {
            let owned: Vec<Period> = by_year.remove(&row.year_id).unwrap_or_default();
            year_from_row(row, owned)
        })
        .collect()
}

/// Loads one academic year with its periods.
///
/// # Errors
///
/// Returns `PersistenceError::YearNotFound` if no such year exists.
pub fn get_year(conn: &mut SqliteConnection, year_id: i64) -> Result<AcademicYear, PersistenceError> {
    let row: AcademicYearRow = academic_years::table
        .filter(academic_years::year_id.eq(year_id))
        .select(AcademicYearRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::YearNotFound(year_id))?;

    let period_rows: Vec<PeriodRow> = periods::table
        .filter(periods::year_id.eq(year_id))
        .order(periods::position.asc())
        .select(PeriodRow::as_select())
        .load(conn)?;

    let owned: Vec<Period> = period_rows
        .into_iter()
        .map(period_from_row)
        .collect::<Result<_, _>>()?;

    year_from_row(row, owned)
}

fn year_from_row(row: AcademicYearRow, periods: Vec<Period>) -> Result<AcademicYear, PersistenceError> {
    let year: u16 = row.year.to_u16().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("Year label out of range: {}", row.year))
    })?;
    let status: YearStatus = row
        .status
        .parse()
        .map_err(|e: ciclo_domain::DomainError| PersistenceError::ReconstructionError(e.to_string()))?;

    Ok(AcademicYear {
        year_id: row.year_id,
        year,
        status,
        is_operating: row.is_operating != 0,
        start_date: row.start_date.as_deref().map(stored_date).transpose()?,
        end_date: row.end_date.as_deref().map(stored_date).transpose()?,
        periods,
    })
}

fn period_from_row(row: PeriodRow) -> Result<Period, PersistenceError> {
    Ok(Period {
        period_id: row.period_id,
        name: row.name,
        start_date: stored_date(&row.start_date)?,
        end_date: stored_date(&row.end_date)?,
        is_locked: row.is_locked != 0,
        is_force_open: row.is_force_open != 0,
    })
}

fn stored_date(value: &str) -> Result<time::Date, PersistenceError> {
    parse_date(value).map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}
