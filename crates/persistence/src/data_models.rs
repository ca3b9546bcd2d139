// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use crate::diesel_schema::{academic_years, audit_events, periods};

/// Diesel row for `academic_years`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = academic_years)]
pub struct AcademicYearRow {
    pub year_id: i64,
    pub year: i32,
    pub status: String,
    pub is_operating: i32,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Diesel row for `periods`.
///
/// `position` is not selected; queries order by it and the domain keeps the
/// resulting `Vec` order.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = periods)]
pub struct PeriodRow {
    pub period_id: i64,
    pub year_id: i64,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub is_locked: i32,
    pub is_force_open: i32,
}

/// Partial update of an academic year. `None` columns are left untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = academic_years)]
pub struct YearChangeset {
    pub status: Option<String>,
    pub is_operating: Option<i32>,
}

impl YearChangeset {
    pub const fn is_empty(&self) -> bool {
        self.status.is_none() && self.is_operating.is_none()
    }
}

/// Partial update of a grading period. `None` columns are left untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = periods)]
pub struct PeriodChangeset {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_locked: Option<i32>,
    pub is_force_open: Option<i32>,
}

impl PeriodChangeset {
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.is_locked.is_none()
            && self.is_force_open.is_none()
    }
}

/// An `audit_events` row ready to insert. Attribution and snapshots are
/// stored as JSON text.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = audit_events)]
pub struct NewAuditEventRow {
    pub year_id: Option<i64>,
    pub year: Option<i32>,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
}

/// Diesel row for `audit_events`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = audit_events)]
pub struct AuditEventRow {
    pub event_id: i64,
    pub year_id: Option<i64>,
    pub year: Option<i32>,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
}
