// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ciclo_audit::AuditEvent;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::backend::ConnectionExt;
use crate::data_models::NewAuditEventRow;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

fn to_row(event: &AuditEvent, year_id: Option<i64>) -> Result<NewAuditEventRow, PersistenceError> {
    Ok(NewAuditEventRow {
        year_id: year_id.or(event.year_id),
        year: event.year.map(i32::from),
        actor_json: serde_json::to_string(&event.actor)?,
        cause_json: serde_json::to_string(&event.cause)?,
        action_json: serde_json::to_string(&event.action)?,
        before_snapshot_json: serde_json::to_string(&event.before)?,
        after_snapshot_json: serde_json::to_string(&event.after)?,
    })
}

/// Appends `event` to the audit trail.
///
/// `year_id` places the event on a timeline the event itself could not
/// name, which happens when the year was inserted in the same transaction.
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if the event cannot be serialized or inserted.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
    year_id: Option<i64>,
) -> Result<i64, PersistenceError> {
    let row: NewAuditEventRow = to_row(event, year_id)?;
    diesel::insert_into(audit_events::table)
        .values(&row)
        .execute(conn)?;

    let event_id: i64 = conn.last_rowid()?;
    debug!(event_id, year_id = ?row.year_id, action = %event.action.name, "Recorded audit event");
    Ok(event_id)
}
