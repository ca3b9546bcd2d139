// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reading the audit trail back.

use ciclo_audit::AuditEvent;
use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;

use crate::data_models::AuditEventRow;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Fetches one audit event.
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if there is no such event, or
/// an error if the stored payload cannot be decoded.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    audit_events::table
        .find(event_id)
        .select(AuditEventRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::EventNotFound(event_id))
        .and_then(decode)
}

/// The timeline of `year_id`, oldest event first.
///
/// # Errors
///
/// Returns an error if the query fails or a payload cannot be decoded.
pub fn get_audit_timeline(
    conn: &mut SqliteConnection,
    year_id: i64,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    audit_events::table
        .filter(audit_events::year_id.eq(year_id))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load(conn)?
        .into_iter()
        .map(decode)
        .collect()
}

fn decode(row: AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    let year: Option<u16> = match row.year {
        Some(label) => Some(label.to_u16().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "audit event {} has year label {label}",
                row.event_id
            ))
        })?),
        None => None,
    };

    let event: AuditEvent = AuditEvent::new(
        serde_json::from_str(&row.actor_json)?,
        serde_json::from_str(&row.cause_json)?,
        serde_json::from_str(&row.action_json)?,
        serde_json::from_str(&row.before_snapshot_json)?,
        serde_json::from_str(&row.after_snapshot_json)?,
    );

    Ok(AuditEvent {
        year_id: row.year_id,
        year,
        ..event.with_event_id(row.event_id)
    })
}
