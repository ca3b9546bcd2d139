// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` statements with no Diesel DSL equivalent.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use super::{ConnectionExt, DatabaseLocation};
use crate::error::PersistenceError;

/// Calendar schema, embedded at compile time.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

pub(super) fn last_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

pub(super) fn foreign_keys_on(conn: &mut SqliteConnection) -> Result<bool, PersistenceError> {
    let pragma: ForeignKeysPragma = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    Ok(pragma.foreign_keys != 0)
}

fn pragma(conn: &mut SqliteConnection, statement: &str) -> Result<(), PersistenceError> {
    diesel::sql_query(statement)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("{statement}: {e}")))?;
    Ok(())
}

/// Opens the database at `location`, configures it and brings the schema up
/// to date.
///
/// Foreign keys are switched on before migrating so the schema's cascades
/// hold from the first write; the setting is then checked rather than
/// trusted.
///
/// # Errors
///
/// Returns an error if:
/// - The database cannot be opened
/// - A PRAGMA fails
/// - A migration fails
/// - Foreign keys are still not enforced
pub fn open(location: &DatabaseLocation) -> Result<SqliteConnection, PersistenceError> {
    let url: String = location.url();
    info!(database = %url, "Opening calendar database");

    let mut conn: SqliteConnection = SqliteConnection::establish(&url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    pragma(&mut conn, "PRAGMA foreign_keys = ON")?;
    if location.uses_wal() {
        pragma(&mut conn, "PRAGMA journal_mode = WAL")?;
    }

    let applied: usize = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?
        .len();
    debug!(applied, "Calendar schema migrated");

    conn.ensure_foreign_keys()?;
    Ok(conn)
}
