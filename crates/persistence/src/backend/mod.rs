// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Opening and configuring the calendar database.
//!
//! Queries and mutations stay in Diesel's DSL. The few statements that have
//! no DSL form (PRAGMAs, `last_insert_rowid()`) are reached through
//! [`ConnectionExt`] so they live in one place.

pub mod sqlite;

use diesel::SqliteConnection;

use crate::error::PersistenceError;

/// Where a calendar database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// A named in-memory database, private to the connection that opens it.
    Memory(String),
    /// A database file on disk.
    File(String),
}

impl DatabaseLocation {
    /// The connection string handed to `SQLite`.
    #[must_use]
    pub fn url(&self) -> String {
        match self {
            Self::Memory(name) => format!("file:{name}?mode=memory&cache=shared"),
            Self::File(path) => path.clone(),
        }
    }

    /// File databases use write-ahead logging; memory databases cannot.
    #[must_use]
    pub const fn uses_wal(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

/// Connection helpers for raw `SQLite` statements.
pub trait ConnectionExt {
    /// The row ID assigned by the most recent insert on this connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn last_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Whether `PRAGMA foreign_keys` is on.
    ///
    /// # Errors
    ///
    /// Returns an error if the PRAGMA cannot be read.
    fn foreign_keys_on(&mut self) -> Result<bool, PersistenceError>;

    /// Fails unless foreign keys are enforced.
    ///
    /// Period and enrollment rows cascade from their year, and every audit
    /// event points at one, so a connection without enforcement is refused.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ForeignKeyEnforcementNotEnabled` when the
    /// PRAGMA is off.
    fn ensure_foreign_keys(&mut self) -> Result<(), PersistenceError> {
        if self.foreign_keys_on()? {
            Ok(())
        } else {
            Err(PersistenceError::ForeignKeyEnforcementNotEnabled)
        }
    }
}

impl ConnectionExt for SqliteConnection {
    fn last_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::last_rowid(self)
    }

    fn foreign_keys_on(&mut self) -> Result<bool, PersistenceError> {
        sqlite::foreign_keys_on(self)
    }
}
