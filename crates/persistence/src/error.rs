// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ciclo_domain::DomainError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Failures of the calendar store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The database could not be opened.
    DatabaseConnectionFailed(String),
    /// The path or settings handed to the store are unusable.
    InitializationError(String),
    /// The schema could not be brought up to date.
    MigrationFailed(String),
    /// The connection does not enforce foreign keys.
    ForeignKeyEnforcementNotEnabled,
    /// A statement failed for a reason other than a constraint.
    QueryFailed(String),
    /// The schema refused the write: the single-operating-year index, a
    /// `CHECK`, a foreign key, or a `NOT NULL` column.
    ConstraintViolation(String),
    /// A domain rule refused a dependent-module write, e.g. enrolling into
    /// a closed year.
    WriteRefused(DomainError),
    YearNotFound(i64),
    PeriodNotFound(i64),
    EventNotFound(i64),
    /// A stored row does not describe a valid domain value.
    ReconstructionError(String),
    /// An audit payload could not be encoded or decoded.
    SerializationError(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseConnectionFailed(msg) => write!(f, "Cannot open database: {msg}"),
            Self::InitializationError(msg) => write!(f, "Cannot initialize database: {msg}"),
            Self::MigrationFailed(msg) => write!(f, "Schema migration failed: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::ConstraintViolation(msg) => write!(f, "Constraint violation: {msg}"),
            Self::WriteRefused(err) => write!(f, "Write refused: {err}"),
            Self::YearNotFound(id) => write!(f, "Academic year {id} is not stored"),
            Self::PeriodNotFound(id) => write!(f, "Grading period {id} is not stored"),
            Self::EventNotFound(id) => write!(f, "Audit event {id} is not stored"),
            Self::ReconstructionError(msg) => write!(f, "Corrupt stored row: {msg}"),
            Self::SerializationError(msg) => write!(f, "Audit payload error: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<DieselError> for PersistenceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::CheckViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation,
                info,
            ) => Self::ConstraintViolation(info.message().to_string()),
            other => Self::QueryFailed(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
