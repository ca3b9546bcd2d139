// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use ciclo::{CoreError, LifecycleError};
use ciclo_domain::DomainError;
use ciclo_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { message, .. } => write!(f, "{message}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// Rule violations keep the domain's operator-facing message verbatim.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidTransition { .. } => ApiError::DomainRuleViolation {
            rule: String::from("status_transition"),
            message,
        },
        DomainError::YearNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Academic year"),
            message,
        },
        DomainError::PeriodNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Grading period"),
            message,
        },
        DomainError::PeriodFrozen { .. } => ApiError::DomainRuleViolation {
            rule: String::from("period_frozen"),
            message,
        },
        DomainError::PeriodOverlap { .. } => ApiError::DomainRuleViolation {
            rule: String::from("period_overlap"),
            message,
        },
        DomainError::YearReadOnly { .. } => ApiError::DomainRuleViolation {
            rule: String::from("year_read_only"),
            message,
        },
        DomainError::InvalidDateRange { .. } => ApiError::InvalidInput {
            field: String::from("date_range"),
            message,
        },
        DomainError::InvalidYearLabel(_) => ApiError::InvalidInput {
            field: String::from("year"),
            message,
        },
        DomainError::InvalidPeriodName(_) => ApiError::InvalidInput {
            field: String::from("name"),
            message,
        },
        DomainError::NoPeriods { .. } => ApiError::InvalidInput {
            field: String::from("periods"),
            message,
        },
        DomainError::InvalidYearStatus(_) => ApiError::InvalidInput {
            field: String::from("status"),
            message,
        },
        DomainError::DateParseError { .. } => ApiError::InvalidInput {
            field: String::from("date"),
            message,
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::YearNotCreated(_) => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Missing rows become `ResourceNotFound`. Refused writes keep their domain
/// translation and schema constraint hits are rule violations. Everything
/// else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::YearNotFound(year_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Academic year"),
            message: format!("Academic year {year_id} not found"),
        },
        PersistenceError::PeriodNotFound(period_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Grading period"),
            message: format!("Grading period {period_id} not found"),
        },
        PersistenceError::EventNotFound(event_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Audit event"),
            message: format!("Audit event {event_id} not found"),
        },
        PersistenceError::WriteRefused(domain_err) => translate_domain_error(domain_err),
        PersistenceError::ConstraintViolation(msg) => ApiError::DomainRuleViolation {
            rule: String::from("storage_constraint"),
            message: msg,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

/// Translates an orchestrator error into an API error.
#[must_use]
pub fn translate_lifecycle_error(err: LifecycleError<PersistenceError>) -> ApiError {
    match err {
        LifecycleError::Rejected(core_err) => translate_core_error(core_err),
        LifecycleError::Persistence(persistence_err) => {
            translate_persistence_error(persistence_err)
        }
    }
}
