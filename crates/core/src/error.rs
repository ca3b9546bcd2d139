// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ciclo_domain::DomainError;

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The store committed a creation without handing back the new year.
    YearNotCreated(u16),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::YearNotCreated(year) => {
                write!(f, "Academic year {year} was not returned after creation")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

/// Errors returned by `LifecycleService`.
///
/// `Rejected` means validation failed and nothing was written.
/// `Persistence` means the store failed; the store's own error is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError<E> {
    /// The command was rejected before any write.
    Rejected(CoreError),
    /// The store rejected a read or write.
    Persistence(E),
}

impl<E: std::fmt::Display> std::fmt::Display for LifecycleError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "Persistence failure: {err}"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for LifecycleError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::Persistence(err) => Some(err),
        }
    }
}

impl<E> From<CoreError> for LifecycleError<E> {
    fn from(err: CoreError) -> Self {
        Self::Rejected(err)
    }
}

impl<E> From<DomainError> for LifecycleError<E> {
    fn from(err: DomainError) -> Self {
        Self::Rejected(CoreError::DomainViolation(err))
    }
}
