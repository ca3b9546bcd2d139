// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The audit trail of the Ciclo calendar.
//!
//! Each accepted lifecycle command yields one [`AuditEvent`]: who asked,
//! why, what was done, and the calendar state on either side of it. Events
//! are values; once stored they are never edited. Rejected commands leave
//! no trace here.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use ciclo_domain::AcademicYear;
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// Who asked for a change: an administrator, a scheduled job, an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Stable identifier of the actor.
    pub id: String,
    /// Kind of actor, e.g. `operator` or `system`.
    pub actor_type: String,
}

impl Actor {
    #[must_use]
    pub fn new(id: impl Into<String>, actor_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            actor_type: actor_type.into(),
        }
    }
}

/// Why a change was made, usually a request or ticket reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    pub id: String,
    pub description: String,
}

impl Cause {
    #[must_use]
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}

/// The lifecycle operation that ran, with a human-readable summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Operation name: `CreateYear`, `ChangeStatus`, `ActivateYear` or
    /// `UpdatePeriod`.
    pub name: String,
    pub details: Option<String>,
}

impl Action {
    #[must_use]
    pub fn new(name: impl Into<String>, details: Option<String>) -> Self {
        Self {
            name: name.into(),
            details,
        }
    }
}

/// Calendar state captured as flat `key=value` text.
///
/// Text keeps old events readable after the tables they describe change
/// shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateSnapshot {
    pub data: String,
}

impl StateSnapshot {
    #[must_use]
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }

    /// The lifecycle fields of one year.
    #[must_use]
    pub fn of_year(year: &AcademicYear) -> Self {
        Self::new(year.summary())
    }

    /// The lifecycle fields of several years, `;`-separated in the given order.
    #[must_use]
    pub fn of_years(years: &[AcademicYear]) -> Self {
        Self::new(
            years
                .iter()
                .map(AcademicYear::summary)
                .collect::<Vec<String>>()
                .join(";"),
        )
    }
}

/// One immutable entry of the audit trail.
///
/// `year_id` and `year` place the event on a year's timeline. A year that
/// is being created has a label but no id yet; storage fills the id in when
/// it inserts the year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Assigned by storage.
    pub event_id: Option<i64>,
    pub year_id: Option<i64>,
    pub year: Option<u16>,
    pub actor: Actor,
    pub cause: Cause,
    pub action: Action,
    pub before: StateSnapshot,
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Builds an event that is not yet placed on any year's timeline.
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            event_id: None,
            year_id: None,
            year: None,
            actor,
            cause,
            action,
            before,
            after,
        }
    }

    /// Places the event on `year`'s timeline.
    #[must_use]
    pub const fn scoped_to(mut self, year: &AcademicYear) -> Self {
        self.year_id = Some(year.year_id);
        self.year = Some(year.year);
        self
    }

    /// Records the label of a year that has no id yet.
    #[must_use]
    pub const fn labelled(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    #[must_use]
    pub const fn with_event_id(mut self, event_id: i64) -> Self {
        self.event_id = Some(event_id);
        self
    }

    /// Whether this event belongs to the timeline of `year_id`.
    #[must_use]
    pub fn belongs_to(&self, year_id: i64) -> bool {
        self.year_id == Some(year_id)
    }
}
