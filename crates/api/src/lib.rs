// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transport-neutral API boundary for the academic calendar engine.
//!
//! Requests arrive as plain DTOs, are parsed into domain types, and are
//! executed through `LifecycleService`. Errors from every lower layer are
//! translated explicitly into `ApiError`.
//!
//! Authentication is not handled here. Callers identify themselves only
//! for audit attribution.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

use ciclo_audit::Actor;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_lifecycle_error,
    translate_persistence_error,
};
pub use handlers::{
    Service, activate_year, change_status, check_period_entry, create_year, get_audit_timeline,
    get_year_gates, list_years, update_period,
};
pub use request_response::{
    ActivateYearResponse, AuditEventInfo, AuditTimelineResponse, ChangeStatusRequest,
    ChangeStatusResponse, CreateYearRequest, CreateYearResponse, ListYearsResponse,
    NewPeriodRequest, PeriodEntryRequest, PeriodEntryResponse, PeriodInfo, UpdatePeriodRequest,
    UpdatePeriodResponse, YearGatesResponse, YearInfo,
};

/// Actor type recorded for every API caller.
pub const OPERATOR_ACTOR_TYPE: &str = "operator";

/// Builds the audit actor for an API caller.
#[must_use]
pub fn operator_actor(actor_id: String) -> Actor {
    Actor::new(actor_id, String::from(OPERATOR_ACTOR_TYPE))
}
