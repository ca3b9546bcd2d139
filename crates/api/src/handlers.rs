// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Each handler parses its request into domain types, drives the
//! `LifecycleService`, and converts the fresh read model into a response.
//! Derived gates are recomputed on every call.

use std::str::FromStr;

use ciclo::{Calendar, LifecycleService};
use ciclo_audit::{Actor, AuditEvent, Cause};
use ciclo_domain::{
    AcademicYear, EntryDecision, NewAcademicYear, NewPeriod, Period, PeriodPatch, YearStatus,
    can_enroll, can_enter_data, can_modify_academic_data, current_period, is_read_only,
    parse_date,
};
use ciclo_persistence::Persistence;
use time::Date;
use tracing::info;

use crate::error::{
    ApiError, translate_domain_error, translate_lifecycle_error, translate_persistence_error,
};
use crate::request_response::{
    ActivateYearResponse, AuditEventInfo, AuditTimelineResponse, ChangeStatusRequest,
    ChangeStatusResponse, CreateYearRequest, CreateYearResponse, ListYearsResponse,
    NewPeriodRequest, PeriodEntryRequest, PeriodEntryResponse, PeriodInfo, UpdatePeriodRequest,
    UpdatePeriodResponse, YearGatesResponse, YearInfo,
};

/// The orchestrator every handler drives.
pub type Service = LifecycleService<Persistence>;

fn period_info(period: &Period) -> PeriodInfo {
    PeriodInfo {
        period_id: period.period_id,
        name: period.name.clone(),
        start_date: period.start_date.to_string(),
        end_date: period.end_date.to_string(),
        is_locked: period.is_locked,
        is_force_open: period.is_force_open,
    }
}

fn year_info(year: &AcademicYear) -> YearInfo {
    YearInfo {
        year_id: year.year_id,
        year: year.year,
        status: year.status.as_str().to_string(),
        is_operating: year.is_operating,
        is_read_only: is_read_only(year),
        start_date: year.start_date.map(|d| d.to_string()),
        end_date: year.end_date.map(|d| d.to_string()),
        periods: year.periods.iter().map(period_info).collect(),
    }
}

fn entry_response(
    period: &Period,
    year: &AcademicYear,
    date: Date,
    decision: EntryDecision,
) -> PeriodEntryResponse {
    PeriodEntryResponse {
        period_id: period.period_id,
        year_id: year.year_id,
        date: date.to_string(),
        allowed: decision.allowed,
        reason: decision.reason.as_str().to_string(),
        in_window: decision.in_window,
        forced: decision.forced,
        year_active: decision.year_active,
    }
}

fn audit_event_info(event: &AuditEvent) -> AuditEventInfo {
    AuditEventInfo {
        event_id: event.event_id,
        actor_id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
        cause_id: event.cause.id.clone(),
        cause_description: event.cause.description.clone(),
        action_name: event.action.name.clone(),
        action_details: event.action.details.clone(),
        before_snapshot: event.before.data.clone(),
        after_snapshot: event.after.data.clone(),
    }
}

fn optional_date(value: Option<&str>) -> Result<Option<Date>, ApiError> {
    value
        .map(parse_date)
        .transpose()
        .map_err(translate_domain_error)
}

fn year_not_found(year_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Academic year"),
        message: format!("Academic year {year_id} not found"),
    }
}

fn load_calendar(service: &mut Service) -> Result<Calendar, ApiError> {
    service.calendar().map_err(translate_lifecycle_error)
}

/// Lists every academic year with its periods.
///
/// # Errors
///
/// Returns an error if the calendar cannot be loaded.
pub fn list_years(service: &mut Service) -> Result<ListYearsResponse, ApiError> {
    let calendar: Calendar = load_calendar(service)?;

    Ok(ListYearsResponse {
        years: calendar.years.iter().map(year_info).collect(),
        operating_year_id: calendar.operating_year().map(|y| y.year_id),
    })
}

/// Evaluates every gate of one year for `today`.
///
/// # Errors
///
/// Returns an error if the year does not exist or the calendar cannot be
/// loaded.
pub fn get_year_gates(
    service: &mut Service,
    year_id: i64,
    today: Date,
) -> Result<YearGatesResponse, ApiError> {
    let calendar: Calendar = load_calendar(service)?;
    let year: &AcademicYear = calendar
        .find_year(year_id)
        .ok_or_else(|| year_not_found(year_id))?;

    Ok(YearGatesResponse {
        year_id: year.year_id,
        year: year.year,
        date: today.to_string(),
        is_read_only: is_read_only(year),
        can_enroll: can_enroll(year),
        can_modify_academic_data: can_modify_academic_data(year),
        current_period_id: current_period(year, today).map(|p| p.period_id),
        periods: year
            .periods
            .iter()
            .map(|p| entry_response(p, year, today, can_enter_data(p, year, today)))
            .collect(),
    })
}

/// Decides whether data may be entered for one period.
///
/// `today` is used when the request carries no date.
///
/// # Errors
///
/// Returns an error if:
/// - The date cannot be parsed
/// - The period does not exist
/// - The calendar cannot be loaded
pub fn check_period_entry(
    service: &mut Service,
    request: &PeriodEntryRequest,
    today: Date,
) -> Result<PeriodEntryResponse, ApiError> {
    let date: Date = optional_date(request.date.as_deref())?.unwrap_or(today);
    let calendar: Calendar = load_calendar(service)?;
    let (year, period) =
        calendar
            .find_period(request.period_id)
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("Grading period"),
                message: format!("Grading period {} not found", request.period_id),
            })?;

    Ok(entry_response(
        period,
        year,
        date,
        can_enter_data(period, year, date),
    ))
}

fn new_period(request: &NewPeriodRequest) -> Result<NewPeriod, ApiError> {
    let start_date: Date = parse_date(&request.start_date).map_err(translate_domain_error)?;
    let end_date: Date = parse_date(&request.end_date).map_err(translate_domain_error)?;
    Ok(NewPeriod::new(request.name.clone(), start_date, end_date))
}

/// Creates an academic year in `Planning`.
///
/// # Errors
///
/// Returns an error if:
/// - A date cannot be parsed
/// - The draft violates a domain rule
/// - The store fails
pub fn create_year(
    service: &mut Service,
    request: &CreateYearRequest,
    actor: Actor,
    cause: Cause,
) -> Result<CreateYearResponse, ApiError> {
    let periods: Option<Vec<NewPeriod>> = request
        .periods
        .as_ref()
        .map(|periods| {
            periods
                .iter()
                .map(new_period)
                .collect::<Result<Vec<NewPeriod>, ApiError>>()
        })
        .transpose()?;

    let draft: NewAcademicYear = NewAcademicYear {
        year: request.year,
        start_date: optional_date(request.start_date.as_deref())?,
        end_date: optional_date(request.end_date.as_deref())?,
        periods,
    };

    let year: AcademicYear = service
        .create_year(draft, actor, cause)
        .map_err(translate_lifecycle_error)?;

    info!(year_id = year.year_id, year = year.year, "Year created via API");

    Ok(CreateYearResponse {
        message: format!(
            "Created academic year {} with {} grading periods",
            year.year,
            year.periods.len()
        ),
        year: year_info(&year),
    })
}

/// Moves a year to the requested status.
///
/// # Errors
///
/// Returns an error if:
/// - The status label is unknown
/// - The year does not exist
/// - The transition is not allowed
/// - The store fails
pub fn change_status(
    service: &mut Service,
    request: &ChangeStatusRequest,
    actor: Actor,
    cause: Cause,
) -> Result<ChangeStatusResponse, ApiError> {
    let status: YearStatus = YearStatus::from_str(&request.status).map_err(translate_domain_error)?;

    let calendar: Calendar = service
        .change_status(request.year_id, status, actor, cause)
        .map_err(translate_lifecycle_error)?;
    let year: &AcademicYear = calendar
        .find_year(request.year_id)
        .ok_or_else(|| year_not_found(request.year_id))?;

    Ok(ChangeStatusResponse {
        message: format!("Academic year {} is now {status}", year.year),
        year: year_info(year),
    })
}

/// Makes a year the sole operating year.
///
/// # Errors
///
/// Returns an error if:
/// - The year does not exist
/// - The year is closed
/// - The store fails
pub fn activate_year(
    service: &mut Service,
    year_id: i64,
    actor: Actor,
    cause: Cause,
) -> Result<ActivateYearResponse, ApiError> {
    let calendar: Calendar = service
        .activate_year(year_id, actor, cause)
        .map_err(translate_lifecycle_error)?;
    let year: &AcademicYear = calendar
        .find_year(year_id)
        .ok_or_else(|| year_not_found(year_id))?;

    Ok(ActivateYearResponse {
        operating_year_id: year.year_id,
        message: format!("Academic year {} is now the operating year", year.year),
        years: calendar.years.iter().map(year_info).collect(),
    })
}

/// Edits a grading period.
///
/// # Errors
///
/// Returns an error if:
/// - A date cannot be parsed
/// - The period does not exist
/// - The owning year is closed
/// - The edit violates a domain rule
/// - The store fails
pub fn update_period(
    service: &mut Service,
    request: &UpdatePeriodRequest,
    actor: Actor,
    cause: Cause,
) -> Result<UpdatePeriodResponse, ApiError> {
    let patch: PeriodPatch = PeriodPatch {
        name: request.name.clone(),
        start_date: optional_date(request.start_date.as_deref())?,
        end_date: optional_date(request.end_date.as_deref())?,
        is_locked: request.is_locked,
        is_force_open: request.is_force_open,
    };

    let calendar: Calendar = service
        .update_period(request.period_id, patch, actor, cause)
        .map_err(translate_lifecycle_error)?;
    let (year, period) =
        calendar
            .find_period(request.period_id)
            .ok_or_else(|| ApiError::Internal {
                message: format!(
                    "Grading period {} disappeared after update",
                    request.period_id
                ),
            })?;

    Ok(UpdatePeriodResponse {
        year_id: year.year_id,
        message: format!("Updated grading period {} of {}", period.name, year.year),
        period: period_info(period),
    })
}

/// Lists the audit events of one year, oldest first.
///
/// # Errors
///
/// Returns an error if the year does not exist or the events cannot be read.
pub fn get_audit_timeline(
    service: &mut Service,
    year_id: i64,
) -> Result<AuditTimelineResponse, ApiError> {
    let store: &mut Persistence = service.store_mut();
    store.get_year(year_id).map_err(translate_persistence_error)?;
    let events: Vec<AuditEvent> = store
        .get_audit_timeline(year_id)
        .map_err(translate_persistence_error)?;

    Ok(AuditTimelineResponse {
        year_id,
        events: events.iter().map(audit_event_info).collect(),
    })
}
