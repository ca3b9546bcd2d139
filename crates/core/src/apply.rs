// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{Calendar, Change, SideEffect, TransitionResult};
use ciclo_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use ciclo_domain::{
    AcademicYear, ActivationPlan, DomainError, NewAcademicYear, NewPeriod, Period, PeriodPatch,
    YearPatch, YearStatus, apply_year_patches, default_periods, plan_activation,
    validate_date_range, validate_new_year, validate_period_fits, validate_period_name,
};

/// Applies a command to the calendar, producing the change to persist and its audit event.
///
/// This function is pure. Every validation happens here, so a rejected
/// command never reaches persistence.
///
/// # Arguments
///
/// * `calendar` - The current calendar (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The target year or period does not exist
/// - A status change is not an edge of the transition table
/// - A period edit targets a closed year
/// - A new or edited period has a blank name, an inverted window, or overlaps a sibling
pub fn apply(
    calendar: &Calendar,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::CreateYear { draft } => apply_create_year(calendar, draft, actor, cause),
        Command::ChangeStatus { year_id, status } => {
            apply_change_status(calendar, year_id, status, actor, cause)
        }
        Command::ActivateYear { year_id } => apply_activate_year(calendar, year_id, actor, cause),
        Command::UpdatePeriod { period_id, patch } => {
            apply_update_period(calendar, period_id, patch, actor, cause)
        }
    }
}

fn apply_create_year(
    calendar: &Calendar,
    draft: NewAcademicYear,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let periods: Vec<NewPeriod> = match &draft.periods {
        Some(explicit) => explicit.clone(),
        None => default_periods(draft.year)?,
    };
    validate_new_year(&draft, &periods)?;

    let before: StateSnapshot = calendar.to_snapshot();
    let after: StateSnapshot = StateSnapshot::new(format!(
        "year={},status={},is_operating=false,periods={}",
        draft.year,
        YearStatus::Planning.as_str(),
        periods.len()
    ));
    let action: Action = Action::new(
        "CreateYear",
        Some(format!(
            "Created academic year {} with {} grading periods",
            draft.year,
            periods.len()
        )),
    );

    // The year id is assigned on insert; persistence scopes the event then.
    let audit_event: AuditEvent =
        AuditEvent::new(actor, cause, action, before, after).labelled(draft.year);

    Ok(TransitionResult {
        change: Change::CreateYear { draft, periods },
        audit_event,
        side_effects: Vec::new(),
    })
}

fn apply_change_status(
    calendar: &Calendar,
    year_id: i64,
    status: YearStatus,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let year: &AcademicYear = calendar
        .find_year(year_id)
        .ok_or(DomainError::YearNotFound(year_id))?;

    year.status.validate_transition(status)?;

    // Reopening a cycle never carries the operating flag over.
    let patch: YearPatch = if status == YearStatus::Planning && year.is_operating {
        YearPatch {
            year_id,
            is_operating: Some(false),
            status: Some(status),
        }
    } else {
        YearPatch::status(year_id, status)
    };
    let mut updated: AcademicYear = year.clone();
    updated.apply_patch(&patch);

    let action: Action = Action::new(
        "ChangeStatus",
        Some(format!(
            "Academic year {}: {} -> {}",
            year.year, year.status, status
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        StateSnapshot::of_year(year),
        StateSnapshot::of_year(&updated),
    )
    .scoped_to(year);

    let side_effects: Vec<SideEffect> = if closes(year.status, status) {
        vec![SideEffect::ResetEnrollments { year_id }]
    } else {
        Vec::new()
    };

    Ok(TransitionResult {
        change: Change::YearPatch(patch),
        audit_event,
        side_effects,
    })
}

fn apply_activate_year(
    calendar: &Calendar,
    year_id: i64,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let target: &AcademicYear = calendar
        .find_year(year_id)
        .ok_or(DomainError::YearNotFound(year_id))?;

    // Closed -> Open is not an edge; a closed year must go back to planning first.
    if target.status == YearStatus::Closed {
        return Err(DomainError::InvalidTransition {
            from: YearStatus::Closed,
            to: YearStatus::Open,
        }
        .into());
    }

    let plan: ActivationPlan = plan_activation(year_id, &calendar.years);
    if !plan.is_ok() {
        return Err(DomainError::YearNotFound(year_id).into());
    }
    let ordered: Vec<YearPatch> = plan.commit_order();

    let touched: Vec<AcademicYear> = calendar
        .years
        .iter()
        .filter(|y| ordered.iter().any(|p| p.year_id == y.year_id))
        .cloned()
        .collect();
    let projected: Vec<AcademicYear> = apply_year_patches(&touched, &ordered);

    let side_effects: Vec<SideEffect> = touched
        .iter()
        .zip(&projected)
        .filter(|(before, after)| closes(before.status, after.status))
        .map(|(before, _)| SideEffect::ResetEnrollments {
            year_id: before.year_id,
        })
        .collect();

    let demoted: Vec<String> = touched
        .iter()
        .filter(|y| y.year_id != year_id)
        .map(|y| y.year.to_string())
        .collect();
    let details: String = if demoted.is_empty() {
        format!("Activated academic year {}", target.year)
    } else {
        format!(
            "Activated academic year {}; demoted {}",
            target.year,
            demoted.join(", ")
        )
    };

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new("ActivateYear", Some(details)),
        StateSnapshot::of_years(&touched),
        StateSnapshot::of_years(&projected),
    )
    .scoped_to(target);

    Ok(TransitionResult {
        change: Change::YearPatches(ordered),
        audit_event,
        side_effects,
    })
}

fn apply_update_period(
    calendar: &Calendar,
    period_id: i64,
    patch: PeriodPatch,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let (year, period): (&AcademicYear, &Period) = calendar
        .find_period(period_id)
        .ok_or(DomainError::PeriodNotFound(period_id))?;

    if year.status == YearStatus::Closed {
        return Err(DomainError::PeriodFrozen {
            period_id,
            year: year.year,
        }
        .into());
    }

    let updated: Period = period.patched(&patch);
    validate_period_name(&updated.name)?;
    validate_date_range(
        &format!("grading period {}", updated.name),
        updated.start_date,
        updated.end_date,
    )?;
    validate_period_fits(&updated, &year.periods)?;

    let action: Action = Action::new(
        "UpdatePeriod",
        Some(format!(
            "Updated grading period '{}' of academic year {}",
            updated.name, year.year
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        period_snapshot(period),
        period_snapshot(&updated),
    )
    .scoped_to(year);

    Ok(TransitionResult {
        change: Change::PeriodPatch { period_id, patch },
        audit_event,
        side_effects: Vec::new(),
    })
}

/// Returns true if moving from `from` to `to` closes a running year.
const fn closes(from: YearStatus, to: YearStatus) -> bool {
    matches!((from, to), (YearStatus::Open, YearStatus::Closed))
}

fn period_snapshot(period: &Period) -> StateSnapshot {
    StateSnapshot::new(format!(
        "period={},name={},start={},end={},locked={},force_open={}",
        period.period_id,
        period.name,
        period.start_date,
        period.end_date,
        period.is_locked,
        period.is_force_open
    ))
}
