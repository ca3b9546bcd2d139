// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ciclo::{Calendar, CoreError, LifecycleError, LifecycleService};
use ciclo_audit::AuditEvent;
use ciclo_domain::{
    AcademicYear, DependentModule, DomainError, EntryDecision, EntryReason, NewAcademicYear,
    PeriodPatch, YearStatus, can_enter_data, can_modify_academic_data, count_operating,
};
use time::macros::date;

use crate::tests::{create_test_actor, create_test_cause};
use crate::{Persistence, PersistenceError};

type Service = LifecycleService<Persistence>;

fn create_service() -> Service {
    LifecycleService::new(Persistence::new_in_memory().unwrap())
}

fn create_year(service: &mut Service, year: u16) -> AcademicYear {
    service
        .create_year(
            NewAcademicYear::new(year),
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap()
}

/// 2025 open and operating with two enrolled students, 2026 in planning.
fn create_rollover_fixture(service: &mut Service) -> (AcademicYear, AcademicYear) {
    let current: AcademicYear = create_year(service, 2025);
    let next: AcademicYear = create_year(service, 2026);
    service
        .activate_year(current.year_id, create_test_actor(), create_test_cause())
        .unwrap();
    let store: &mut Persistence = service.store_mut();
    store.enroll_student(current.year_id, "Ana Rojas").unwrap();
    store.enroll_student(current.year_id, "Luis Paz").unwrap();
    (current, next)
}

#[test]
fn test_created_year_starts_in_planning_with_default_periods() {
    let mut service: Service = create_service();

    let year: AcademicYear = create_year(&mut service, 2026);

    assert_eq!(year.status, YearStatus::Planning);
    assert!(!year.is_operating);
    assert_eq!(year.periods.len(), 4);
    let timeline: Vec<AuditEvent> = service
        .store_mut()
        .get_audit_timeline(year.year_id)
        .unwrap();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].action.name, "CreateYear");
}

#[test]
fn test_rollover_activation_leaves_single_operating_year() {
    let mut service: Service = create_service();
    let (current, next) = create_rollover_fixture(&mut service);

    let calendar: Calendar = service
        .activate_year(next.year_id, create_test_actor(), create_test_cause())
        .unwrap();

    assert_eq!(count_operating(&calendar.years), 1);
    let old: &AcademicYear = calendar.find_year(current.year_id).unwrap();
    let new: &AcademicYear = calendar.find_year(next.year_id).unwrap();
    assert_eq!(old.status, YearStatus::Closed);
    assert!(!old.is_operating);
    assert_eq!(new.status, YearStatus::Open);
    assert!(new.is_operating);
    assert_eq!(
        service
            .store_mut()
            .count_current_enrollments(current.year_id)
            .unwrap(),
        0
    );
}

#[test]
fn test_closing_a_year_resets_its_enrollments() {
    let mut service: Service = create_service();
    let (current, _) = create_rollover_fixture(&mut service);

    let calendar: Calendar = service
        .change_status(
            current.year_id,
            YearStatus::Closed,
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();

    assert_eq!(
        calendar.find_year(current.year_id).unwrap().status,
        YearStatus::Closed
    );
    assert_eq!(
        service
            .store_mut()
            .count_current_enrollments(current.year_id)
            .unwrap(),
        0
    );
}

#[test]
fn test_reopening_a_closed_year_is_rejected_without_audit() {
    let mut service: Service = create_service();
    let (current, _) = create_rollover_fixture(&mut service);
    service
        .change_status(
            current.year_id,
            YearStatus::Closed,
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();
    let events_before: usize = service
        .store_mut()
        .get_audit_timeline(current.year_id)
        .unwrap()
        .len();

    let result = service.change_status(
        current.year_id,
        YearStatus::Open,
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result,
        Err(LifecycleError::Rejected(CoreError::DomainViolation(
            DomainError::InvalidTransition {
                from: YearStatus::Closed,
                to: YearStatus::Open,
            }
        )))
    );
    assert_eq!(
        service
            .store_mut()
            .get_audit_timeline(current.year_id)
            .unwrap()
            .len(),
        events_before
    );
}

#[test]
fn test_new_cycle_on_closed_year_drops_operating_flag() {
    let mut service: Service = create_service();
    let (current, _) = create_rollover_fixture(&mut service);
    service
        .change_status(
            current.year_id,
            YearStatus::Closed,
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();

    let calendar: Calendar = service
        .change_status(
            current.year_id,
            YearStatus::Planning,
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();

    let year: &AcademicYear = calendar.find_year(current.year_id).unwrap();
    assert_eq!(year.status, YearStatus::Planning);
    assert!(!year.is_operating);
    assert!(calendar.operating_year().is_none());
    let decision: EntryDecision = can_enter_data(&year.periods[0], year, date!(2025 - 04 - 01));
    assert!(!decision.allowed);
    assert_eq!(decision.reason, EntryReason::YearNotOperating);
    assert!(!can_modify_academic_data(year));
}

#[test]
fn test_closed_year_refuses_enrollment() {
    let mut service: Service = create_service();
    let (current, _) = create_rollover_fixture(&mut service);
    service
        .change_status(
            current.year_id,
            YearStatus::Closed,
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();

    let result = service
        .store_mut()
        .enroll_student(current.year_id, "Late Student");

    assert_eq!(
        result,
        Err(PersistenceError::WriteRefused(DomainError::YearReadOnly {
            year: 2025,
            module: DependentModule::Enrollment,
        }))
    );
    assert_eq!(
        service
            .store_mut()
            .count_current_enrollments(current.year_id)
            .unwrap(),
        0
    );
}

#[test]
fn test_period_edit_is_persisted_and_audited() {
    let mut service: Service = create_service();
    let year: AcademicYear = create_year(&mut service, 2026);
    let period_id: i64 = year.periods[0].period_id;

    let calendar: Calendar = service
        .update_period(
            period_id,
            PeriodPatch {
                end_date: Some(date!(2026 - 05 - 10)),
                is_locked: Some(true),
                ..PeriodPatch::default()
            },
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();

    let (_, period) = calendar.find_period(period_id).unwrap();
    assert_eq!(period.end_date, date!(2026 - 05 - 10));
    assert!(period.is_locked);
    let timeline: Vec<AuditEvent> = service
        .store_mut()
        .get_audit_timeline(year.year_id)
        .unwrap();
    assert_eq!(timeline.last().unwrap().action.name, "UpdatePeriod");
}

#[test]
fn test_period_of_closed_year_is_frozen() {
    let mut service: Service = create_service();
    let (current, _) = create_rollover_fixture(&mut service);
    service
        .change_status(
            current.year_id,
            YearStatus::Closed,
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();

    let result = service.update_period(
        current.periods[0].period_id,
        PeriodPatch {
            is_force_open: Some(true),
            ..PeriodPatch::default()
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(LifecycleError::Rejected(CoreError::DomainViolation(
            DomainError::PeriodFrozen { .. }
        )))
    ));
}

#[test]
fn test_unknown_year_surfaces_as_rejection() {
    let mut service: Service = create_service();

    let result = service.activate_year(31, create_test_actor(), create_test_cause());

    assert_eq!(
        result,
        Err(LifecycleError::<PersistenceError>::Rejected(
            CoreError::DomainViolation(DomainError::YearNotFound(31))
        ))
    );
}
