// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    FakeStore, FakeStoreError, create_test_actor, create_test_cause, create_test_year,
    create_test_years,
};
use crate::{Calendar, CoreError, LifecycleError, LifecycleService};
use ciclo_domain::{
    AcademicYear, DomainError, NewAcademicYear, PeriodPatch, YearStatus, count_operating,
};
use time::macros::date;

fn create_service(years: Vec<AcademicYear>) -> LifecycleService<FakeStore> {
    LifecycleService::new(FakeStore::with_years(years))
}

#[test]
fn test_rejected_transition_writes_nothing() {
    let mut service: LifecycleService<FakeStore> = create_service(create_test_years());

    let result = service.change_status(
        2025,
        YearStatus::Planning,
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result,
        Err(LifecycleError::Rejected(CoreError::DomainViolation(
            DomainError::InvalidTransition {
                from: YearStatus::Open,
                to: YearStatus::Planning,
            }
        )))
    );
    assert_eq!(service.store().writes, 0);
    assert!(service.store().events.is_empty());
}

#[test]
fn test_rejected_transition_message_is_operator_legible() {
    let mut service: LifecycleService<FakeStore> = create_service(create_test_years());

    let err = service
        .change_status(
            2025,
            YearStatus::Planning,
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap_err();

    assert!(
        err.to_string()
            .contains("Cannot change the academic year from Open to Planning")
    );
}

#[test]
fn test_closing_year_resets_enrollments_once() {
    let mut service: LifecycleService<FakeStore> = create_service(create_test_years());

    let calendar: Calendar = service
        .change_status(
            2025,
            YearStatus::Closed,
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();

    assert_eq!(calendar.find_year(2025).unwrap().status, YearStatus::Closed);
    assert_eq!(service.store().resets, vec![2025]);
    assert_eq!(service.store().events.len(), 1);
}

#[test]
fn test_reset_failure_does_not_revert_close() {
    let mut store: FakeStore = FakeStore::with_years(create_test_years());
    store.fail_resets = true;
    let mut service: LifecycleService<FakeStore> = LifecycleService::new(store);

    let calendar: Calendar = service
        .change_status(
            2025,
            YearStatus::Closed,
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();

    assert_eq!(calendar.find_year(2025).unwrap().status, YearStatus::Closed);
    assert!(service.store().resets.is_empty());
    assert_eq!(service.store().events.len(), 1);
}

#[test]
fn test_opening_planning_year_does_not_reset_enrollments() {
    let mut service: LifecycleService<FakeStore> = create_service(create_test_years());

    let calendar: Calendar = service
        .change_status(
            2026,
            YearStatus::Open,
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();

    let year: &AcademicYear = calendar.find_year(2026).unwrap();
    assert_eq!(year.status, YearStatus::Open);
    assert!(!year.is_operating);
    assert!(service.store().resets.is_empty());
}

#[test]
fn test_persistence_failure_is_propagated_as_is() {
    let mut store: FakeStore = FakeStore::with_years(create_test_years());
    store.fail_writes = true;
    let mut service: LifecycleService<FakeStore> = LifecycleService::new(store);

    let result = service.activate_year(2026, create_test_actor(), create_test_cause());

    assert_eq!(
        result,
        Err(LifecycleError::Persistence(FakeStoreError(String::from(
            "disk full"
        ))))
    );
    assert_eq!(count_operating(&service.store().years), 1);
    assert!(service.store().resets.is_empty());
}

#[test]
fn test_activation_leaves_single_operating_year() {
    let mut service: LifecycleService<FakeStore> = create_service(create_test_years());

    let calendar: Calendar = service
        .activate_year(2026, create_test_actor(), create_test_cause())
        .unwrap();

    assert_eq!(count_operating(&calendar.years), 1);
    let operating: &AcademicYear = calendar.operating_year().unwrap();
    assert_eq!(operating.year_id, 2026);
    assert_eq!(operating.status, YearStatus::Open);
    assert_eq!(calendar.find_year(2025).unwrap().status, YearStatus::Closed);
    assert_eq!(service.store().writes, 1);
    assert_eq!(service.store().events.len(), 1);
    assert_eq!(service.store().resets, vec![2025]);
}

#[test]
fn test_activation_repairs_corrupted_collection() {
    let mut service: LifecycleService<FakeStore> = create_service(vec![
        create_test_year(2023, YearStatus::Open, true),
        create_test_year(2024, YearStatus::Planning, true),
        create_test_year(2025, YearStatus::Planning, false),
    ]);

    let calendar: Calendar = service
        .activate_year(2025, create_test_actor(), create_test_cause())
        .unwrap();

    assert_eq!(count_operating(&calendar.years), 1);
    assert_eq!(calendar.find_year(2023).unwrap().status, YearStatus::Closed);
    assert_eq!(calendar.find_year(2024).unwrap().status, YearStatus::Planning);
    assert_eq!(service.store().resets, vec![2023]);
}

#[test]
fn test_frozen_period_edit_writes_nothing() {
    let mut service: LifecycleService<FakeStore> =
        create_service(vec![create_test_year(2024, YearStatus::Closed, false)]);

    let result = service.update_period(
        20241,
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
    assert_eq!(service.store().writes, 0);
}

#[test]
fn test_period_edit_is_persisted() {
    let mut service: LifecycleService<FakeStore> = create_service(create_test_years());

    let calendar: Calendar = service
        .update_period(
            20251,
            PeriodPatch {
                end_date: Some(date!(2025 - 05 - 10)),
                is_locked: Some(true),
                ..PeriodPatch::default()
            },
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();

    let (_, period) = calendar.find_period(20251).unwrap();
    assert_eq!(period.end_date, date!(2025 - 05 - 10));
    assert!(period.is_locked);
    assert_eq!(service.store().events[0].action.name, "UpdatePeriod");
}

#[test]
fn test_create_year_does_not_touch_other_years() {
    let mut service: LifecycleService<FakeStore> = create_service(create_test_years());

    let year: AcademicYear = service
        .create_year(
            NewAcademicYear::new(2027),
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();

    assert_eq!(year.status, YearStatus::Planning);
    assert!(!year.is_operating);
    assert_eq!(year.periods.len(), 4);

    let calendar: Calendar = service.calendar().unwrap();
    assert_eq!(calendar.years.len(), 3);
    assert_eq!(calendar.operating_year().unwrap().year_id, 2025);
    assert_eq!(service.store().events[0].year_id, Some(year.year_id));
}

#[test]
fn test_create_year_is_one_audited_write() {
    let mut service: LifecycleService<FakeStore> = create_service(create_test_years());

    let year: AcademicYear = service
        .create_year(
            NewAcademicYear::new(2027),
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();

    assert_eq!(service.store().writes, 1);
    assert_eq!(service.store().events.len(), 1);
    assert_eq!(service.store().events[0].action.name, "CreateYear");
    assert!(service.store().resets.is_empty());
    assert_eq!(
        service.calendar().unwrap().find_year(year.year_id),
        Some(&year)
    );
}

#[test]
fn test_rejected_creation_writes_nothing() {
    let mut service: LifecycleService<FakeStore> = create_service(create_test_years());
    let mut draft: NewAcademicYear = NewAcademicYear::new(2027);
    draft.periods = Some(Vec::new());

    let result = service.create_year(draft, create_test_actor(), create_test_cause());

    assert_eq!(
        result,
        Err(LifecycleError::Rejected(CoreError::DomainViolation(
            DomainError::NoPeriods { year: 2027 }
        )))
    );
    assert_eq!(service.store().writes, 0);
    assert!(service.store().events.is_empty());
}

#[test]
fn test_creation_store_failure_is_propagated() {
    let mut store: FakeStore = FakeStore::with_years(create_test_years());
    store.fail_writes = true;
    let mut service: LifecycleService<FakeStore> = LifecycleService::new(store);

    let result = service.create_year(
        NewAcademicYear::new(2027),
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result,
        Err(LifecycleError::Persistence(FakeStoreError(String::from(
            "disk full"
        ))))
    );
    assert_eq!(service.store().years.len(), 2);
}
