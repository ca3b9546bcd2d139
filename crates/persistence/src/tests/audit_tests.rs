// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ciclo_audit::AuditEvent;
use ciclo_domain::{AcademicYear, PeriodPatch, YearPatch, YearStatus};

use crate::tests::{create_test_event, insert_test_year};
use crate::{Persistence, PersistenceError};

#[test]
fn test_create_year_event_is_scoped_to_new_year() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let year: AcademicYear = insert_test_year(&mut persistence, 2026);

    let timeline: Vec<AuditEvent> = persistence.get_audit_timeline(year.year_id).unwrap();

    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].action.name, "CreateYear");
    assert_eq!(timeline[0].year_id, Some(year.year_id));
    assert_eq!(timeline[0].year, Some(2026));
    assert!(timeline[0].event_id.is_some());
}

#[test]
fn test_timeline_is_ordered_and_per_year() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let first: AcademicYear = insert_test_year(&mut persistence, 2025);
    let second: AcademicYear = insert_test_year(&mut persistence, 2026);

    persistence
        .persist_year_patches(
            &[YearPatch::status(first.year_id, YearStatus::Open)],
            &create_test_event("ChangeStatus", Some(&first)),
        )
        .unwrap();
    persistence
        .persist_period_patch(
            first.periods[0].period_id,
            &PeriodPatch {
                is_locked: Some(true),
                ..PeriodPatch::default()
            },
            &create_test_event("UpdatePeriod", Some(&first)),
        )
        .unwrap();

    let names: Vec<String> = persistence
        .get_audit_timeline(first.year_id)
        .unwrap()
        .into_iter()
        .map(|e| e.action.name)
        .collect();
    assert_eq!(names, vec!["CreateYear", "ChangeStatus", "UpdatePeriod"]);
    assert_eq!(
        persistence.get_audit_timeline(second.year_id).unwrap().len(),
        1
    );
}

#[test]
fn test_event_round_trips_by_id() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let year: AcademicYear = insert_test_year(&mut persistence, 2026);
    let event: AuditEvent = create_test_event("ChangeStatus", Some(&year));

    let event_id: i64 = persistence
        .persist_year_patches(&[YearPatch::status(year.year_id, YearStatus::Open)], &event)
        .unwrap();

    let stored: AuditEvent = persistence.get_audit_event(event_id).unwrap();
    assert_eq!(stored, event.with_event_id(event_id));
}

#[test]
fn test_unknown_event() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert_eq!(
        persistence.get_audit_event(404),
        Err(PersistenceError::EventNotFound(404))
    );
}
