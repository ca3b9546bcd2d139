// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod audit_tests;
mod initialization_tests;
mod lifecycle_tests;

use ciclo_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use ciclo_domain::{AcademicYear, NewAcademicYear, NewPeriod, default_periods};

use crate::Persistence;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("system"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

/// Builds an event with the given action name, unscoped unless `year` is given.
pub fn create_test_event(name: &str, year: Option<&AcademicYear>) -> AuditEvent {
    let event: AuditEvent = AuditEvent::new(
        create_test_actor(),
        create_test_cause(),
        Action::new(name, None),
        StateSnapshot::new("before"),
        StateSnapshot::new("after"),
    );
    match year {
        Some(y) => event.scoped_to(y),
        None => event,
    }
}

/// Inserts `year` with the default bimestre layout.
pub fn insert_test_year(persistence: &mut Persistence, year: u16) -> AcademicYear {
    let draft: NewAcademicYear = NewAcademicYear::new(year);
    let periods: Vec<NewPeriod> = default_periods(year).unwrap();
    let event: AuditEvent = create_test_event("CreateYear", None).labelled(year);
    persistence.insert_year(&draft, &periods, &event).unwrap()
}
