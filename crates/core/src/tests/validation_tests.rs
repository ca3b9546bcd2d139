// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_year, create_test_years};
use crate::{Calendar, validate_year_writable};
use ciclo_domain::{DependentModule, DomainError, YearStatus};

#[test]
fn test_open_year_is_writable() {
    let calendar: Calendar = Calendar::new(create_test_years());
    assert!(validate_year_writable(&calendar, 2025, DependentModule::Enrollment).is_ok());
}

#[test]
fn test_non_operating_planning_year_is_writable() {
    let calendar: Calendar = Calendar::new(create_test_years());
    assert!(validate_year_writable(&calendar, 2026, DependentModule::Staffing).is_ok());
}

#[test]
fn test_closed_year_is_read_only() {
    let calendar: Calendar = Calendar::new(vec![create_test_year(2024, YearStatus::Closed, true)]);
    assert_eq!(
        validate_year_writable(&calendar, 2024, DependentModule::CourseLoad),
        Err(DomainError::YearReadOnly {
            year: 2024,
            module: DependentModule::CourseLoad,
        })
    );
}

#[test]
fn test_unknown_year_is_reported() {
    let calendar: Calendar = Calendar::default();
    assert_eq!(
        validate_year_writable(&calendar, 2024, DependentModule::Enrollment),
        Err(DomainError::YearNotFound(2024))
    );
}

#[test]
fn test_calendar_lookups() {
    let calendar: Calendar = Calendar::new(create_test_years());

    assert_eq!(calendar.operating_year().map(|y| y.year), Some(2025));
    let (year, period) = calendar.find_period(20263).unwrap();
    assert_eq!(year.year, 2026);
    assert_eq!(period.name, "III");
    assert!(calendar.find_year(2030).is_none());
    assert_eq!(calendar.to_snapshot().data, "years_count=2,operating=2025");
}
