// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CalendarStore, EnrollmentReset};
use ciclo_audit::{Actor, AuditEvent, Cause};
use ciclo_domain::{
    AcademicYear, NewAcademicYear, NewPeriod, Period, PeriodPatch, YearPatch, YearStatus,
};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-123"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Admin request"))
}

/// Builds a year whose id equals its label, with the four default periods.
///
/// Period ids are `year * 10 + n`.
pub fn create_test_year(year: u16, status: YearStatus, is_operating: bool) -> AcademicYear {
    let y: i32 = i32::from(year);
    let window = |start: (u8, u8), end: (u8, u8)| {
        (
            time::Date::from_calendar_date(y, time::Month::try_from(start.0).unwrap(), start.1)
                .unwrap(),
            time::Date::from_calendar_date(y, time::Month::try_from(end.0).unwrap(), end.1)
                .unwrap(),
        )
    };
    let layout = [
        ("I", window((3, 1), (5, 15))),
        ("II", window((5, 16), (7, 31))),
        ("III", window((8, 1), (10, 15))),
        ("IV", window((10, 16), (12, 20))),
    ];
    let periods: Vec<Period> = layout
        .iter()
        .enumerate()
        .map(|(index, (name, (start_date, end_date)))| Period {
            period_id: i64::from(year) * 10 + i64::try_from(index).unwrap() + 1,
            name: (*name).to_string(),
            start_date: *start_date,
            end_date: *end_date,
            is_locked: false,
            is_force_open: false,
        })
        .collect();

    AcademicYear {
        year_id: i64::from(year),
        year,
        status,
        is_operating,
        start_date: None,
        end_date: None,
        periods,
    }
}

/// The state before and after scenario C: 2025 running, 2026 in planning.
pub fn create_test_years() -> Vec<AcademicYear> {
    vec![
        create_test_year(2025, YearStatus::Open, true),
        create_test_year(2026, YearStatus::Planning, false),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeStoreError(pub String);

impl std::fmt::Display for FakeStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// In-memory store that records every write and can be told to fail.
#[derive(Debug, Default)]
pub struct FakeStore {
    pub years: Vec<AcademicYear>,
    pub events: Vec<AuditEvent>,
    pub writes: usize,
    pub resets: Vec<i64>,
    pub fail_writes: bool,
    pub fail_resets: bool,
    next_id: i64,
}

impl FakeStore {
    pub fn with_years(years: Vec<AcademicYear>) -> Self {
        Self {
            years,
            next_id: 5000,
            ..Self::default()
        }
    }

    fn check_writable(&self) -> Result<(), FakeStoreError> {
        if self.fail_writes {
            return Err(FakeStoreError(String::from("disk full")));
        }
        Ok(())
    }
}

impl CalendarStore for FakeStore {
    type Error = FakeStoreError;

    fn load_years(&mut self) -> Result<Vec<AcademicYear>, Self::Error> {
        Ok(self.years.clone())
    }

    fn create_year(
        &mut self,
        draft: &NewAcademicYear,
        periods: &[NewPeriod],
        event: &AuditEvent,
    ) -> Result<AcademicYear, Self::Error> {
        self.check_writable()?;
        self.next_id += 1;
        let year_id: i64 = self.next_id;
        let year: AcademicYear = AcademicYear {
            year_id,
            year: draft.year,
            status: YearStatus::Planning,
            is_operating: false,
            start_date: draft.start_date,
            end_date: draft.end_date,
            periods: periods
                .iter()
                .enumerate()
                .map(|(index, p)| Period {
                    period_id: year_id * 10 + i64::try_from(index).unwrap() + 1,
                    name: p.name.clone(),
                    start_date: p.start_date,
                    end_date: p.end_date,
                    is_locked: false,
                    is_force_open: false,
                })
                .collect(),
        };
        self.years.push(year.clone());
        self.events.push(event.clone().scoped_to(&year));
        self.writes += 1;
        Ok(year)
    }

    fn save_year_patch(&mut self, patch: &YearPatch, event: &AuditEvent) -> Result<(), Self::Error> {
        self.save_year_patches(std::slice::from_ref(patch), event)
    }

    fn save_year_patches(
        &mut self,
        patches: &[YearPatch],
        event: &AuditEvent,
    ) -> Result<(), Self::Error> {
        self.check_writable()?;
        for patch in patches {
            for year in &mut self.years {
                year.apply_patch(patch);
            }
        }
        self.events.push(event.clone());
        self.writes += 1;
        Ok(())
    }

    fn save_period_patch(
        &mut self,
        period_id: i64,
        patch: &PeriodPatch,
        event: &AuditEvent,
    ) -> Result<(), Self::Error> {
        self.check_writable()?;
        for year in &mut self.years {
            for period in &mut year.periods {
                if period.period_id == period_id {
                    *period = period.patched(patch);
                }
            }
        }
        self.events.push(event.clone());
        self.writes += 1;
        Ok(())
    }
}

impl EnrollmentReset for FakeStore {
    type Error = FakeStoreError;

    fn reset_enrollments(&mut self, year_id: i64) -> Result<usize, Self::Error> {
        if self.fail_resets {
            return Err(FakeStoreError(String::from("enrollment service unavailable")));
        }
        self.resets.push(year_id);
        Ok(3)
    }
}
