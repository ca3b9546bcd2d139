// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use ciclo::LifecycleService;
use ciclo_audit::{Actor, Cause};
use ciclo_persistence::Persistence;

use crate::{CreateYearRequest, CreateYearResponse, Service, create_year, operator_actor};

pub fn create_test_actor() -> Actor {
    operator_actor(String::from("secretaria-1"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn create_test_service() -> Service {
    LifecycleService::new(Persistence::new_in_memory().unwrap())
}

/// Creates `year` with default periods and returns its id.
pub fn create_default_year(service: &mut Service, year: u16) -> CreateYearResponse {
    let request: CreateYearRequest = CreateYearRequest {
        year,
        start_date: None,
        end_date: None,
        periods: None,
    };
    create_year(service, &request, create_test_actor(), create_test_cause()).unwrap()
}
