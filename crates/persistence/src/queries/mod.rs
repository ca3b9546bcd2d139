// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `calendar`: Years and their periods
//! - `audit`: Audit events and per-year timelines
//! - `enrollments`: Enrollment counts

pub mod audit;
pub mod calendar;
pub mod enrollments;

pub use audit::{get_audit_event, get_audit_timeline};
pub use calendar::{get_year, list_years};
pub use enrollments::count_current_enrollments;
