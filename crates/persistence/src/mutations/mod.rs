// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `audit`: Audit event persistence
//! - `calendar`: Year and period inserts and patches
//! - `enrollments`: Enrollment inserts and the close-of-year reset
//!
//! Functions here do not open transactions. The `Persistence` adapter wraps
//! each write together with its audit event in one.

pub mod audit;
pub mod calendar;
pub mod enrollments;

pub use audit::persist_audit_event;
pub use calendar::{apply_period_patch, apply_year_patch, insert_year};
pub use enrollments::{insert_enrollment, reset_enrollments};
