// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod activation;
mod calendar;
mod error;
mod gate;
mod patch;
mod transition;
mod types;
mod validation;
mod window;

#[cfg(test)]
mod tests;

pub use activation::{ActivationPlan, count_operating, operating_year, plan_activation};
pub use calendar::default_periods;
pub use gate::{DependentModule, ensure_writable, is_read_only};
pub use transition::explain_invalid;
pub use window::{
    EntryDecision, EntryReason, can_enroll, can_enter_data, can_modify_academic_data,
    current_period, entry_decisions,
};

// Re-export public types
pub use error::DomainError;
pub use patch::{PeriodPatch, YearPatch, apply_year_patches};
pub use types::{AcademicYear, NewAcademicYear, NewPeriod, Period, YearStatus, parse_date};
pub use validation::{
    validate_date_range, validate_new_year, validate_period_fits, validate_period_name,
    validate_periods_disjoint, validate_year_label,
};
