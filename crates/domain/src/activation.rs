// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operating year activation planning.
//!
//! Activation makes one year the sole operating year. The planner computes
//! the minimal set of per-year patches that gets there from any starting
//! collection, including corrupted ones with several operating years.
//!
//! ## Invariants
//!
//! - The target is always patched to `Open` and operating, even if it
//!   already is (activation re-affirms)
//! - Every other operating year is demoted; an `Open` one is closed, any
//!   other status is left alone since the planner never invents an edge
//!   the transition table lacks
//! - Non-operating years other than the target receive no patch
//! - Once applied as a batch, exactly one year is operating
//!
//! The planner is pure. Atomic application is the caller's job.

use crate::patch::YearPatch;
use crate::types::{AcademicYear, YearStatus};

/// The patches needed to activate a year.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActivationPlan {
    /// Patches in planning order: the target first, then every demotion.
    pub updates: Vec<YearPatch>,
    /// Problems that prevented planning. Non-empty implies `updates` is empty.
    pub errors: Vec<String>,
}

impl ActivationPlan {
    /// Returns true if the plan can be applied.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the patches in the order a sequential writer must apply them.
    ///
    /// Demotions come before the promotion so no reader ever observes two
    /// operating years.
    #[must_use]
    pub fn commit_order(&self) -> Vec<YearPatch> {
        let (demotions, promotions): (Vec<YearPatch>, Vec<YearPatch>) =
            self.updates.iter().partition(|p| p.is_demotion());
        demotions.into_iter().chain(promotions).collect()
    }
}

/// Plans the activation of `target_id` within `years`.
///
/// An unknown target yields an empty plan carrying an error message; this
/// function never fails outright.
#[must_use]
pub fn plan_activation(target_id: i64, years: &[AcademicYear]) -> ActivationPlan {
    if !years.iter().any(|y| y.year_id == target_id) {
        return ActivationPlan {
            updates: Vec::new(),
            errors: vec![format!("Academic year {target_id} not found")],
        };
    }

    let mut updates: Vec<YearPatch> = vec![YearPatch {
        year_id: target_id,
        is_operating: Some(true),
        status: Some(YearStatus::Open),
    }];

    for year in years
        .iter()
        .filter(|y| y.year_id != target_id && y.is_operating)
    {
        let demoted_status: YearStatus = match year.status {
            YearStatus::Open => YearStatus::Closed,
            other => other,
        };
        updates.push(YearPatch {
            year_id: year.year_id,
            is_operating: Some(false),
            status: Some(demoted_status),
        });
    }

    ActivationPlan {
        updates,
        errors: Vec::new(),
    }
}

/// Selects the operating year from a loaded collection.
///
/// If the collection is corrupted and holds several operating years, the
/// first one in collection order is returned.
#[must_use]
pub fn operating_year(years: &[AcademicYear]) -> Option<&AcademicYear> {
    years.iter().find(|y| y.is_operating)
}

/// Counts operating years in a collection.
#[must_use]
pub fn count_operating(years: &[AcademicYear]) -> usize {
    years.iter().filter(|y| y.is_operating).count()
}
