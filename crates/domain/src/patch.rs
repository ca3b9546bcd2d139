// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level update records for years and periods.
//!
//! A patch names only the fields it changes. Patches are what the engine
//! hands to persistence; applying one to an in-memory value yields the
//! state persistence will hold after the write.

use crate::types::{AcademicYear, Period, YearStatus};
use serde::{Deserialize, Serialize};
use time::Date;

/// An update to the lifecycle fields of one academic year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearPatch {
    /// The year being updated.
    pub year_id: i64,
    /// New operating flag, if it changes.
    pub is_operating: Option<bool>,
    /// New status, if it changes.
    pub status: Option<YearStatus>,
}

impl YearPatch {
    /// A patch that only changes the status.
    #[must_use]
    pub const fn status(year_id: i64, status: YearStatus) -> Self {
        Self {
            year_id,
            is_operating: None,
            status: Some(status),
        }
    }

    /// Returns true if this patch clears the operating flag.
    #[must_use]
    pub const fn is_demotion(&self) -> bool {
        matches!(self.is_operating, Some(false))
    }
}

/// An update to the editable fields of one grading period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodPatch {
    pub name: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub is_locked: Option<bool>,
    pub is_force_open: Option<bool>,
}

impl PeriodPatch {
    /// Returns true if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.is_locked.is_none()
            && self.is_force_open.is_none()
    }

    /// Returns true if the patch moves the period window.
    #[must_use]
    pub const fn changes_dates(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }
}

impl AcademicYear {
    /// Applies `patch` to this year in place.
    ///
    /// Patches addressed to a different year are ignored.
    pub fn apply_patch(&mut self, patch: &YearPatch) {
        if patch.year_id != self.year_id {
            return;
        }
        if let Some(is_operating) = patch.is_operating {
            self.is_operating = is_operating;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

impl Period {
    /// Returns a copy of this period with `patch` applied.
    #[must_use]
    pub fn patched(&self, patch: &PeriodPatch) -> Self {
        Self {
            period_id: self.period_id,
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            start_date: patch.start_date.unwrap_or(self.start_date),
            end_date: patch.end_date.unwrap_or(self.end_date),
            is_locked: patch.is_locked.unwrap_or(self.is_locked),
            is_force_open: patch.is_force_open.unwrap_or(self.is_force_open),
        }
    }

    /// Applies `patch` to this period in place.
    pub fn apply_patch(&mut self, patch: &PeriodPatch) {
        *self = self.patched(patch);
    }
}

/// Returns the collection `years` would become once `patches` are written.
#[must_use]
pub fn apply_year_patches(years: &[AcademicYear], patches: &[YearPatch]) -> Vec<AcademicYear> {
    let mut updated: Vec<AcademicYear> = years.to_vec();
    for patch in patches {
        for year in &mut updated {
            year.apply_patch(patch);
        }
    }
    updated
}
