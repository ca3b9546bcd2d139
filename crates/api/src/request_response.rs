// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates cross this boundary as ISO `YYYY-MM-DD` strings and statuses as
//! their storage labels; handlers parse them into domain types.

use serde::{Deserialize, Serialize};

/// A grading period as seen by API consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodInfo {
    /// The canonical period identifier.
    pub period_id: i64,
    /// The period label.
    pub name: String,
    /// First day of the entry window.
    pub start_date: String,
    /// Last day of the entry window.
    pub end_date: String,
    /// Administrative hard lock.
    pub is_locked: bool,
    /// Administrative override.
    pub is_force_open: bool,
}

/// An academic year as seen by API consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearInfo {
    /// The canonical year identifier.
    pub year_id: i64,
    /// The calendar year label.
    pub year: u16,
    /// The lifecycle status (`planning`, `open`, `closed`).
    pub status: String,
    /// Whether this is the operating year.
    pub is_operating: bool,
    /// Whether dependent modules must refuse writes.
    pub is_read_only: bool,
    /// Optional first day of the year.
    pub start_date: Option<String>,
    /// Optional last day of the year.
    pub end_date: Option<String>,
    /// The grading periods, in order.
    pub periods: Vec<PeriodInfo>,
}

/// API response listing every academic year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListYearsResponse {
    /// All years, ordered by label.
    pub years: Vec<YearInfo>,
    /// The operating year, if one is set.
    pub operating_year_id: Option<i64>,
}

/// API request to check whether data may be entered for a period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodEntryRequest {
    /// The period to check.
    pub period_id: i64,
    /// The day to check (ISO 8601). Today when absent.
    pub date: Option<String>,
}

/// The entry decision for one period on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodEntryResponse {
    /// The period checked.
    pub period_id: i64,
    /// The owning year.
    pub year_id: i64,
    /// The day checked.
    pub date: String,
    /// Whether entry is permitted.
    pub allowed: bool,
    /// Why entry is or is not permitted.
    pub reason: String,
    /// Whether the day is inside the period window.
    pub in_window: bool,
    /// Whether the period is force-open.
    pub forced: bool,
    /// Whether the owning year is the operating year.
    pub year_active: bool,
}

/// Every gate of one year, evaluated for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearGatesResponse {
    /// The year evaluated.
    pub year_id: i64,
    /// The calendar year label.
    pub year: u16,
    /// The day the entry decisions were computed for.
    pub date: String,
    /// `Closed` years refuse every dependent write.
    pub is_read_only: bool,
    /// Students may be enrolled.
    pub can_enroll: bool,
    /// Grades and attendance may change.
    pub can_modify_academic_data: bool,
    /// The period whose window contains the day.
    pub current_period_id: Option<i64>,
    /// One entry decision per period, in period order.
    pub periods: Vec<PeriodEntryResponse>,
}

/// A draft grading period supplied at year creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPeriodRequest {
    /// The period label.
    pub name: String,
    /// First day of the window (ISO 8601).
    pub start_date: String,
    /// Last day of the window (ISO 8601).
    pub end_date: String,
}

/// API request to create an academic year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateYearRequest {
    /// The calendar year label.
    pub year: u16,
    /// Optional first day of the year (ISO 8601).
    pub start_date: Option<String>,
    /// Optional last day of the year (ISO 8601).
    pub end_date: Option<String>,
    /// Explicit periods; the default bimestres when absent.
    pub periods: Option<Vec<NewPeriodRequest>>,
}

/// API response for a successful year creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateYearResponse {
    /// The created year.
    pub year: YearInfo,
    /// A success message.
    pub message: String,
}

/// API request to move a year along the transition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeStatusRequest {
    /// The year to change.
    pub year_id: i64,
    /// The requested status label.
    pub status: String,
}

/// API response for a successful status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeStatusResponse {
    /// The year after the change.
    pub year: YearInfo,
    /// A success message.
    pub message: String,
}

/// API response for a successful activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivateYearResponse {
    /// The new operating year.
    pub operating_year_id: i64,
    /// Every year after the activation.
    pub years: Vec<YearInfo>,
    /// A success message.
    pub message: String,
}

/// API request to edit a grading period.
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdatePeriodRequest {
    /// The period to edit.
    pub period_id: i64,
    /// New label.
    pub name: Option<String>,
    /// New first day (ISO 8601).
    pub start_date: Option<String>,
    /// New last day (ISO 8601).
    pub end_date: Option<String>,
    /// New lock flag.
    pub is_locked: Option<bool>,
    /// New override flag.
    pub is_force_open: Option<bool>,
}

/// API response for a successful period edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePeriodResponse {
    /// The owning year.
    pub year_id: i64,
    /// The period after the edit.
    pub period: PeriodInfo,
    /// A success message.
    pub message: String,
}

/// A recorded audit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    /// The event identifier.
    pub event_id: Option<i64>,
    /// Who performed the action.
    pub actor_id: String,
    /// The kind of actor.
    pub actor_type: String,
    /// Why the action was performed.
    pub cause_id: String,
    /// Description of the cause.
    pub cause_description: String,
    /// The action name.
    pub action_name: String,
    /// Optional action details.
    pub action_details: Option<String>,
    /// State before the action.
    pub before_snapshot: String,
    /// State after the action.
    pub after_snapshot: String,
}

/// API response for a year's audit timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTimelineResponse {
    /// The year the timeline belongs to.
    pub year_id: i64,
    /// Events, oldest first.
    pub events: Vec<AuditEventInfo>,
}
