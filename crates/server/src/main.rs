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
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use ciclo::LifecycleService;
use ciclo_api::{
    ActivateYearResponse, ApiError, AuditTimelineResponse, ChangeStatusRequest,
    ChangeStatusResponse, CreateYearRequest, CreateYearResponse, ListYearsResponse,
    NewPeriodRequest, PeriodEntryRequest, PeriodEntryResponse, Service, UpdatePeriodRequest,
    UpdatePeriodResponse, YearGatesResponse, activate_year, change_status, check_period_entry,
    create_year, get_audit_timeline, get_year_gates, list_years, operator_actor, update_period,
};
use ciclo_audit::{Actor, Cause};
use ciclo_persistence::{Persistence, PersistenceError};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::{Date, OffsetDateTime, UtcOffset, macros::format_description};
use tokio::sync::Mutex;
use tracing::{error, info};

/// Ciclo Server - HTTP server for the academic calendar engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// The school's UTC offset, used to decide what day it is (e.g. `-03:00`)
    #[arg(long, default_value = "+00:00", value_parser = parse_utc_offset, allow_hyphen_values = true)]
    utc_offset: UtcOffset,
}

fn parse_utc_offset(value: &str) -> Result<UtcOffset, String> {
    UtcOffset::parse(
        value,
        format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
    )
    .map_err(|e| format!("invalid UTC offset '{value}': {e}"))
}

/// Application state shared across handlers.
///
/// The lifecycle service owns the database connection and is wrapped in a
/// Mutex so commands run one at a time.
#[derive(Clone)]
struct AppState {
    /// The orchestrator every request goes through.
    service: Arc<Mutex<Service>>,
    /// Offset used to compute the school's current day.
    utc_offset: UtcOffset,
}

impl AppState {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(self.utc_offset).date()
    }
}

/// Audit attribution carried by every write request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct Attribution {
    /// The actor ID performing this action.
    actor_id: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

impl Attribution {
    fn into_parts(self) -> (Actor, Cause) {
        (
            operator_actor(self.actor_id),
            Cause::new(self.cause_id, self.cause_description),
        )
    }
}

/// API request for creating an academic year.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateYearApiRequest {
    #[serde(flatten)]
    attribution: Attribution,
    /// The calendar year label.
    year: u16,
    /// Optional first day of the year.
    #[serde(default)]
    start_date: Option<String>,
    /// Optional last day of the year.
    #[serde(default)]
    end_date: Option<String>,
    /// Explicit periods; defaults are seeded when absent.
    #[serde(default)]
    periods: Option<Vec<NewPeriodRequest>>,
}

/// API request for changing a year's status.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ChangeStatusApiRequest {
    #[serde(flatten)]
    attribution: Attribution,
    /// The requested status.
    status: String,
}

/// API request for editing a grading period.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdatePeriodApiRequest {
    #[serde(flatten)]
    attribution: Attribution,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    is_locked: Option<bool>,
    #[serde(default)]
    is_force_open: Option<bool>,
}

/// Query parameters for the period entry check.
#[derive(Debug, Deserialize)]
struct EntryQuery {
    /// The day to check; today when absent.
    date: Option<String>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for GET `/years`.
async fn handle_list_years(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListYearsResponse>, HttpError> {
    let mut service = app_state.service.lock().await;
    let response: ListYearsResponse = list_years(&mut service)?;
    drop(service);
    Ok(Json(response))
}

/// Handler for POST `/years`.
async fn handle_create_year(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateYearApiRequest>,
) -> Result<Json<CreateYearResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        year = req.year,
        "Handling create_year request"
    );

    let request: CreateYearRequest = CreateYearRequest {
        year: req.year,
        start_date: req.start_date,
        end_date: req.end_date,
        periods: req.periods,
    };
    let (actor, cause) = req.attribution.into_parts();

    let mut service = app_state.service.lock().await;
    let response: CreateYearResponse = create_year(&mut service, &request, actor, cause)?;
    drop(service);

    Ok(Json(response))
}

/// Handler for GET `/years/{year_id}/gates`.
///
/// Evaluated for the school's current day.
async fn handle_get_year_gates(
    AxumState(app_state): AxumState<AppState>,
    Path(year_id): Path<i64>,
) -> Result<Json<YearGatesResponse>, HttpError> {
    let today: Date = app_state.today();
    let mut service = app_state.service.lock().await;
    let response: YearGatesResponse = get_year_gates(&mut service, year_id, today)?;
    drop(service);
    Ok(Json(response))
}

/// Handler for POST `/years/{year_id}/status`.
async fn handle_change_status(
    AxumState(app_state): AxumState<AppState>,
    Path(year_id): Path<i64>,
    Json(req): Json<ChangeStatusApiRequest>,
) -> Result<Json<ChangeStatusResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        year_id,
        status = %req.status,
        "Handling change_status request"
    );

    let request: ChangeStatusRequest = ChangeStatusRequest {
        year_id,
        status: req.status,
    };
    let (actor, cause) = req.attribution.into_parts();

    let mut service = app_state.service.lock().await;
    let response: ChangeStatusResponse = change_status(&mut service, &request, actor, cause)?;
    drop(service);

    Ok(Json(response))
}

/// Handler for POST `/years/{year_id}/activate`.
async fn handle_activate_year(
    AxumState(app_state): AxumState<AppState>,
    Path(year_id): Path<i64>,
    Json(req): Json<Attribution>,
) -> Result<Json<ActivateYearResponse>, HttpError> {
    info!(actor_id = %req.actor_id, year_id, "Handling activate_year request");

    let (actor, cause) = req.into_parts();

    let mut service = app_state.service.lock().await;
    let response: ActivateYearResponse = activate_year(&mut service, year_id, actor, cause)?;
    drop(service);

    Ok(Json(response))
}

/// Handler for PATCH `/periods/{period_id}`.
async fn handle_update_period(
    AxumState(app_state): AxumState<AppState>,
    Path(period_id): Path<i64>,
    Json(req): Json<UpdatePeriodApiRequest>,
) -> Result<Json<UpdatePeriodResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        period_id,
        "Handling update_period request"
    );

    let request: UpdatePeriodRequest = UpdatePeriodRequest {
        period_id,
        name: req.name,
        start_date: req.start_date,
        end_date: req.end_date,
        is_locked: req.is_locked,
        is_force_open: req.is_force_open,
    };
    let (actor, cause) = req.attribution.into_parts();

    let mut service = app_state.service.lock().await;
    let response: UpdatePeriodResponse = update_period(&mut service, &request, actor, cause)?;
    drop(service);

    Ok(Json(response))
}

/// Handler for GET `/periods/{period_id}/entry`.
async fn handle_check_period_entry(
    AxumState(app_state): AxumState<AppState>,
    Path(period_id): Path<i64>,
    Query(params): Query<EntryQuery>,
) -> Result<Json<PeriodEntryResponse>, HttpError> {
    let today: Date = app_state.today();
    let request: PeriodEntryRequest = PeriodEntryRequest {
        period_id,
        date: params.date,
    };

    let mut service = app_state.service.lock().await;
    let response: PeriodEntryResponse = check_period_entry(&mut service, &request, today)?;
    drop(service);

    Ok(Json(response))
}

/// Handler for GET `/years/{year_id}/audit`.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Path(year_id): Path<i64>,
) -> Result<Json<AuditTimelineResponse>, HttpError> {
    let mut service = app_state.service.lock().await;
    let response: AuditTimelineResponse = get_audit_timeline(&mut service, year_id)?;
    drop(service);
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/years", get(handle_list_years).post(handle_create_year))
        .route("/years/{year_id}/gates", get(handle_get_year_gates))
        .route("/years/{year_id}/status", post(handle_change_status))
        .route("/years/{year_id}/activate", post(handle_activate_year))
        .route("/years/{year_id}/audit", get(handle_get_audit_timeline))
        .route("/periods/{period_id}", patch(handle_update_period))
        .route("/periods/{period_id}/entry", get(handle_check_period_entry))
        .with_state(app_state)
}

fn open_persistence(database: Option<&str>) -> Result<Persistence, PersistenceError> {
    if let Some(db_path) = database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Ciclo Server");

    let persistence: Persistence = open_persistence(args.database.as_deref())?;

    let app_state: AppState = AppState {
        service: Arc::new(Mutex::new(LifecycleService::new(persistence))),
        utc_offset: args.utc_offset,
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!(utc_offset = %args.utc_offset, "Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
