//! HTTP request handlers for the Timesheet Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_shift, summarize, summarize_by_employee, validate};

use super::request::{
    ShiftRequest, SummaryGrouping, SummaryQuery, SummaryRequest, ValidateEntryRequest,
};
use super::response::{ApiError, ApiErrorResponse, ValidationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/shifts/calculate", post(calculate_shift_handler))
        .route("/entries/validate", post(validate_entry_handler))
        .route("/summaries/weekly", post(weekly_summary_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Turns a body extraction failure into a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    error_response(ApiErrorResponse::bad_request(error))
}

/// Handler for POST /shifts/calculate.
///
/// Accepts a clock-in/clock-out submission and returns the calculated hours.
async fn calculate_shift_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing shift calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let outcome = request
        .into_shift_input(state.config().settings())
        .and_then(|shift| calculate_shift(&shift));

    match outcome {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                date_worked = %result.date_worked,
                standard_hours = %result.standard_hours,
                overtime_hours = %result.overtime_hours,
                crosses_midnight = result.crosses_midnight,
                warnings = result.warnings.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Shift calculation completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Shift calculation failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /entries/validate.
///
/// Always answers 200 with the list of rule violations; an invalid entry is
/// not a failed request.
async fn validate_entry_handler(
    State(state): State<AppState>,
    payload: Result<Json<ValidateEntryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing entry validation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let today = request.today.unwrap_or_else(|| Utc::now().date_naive());
    let context = state.config().validation_context(request.mode, today);
    let response = ValidationResponse::from(validate(&request.entry, &context));

    info!(
        correlation_id = %correlation_id,
        mode = ?request.mode,
        valid = response.valid,
        error_count = response.errors.len(),
        "Entry validation completed"
    );
    json_response(StatusCode::OK, response)
}

/// Handler for POST /summaries/weekly.
///
/// Returns weekly summaries, or per-employee weekly summaries with `?by=employee`.
async fn weekly_summary_handler(
    Query(query): Query<SummaryQuery>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing weekly summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let response = match query.by {
        SummaryGrouping::Week => json_response(StatusCode::OK, summarize(&request.entries)),
        SummaryGrouping::Employee => {
            json_response(StatusCode::OK, summarize_by_employee(&request.entries))
        }
    };

    info!(
        correlation_id = %correlation_id,
        entries = request.entries.len(),
        grouping = ?query.by,
        duration_us = start_time.elapsed().as_micros(),
        "Weekly summary completed"
    );
    response
}
