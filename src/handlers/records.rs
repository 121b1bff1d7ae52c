use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::client_ip::ClientId;
use crate::error::AppError;
use crate::metrics::{BOOKING_LATENCY, BOOKING_SUBMISSIONS, RECORDS_CREATED};
use crate::models::{BookingSubmission, Record, UpdateRecord};
use crate::spam::SubmissionMetadata;
use crate::state::AppState;
use crate::validation::{validate_new_record, validate_update};

pub async fn list_records_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Record>> {
    Json(state.store.list_records())
}

pub async fn get_record_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Record>, AppError> {
    state.store.get_record(&id).map(Json).ok_or(AppError::NotFound("Record"))
}

// Public booking form: rate limit, anti-spam, validation, then store
pub async fn create_record_handler(
    ClientId(client): ClientId,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BookingSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<Record>), AppError> {
    BOOKING_SUBMISSIONS.inc();
    let start_time = Instant::now();

    // timed on every exit, rejections included
    let result = create_record(&client, &state, payload);
    BOOKING_LATENCY.observe(start_time.elapsed().as_secs_f64());

    result.map(|record| (StatusCode::CREATED, Json(record)))
}

fn create_record(
    client: &str,
    state: &AppState,
    payload: Result<Json<BookingSubmission>, JsonRejection>,
) -> Result<Record, AppError> {
    // limit before even looking at the body
    state.gate.check_rate(client)?;

    let Json(submission) = payload.map_err(|e| {
        debug!(%client, error = %e, "Rejected booking body");
        AppError::MalformedPayload
    })?;

    let metadata = submission.anti_spam.as_ref().map(SubmissionMetadata::from);
    state.gate.check_heuristics(client, metadata.as_ref())?;

    validate_new_record(&submission.record)?;

    let record = state.store.add_record(submission.record);
    RECORDS_CREATED.inc();
    info!(id = %record.id, date = %record.date, service = %record.service, "Booking created");

    state.notifier.new_booking(&record);
    Ok(record)
}

pub async fn update_record_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateRecord>, JsonRejection>,
) -> Result<Json<Record>, AppError> {
    let Json(update) = payload.map_err(|_| AppError::MalformedPayload)?;
    validate_update(&update)?;

    let record = state.store.update_record(&id, update).ok_or(AppError::NotFound("Record"))?;
    info!(%id, status = ?record.status, "Record updated");
    Ok(Json(record))
}

pub async fn delete_record_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.store.delete_record(&id) {
        return Err(AppError::NotFound("Record"));
    }
    info!(%id, "Record deleted");
    Ok(Json(serde_json::json!({ "success": true })))
}
