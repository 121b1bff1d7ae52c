use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::info;

use crate::error::AppError;
use crate::models::{CreatePurchase, Purchase};
use crate::state::AppState;
use crate::validation::validate_purchase;

pub async fn list_purchases_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Purchase>> {
    Json(state.store.list_purchases())
}

pub async fn create_purchase_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreatePurchase>, JsonRejection>,
) -> Result<(StatusCode, Json<Purchase>), AppError> {
    let Json(data) = payload.map_err(|_| AppError::MalformedPayload)?;
    validate_purchase(&data)?;

    let purchase = state.store.add_purchase(data);
    info!(id = %purchase.id, amount = purchase.amount, "Purchase recorded");
    Ok((StatusCode::CREATED, Json(purchase)))
}

// Full replace; same required fields as create
pub async fn update_purchase_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<CreatePurchase>, JsonRejection>,
) -> Result<Json<Purchase>, AppError> {
    let Json(data) = payload.map_err(|_| AppError::MalformedPayload)?;
    validate_purchase(&data)?;

    let purchase = state
        .store
        .update_purchase(&id, data)
        .ok_or(AppError::NotFound("Purchase"))?;
    info!(%id, amount = purchase.amount, "Purchase updated");
    Ok(Json(purchase))
}

pub async fn delete_purchase_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.store.delete_purchase(&id) {
        return Err(AppError::NotFound("Purchase"));
    }
    info!(%id, "Purchase deleted");
    Ok(Json(serde_json::json!({ "success": true })))
}
