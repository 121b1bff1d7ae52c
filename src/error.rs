use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::gate::GateError;
use crate::validation::ValidationError;

// Used when the limiter could not say when the window resets
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 900;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Too many requests. Please try again later.")]
    RateLimited { retry_after_secs: Option<u64> },

    // Deliberately vague so bots can't tell which check failed
    #[error("Invalid request")]
    Rejected,

    #[error("Malformed payload")]
    MalformedPayload,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<GateError> for AppError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::RateLimited { retry_after_secs } => AppError::RateLimited { retry_after_secs },
            GateError::Suspicious(_) => AppError::Rejected,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        match self {
            AppError::RateLimited { retry_after_secs } => {
                let retry_after = retry_after_secs.unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                let mut response = (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({ "error": message, "retryAfter": retry_after })),
                )
                    .into_response();
                response
                    .headers_mut()
                    .insert(RETRY_AFTER, HeaderValue::from(retry_after));
                response
            }
            other => {
                let status = match other {
                    AppError::Rejected | AppError::MalformedPayload | AppError::Validation(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    AppError::NotFound(_) => StatusCode::NOT_FOUND,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, Json(json!({ "error": message }))).into_response()
            }
        }
    }
}
