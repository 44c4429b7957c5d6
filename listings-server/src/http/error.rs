//! API error types with IntoResponse
//!
//! Store failures become 500 with the underlying message under `error`.
//! Missing listings become 404 with a `message`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Listing absent, or an update that changed nothing (404)
    NotFound { message: &'static str },

    /// Request body unusable (400)
    BadRequest { message: String },

    /// Store failure (500, logged)
    Store(StoreError),
}

impl ApiError {
    pub fn not_found(message: &'static str) -> Self {
        Self::NotFound { message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::NotFound { message } => (StatusCode::NOT_FOUND, json!({ "message": message })),
            Self::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            Self::Store(e) => {
                tracing::error!("Store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": e.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}
