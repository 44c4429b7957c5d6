//! Status endpoint

use axum::{routing::get, Json, Router};

use super::MessageResponse;

/// GET /
async fn status() -> Json<MessageResponse> {
    Json(MessageResponse::new("API Listening"))
}

/// Status routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(status))
}
