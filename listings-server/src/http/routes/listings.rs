//! Listing endpoints
//!
//! Each handler makes exactly one store call and matches its outcome:
//! value, absence (404) or store error (500 via `ApiError`).

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use super::MessageResponse;
use crate::http::error::ApiError;
use crate::http::extractors::{ListingBody, ListingId, ListingsParams};
use crate::http::server::AppState;
use crate::models::Listing;

const NOT_FOUND: &str = "Listing not found";
const NOT_UPDATED: &str = "Listing not found or no changes made";

/// POST /api/listings - create a listing
async fn add_new_listing(
    State(state): State<Arc<AppState>>,
    ListingBody(fields): ListingBody,
) -> Result<(StatusCode, Json<Listing>), ApiError> {
    let listing = state.store.add_new_listing(fields).await?;
    tracing::debug!(id = %listing.id, "listing created");

    Ok((StatusCode::CREATED, Json(listing)))
}

/// GET /api/listings?page=&perPage=&name= - list listings
async fn get_all_listings(
    State(state): State<Arc<AppState>>,
    ListingsParams(filter): ListingsParams,
) -> Result<Json<Vec<Listing>>, ApiError> {
    let listings = state.store.get_all_listings(&filter).await?;
    Ok(Json(listings))
}

/// GET /api/listings/{id} - get a single listing
async fn get_listing_by_id(
    State(state): State<Arc<AppState>>,
    ListingId(id): ListingId,
) -> Result<Json<Listing>, ApiError> {
    match state.store.get_listing_by_id(&id).await? {
        Some(listing) => Ok(Json(listing)),
        None => Err(ApiError::not_found(NOT_FOUND)),
    }
}

/// PUT /api/listings/{id} - merge fields into a listing
///
/// A listing that exists but would not change answers 404, same as a
/// missing one.
async fn update_listing_by_id(
    State(state): State<Arc<AppState>>,
    ListingId(id): ListingId,
    ListingBody(fields): ListingBody,
) -> Result<Json<MessageResponse>, ApiError> {
    let result = state.store.update_listing_by_id(fields, &id).await?;

    if result.modified > 0 {
        Ok(Json(MessageResponse::new("Listing updated")))
    } else {
        Err(ApiError::not_found(NOT_UPDATED))
    }
}

/// DELETE /api/listings/{id} - remove a listing
async fn delete_listing_by_id(
    State(state): State<Arc<AppState>>,
    ListingId(id): ListingId,
) -> Result<StatusCode, ApiError> {
    match state.store.delete_listing_by_id(&id).await? {
        0 => Err(ApiError::not_found(NOT_FOUND)),
        _ => Ok(StatusCode::NO_CONTENT),
    }
}

/// Listing routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/listings",
            get(get_all_listings).post(add_new_listing),
        )
        .route(
            "/api/listings/{id}",
            get(get_listing_by_id)
                .put(update_listing_by_id)
                .delete(delete_listing_by_id),
        )
}
