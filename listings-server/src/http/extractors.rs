//! Custom Axum extractors
//!
//! Every rejection is an [`ApiError`], so clients always get a JSON body.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde_json::Value;

use super::error::ApiError;
use crate::db::StoreError;
use crate::models::{Document, ListingFilter, ListingsQuery};

/// Raw `{id}` path segment, handed to the store unparsed.
///
/// A segment that does not decode as UTF-8 is rejected as an invalid id,
/// the same 500 the store gives any other malformed id.
pub struct ListingId(pub String);

impl<S> FromRequestParts<S> for ListingId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                let raw = parts.uri.path().rsplit('/').next().unwrap_or_default();
                ApiError::Store(StoreError::InvalidId(raw.to_owned()))
            })?;

        Ok(Self(id))
    }
}

/// `page`, `perPage` and `name` from the query string.
///
/// Never rejects: repeated keys keep their first value and anything
/// unparseable falls back to the defaults.
pub struct ListingsParams(pub ListingFilter);

impl<S> FromRequestParts<S> for ListingsParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pairs = match Query::<Vec<(String, String)>>::from_request_parts(parts, state).await {
            Ok(Query(pairs)) => pairs,
            Err(rejection) => {
                tracing::debug!("ignoring query string: {}", rejection.body_text());
                Vec::new()
            }
        };

        Ok(Self(ListingFilter::from(ListingsQuery::from_pairs(pairs))))
    }
}

/// Extract a listing document from a JSON request body.
///
/// Any JSON object is accepted as-is. Bodies that fail to parse, or parse
/// to something other than an object, are rejected with 400 before the
/// store is touched.
pub struct ListingBody(pub Document);

impl<S> FromRequest<S> for ListingBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest {
                message: rejection.body_text(),
            })?;

        match value {
            Value::Object(fields) => Ok(Self(fields)),
            _ => Err(ApiError::BadRequest {
                message: "listing must be a JSON object".into(),
            }),
        }
    }
}
