//! The listings store contract
//!
//! Handlers only see `dyn ListingsStore`; the Postgres and in-memory
//! backends both implement it with the same observable semantics.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Document, Listing, ListingFilter};

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database could not be reached at startup
    #[error("unable to connect to database: {0}")]
    Connection(#[source] sqlx::Error),

    /// Any database failure while serving a request
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// The identifier is not a valid listing id
    #[error("invalid listing id '{0}'")]
    InvalidId(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of an update.
///
/// `matched` lets a caller tell "not found" apart from "nothing changed";
/// both report `modified == 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateResult {
    pub matched: u64,
    pub modified: u64,
}

/// Parse a listing id as received on the wire.
pub fn parse_id(raw: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| StoreError::InvalidId(raw.to_owned()))
}

/// Persistence operations for listings.
///
/// Every method issues at most one database operation and targets at most
/// one listing, apart from `get_all_listings`.
#[async_trait]
pub trait ListingsStore: Send + Sync + 'static {
    /// Insert a new listing and return it with its assigned id.
    async fn add_new_listing(&self, fields: Document) -> StoreResult<Listing>;

    /// Listings matching `filter`, in insertion order, windowed by its page.
    async fn get_all_listings(&self, filter: &ListingFilter) -> StoreResult<Vec<Listing>>;

    /// The listing with this id, or `None` when absent.
    async fn get_listing_by_id(&self, id: &str) -> StoreResult<Option<Listing>>;

    /// Merge `fields` into the listing with this id.
    async fn update_listing_by_id(&self, fields: Document, id: &str) -> StoreResult<UpdateResult>;

    /// Remove the listing with this id, returning how many were deleted.
    async fn delete_listing_by_id(&self, id: &str) -> StoreResult<u64>;
}
