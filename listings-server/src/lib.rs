//! listings-server: HTTP API over a listings document collection
//!
//! Two layers, composed linearly:
//! - [`db`]: the [`ListingsStore`] contract with Postgres and in-memory backends
//! - [`http`]: axum routes mapping `/api/listings` onto the store
//!
//! ```ignore
//! let store = PgListings::initialize(&database_url).await?;
//! run_server(store, ServerConfig::default()).await?;
//! ```

pub mod db;
pub mod http;
pub mod models;

pub use db::{InMemoryListings, ListingsStore, PgListings, StoreError, StoreResult};
pub use http::{build_router, run_server, AppState, ServerConfig};
pub use models::{Document, Listing};
