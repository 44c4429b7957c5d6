//! Database layer - listings store contract and its backends
//!
//! - `PgListings`: Postgres pool, one JSONB document per listing
//! - `InMemoryListings`: same semantics without a database
//!
//! Every store operation returns a `Result`; absence is `Option`/counts,
//! never an error.

pub mod listings;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod store;

pub use listings::PgListings;
pub use memory::InMemoryListings;
pub use pool::create_pool;
pub use store::{ListingsStore, StoreError, StoreResult, UpdateResult};
