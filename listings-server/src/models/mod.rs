//! Domain models
//!
//! Listings carry no schema beyond `id` and `name`; the query types here
//! coerce raw query strings rather than rejecting them.

pub mod listing;
pub mod pagination;

pub use listing::{Document, Listing};
pub use pagination::{ListingFilter, ListingsQuery, Pagination};
