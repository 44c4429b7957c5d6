//! In-memory listings store
//!
//! Keeps listings in insertion order behind a tokio `RwLock`. Used by the
//! router tests and by `listings --in-memory` for local runs without
//! Postgres.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{parse_id, ListingsStore, StoreResult, UpdateResult};
use crate::models::listing::{merge_fields, strip_reserved};
use crate::models::{Document, Listing, ListingFilter};

#[derive(Debug, Default)]
pub struct InMemoryListings {
    listings: RwLock<Vec<Listing>>,
}

impl InMemoryListings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored listings.
    pub async fn len(&self) -> usize {
        self.listings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ListingsStore for InMemoryListings {
    async fn add_new_listing(&self, fields: Document) -> StoreResult<Listing> {
        let listing = Listing::new(Uuid::new_v4(), strip_reserved(fields));
        self.listings.write().await.push(listing.clone());
        Ok(listing)
    }

    async fn get_all_listings(&self, filter: &ListingFilter) -> StoreResult<Vec<Listing>> {
        let listings = self.listings.read().await;
        let matching = listings.iter().filter(|l| filter.matches(l)).cloned();
        Ok(filter.page.apply(matching))
    }

    async fn get_listing_by_id(&self, id: &str) -> StoreResult<Option<Listing>> {
        let id = parse_id(id)?;
        let listings = self.listings.read().await;
        Ok(listings.iter().find(|l| l.id == id).cloned())
    }

    async fn update_listing_by_id(&self, fields: Document, id: &str) -> StoreResult<UpdateResult> {
        let id = parse_id(id)?;
        let patch = strip_reserved(fields);
        let mut listings = self.listings.write().await;

        let Some(listing) = listings.iter_mut().find(|l| l.id == id) else {
            return Ok(UpdateResult::default());
        };
        let modified = merge_fields(&mut listing.fields, &patch);

        Ok(UpdateResult {
            matched: 1,
            modified: u64::from(modified),
        })
    }

    async fn delete_listing_by_id(&self, id: &str) -> StoreResult<u64> {
        let id = parse_id(id)?;
        let mut listings = self.listings.write().await;
        let before = listings.len();
        listings.retain(|l| l.id != id);
        Ok((before - listings.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::StoreError;
    use crate::models::Pagination;
    use serde_json::{json, Value};
    use std::collections::HashSet;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().expect("object")
    }

    async fn seeded(n: usize) -> InMemoryListings {
        let store = InMemoryListings::new();
        for i in 0..n {
            store
                .add_new_listing(doc(json!({ "name": format!("Listing {i}"), "rank": i })))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn add_then_get_round_trips_fields() {
        let store = InMemoryListings::new();
        let created = store
            .add_new_listing(doc(json!({"name": "Lakeview Cabin", "beds": 2})))
            .await
            .unwrap();

        let fetched = store
            .get_listing_by_id(&created.id.to_string())
            .await
            .unwrap()
            .expect("listing exists");

        assert_eq!(fetched, created);
        assert_eq!(fetched.fields, doc(json!({"name": "Lakeview Cabin", "beds": 2})));
    }

    #[tokio::test]
    async fn caller_cannot_choose_id() {
        let store = InMemoryListings::new();
        let created = store
            .add_new_listing(doc(json!({"id": "custom", "name": "Loft"})))
            .await
            .unwrap();

        assert!(!created.fields.contains_key("id"));

        store
            .update_listing_by_id(doc(json!({"id": Uuid::new_v4()})), &created.id.to_string())
            .await
            .unwrap();
        let fetched = store
            .get_listing_by_id(&created.id.to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.id, created.id);
    }

    #[tokio::test]
    async fn missing_id_is_not_found() {
        let store = seeded(2).await;
        let absent = Uuid::new_v4().to_string();

        assert!(store.get_listing_by_id(&absent).await.unwrap().is_none());
        assert_eq!(store.delete_listing_by_id(&absent).await.unwrap(), 0);
        assert_eq!(
            store
                .update_listing_by_id(doc(json!({"name": "x"})), &absent)
                .await
                .unwrap(),
            UpdateResult { matched: 0, modified: 0 }
        );
    }

    #[tokio::test]
    async fn malformed_id_is_an_error() {
        let store = seeded(1).await;
        let err = store.get_listing_by_id("abc").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidId(_)));
    }

    #[tokio::test]
    async fn delete_twice_reports_one_then_zero() {
        let store = seeded(3).await;
        let target = store.get_all_listings(&ListingFilter::default()).await.unwrap()[1]
            .id
            .to_string();

        assert_eq!(store.delete_listing_by_id(&target).await.unwrap(), 1);
        assert_eq!(store.delete_listing_by_id(&target).await.unwrap(), 0);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn update_distinguishes_unchanged_from_missing() {
        let store = InMemoryListings::new();
        let created = store
            .add_new_listing(doc(json!({"name": "Loft"})))
            .await
            .unwrap();
        let id = created.id.to_string();

        let unchanged = store
            .update_listing_by_id(doc(json!({"name": "Loft"})), &id)
            .await
            .unwrap();
        assert_eq!(unchanged, UpdateResult { matched: 1, modified: 0 });

        let changed = store
            .update_listing_by_id(doc(json!({"name": "Attic"})), &id)
            .await
            .unwrap();
        assert_eq!(changed, UpdateResult { matched: 1, modified: 1 });
    }

    #[tokio::test]
    async fn pages_cover_every_listing_once() {
        let store = seeded(11).await;
        let per_page = 4;

        let mut seen = Vec::new();
        for page in 1..=3 {
            let filter = ListingFilter {
                page: Pagination::new(page, Some(per_page)),
                name: None,
            };
            let batch = store.get_all_listings(&filter).await.unwrap();
            assert!(batch.len() <= per_page as usize);
            seen.extend(batch.into_iter().map(|l| l.id));
        }

        let all: Vec<_> = store
            .get_all_listings(&ListingFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.id)
            .collect();

        assert_eq!(seen, all);
        assert_eq!(seen.iter().collect::<HashSet<_>>().len(), 11);
    }

    #[tokio::test]
    async fn name_filter_restricts_results() {
        let store = InMemoryListings::new();
        for name in ["Lakeview Cabin", "Forest Cabin", "City Loft"] {
            store.add_new_listing(doc(json!({ "name": name }))).await.unwrap();
        }
        store.add_new_listing(doc(json!({"beds": 1}))).await.unwrap();

        let filter = ListingFilter {
            name: Some("cabin".into()),
            ..Default::default()
        };
        let names: Vec<_> = store
            .get_all_listings(&filter)
            .await
            .unwrap()
            .iter()
            .filter_map(|l| l.name().map(str::to_owned))
            .collect();
        assert_eq!(names, ["Lakeview Cabin", "Forest Cabin"]);

        let everything = store.get_all_listings(&ListingFilter::default()).await.unwrap();
        assert_eq!(everything.len(), 4);
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = InMemoryListings::new();
        assert!(store.is_empty().await);
        assert!(store
            .get_all_listings(&ListingFilter::default())
            .await
            .unwrap()
            .is_empty());
    }
}
