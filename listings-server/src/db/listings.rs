//! Postgres listings store
//!
//! Listings live in a single `listings` table as JSONB documents:
//! - list: one query in insertion order, name filter and window applied in SQL
//! - update: JSONB merge that skips unchanged rows and reports matched/modified
//! - get/update/delete: keyed by primary key, one statement each

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Row};
use uuid::Uuid;

use super::migrations;
use super::pool::create_pool;
use super::store::{parse_id, ListingsStore, StoreResult, UpdateResult};
use crate::models::listing::strip_reserved;
use crate::models::{Document, Listing, ListingFilter};

/// Listing record from database
#[derive(Debug, FromRow)]
struct ListingRow {
    id: Uuid,
    doc: Json<Document>,
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
        Listing::new(row.id, row.doc.0)
    }
}

/// Escape `LIKE` wildcards so the name filter is a plain substring match.
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Listings store backed by a Postgres pool
#[derive(Debug, Clone)]
pub struct PgListings {
    pool: PgPool,
}

impl PgListings {
    /// Connect to `database_url` and make sure the schema exists.
    ///
    /// Must succeed before the server starts accepting requests.
    pub async fn initialize(database_url: &str) -> StoreResult<Self> {
        let pool = create_pool(database_url).await?;
        migrations::run(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl ListingsStore for PgListings {
    async fn add_new_listing(&self, fields: Document) -> StoreResult<Listing> {
        let row: ListingRow = sqlx::query_as(
            r#"
            INSERT INTO listings (id, doc) VALUES ($1, $2)
            RETURNING id, doc
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(Json(strip_reserved(fields)))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get_all_listings(&self, filter: &ListingFilter) -> StoreResult<Vec<Listing>> {
        let rows: Vec<ListingRow> = sqlx::query_as(
            r#"
            SELECT id, doc
            FROM listings
            WHERE $1::text IS NULL
               OR (jsonb_typeof(doc->'name') = 'string' AND doc->>'name' ILIKE $1 ESCAPE '\')
            ORDER BY seq
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(filter.name.as_deref().map(like_pattern))
        .bind(filter.page.limit().map(i64::from))
        .bind(filter.page.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Listing::from).collect())
    }

    async fn get_listing_by_id(&self, id: &str) -> StoreResult<Option<Listing>> {
        let id = parse_id(id)?;
        let row: Option<ListingRow> = sqlx::query_as("SELECT id, doc FROM listings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Listing::from))
    }

    async fn update_listing_by_id(&self, fields: Document, id: &str) -> StoreResult<UpdateResult> {
        let id = parse_id(id)?;
        // Single statement: the CTE counts the match even when the merge is a no-op
        let row = sqlx::query(
            r#"
            WITH target AS (
                SELECT id, doc FROM listings WHERE id = $1
            ),
            updated AS (
                UPDATE listings l
                SET doc = t.doc || $2, updated_at = NOW()
                FROM target t
                WHERE l.id = t.id AND t.doc <> t.doc || $2
                RETURNING l.id
            )
            SELECT
                (SELECT COUNT(*) FROM target) AS matched,
                (SELECT COUNT(*) FROM updated) AS modified
            "#,
        )
        .bind(id)
        .bind(Json(strip_reserved(fields)))
        .fetch_one(&self.pool)
        .await?;

        Ok(UpdateResult {
            matched: row.get::<i64, _>("matched") as u64,
            modified: row.get::<i64, _>("modified") as u64,
        })
    }

    async fn delete_listing_by_id(&self, id: &str) -> StoreResult<u64> {
        let id = parse_id(id)?;
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
