//! Schema for the listings collection
//!
//! Each listing is one JSONB document keyed by a UUID. Statements are
//! idempotent and run on every startup.

use sqlx::PgPool;

use super::store::StoreResult;

/// Run all listings migrations
pub async fn run(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Running listings migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS listings (
            id UUID PRIMARY KEY,
            seq BIGINT GENERATED ALWAYS AS IDENTITY,
            doc JSONB NOT NULL DEFAULT '{}'::jsonb,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Default listing order
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_listings_seq
        ON listings (seq)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Listings migrations complete");
    Ok(())
}
