//! Postgres pool for the listings store

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::store::{StoreError, StoreResult};

/// Connections shared by all request handlers.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Open the pool, failing with [`StoreError::Connection`] when the URL is
/// malformed or the server cannot be reached.
pub async fn create_pool(database_url: &str) -> StoreResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect(database_url)
        .await
        .map_err(StoreError::Connection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_url_is_connection_error() {
        let err = create_pool("not a url").await.unwrap_err();
        assert!(matches!(err, StoreError::Connection(_)));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
        assert_eq!(pool.options().get_max_connections(), DEFAULT_MAX_CONNECTIONS);
    }
}
