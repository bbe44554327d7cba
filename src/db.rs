use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

pub type DbPool = PgPool;

/// Create a Postgres pool.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}
