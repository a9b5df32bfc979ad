//! PostgreSQL persistence for Bizdesk.
//!
//! - [`models`]: row structs and create/update DTOs.
//! - [`error`]: the error type of repository writes.
//! - [`repositories`]: per-table create, read and update operations.
//! - [`store`]: the [`EntityStore`](bizdesk_core::lifecycle::EntityStore)
//!   the lifecycle engine runs against.

pub mod error;
pub mod models;
pub mod repositories;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use error::{RepoError, RepoResult};
pub use store::PgEntityStore;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
