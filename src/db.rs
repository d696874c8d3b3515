//! Database connection pool and migration management.
//!
//! The pool is created once at startup and passed explicitly to everything
//! that touches the database. There is no module-level connection singleton;
//! handlers and services receive the handle they use.

use sqlx::{Pool, Postgres};

/// Type alias for the PostgreSQL connection pool.
pub type DbPool = Pool<Postgres>;

/// Create a new PostgreSQL connection pool.
///
/// Connections are created lazily and reused across requests. The size cap
/// comes from configuration (`DATABASE_MAX_CONNECTIONS`) because it doubles
/// as the cap on concurrently running transfer transactions.
///
/// # Errors
///
/// Returns an error if the connection string is invalid or the server is
/// unreachable.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Run database migrations from the `migrations/` directory.
///
/// Migration files follow the `<timestamp>_<name>.sql` convention and are
/// embedded at compile time. Each migration runs exactly once; applied
/// migrations are tracked in the `_sqlx_migrations` table.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
