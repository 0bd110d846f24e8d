use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::config::ServerConfig;
use crate::error::AppResult;

pub type DbPool = SqlitePool;

/// Application state holding the database connection pool
pub struct AppState {
  pub db: DbPool,
  pub config: ServerConfig,
}

/// Initialize the database connection pool and run migrations
///
/// Schema changes live in `migrations/` as an ordered list and are applied
/// here on every startup; already-applied versions are skipped.
pub async fn initialize_db(config: &ServerConfig) -> AppResult<DbPool> {
  tracing::info!(url = %config.database_url, "initializing database");

  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&config.database_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  tracing::info!("database initialized successfully");

  Ok(pool)
}
