pub mod body_metrics;
pub mod config;
pub mod db;
pub mod error;
pub mod exercises;
pub mod history;
pub mod log_store;
pub mod logging;
pub mod models;
pub mod reconciler;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_utils;

use axum::Router;
use db::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::{AppError, AppResult};

/// Full application router with request tracing
pub fn build_router(state: Arc<AppState>) -> Router {
  routes::api_routes()
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Open the database, apply migrations and serve until Ctrl-C
pub async fn run(config: ServerConfig) -> AppResult<()> {
  let pool = db::initialize_db(&config).await?;
  let addr = config.bind_addr()?;
  let state = Arc::new(AppState { db: pool.clone(), config });

  let listener = TcpListener::bind(addr).await?;
  tracing::info!(%addr, "workout log API listening");

  axum::serve(listener, build_router(state))
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  pool.close().await;
  tracing::info!("server stopped");

  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::warn!(error = %e, "failed to listen for shutdown signal");
  }
}
