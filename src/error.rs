use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

/// Every failure the service can surface.
///
/// The HTTP mapping stays flat: missing rows are 404, a missing caller
/// identity is 401, everything else is 500. The body is always
/// `{"error": message}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Migration failed: {0}")]
  Migration(#[from] sqlx::migrate::MigrateError),

  #[error("{0} not found")]
  NotFound(String),

  #[error("Missing or invalid user identity: {0}")]
  Unauthorized(String),

  #[error("Invalid request: {0}")]
  InvalidRequest(String),

  #[error("Configuration error: {0}")]
  Config(#[from] crate::config::ConfigError),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
  pub fn not_found(what: impl Into<String>) -> Self {
    Self::NotFound(what.into())
  }

  pub fn status_code(&self) -> StatusCode {
    match self {
      Self::NotFound(_) => StatusCode::NOT_FOUND,
      Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    } else {
      tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
    }

    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
