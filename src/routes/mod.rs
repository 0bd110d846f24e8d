//! HTTP handlers, one module per resource, all mounted under `/api`

pub mod body_metrics;
pub mod exercises;
pub mod history;
pub mod logs;
pub mod sessions;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::routing::get;
use axum::{async_trait, Json, Router};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::db::AppState;
use crate::error::{AppError, AppResult};

pub type SharedState = Arc<AppState>;

/// Header carrying the caller's user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller. Every handler takes one; there is no default
/// user when the header is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserContext {
  pub user_id: i64,
}

#[async_trait]
impl<S> FromRequestParts<S> for UserContext
where
  S: Send + Sync,
{
  type Rejection = AppError;

  async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
    let raw = parts
      .headers
      .get(USER_ID_HEADER)
      .ok_or_else(|| AppError::Unauthorized(format!("{} header is missing", USER_ID_HEADER)))?;

    let user_id = raw
      .to_str()
      .ok()
      .and_then(|v| v.trim().parse::<i64>().ok())
      .filter(|id| *id > 0)
      .ok_or_else(|| AppError::Unauthorized(format!("{} must be a positive integer", USER_ID_HEADER)))?;

    Ok(Self { user_id })
  }
}

/// JSON body whose rejection renders as `{"error": ...}` like every other failure
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = AppError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let Json(value) = Json::<T>::from_request(req, state)
      .await
      .map_err(|e: JsonRejection| AppError::InvalidRequest(e.body_text()))?;
    Ok(Self(value))
  }
}

/// Query string counterpart of [`ApiJson`]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = AppError;

  async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
    let axum::extract::Query(value) = axum::extract::Query::<T>::from_request_parts(parts, state)
      .await
      .map_err(|e: QueryRejection| AppError::InvalidRequest(e.body_text()))?;
    Ok(Self(value))
  }
}

/// All `/api` routes, without state attached
pub fn api_routes() -> Router<SharedState> {
  Router::new()
    .route("/api/health", get(health))
    .merge(logs::routes())
    .merge(sessions::routes())
    .merge(history::routes())
    .merge(exercises::routes())
    .merge(body_metrics::routes())
}

async fn health(State(state): State<SharedState>) -> AppResult<Json<Value>> {
  sqlx::query("SELECT 1").execute(&state.db).await?;
  Ok(Json(json!({ "status": "ok" })))
}

#[cfg(test)]
mod tests {
  use crate::build_router;
  use crate::test_utils::{send_json, setup_test_db, test_state};
  use axum::http::StatusCode;

  #[tokio::test]
  async fn test_health_reports_ok() {
    let app = build_router(test_state(setup_test_db().await));
    let (status, body) = send_json(app, "GET", "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
  }

  #[tokio::test]
  async fn test_missing_user_header_is_rejected() {
    let app = build_router(test_state(setup_test_db().await));
    let (status, body) = send_json(app, "GET", "/api/logs", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].as_str().unwrap().contains("x-user-id"));
  }

  #[tokio::test]
  async fn test_malformed_user_header_is_rejected() {
    let app = build_router(test_state(setup_test_db().await));
    let (status, _) = send_json(app, "GET", "/api/sessions", Some(-3), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn test_bad_json_body_is_flat_500() {
    let app = build_router(test_state(setup_test_db().await));
    let (status, body) = send_json(
      app,
      "POST",
      "/api/logs",
      Some(1),
      Some(serde_json::json!({ "exercise_id": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
  }
}
