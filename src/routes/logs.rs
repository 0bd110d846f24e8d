use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use super::{ApiJson, ApiQuery, SharedState, UserContext};
use crate::error::AppResult;
use crate::log_store::{get_logs, ghost_sets, upsert_set, LogQuery};
use crate::models::{SetLog, SetUpsert};

#[derive(Debug, Deserialize)]
pub struct GhostQuery {
  pub exercise_id: i64,
  /// Defaults to today
  pub before: Option<NaiveDate>,
}

pub fn routes() -> Router<SharedState> {
  Router::new()
    .route("/api/logs", get(list_logs).post(save_set))
    .route("/api/logs/ghost", get(ghost))
}

async fn list_logs(
  State(state): State<SharedState>,
  user: UserContext,
  ApiQuery(query): ApiQuery<LogQuery>,
) -> AppResult<Json<Vec<SetLog>>> {
  let logs = get_logs(&state.db, user.user_id, &query, state.config.recent_logs_limit).await?;
  Ok(Json(logs))
}

async fn save_set(
  State(state): State<SharedState>,
  user: UserContext,
  ApiJson(set): ApiJson<SetUpsert>,
) -> AppResult<Json<SetLog>> {
  let log = upsert_set(&state.db, user.user_id, &set).await?;
  Ok(Json(log))
}

async fn ghost(
  State(state): State<SharedState>,
  user: UserContext,
  ApiQuery(query): ApiQuery<GhostQuery>,
) -> AppResult<Json<Vec<SetLog>>> {
  let before = query.before.unwrap_or_else(|| Utc::now().date_naive());
  let logs = ghost_sets(&state.db, user.user_id, query.exercise_id, before).await?;
  Ok(Json(logs))
}
