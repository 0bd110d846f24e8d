use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use super::{ApiJson, ApiQuery, SharedState, UserContext};
use crate::error::AppResult;
use crate::models::{FinishSession, Session, SessionDetail};
use crate::reconciler::{finish_session, list_sessions, session_detail, SessionQuery};

pub fn routes() -> Router<SharedState> {
  Router::new()
    .route("/api/sessions", get(list).post(finish))
    .route("/api/sessions/:id", get(detail))
}

async fn list(
  State(state): State<SharedState>,
  user: UserContext,
  ApiQuery(query): ApiQuery<SessionQuery>,
) -> AppResult<Json<Vec<Session>>> {
  Ok(Json(list_sessions(&state.db, user.user_id, &query).await?))
}

/// Finish the workout: snapshot volume and calories into a new session row
async fn finish(
  State(state): State<SharedState>,
  user: UserContext,
  ApiJson(req): ApiJson<FinishSession>,
) -> AppResult<(StatusCode, Json<Session>)> {
  let session = finish_session(&state.db, user.user_id, &req).await?;
  Ok((StatusCode::CREATED, Json(session)))
}

async fn detail(
  State(state): State<SharedState>,
  user: UserContext,
  Path(id): Path<i64>,
) -> AppResult<Json<SessionDetail>> {
  Ok(Json(session_detail(&state.db, user.user_id, id).await?))
}
