use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use super::{ApiJson, SharedState, UserContext};
use crate::error::AppResult;
use crate::exercises::{create_exercise, create_template, get_template, list_exercises, list_templates};
use crate::models::{Exercise, NewExercise, NewTemplate, TemplateWithExercises};

pub fn routes() -> Router<SharedState> {
  Router::new()
    .route("/api/exercises", get(exercises).post(add_exercise))
    .route("/api/templates", get(templates).post(add_template))
    .route("/api/templates/:id", get(template))
}

async fn exercises(State(state): State<SharedState>, user: UserContext) -> AppResult<Json<Vec<Exercise>>> {
  Ok(Json(list_exercises(&state.db, user.user_id).await?))
}

async fn add_exercise(
  State(state): State<SharedState>,
  user: UserContext,
  ApiJson(new): ApiJson<NewExercise>,
) -> AppResult<(StatusCode, Json<Exercise>)> {
  let exercise = create_exercise(&state.db, user.user_id, &new).await?;
  Ok((StatusCode::CREATED, Json(exercise)))
}

async fn templates(
  State(state): State<SharedState>,
  user: UserContext,
) -> AppResult<Json<Vec<TemplateWithExercises>>> {
  Ok(Json(list_templates(&state.db, user.user_id).await?))
}

async fn add_template(
  State(state): State<SharedState>,
  user: UserContext,
  ApiJson(new): ApiJson<NewTemplate>,
) -> AppResult<(StatusCode, Json<TemplateWithExercises>)> {
  let template = create_template(&state.db, user.user_id, &new).await?;
  Ok((StatusCode::CREATED, Json(template)))
}

async fn template(
  State(state): State<SharedState>,
  user: UserContext,
  Path(id): Path<i64>,
) -> AppResult<Json<TemplateWithExercises>> {
  Ok(Json(get_template(&state.db, user.user_id, id).await?))
}
