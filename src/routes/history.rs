use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use super::{ApiQuery, SharedState, UserContext};
use crate::error::AppResult;
use crate::history::{
  consistency, exercise_progress, personal_records, volume_trend, ConsistencyReport, DateRange,
  ExerciseProgressPoint, PersonalRecord, VolumePoint,
};

pub fn routes() -> Router<SharedState> {
  Router::new()
    .route("/api/history/volume", get(volume))
    .route("/api/history/records", get(records))
    .route("/api/history/consistency", get(heatmap))
    .route("/api/history/exercises/:id", get(progress))
}

async fn volume(
  State(state): State<SharedState>,
  user: UserContext,
  ApiQuery(range): ApiQuery<DateRange>,
) -> AppResult<Json<Vec<VolumePoint>>> {
  Ok(Json(volume_trend(&state.db, user.user_id, &range).await?))
}

async fn records(State(state): State<SharedState>, user: UserContext) -> AppResult<Json<Vec<PersonalRecord>>> {
  Ok(Json(personal_records(&state.db, user.user_id).await?))
}

async fn heatmap(
  State(state): State<SharedState>,
  user: UserContext,
  ApiQuery(range): ApiQuery<DateRange>,
) -> AppResult<Json<ConsistencyReport>> {
  let (from, to) = range.resolve(Utc::now().date_naive());
  Ok(Json(consistency(&state.db, user.user_id, from, to).await?))
}

async fn progress(
  State(state): State<SharedState>,
  user: UserContext,
  Path(exercise_id): Path<i64>,
) -> AppResult<Json<Vec<ExerciseProgressPoint>>> {
  Ok(Json(exercise_progress(&state.db, user.user_id, exercise_id).await?))
}

#[cfg(test)]
mod tests {
  use crate::build_router;
  use crate::test_utils::{
    day, seed_session_row, seed_set, seed_test_exercises, send_json, setup_test_db, test_state, TEST_USER,
  };
  use axum::http::StatusCode;

  #[tokio::test]
  async fn test_history_endpoints() {
    let pool = setup_test_db().await;
    let ids = seed_test_exercises(&pool, TEST_USER).await;
    seed_set(&pool, TEST_USER, day(2025, 1, 6), ids[0], 1, 90.0, 5, true).await;
    seed_session_row(&pool, TEST_USER, day(2025, 1, 6), 450.0).await;
    seed_session_row(&pool, TEST_USER, day(2025, 1, 7), 300.0).await;
    let state = test_state(pool);

    let (status, volume) = send_json(build_router(state.clone()), "GET", "/api/history/volume", Some(TEST_USER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(volume.as_array().unwrap().len(), 2);

    let (_, records) = send_json(build_router(state.clone()), "GET", "/api/history/records", Some(TEST_USER), None).await;
    assert_eq!(records[0]["max_weight"], 90.0);

    let (_, heatmap) = send_json(
      build_router(state.clone()),
      "GET",
      "/api/history/consistency?from=2025-01-01&to=2025-01-31",
      Some(TEST_USER),
      None,
    )
    .await;
    assert_eq!(heatmap["active_days"], 2);
    assert_eq!(heatmap["longest_streak"], 2);

    let uri = format!("/api/history/exercises/{}", ids[0]);
    let (status, progress) = send_json(build_router(state), "GET", &uri, Some(TEST_USER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(progress[0]["volume"], 450.0);
  }

  #[tokio::test]
  async fn test_consistency_with_ancient_end_date_still_responds() {
    let state = test_state(setup_test_db().await);

    let (status, heatmap) = send_json(
      build_router(state),
      "GET",
      "/api/history/consistency?to=-262143-01-05",
      Some(TEST_USER),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(heatmap["active_days"], 0);
    assert_eq!(heatmap["longest_streak"], 0);
  }
}
