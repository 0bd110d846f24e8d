use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use super::{ApiJson, ApiQuery, SharedState, UserContext};
use crate::body_metrics::{list_body_metrics, upsert_body_metric};
use crate::error::AppResult;
use crate::history::DateRange;
use crate::models::{BodyMetric, BodyMetricUpsert};

pub fn routes() -> Router<SharedState> {
  Router::new().route("/api/body-metrics", get(list).post(save))
}

async fn list(
  State(state): State<SharedState>,
  user: UserContext,
  ApiQuery(range): ApiQuery<DateRange>,
) -> AppResult<Json<Vec<BodyMetric>>> {
  Ok(Json(list_body_metrics(&state.db, user.user_id, &range).await?))
}

async fn save(
  State(state): State<SharedState>,
  user: UserContext,
  ApiJson(metric): ApiJson<BodyMetricUpsert>,
) -> AppResult<Json<BodyMetric>> {
  Ok(Json(upsert_body_metric(&state.db, user.user_id, &metric).await?))
}
