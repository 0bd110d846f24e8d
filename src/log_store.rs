//! Per-set workout log storage
//!
//! Sets are keyed by (user, date, exercise, set_number) and written while a
//! workout is still in progress, before any session row exists. They carry a
//! nullable `session_id` that session finish never fills in; see
//! [`crate::reconciler`] for how membership is derived instead.

use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::models::{SetLog, SetUpsert};

/// Filters accepted by `GET /api/logs`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogQuery {
  pub date: Option<NaiveDate>,
  pub exercise_id: Option<i64>,
  pub limit: Option<i64>,
}

/// Insert a set, or update it in place when the key already exists.
///
/// Only the editable fields change on conflict; `session_id` is untouched.
pub async fn upsert_set(pool: &SqlitePool, user_id: i64, set: &SetUpsert) -> AppResult<SetLog> {
  let log = sqlx::query_as::<_, SetLog>(
    r#"
    INSERT INTO set_logs (
      user_id, date, exercise_id, set_number, weight, reps, completed, set_type, rpe
    )
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
    ON CONFLICT(user_id, date, exercise_id, set_number) DO UPDATE SET
      weight = excluded.weight,
      reps = excluded.reps,
      completed = excluded.completed,
      set_type = excluded.set_type,
      rpe = excluded.rpe,
      updated_at = CURRENT_TIMESTAMP
    RETURNING *
    "#,
  )
  .bind(user_id)
  .bind(set.date)
  .bind(set.exercise_id)
  .bind(set.set_number)
  .bind(set.weight)
  .bind(set.reps)
  .bind(set.completed)
  .bind(set.set_type.unwrap_or_default().as_str())
  .bind(set.rpe)
  .fetch_one(pool)
  .await?;

  tracing::debug!(
    user_id,
    date = %log.date,
    exercise_id = log.exercise_id,
    set_number = log.set_number,
    completed = log.completed,
    "set saved"
  );

  Ok(log)
}

/// Read logs for a user.
///
/// With a date the whole day is returned (optionally narrowed to one
/// exercise). Without one, the most recent `limit` sets are returned, newest
/// date first, which is what trend and ghost-fill displays want.
pub async fn get_logs(
  pool: &SqlitePool,
  user_id: i64,
  query: &LogQuery,
  default_limit: i64,
) -> AppResult<Vec<SetLog>> {
  let limit = query.limit.filter(|l| *l > 0).unwrap_or(default_limit);

  let logs = match (query.date, query.exercise_id) {
    (Some(date), Some(exercise_id)) => {
      sqlx::query_as::<_, SetLog>(
        r#"
        SELECT * FROM set_logs
        WHERE user_id = ?1 AND date = ?2 AND exercise_id = ?3
        ORDER BY set_number
        "#,
      )
      .bind(user_id)
      .bind(date)
      .bind(exercise_id)
      .fetch_all(pool)
      .await?
    }
    (Some(date), None) => logs_for_date(pool, user_id, date).await?,
    (None, Some(exercise_id)) => {
      sqlx::query_as::<_, SetLog>(
        r#"
        SELECT * FROM set_logs
        WHERE user_id = ?1 AND exercise_id = ?2
        ORDER BY date DESC, set_number ASC
        LIMIT ?3
        "#,
      )
      .bind(user_id)
      .bind(exercise_id)
      .bind(limit)
      .fetch_all(pool)
      .await?
    }
    (None, None) => {
      sqlx::query_as::<_, SetLog>(
        r#"
        SELECT * FROM set_logs
        WHERE user_id = ?1
        ORDER BY date DESC, exercise_id ASC, set_number ASC
        LIMIT ?2
        "#,
      )
      .bind(user_id)
      .bind(limit)
      .fetch_all(pool)
      .await?
    }
  };

  Ok(logs)
}

/// Every set a user recorded on `date`, regardless of session
pub async fn logs_for_date(pool: &SqlitePool, user_id: i64, date: NaiveDate) -> AppResult<Vec<SetLog>> {
  let logs = sqlx::query_as::<_, SetLog>(
    r#"
    SELECT * FROM set_logs
    WHERE user_id = ?1 AND date = ?2
    ORDER BY exercise_id, set_number
    "#,
  )
  .bind(user_id)
  .bind(date)
  .fetch_all(pool)
  .await?;

  Ok(logs)
}

/// Sets from the last day before `before` on which the exercise was logged.
/// Shown as placeholder values while entering today's sets.
pub async fn ghost_sets(
  pool: &SqlitePool,
  user_id: i64,
  exercise_id: i64,
  before: NaiveDate,
) -> AppResult<Vec<SetLog>> {
  let logs = sqlx::query_as::<_, SetLog>(
    r#"
    SELECT * FROM set_logs
    WHERE user_id = ?1 AND exercise_id = ?2 AND date = (
      SELECT MAX(date) FROM set_logs
      WHERE user_id = ?1 AND exercise_id = ?2 AND date < ?3
    )
    ORDER BY set_number
    "#,
  )
  .bind(user_id)
  .bind(exercise_id)
  .bind(before)
  .fetch_all(pool)
  .await?;

  Ok(logs)
}

/// Σ(weight × reps) over completed sets, missing weight or reps counted as 0
pub fn total_volume(logs: &[SetLog]) -> f64 {
  logs.iter().map(SetLog::volume).sum()
}
