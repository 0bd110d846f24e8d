//! Session finish and log/session reconciliation
//!
//! A session row is created once, when the user finishes a workout. Sets are
//! never stamped with the new session id. Instead every read that needs "the
//! logs of a session" re-derives membership with
//!
//! ```sql
//! session_id = :id OR (date = :date AND session_id IS NULL)
//! ```
//!
//! which also picks up legacy rows that were linked explicitly. Two sessions
//! on the same date both claim the unassigned sets of that day, and sets left
//! behind by a failed finish are picked up by the next same-day session.

use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::log_store::{logs_for_date, total_volume, upsert_set};
use crate::models::{FinishSession, Session, SessionDetail, SetLog};

/// Fixed burn rate used for the calorie estimate
pub const CALORIES_PER_MINUTE: f64 = 5.5;

/// Filters accepted by `GET /api/sessions`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionQuery {
  pub from: Option<NaiveDate>,
  pub to: Option<NaiveDate>,
  pub limit: Option<i64>,
}

/// floor(minutes × 5.5); negative durations count as zero
pub fn estimate_calories(duration_minutes: i64) -> i64 {
  (duration_minutes.max(0) as f64 * CALORIES_PER_MINUTE).floor() as i64
}

/// Close out a workout for `req.date`.
///
/// Steps run one after another on the pool with no transaction around them,
/// so a failed insert leaves the day's sets unassigned.
pub async fn finish_session(pool: &SqlitePool, user_id: i64, req: &FinishSession) -> AppResult<Session> {
  // Flush set edits the client cached while offline
  for set in &req.pending_sets {
    upsert_set(pool, user_id, set).await?;
  }
  if !req.pending_sets.is_empty() {
    tracing::info!(user_id, count = req.pending_sets.len(), "flushed pending sets before finish");
  }

  let logs = logs_for_date(pool, user_id, req.date).await?;
  let volume = total_volume(&logs);
  let duration = req.duration_minutes.unwrap_or(0);
  let calories = estimate_calories(duration);

  let session = sqlx::query_as::<_, Session>(
    r#"
    INSERT INTO workout_sessions (
      user_id, date, start_time, end_time, duration_minutes,
      calories_burned, total_volume, workout_name, difficulty
    )
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
    RETURNING *
    "#,
  )
  .bind(user_id)
  .bind(req.date)
  .bind(&req.start_time)
  .bind(&req.end_time)
  .bind(duration)
  .bind(calories)
  .bind(volume)
  .bind(&req.workout_name)
  .bind(&req.difficulty)
  .fetch_one(pool)
  .await?;

  tracing::info!(
    user_id,
    session_id = session.id,
    date = %session.date,
    sets = logs.len(),
    total_volume = session.total_volume,
    calories = session.calories_burned,
    "session finished"
  );

  Ok(session)
}

/// Load a session owned by `user_id`
pub async fn load_session(pool: &SqlitePool, user_id: i64, session_id: i64) -> AppResult<Session> {
  sqlx::query_as::<_, Session>("SELECT * FROM workout_sessions WHERE id = ?1 AND user_id = ?2")
    .bind(session_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::not_found(format!("Session {}", session_id)))
}

/// Sets belonging to a session via the fallback join
pub async fn session_logs(pool: &SqlitePool, session: &Session) -> AppResult<Vec<SetLog>> {
  let logs = sqlx::query_as::<_, SetLog>(
    r#"
    SELECT * FROM set_logs
    WHERE user_id = ?1
      AND (session_id = ?2 OR (date = ?3 AND session_id IS NULL))
    ORDER BY date, exercise_id, set_number
    "#,
  )
  .bind(session.user_id)
  .bind(session.id)
  .bind(session.date)
  .fetch_all(pool)
  .await?;

  Ok(logs)
}

/// Session with its logs and the live volume next to the stored snapshot
pub async fn session_detail(pool: &SqlitePool, user_id: i64, session_id: i64) -> AppResult<SessionDetail> {
  let session = load_session(pool, user_id, session_id).await?;
  let logs = session_logs(pool, &session).await?;
  let derived_volume = total_volume(&logs);
  let volume_drift = derived_volume - session.total_volume;

  if volume_drift != 0.0 {
    tracing::debug!(session_id, derived_volume, snapshot = session.total_volume, "session volume drifted");
  }

  Ok(SessionDetail {
    session,
    logs,
    derived_volume,
    volume_drift,
  })
}

/// Sessions newest first, optionally bounded by date
pub async fn list_sessions(pool: &SqlitePool, user_id: i64, query: &SessionQuery) -> AppResult<Vec<Session>> {
  // LIMIT -1 means no limit in SQLite
  let limit = query.limit.filter(|l| *l > 0).unwrap_or(-1);

  let sessions = sqlx::query_as::<_, Session>(
    r#"
    SELECT * FROM workout_sessions
    WHERE user_id = ?1
      AND (?2 IS NULL OR date >= ?2)
      AND (?3 IS NULL OR date <= ?3)
    ORDER BY date DESC, id DESC
    LIMIT ?4
    "#,
  )
  .bind(user_id)
  .bind(query.from)
  .bind(query.to)
  .bind(limit)
  .fetch_all(pool)
  .await?;

  Ok(sessions)
}
