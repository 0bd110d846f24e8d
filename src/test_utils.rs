//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Mock data factories
//! - Seed helpers

use crate::config::ServerConfig;
use crate::db::AppState;
use crate::log_store::upsert_set;
use crate::models::{SetLog, SetType, SetUpsert};
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_USER: i64 = 1;
pub const OTHER_USER: i64 = 2;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

pub fn test_state(pool: SqlitePool) -> Arc<AppState> {
  Arc::new(AppState {
    db: pool,
    config: ServerConfig::default(),
  })
}

/// Seed a small exercise catalog for a user
/// Returns the IDs in insertion order: bench, squat, deadlift
pub async fn seed_test_exercises(pool: &SqlitePool, user_id: i64) -> Vec<i64> {
  let mut ids = Vec::new();

  for (name, group) in [("Bench Press", "chest"), ("Back Squat", "legs"), ("Deadlift", "back")] {
    let result = sqlx::query(
      "INSERT INTO exercises (user_id, name, muscle_group, equipment) VALUES (?1, ?2, ?3, 'barbell')",
    )
    .bind(user_id)
    .bind(name)
    .bind(group)
    .execute(pool)
    .await
    .expect("Failed to seed exercise");

    ids.push(result.last_insert_rowid());
  }

  ids
}

/// Record one set through the log store
pub async fn seed_set(
  pool: &SqlitePool,
  user_id: i64,
  date: NaiveDate,
  exercise_id: i64,
  set_number: i64,
  weight: f64,
  reps: i64,
  completed: bool,
) -> SetLog {
  upsert_set(pool, user_id, &mock_set(date, exercise_id, set_number, weight, reps, completed))
    .await
    .expect("Failed to seed set")
}

/// Insert a session row directly, bypassing the reconciler
pub async fn seed_session_row(pool: &SqlitePool, user_id: i64, date: NaiveDate, total_volume: f64) -> i64 {
  sqlx::query(
    "INSERT INTO workout_sessions (user_id, date, duration_minutes, calories_burned, total_volume) VALUES (?1, ?2, 60, 330, ?3)",
  )
  .bind(user_id)
  .bind(date)
  .bind(total_volume)
  .execute(pool)
  .await
  .expect("Failed to seed session")
  .last_insert_rowid()
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn mock_set(
  date: NaiveDate,
  exercise_id: i64,
  set_number: i64,
  weight: f64,
  reps: i64,
  completed: bool,
) -> SetUpsert {
  SetUpsert {
    date,
    exercise_id,
    set_number,
    weight: Some(weight),
    reps: Some(reps),
    completed,
    set_type: Some(SetType::Normal),
    rpe: None,
  }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// ---------------------------------------------------------------------------
/// HTTP Helpers
/// ---------------------------------------------------------------------------

/// Send a request through the router and decode the JSON body
pub async fn send_json(
  app: Router,
  method: &str,
  uri: &str,
  user_id: Option<i64>,
  body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  if let Some(id) = user_id {
    builder = builder.header(crate::routes::USER_ID_HEADER, id.to_string());
  }
  let body = match body {
    Some(value) => {
      builder = builder.header("content-type", "application/json");
      Body::from(value.to_string())
    }
    None => Body::empty(),
  };

  let response = app
    .oneshot(builder.body(body).expect("Failed to build request"))
    .await
    .expect("Failed to execute request");

  let status = response.status();
  let bytes = to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("Failed to read body");
  let json = if bytes.is_empty() {
    serde_json::Value::Null
  } else {
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
  };

  (status, json)
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('set_logs', 'workout_sessions', 'exercises', 'workout_templates', 'template_exercises', 'body_metrics')",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 6, "Expected all tables, got {:?}", tables);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_exercises_returns_ids() {
    let pool = setup_test_db().await;

    let ids = seed_test_exercises(&pool, TEST_USER).await;
    assert_eq!(ids.len(), 3);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM exercises")
      .fetch_one(&pool)
      .await
      .expect("Failed to count exercises");
    assert_eq!(count, 3);

    teardown_test_db(pool).await;
  }
}
