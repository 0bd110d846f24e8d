use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;
use super::set_log::{SetLog, SetUpsert};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
  pub id: i64,
  pub user_id: i64,
  pub date: NaiveDate,
  pub start_time: Option<String>,
  pub end_time: Option<String>,
  pub duration_minutes: i64,
  pub calories_burned: i64,
  /// Snapshot taken at finish time, never re-derived
  pub total_volume: f64,
  pub workout_name: Option<String>,
  pub difficulty: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
}

/// "Finish workout" request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishSession {
  pub date: NaiveDate,
  #[serde(default)]
  pub start_time: Option<String>,
  #[serde(default)]
  pub end_time: Option<String>,
  #[serde(default, deserialize_with = "lenient::optional_i64")]
  pub duration_minutes: Option<i64>,
  #[serde(default, alias = "name")]
  pub workout_name: Option<String>,
  #[serde(default)]
  pub difficulty: Option<String>,
  /// Set edits cached offline that never reached the server
  #[serde(default)]
  pub pending_sets: Vec<SetUpsert>,
}

/// A session together with its fallback-joined logs
#[derive(Debug, Clone, Serialize)]
pub struct SessionDetail {
  #[serde(flatten)]
  pub session: Session,
  pub logs: Vec<SetLog>,
  /// Volume recomputed from `logs` right now
  pub derived_volume: f64,
  /// derived_volume - total_volume
  pub volume_drift: f64,
}
