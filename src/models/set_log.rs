use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;

/// Tag attached to a set in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum SetType {
  #[default]
  Normal,
  Warmup,
  Dropset,
  Failure,
}

impl SetType {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Normal => "normal",
      Self::Warmup => "warmup",
      Self::Dropset => "dropset",
      Self::Failure => "failure",
    }
  }
}

// Unknown tags fall back to a normal set.
impl From<String> for SetType {
  fn from(value: String) -> Self {
    match value.trim().to_ascii_lowercase().as_str() {
      "warmup" | "warm_up" => Self::Warmup,
      "dropset" | "drop_set" => Self::Dropset,
      "failure" => Self::Failure,
      _ => Self::Normal,
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SetLog {
  pub id: i64,
  pub user_id: i64,
  pub date: NaiveDate,
  pub exercise_id: i64,
  pub set_number: i64,
  pub weight: Option<f64>,
  pub reps: Option<i64>,
  pub completed: bool,
  #[sqlx(try_from = "String")]
  pub set_type: SetType,
  pub rpe: Option<f64>,
  pub session_id: Option<i64>,
  pub created_at: Option<DateTime<Utc>>,
  pub updated_at: Option<DateTime<Utc>>,
}

impl SetLog {
  /// weight × reps for a completed set; missing values count as 0
  pub fn volume(&self) -> f64 {
    if !self.completed {
      return 0.0;
    }
    self.weight.unwrap_or(0.0) * self.reps.unwrap_or(0) as f64
  }
}

/// A set edit coming from the workout editor (or its offline cache)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetUpsert {
  pub date: NaiveDate,
  pub exercise_id: i64,
  pub set_number: i64,
  #[serde(default, deserialize_with = "lenient::optional_f64")]
  pub weight: Option<f64>,
  #[serde(default, deserialize_with = "lenient::optional_i64")]
  pub reps: Option<i64>,
  #[serde(default, deserialize_with = "lenient::flag")]
  pub completed: bool,
  #[serde(default)]
  pub set_type: Option<SetType>,
  #[serde(default, deserialize_with = "lenient::optional_f64")]
  pub rpe: Option<f64>,
}
