use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Exercise {
  pub id: i64,
  pub user_id: i64,
  pub name: String,
  pub muscle_group: Option<String>,
  pub equipment: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExercise {
  pub name: String,
  #[serde(default)]
  pub muscle_group: Option<String>,
  #[serde(default)]
  pub equipment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutTemplate {
  pub id: i64,
  pub user_id: i64,
  pub name: String,
  pub notes: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TemplateExercise {
  pub position: i64,
  pub exercise_id: i64,
  pub exercise_name: Option<String>,
  pub target_sets: Option<i64>,
  pub target_reps: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTemplateExercise {
  pub exercise_id: i64,
  #[serde(default, deserialize_with = "lenient::optional_i64")]
  pub target_sets: Option<i64>,
  #[serde(default, deserialize_with = "lenient::optional_i64")]
  pub target_reps: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTemplate {
  pub name: String,
  #[serde(default)]
  pub notes: Option<String>,
  #[serde(default)]
  pub exercises: Vec<NewTemplateExercise>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateWithExercises {
  #[serde(flatten)]
  pub template: WorkoutTemplate,
  pub exercises: Vec<TemplateExercise>,
}
