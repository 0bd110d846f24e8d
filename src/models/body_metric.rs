use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BodyMetric {
  pub id: i64,
  pub user_id: i64,
  pub date: NaiveDate,
  pub body_weight: Option<f64>,
  pub body_fat_pct: Option<f64>,
  pub notes: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
}

/// For inserting or replacing the entry of a given day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyMetricUpsert {
  pub date: NaiveDate,
  #[serde(default, deserialize_with = "lenient::optional_f64")]
  pub body_weight: Option<f64>,
  #[serde(default, deserialize_with = "lenient::optional_f64")]
  pub body_fat_pct: Option<f64>,
  #[serde(default)]
  pub notes: Option<String>,
}
