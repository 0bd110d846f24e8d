use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::history::DateRange;
use crate::models::{BodyMetric, BodyMetricUpsert};

/// Record the measurement for a day, replacing any earlier entry for it
pub async fn upsert_body_metric(
  pool: &SqlitePool,
  user_id: i64,
  metric: &BodyMetricUpsert,
) -> AppResult<BodyMetric> {
  let saved = sqlx::query_as::<_, BodyMetric>(
    r#"
    INSERT INTO body_metrics (user_id, date, body_weight, body_fat_pct, notes)
    VALUES (?1, ?2, ?3, ?4, ?5)
    ON CONFLICT(user_id, date) DO UPDATE SET
      body_weight = excluded.body_weight,
      body_fat_pct = excluded.body_fat_pct,
      notes = excluded.notes
    RETURNING *
    "#,
  )
  .bind(user_id)
  .bind(metric.date)
  .bind(metric.body_weight)
  .bind(metric.body_fat_pct)
  .bind(&metric.notes)
  .fetch_one(pool)
  .await?;

  tracing::debug!(user_id, date = %saved.date, "body metric saved");

  Ok(saved)
}

/// Entries in range, oldest first
pub async fn list_body_metrics(pool: &SqlitePool, user_id: i64, range: &DateRange) -> AppResult<Vec<BodyMetric>> {
  let metrics = sqlx::query_as::<_, BodyMetric>(
    r#"
    SELECT * FROM body_metrics
    WHERE user_id = ?1
      AND (?2 IS NULL OR date >= ?2)
      AND (?3 IS NULL OR date <= ?3)
    ORDER BY date
    "#,
  )
  .bind(user_id)
  .bind(range.from)
  .bind(range.to)
  .fetch_all(pool)
  .await?;

  Ok(metrics)
}
