//! Training history analytics
//!
//! Read-only views over finished sessions and completed sets:
//! - volume trend per session
//! - personal records per exercise (heaviest set, best estimated 1RM)
//! - consistency heatmap with streaks
//! - per-exercise progress by day

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::collections::BTreeMap;

use crate::error::AppResult;

/// Default heatmap window when no range is given
const CONSISTENCY_WINDOW_DAYS: i64 = 365;

// ---------------------------------------------------------------------------
/// Query Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Fill in missing bounds: `to` defaults to `today`, `from` to a year before `to`.
    ///
    /// The window saturates at the earliest representable date.
    pub fn resolve(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let to = self.to.unwrap_or(today);
        let from = self.from.unwrap_or_else(|| {
            to.checked_sub_signed(Duration::days(CONSISTENCY_WINDOW_DAYS - 1))
                .unwrap_or(NaiveDate::MIN)
        });
        (from, to)
    }
}

// ---------------------------------------------------------------------------
/// Result Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct VolumePoint {
    pub session_id: i64,
    pub date: NaiveDate,
    pub workout_name: Option<String>,
    pub total_volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalRecord {
    pub exercise_id: i64,
    pub exercise_name: Option<String>,
    pub max_weight: f64,
    pub max_weight_reps: Option<i64>,
    pub max_weight_date: NaiveDate,
    pub best_estimated_1rm: f64,
    pub best_estimated_1rm_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ConsistencyDay {
    pub date: NaiveDate,
    pub sessions: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsistencyReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: Vec<ConsistencyDay>,
    pub active_days: usize,
    pub longest_streak: usize,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ExerciseProgressPoint {
    pub date: NaiveDate,
    pub top_weight: Option<f64>,
    pub volume: f64,
    pub sets: i64,
}

// ---------------------------------------------------------------------------
/// Pure Calculations
// ---------------------------------------------------------------------------

/// Epley estimate: weight × (1 + reps / 30), the weight itself for singles
pub fn estimated_one_rep_max(weight: f64, reps: Option<i64>) -> f64 {
    match reps {
        Some(r) if r > 1 => weight * (1.0 + r as f64 / 30.0),
        _ => weight,
    }
}

/// Longest run of consecutive calendar days in an ascending date list
pub fn longest_streak(dates: &[NaiveDate]) -> usize {
    let mut best = 0;
    let mut current = 0;
    let mut previous: Option<NaiveDate> = None;

    for &date in dates {
        current = match previous {
            Some(prev) if date - prev == Duration::days(1) => current + 1,
            Some(prev) if date == prev => current,
            _ => 1,
        };
        best = best.max(current);
        previous = Some(date);
    }

    best
}

/// Fold completed sets into one record per exercise.
///
/// Ties on weight go to the set with more reps, then to the earlier date.
fn fold_records(rows: Vec<(i64, Option<String>, NaiveDate, f64, Option<i64>)>) -> Vec<PersonalRecord> {
    let mut records: BTreeMap<i64, PersonalRecord> = BTreeMap::new();

    for (exercise_id, exercise_name, date, weight, reps) in rows {
        let e1rm = estimated_one_rep_max(weight, reps);

        let entry = records.entry(exercise_id).or_insert_with(|| PersonalRecord {
            exercise_id,
            exercise_name: exercise_name.clone(),
            max_weight: weight,
            max_weight_reps: reps,
            max_weight_date: date,
            best_estimated_1rm: e1rm,
            best_estimated_1rm_date: date,
        });

        let heavier = weight > entry.max_weight
            || (weight == entry.max_weight && reps.unwrap_or(0) > entry.max_weight_reps.unwrap_or(0));
        if heavier {
            entry.max_weight = weight;
            entry.max_weight_reps = reps;
            entry.max_weight_date = date;
        }
        if e1rm > entry.best_estimated_1rm {
            entry.best_estimated_1rm = e1rm;
            entry.best_estimated_1rm_date = date;
        }
    }

    records.into_values().collect()
}

// ---------------------------------------------------------------------------
// Database Operations
// ---------------------------------------------------------------------------

/// Snapshot volume of every session in range, oldest first
pub async fn volume_trend(
    pool: &SqlitePool,
    user_id: i64,
    range: &DateRange,
) -> AppResult<Vec<VolumePoint>> {
    let points = sqlx::query_as::<_, VolumePoint>(
        r#"
        SELECT id AS session_id, date, workout_name, CAST(total_volume AS REAL) AS total_volume
        FROM workout_sessions
        WHERE user_id = ?1
          AND (?2 IS NULL OR date >= ?2)
          AND (?3 IS NULL OR date <= ?3)
        ORDER BY date, id
        "#,
    )
    .bind(user_id)
    .bind(range.from)
    .bind(range.to)
    .fetch_all(pool)
    .await?;

    Ok(points)
}

/// Best completed sets per exercise
pub async fn personal_records(pool: &SqlitePool, user_id: i64) -> AppResult<Vec<PersonalRecord>> {
    let rows: Vec<(i64, Option<String>, NaiveDate, f64, Option<i64>)> = sqlx::query_as(
        r#"
        SELECT l.exercise_id, e.name, l.date, CAST(l.weight AS REAL), l.reps
        FROM set_logs l
        LEFT JOIN exercises e ON e.id = l.exercise_id AND e.user_id = l.user_id
        WHERE l.user_id = ?1 AND l.completed = 1 AND l.weight IS NOT NULL
        ORDER BY l.date, l.set_number
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(fold_records(rows))
}

/// Sessions per day for a heatmap, plus active-day count and longest streak
pub async fn consistency(
    pool: &SqlitePool,
    user_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<ConsistencyReport> {
    let days = sqlx::query_as::<_, ConsistencyDay>(
        r#"
        SELECT date, COUNT(*) AS sessions
        FROM workout_sessions
        WHERE user_id = ?1 AND date >= ?2 AND date <= ?3
        GROUP BY date
        ORDER BY date
        "#,
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    let dates: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();

    Ok(ConsistencyReport {
        from,
        to,
        active_days: days.len(),
        longest_streak: longest_streak(&dates),
        days,
    })
}

/// Per-day top weight, volume and set count for one exercise
pub async fn exercise_progress(
    pool: &SqlitePool,
    user_id: i64,
    exercise_id: i64,
) -> AppResult<Vec<ExerciseProgressPoint>> {
    let points = sqlx::query_as::<_, ExerciseProgressPoint>(
        r#"
        SELECT
            date,
            CAST(MAX(weight) AS REAL) AS top_weight,
            CAST(SUM(COALESCE(weight, 0.0) * COALESCE(reps, 0)) AS REAL) AS volume,
            COUNT(*) AS sets
        FROM set_logs
        WHERE user_id = ?1 AND exercise_id = ?2 AND completed = 1
        GROUP BY date
        ORDER BY date
        "#,
    )
    .bind(user_id)
    .bind(exercise_id)
    .fetch_all(pool)
    .await?;

    Ok(points)
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
