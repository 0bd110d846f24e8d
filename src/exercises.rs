//! Exercise catalog and reusable workout templates

use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::models::{
  Exercise, NewExercise, NewTemplate, TemplateExercise, TemplateWithExercises, WorkoutTemplate,
};

/// ---------------------------------------------------------------------------
/// Exercises
/// ---------------------------------------------------------------------------

/// Add an exercise to the user's catalog. A name that already exists returns
/// the stored exercise unchanged.
pub async fn create_exercise(pool: &SqlitePool, user_id: i64, new: &NewExercise) -> AppResult<Exercise> {
  let name = new.name.trim();
  if name.is_empty() {
    return Err(AppError::InvalidRequest("exercise name is empty".into()));
  }

  sqlx::query(
    r#"
    INSERT INTO exercises (user_id, name, muscle_group, equipment)
    VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT(user_id, name) DO NOTHING
    "#,
  )
  .bind(user_id)
  .bind(name)
  .bind(&new.muscle_group)
  .bind(&new.equipment)
  .execute(pool)
  .await?;

  let exercise = sqlx::query_as::<_, Exercise>("SELECT * FROM exercises WHERE user_id = ?1 AND name = ?2")
    .bind(user_id)
    .bind(name)
    .fetch_one(pool)
    .await?;

  Ok(exercise)
}

pub async fn list_exercises(pool: &SqlitePool, user_id: i64) -> AppResult<Vec<Exercise>> {
  let exercises = sqlx::query_as::<_, Exercise>("SELECT * FROM exercises WHERE user_id = ?1 ORDER BY name")
    .bind(user_id)
    .fetch_all(pool)
    .await?;

  Ok(exercises)
}

/// ---------------------------------------------------------------------------
/// Templates
/// ---------------------------------------------------------------------------

/// Create a template and its ordered exercise list in one transaction
pub async fn create_template(
  pool: &SqlitePool,
  user_id: i64,
  new: &NewTemplate,
) -> AppResult<TemplateWithExercises> {
  let name = new.name.trim();
  if name.is_empty() {
    return Err(AppError::InvalidRequest("template name is empty".into()));
  }

  let mut tx = pool.begin().await?;

  let template_id = sqlx::query("INSERT INTO workout_templates (user_id, name, notes) VALUES (?1, ?2, ?3)")
    .bind(user_id)
    .bind(name)
    .bind(&new.notes)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

  for (position, exercise) in new.exercises.iter().enumerate() {
    sqlx::query(
      r#"
      INSERT INTO template_exercises (template_id, position, exercise_id, target_sets, target_reps)
      VALUES (?1, ?2, ?3, ?4, ?5)
      "#,
    )
    .bind(template_id)
    .bind(position as i64)
    .bind(exercise.exercise_id)
    .bind(exercise.target_sets)
    .bind(exercise.target_reps)
    .execute(&mut *tx)
    .await?;
  }

  tx.commit().await?;

  tracing::info!(user_id, template_id, exercises = new.exercises.len(), "template created");

  get_template(pool, user_id, template_id).await
}

pub async fn get_template(pool: &SqlitePool, user_id: i64, template_id: i64) -> AppResult<TemplateWithExercises> {
  let template = sqlx::query_as::<_, WorkoutTemplate>(
    "SELECT * FROM workout_templates WHERE id = ?1 AND user_id = ?2",
  )
  .bind(template_id)
  .bind(user_id)
  .fetch_optional(pool)
  .await?
  .ok_or_else(|| AppError::not_found(format!("Template {}", template_id)))?;

  let exercises = template_exercises(pool, template.id).await?;

  Ok(TemplateWithExercises { template, exercises })
}

pub async fn list_templates(pool: &SqlitePool, user_id: i64) -> AppResult<Vec<TemplateWithExercises>> {
  let templates = sqlx::query_as::<_, WorkoutTemplate>(
    "SELECT * FROM workout_templates WHERE user_id = ?1 ORDER BY name, id",
  )
  .bind(user_id)
  .fetch_all(pool)
  .await?;

  let mut result = Vec::with_capacity(templates.len());
  for template in templates {
    let exercises = template_exercises(pool, template.id).await?;
    result.push(TemplateWithExercises { template, exercises });
  }

  Ok(result)
}

async fn template_exercises(pool: &SqlitePool, template_id: i64) -> AppResult<Vec<TemplateExercise>> {
  let exercises = sqlx::query_as::<_, TemplateExercise>(
    r#"
    SELECT te.position, te.exercise_id, e.name AS exercise_name, te.target_sets, te.target_reps
    FROM template_exercises te
    JOIN workout_templates t ON t.id = te.template_id
    LEFT JOIN exercises e ON e.id = te.exercise_id AND e.user_id = t.user_id
    WHERE te.template_id = ?1
    ORDER BY te.position
    "#,
  )
  .bind(template_id)
  .fetch_all(pool)
  .await?;

  Ok(exercises)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::NewTemplateExercise;
  use crate::test_utils::{seed_test_exercises, setup_test_db, teardown_test_db, OTHER_USER, TEST_USER};

  fn new_exercise(name: &str) -> NewExercise {
    NewExercise {
      name: name.to_string(),
      muscle_group: Some("shoulders".to_string()),
      equipment: None,
    }
  }

  #[tokio::test]
  async fn test_create_exercise_is_idempotent_by_name() {
    let pool = setup_test_db().await;

    let first = create_exercise(&pool, TEST_USER, &new_exercise("Overhead Press")).await.unwrap();
    let again = create_exercise(&pool, TEST_USER, &new_exercise(" Overhead Press ")).await.unwrap();
    let other = create_exercise(&pool, OTHER_USER, &new_exercise("Overhead Press")).await.unwrap();

    assert_eq!(first.id, again.id);
    assert_ne!(first.id, other.id);
    assert_eq!(list_exercises(&pool, TEST_USER).await.unwrap().len(), 1);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_create_exercise_rejects_blank_name() {
    let pool = setup_test_db().await;

    let err = create_exercise(&pool, TEST_USER, &new_exercise("   ")).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidRequest(_)));

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_template_keeps_exercise_order() {
    let pool = setup_test_db().await;
    let ids = seed_test_exercises(&pool, TEST_USER).await;

    let template = create_template(
      &pool,
      TEST_USER,
      &NewTemplate {
        name: "Lower".to_string(),
        notes: Some("heavy week".to_string()),
        exercises: vec![
          NewTemplateExercise { exercise_id: ids[1], target_sets: Some(5), target_reps: Some(5) },
          NewTemplateExercise { exercise_id: ids[2], target_sets: Some(1), target_reps: Some(5) },
        ],
      },
    )
    .await
    .unwrap();

    assert_eq!(template.template.name, "Lower");
    let names: Vec<Option<String>> = template.exercises.iter().map(|e| e.exercise_name.clone()).collect();
    assert_eq!(names, vec![Some("Back Squat".to_string()), Some("Deadlift".to_string())]);
    assert_eq!(template.exercises[0].position, 0);

    let listed = list_templates(&pool, TEST_USER).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].exercises.len(), 2);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_template_does_not_show_other_users_exercise_names() {
    let pool = setup_test_db().await;
    let foreign = seed_test_exercises(&pool, OTHER_USER).await;

    let template = create_template(
      &pool,
      TEST_USER,
      &NewTemplate {
        name: "Borrowed".to_string(),
        notes: None,
        exercises: vec![NewTemplateExercise { exercise_id: foreign[0], target_sets: Some(3), target_reps: Some(8) }],
      },
    )
    .await
    .unwrap();

    assert_eq!(template.exercises.len(), 1);
    assert_eq!(template.exercises[0].exercise_id, foreign[0]);
    assert_eq!(template.exercises[0].exercise_name, None);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_get_template_not_found_for_other_user() {
    let pool = setup_test_db().await;

    let template = create_template(
      &pool,
      TEST_USER,
      &NewTemplate { name: "Upper".to_string(), notes: None, exercises: Vec::new() },
    )
    .await
    .unwrap();

    let err = get_template(&pool, OTHER_USER, template.template.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    teardown_test_db(pool).await;
  }
}
