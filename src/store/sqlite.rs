//! SQLite-backed stores
//!
//! Nested values (sets, routine items, muscles, effects, places) are stored as
//! JSON text columns. Dates are epoch milliseconds.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use super::{ensure_id, ProfileStore, RoutineStore, StoreError, StoreResult, WorkoutHistoryStore};
use crate::catalog::{default_exercises, InMemoryCatalog};
use crate::models::{Exercise, ExerciseEffect, ExerciseSet, Routine, RoutineExercise, UserProfile, WorkoutLog};

/// Serde name of a unit enum variant, e.g. `STRENGTH`
fn enum_to_text<T: Serialize>(value: &T) -> StoreResult<String> {
  Ok(match serde_json::to_value(value)? {
    serde_json::Value::String(s) => s,
    other => other.to_string(),
  })
}

fn enum_from_text<T: DeserializeOwned>(text: String) -> StoreResult<T> {
  Ok(serde_json::from_value(serde_json::Value::String(text))?)
}

/// Integer column narrowed to `T`; negative or oversized values are corrupt
fn narrow_column<T: TryFrom<i64>>(row: &SqliteRow, column: &'static str) -> StoreResult<T> {
  let value: i64 = row.try_get(column)?;
  T::try_from(value).map_err(|_| StoreError::Corrupt { column, value })
}

// ---------------------------------------------------------------------------
/// Exercise Catalog
// ---------------------------------------------------------------------------

fn exercise_from_row(row: &SqliteRow) -> StoreResult<Exercise> {
  let muscles_json: String = row.try_get("target_muscles_json")?;
  let effect_json: String = row.try_get("effect_json")?;
  let effect: ExerciseEffect = serde_json::from_str(&effect_json)?;

  Ok(Exercise {
    id: row.try_get("id")?,
    name: row.try_get("name")?,
    category: enum_from_text(row.try_get("category")?)?,
    difficulty: enum_from_text(row.try_get("difficulty")?)?,
    duration_minutes: narrow_column(row, "duration_minutes")?,
    calories_per_session: narrow_column(row, "calories_per_session")?,
    target_muscles: serde_json::from_str(&muscles_json)?,
    description: row.try_get("description")?,
    effect,
  })
}

/// Insert exercises that are not stored yet. Returns how many were added.
pub async fn seed_catalog(pool: &SqlitePool, exercises: &[Exercise]) -> StoreResult<u64> {
  let mut added = 0;
  for (position, exercise) in exercises.iter().enumerate() {
    let result = sqlx::query(
      r#"
      INSERT OR IGNORE INTO exercises (
        id, name, category, difficulty, duration_minutes, calories_per_session,
        target_muscles_json, description, effect_json, position
      )
      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
      "#,
    )
    .bind(&exercise.id)
    .bind(&exercise.name)
    .bind(enum_to_text(&exercise.category)?)
    .bind(enum_to_text(&exercise.difficulty)?)
    .bind(exercise.duration_minutes as i64)
    .bind(exercise.calories_per_session as i64)
    .bind(serde_json::to_string(&exercise.target_muscles)?)
    .bind(&exercise.description)
    .bind(serde_json::to_string(&exercise.effect)?)
    .bind(position as i64)
    .execute(pool)
    .await?;
    added += result.rows_affected();
  }
  Ok(added)
}

/// Load the whole catalog in stored order
pub async fn load_catalog(pool: &SqlitePool) -> StoreResult<InMemoryCatalog> {
  let rows = sqlx::query(
    r#"
    SELECT id, name, category, difficulty, duration_minutes, calories_per_session,
           target_muscles_json, description, effect_json
    FROM exercises
    ORDER BY position, id
    "#,
  )
  .fetch_all(pool)
  .await?;

  let exercises = rows.iter().map(exercise_from_row).collect::<StoreResult<Vec<_>>>()?;
  Ok(InMemoryCatalog::new(exercises))
}

/// Load the catalog, seeding the built-in exercises into an empty table first
pub async fn load_or_seed_catalog(pool: &SqlitePool) -> StoreResult<InMemoryCatalog> {
  let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM exercises").fetch_one(pool).await?;
  if count == 0 {
    let added = seed_catalog(pool, &default_exercises()).await?;
    info!(added, "Seeded default exercise catalog");
  }
  load_catalog(pool).await
}

// ---------------------------------------------------------------------------
/// Workout History
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SqliteWorkoutHistoryStore {
  pool: SqlitePool,
}

impl SqliteWorkoutHistoryStore {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

fn log_from_row(row: &SqliteRow) -> StoreResult<WorkoutLog> {
  let sets_json: String = row.try_get("sets_json")?;
  let sets: Vec<ExerciseSet> = serde_json::from_str(&sets_json)?;
  let date_ms: i64 = row.try_get("date_ms")?;
  let date = DateTime::from_timestamp_millis(date_ms).ok_or(StoreError::Corrupt {
    column: "date_ms",
    value: date_ms,
  })?;

  Ok(WorkoutLog {
    id: row.try_get("id")?,
    exercise_id: row.try_get("exercise_id")?,
    date,
    sets,
    memo: row.try_get("memo")?,
    duration_seconds: row.try_get("duration_seconds")?,
  })
}

#[async_trait::async_trait]
impl WorkoutHistoryStore for SqliteWorkoutHistoryStore {
  async fn get_by_id(&self, id: &str) -> StoreResult<Option<WorkoutLog>> {
    let row = sqlx::query(
      "SELECT id, exercise_id, date_ms, sets_json, memo, duration_seconds FROM workout_logs WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.as_ref().map(log_from_row).transpose()
  }

  async fn get_by_date_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> StoreResult<Vec<WorkoutLog>> {
    let rows = sqlx::query(
      r#"
      SELECT id, exercise_id, date_ms, sets_json, memo, duration_seconds
      FROM workout_logs
      WHERE date_ms BETWEEN ?1 AND ?2
      ORDER BY date_ms DESC
      "#,
    )
    .bind(start.timestamp_millis())
    .bind(end.timestamp_millis())
    .fetch_all(&self.pool)
    .await?;

    rows.iter().map(log_from_row).collect()
  }

  async fn save(&self, mut log: WorkoutLog) -> StoreResult<WorkoutLog> {
    log.validate()?;
    ensure_id(&mut log.id);

    sqlx::query(
      r#"
      INSERT INTO workout_logs (id, exercise_id, date_ms, sets_json, memo, duration_seconds)
      VALUES (?1, ?2, ?3, ?4, ?5, ?6)
      ON CONFLICT(id) DO UPDATE SET
        exercise_id = excluded.exercise_id,
        date_ms = excluded.date_ms,
        sets_json = excluded.sets_json,
        memo = excluded.memo,
        duration_seconds = excluded.duration_seconds
      "#,
    )
    .bind(&log.id)
    .bind(&log.exercise_id)
    .bind(log.date.timestamp_millis())
    .bind(serde_json::to_string(&log.sets)?)
    .bind(&log.memo)
    .bind(log.duration_seconds)
    .execute(&self.pool)
    .await?;

    debug!(log_id = %log.id, exercise_id = %log.exercise_id, sets = log.sets.len(), "Saved workout log");
    Ok(log)
  }

  async fn delete(&self, id: &str) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM workout_logs WHERE id = ?1")
      .bind(id)
      .execute(&self.pool)
      .await?;
    debug!(log_id = %id, removed = result.rows_affected(), "Deleted workout log");
    Ok(())
  }
}

// ---------------------------------------------------------------------------
/// Routines
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SqliteRoutineStore {
  pool: SqlitePool,
}

impl SqliteRoutineStore {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

fn routine_from_row(row: &SqliteRow) -> StoreResult<Routine> {
  let exercises_json: String = row.try_get("exercises_json")?;
  let exercises: Vec<RoutineExercise> = serde_json::from_str(&exercises_json)?;
  Ok(Routine {
    id: row.try_get("id")?,
    name: row.try_get("name")?,
    exercises,
  })
}

#[async_trait::async_trait]
impl RoutineStore for SqliteRoutineStore {
  async fn get_by_id(&self, id: &str) -> StoreResult<Option<Routine>> {
    let row = sqlx::query("SELECT id, name, exercises_json FROM routines WHERE id = ?1")
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    row.as_ref().map(routine_from_row).transpose()
  }

  async fn get_all(&self) -> StoreResult<Vec<Routine>> {
    let rows = sqlx::query("SELECT id, name, exercises_json FROM routines ORDER BY id")
      .fetch_all(&self.pool)
      .await?;
    rows.iter().map(routine_from_row).collect()
  }

  async fn save(&self, mut routine: Routine) -> StoreResult<Routine> {
    ensure_id(&mut routine.id);

    sqlx::query(
      r#"
      INSERT INTO routines (id, name, exercises_json)
      VALUES (?1, ?2, ?3)
      ON CONFLICT(id) DO UPDATE SET
        name = excluded.name,
        exercises_json = excluded.exercises_json,
        updated_at = CURRENT_TIMESTAMP
      "#,
    )
    .bind(&routine.id)
    .bind(&routine.name)
    .bind(serde_json::to_string(&routine.exercises)?)
    .execute(&self.pool)
    .await?;

    debug!(routine_id = %routine.id, exercises = routine.exercises.len(), "Saved routine");
    Ok(routine)
  }

  async fn delete(&self, id: &str) -> StoreResult<()> {
    sqlx::query("DELETE FROM routines WHERE id = ?1")
      .bind(id)
      .execute(&self.pool)
      .await?;
    Ok(())
  }
}

// ---------------------------------------------------------------------------
/// Profiles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SqliteProfileStore {
  pool: SqlitePool,
}

impl SqliteProfileStore {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

#[async_trait::async_trait]
impl ProfileStore for SqliteProfileStore {
  async fn get(&self, user_id: &str) -> StoreResult<Option<UserProfile>> {
    let row = sqlx::query(
      r#"
      SELECT user_id, name, age, height, weight, level, place_json, goal
      FROM user_profiles
      WHERE user_id = ?1
      "#,
    )
    .bind(user_id)
    .fetch_optional(&self.pool)
    .await?;

    let Some(row) = row else {
      return Ok(None);
    };

    let place_json: String = row.try_get("place_json")?;
    Ok(Some(UserProfile {
      user_id: row.try_get("user_id")?,
      name: row.try_get("name")?,
      age: narrow_column(&row, "age")?,
      height: row.try_get("height")?,
      weight: row.try_get("weight")?,
      level: narrow_column(&row, "level")?,
      place: serde_json::from_str(&place_json)?,
      goal: row.try_get("goal")?,
    }))
  }

  async fn save(&self, profile: UserProfile) -> StoreResult<()> {
    sqlx::query(
      r#"
      INSERT INTO user_profiles (user_id, name, age, height, weight, level, place_json, goal)
      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
      ON CONFLICT(user_id) DO UPDATE SET
        name = excluded.name,
        age = excluded.age,
        height = excluded.height,
        weight = excluded.weight,
        level = excluded.level,
        place_json = excluded.place_json,
        goal = excluded.goal,
        updated_at = CURRENT_TIMESTAMP
      "#,
    )
    .bind(&profile.user_id)
    .bind(&profile.name)
    .bind(profile.age as i64)
    .bind(profile.height)
    .bind(profile.weight)
    .bind(profile.level as i64)
    .bind(serde_json::to_string(&profile.place)?)
    .bind(&profile.goal)
    .execute(&self.pool)
    .await?;

    debug!(user_id = %profile.user_id, "Saved profile");
    Ok(())
  }
}
