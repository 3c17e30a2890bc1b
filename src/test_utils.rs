//! Test utilities and helpers for unit and store-backed tests
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Mock data factories
//! - Ready-made application state

use chrono::{DateTime, Offset, TimeDelta, TimeZone, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::calendar::WeekStart;
use crate::catalog::InMemoryCatalog;
use crate::config::AppConfig;
use crate::db::AppState;
use crate::models::{DifficultyLevel, Exercise, ExerciseCategory, ExerciseEffect, ExerciseSet, UserProfile, WorkoutLog};
use crate::store::memory::{sample_profile, sample_routines};
use crate::store::{
  InMemoryProfileStore, InMemoryRoutineStore, InMemoryWorkoutHistoryStore, SqliteWorkoutHistoryStore,
  WorkoutHistoryStore,
};

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases
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

/// Insert one log per day for the last `count` days, cycling over `exercise_ids`.
/// Returns the generated log ids.
pub async fn seed_test_logs(pool: &SqlitePool, exercise_ids: &[&str], count: usize, now: DateTime<Utc>) -> Vec<String> {
  let store = SqliteWorkoutHistoryStore::new(pool.clone());
  let mut ids = Vec::new();

  for i in 0..count {
    let exercise_id = exercise_ids[i % exercise_ids.len()];
    let log = mock_log(exercise_id, now - TimeDelta::days(i as i64), 3);
    let saved = store.save(log).await.expect("Failed to seed workout log");
    ids.push(saved.id);
  }

  ids
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// 15 minute, 150 kcal exercise hitting chest then shoulders
pub fn mock_exercise(id: &str, category: ExerciseCategory, difficulty: DifficultyLevel) -> Exercise {
  Exercise {
    id: id.to_string(),
    name: format!("테스트 운동 {}", id),
    category,
    difficulty,
    duration_minutes: 15,
    calories_per_session: 150,
    target_muscles: vec!["가슴".to_string(), "어깨".to_string()],
    description: "테스트용 운동".to_string(),
    effect: ExerciseEffect::new(50, 30, 10, 150),
  }
}

/// Same user as the seeded sample profile
pub fn mock_profile() -> UserProfile {
  sample_profile()
}

/// Unsaved log with `n_sets` bodyweight sets of 10 reps
pub fn mock_log(exercise_id: &str, date: DateTime<Utc>, n_sets: usize) -> WorkoutLog {
  WorkoutLog {
    id: String::new(),
    exercise_id: exercise_id.to_string(),
    date,
    sets: vec![ExerciseSet::new(0.0, 10); n_sets],
    memo: String::new(),
    duration_seconds: 600,
  }
}

/// UTC calendar, weeks starting Monday, in-memory database
pub fn test_config() -> AppConfig {
  AppConfig {
    database_url: "sqlite::memory:".to_string(),
    week_start: WeekStart::Monday,
    utc_offset: Utc.fix(),
    ..AppConfig::default()
  }
}

/// Memory-backed state with the default catalog, sample profile and routines, no logs
pub fn test_state() -> AppState {
  test_state_with_logs(Vec::new())
}

pub fn test_state_with_logs(logs: Vec<WorkoutLog>) -> AppState {
  let catalog = InMemoryCatalog::with_defaults();
  let routines = sample_routines(&catalog);
  AppState {
    history: Arc::new(InMemoryWorkoutHistoryStore::with_logs(logs)),
    routines: Arc::new(InMemoryRoutineStore::with_routines(routines)),
    profiles: Arc::new(InMemoryProfileStore::with_profiles(vec![mock_profile()])),
    catalog: Arc::new(catalog),
    config: test_config(),
  }
}

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
    .single()
    .expect("valid test timestamp")
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::ExerciseCatalog;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('exercises', 'workout_logs', 'routines', 'user_profiles')",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 4, "Expected 4 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_logs_returns_correct_count() {
    let pool = setup_test_db().await;

    let ids = seed_test_logs(&pool, &["ex005", "ex007"], 5, utc(2024, 3, 6, 12, 0)).await;
    assert_eq!(ids.len(), 5);
    assert!(ids.iter().all(|id| !id.is_empty()));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workout_logs")
      .fetch_one(&pool)
      .await
      .expect("Failed to count logs");
    assert_eq!(count, 5);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_factories_create_valid_data() {
    let ex = mock_exercise("x", ExerciseCategory::Cardio, DifficultyLevel::Beginner);
    assert_eq!(ex.primary_muscle(), Some("가슴"));

    let log = mock_log("ex001", utc(2024, 1, 1, 0, 0), 3);
    assert_eq!(log.set_count(), 3);
    assert!(log.validate().is_ok());

    assert_eq!(test_config().utc_offset.local_minus_utc(), 0);

    let state = test_state();
    assert_eq!(state.catalog.len(), 24);
    assert!(state.catalog.get_by_id("ex005").is_some());
  }
}
