use chrono::{DateTime, Utc};

use crate::catalog::ExerciseCatalog;
use crate::db::AppState;
use crate::models::{ExerciseSet, WorkoutLog};
use crate::store::{StoreError, StoreResult};

/// Commit a finished exercise.
///
/// The exercise must exist in the catalog and at least one set must have
/// been recorded.
pub async fn finish_exercise(
  state: &AppState,
  exercise_id: &str,
  sets: Vec<ExerciseSet>,
  duration_seconds: i64,
  memo: Option<String>,
  finished_at: DateTime<Utc>,
) -> StoreResult<WorkoutLog> {
  if state.catalog.get_by_id(exercise_id).is_none() {
    return Err(StoreError::not_found("exercise", exercise_id));
  }

  let mut log = WorkoutLog::finish(exercise_id, finished_at, sets, duration_seconds)?;
  if let Some(memo) = memo {
    log = log.with_memo(memo);
  }

  let saved = state.history.save(log).await?;
  tracing::info!(
    log_id = %saved.id,
    exercise_id = %saved.exercise_id,
    sets = saved.set_count(),
    volume = saved.total_volume(),
    "Workout log saved"
  );
  Ok(saved)
}

pub async fn get_workout_log(state: &AppState, id: &str) -> StoreResult<Option<WorkoutLog>> {
  state.history.get_by_id(id).await
}

/// Logs in `[start, end]`, newest first
pub async fn get_workout_logs(state: &AppState, start: DateTime<Utc>, end: DateTime<Utc>) -> StoreResult<Vec<WorkoutLog>> {
  state.history.get_by_date_range(start, end).await
}

/// Logs on the local calendar day containing `now`
pub async fn get_today_logs(state: &AppState, now: DateTime<Utc>) -> StoreResult<Vec<WorkoutLog>> {
  let (start, end) = state.calendar().today_range(now);
  state.history.get_by_date_range(start, end).await
}

pub async fn delete_workout_log(state: &AppState, id: &str) -> StoreResult<()> {
  state.history.delete(id).await
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::ValidationError;
  use crate::test_utils::*;

  #[tokio::test]
  async fn test_finish_and_read_back() {
    let state = test_state_with_logs(vec![]);
    let now = utc(2024, 3, 6, 9, 30);

    let saved = finish_exercise(
      &state,
      "ex005",
      vec![ExerciseSet::new(0.0, 15), ExerciseSet::new(0.0, 12)],
      300,
      Some("좋음".to_string()),
      now,
    )
    .await
    .unwrap();

    assert!(!saved.id.is_empty());
    assert_eq!(saved.memo, "좋음");
    assert_eq!(get_workout_log(&state, &saved.id).await.unwrap(), Some(saved.clone()));

    let today = get_today_logs(&state, utc(2024, 3, 6, 22, 0)).await.unwrap();
    assert_eq!(today.len(), 1);

    delete_workout_log(&state, &saved.id).await.unwrap();
    assert!(get_today_logs(&state, now).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_finish_rejects_empty_sets_and_unknown_exercise() {
    let state = test_state_with_logs(vec![]);
    let now = utc(2024, 3, 6, 9, 30);

    let err = finish_exercise(&state, "ex005", vec![], 60, None, now).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(ValidationError::EmptySets)));

    let err = finish_exercise(&state, "nope", vec![ExerciseSet::new(0.0, 5)], 60, None, now)
      .await
      .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "exercise", .. }));

    assert!(get_workout_logs(&state, now - chrono::TimeDelta::days(1), now)
      .await
      .unwrap()
      .is_empty());
  }
}
