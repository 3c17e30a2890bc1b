use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashSet;

use crate::db::AppState;
use crate::models::{Exercise, UserProfile, ValidationError};
use crate::recommendation::{rank_for_profile, RecommendationStrategy};
use crate::store::{StoreError, StoreResult};

/// How far back history feeds the history and staleness strategies
pub const HISTORY_WINDOW_DAYS: i64 = 30;
/// Exercises done within this many days count as recent for ranking
pub const RECENT_DAYS: i64 = 7;

async fn require_profile(state: &AppState, user_id: &str) -> StoreResult<UserProfile> {
  state
    .profiles
    .get(user_id)
    .await?
    .ok_or_else(|| StoreError::not_found("profile", user_id))
}

/// Hybrid recommendation for a stored user: level, recent history and staleness
pub async fn recommend_for_user(
  state: &AppState,
  user_id: &str,
  limit: usize,
  now: DateTime<Utc>,
) -> StoreResult<Vec<Exercise>> {
  if limit == 0 {
    return Err(ValidationError::InvalidLimit.into());
  }

  let profile = require_profile(state, user_id).await?;
  let logs = state
    .history
    .get_by_date_range(now - TimeDelta::days(HISTORY_WINDOW_DAYS), now)
    .await?;

  let strategy = RecommendationStrategy::for_user(profile.difficulty(), &logs);
  let picked = strategy.recommend_at(state.catalog.as_slice(), limit, now);

  tracing::debug!(
    user_id = %user_id,
    level = ?profile.difficulty(),
    history = logs.len(),
    requested = limit,
    returned = picked.len(),
    "Recommended exercises"
  );
  Ok(picked)
}

/// Run a caller-chosen strategy over the whole catalog
pub fn recommend_with_strategy(
  state: &AppState,
  strategy: &RecommendationStrategy,
  limit: usize,
) -> StoreResult<Vec<Exercise>> {
  if limit == 0 {
    return Err(ValidationError::InvalidLimit.into());
  }
  Ok(strategy.recommend(state.catalog.as_slice(), limit))
}

/// Whole catalog ordered by fit for the user
pub async fn rank_exercises_for_user(
  state: &AppState,
  user_id: &str,
  now: DateTime<Utc>,
) -> StoreResult<Vec<Exercise>> {
  let profile = require_profile(state, user_id).await?;
  let recent: HashSet<String> = state
    .history
    .get_by_date_range(now - TimeDelta::days(RECENT_DAYS), now)
    .await?
    .into_iter()
    .map(|l| l.exercise_id)
    .collect();

  Ok(rank_for_profile(state.catalog.as_slice(), &recent, profile.difficulty()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::{DifficultyLevel, ExerciseCategory};
  use crate::test_utils::*;

  #[tokio::test]
  async fn test_recommend_for_unknown_user_is_not_found() {
    let state = test_state();
    let err = recommend_for_user(&state, "ghost", 4, utc(2024, 3, 6, 12, 0)).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "profile", .. }));
  }

  #[tokio::test]
  async fn test_zero_limit_is_rejected() {
    let state = test_state();
    let err = recommend_for_user(&state, "user001", 0, utc(2024, 3, 6, 12, 0)).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(ValidationError::InvalidLimit)));

    let strategy = RecommendationStrategy::category_based(ExerciseCategory::Cardio);
    assert!(recommend_with_strategy(&state, &strategy, 0).is_err());
  }

  #[tokio::test]
  async fn test_recommend_for_user_respects_limit_and_uniqueness() {
    let now = utc(2024, 3, 6, 12, 0);
    let state = test_state_with_logs(vec![
      mock_log("ex005", now - TimeDelta::days(1), 3),
      mock_log("ex007", now - TimeDelta::days(2), 3),
    ]);

    for limit in 1..=10 {
      let picked = recommend_for_user(&state, "user001", limit, now).await.unwrap();
      assert!(picked.len() <= limit);
      let ids: HashSet<&str> = picked.iter().map(|e| e.id.as_str()).collect();
      assert_eq!(ids.len(), picked.len());
    }
  }

  #[tokio::test]
  async fn test_recommend_for_user_blends_and_may_under_fill() {
    let now = utc(2024, 3, 6, 12, 0);
    let state = test_state_with_logs(vec![mock_log("ex001", now - TimeDelta::days(1), 2)]);

    // limit 4: level 2, history 1, time 1
    let picked = recommend_for_user(&state, "user001", 4, now).await.unwrap();
    let ids: Vec<&str> = picked.iter().map(|e| e.id.as_str()).collect();
    // level: ex001, ex002; history: no favourite share, balance picks ex005;
    // time: ex002 again, dropped as a duplicate
    assert_eq!(ids, vec!["ex001", "ex002", "ex005"]);
  }

  #[tokio::test]
  async fn test_rank_puts_recent_exercises_last() {
    let now = utc(2024, 3, 6, 12, 0);
    let state = test_state_with_logs(vec![mock_log("ex005", now - TimeDelta::days(1), 3)]);

    let ranked = rank_exercises_for_user(&state, "user001", now).await.unwrap();
    assert_eq!(ranked.len(), 24);
    // intermediate user: fresh intermediates score 30 and come first
    assert_eq!(ranked[0].difficulty, DifficultyLevel::Intermediate);
    assert_ne!(ranked[0].id, "ex005");
    let done = ranked.iter().position(|e| e.id == "ex005").unwrap();
    assert!(done > 15);
  }
}
