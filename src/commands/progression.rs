//! Progression commands over the stored profile and catalog

use crate::db::AppState;
use crate::models::{DifficultyLevel, ExerciseEffect};
use crate::progression::ProgressionAlgorithm;
use crate::store::{StoreError, StoreResult};

async fn user_level(state: &AppState, user_id: &str) -> StoreResult<DifficultyLevel> {
    state
        .profiles
        .get(user_id)
        .await?
        .map(|p| p.difficulty())
        .ok_or_else(|| StoreError::not_found("profile", user_id))
}

/// Progressed effect of one exercise for the user
pub async fn get_exercise_progression(
    state: &AppState,
    user_id: &str,
    exercise_id: &str,
    repetitions: u32,
    algorithm: ProgressionAlgorithm,
) -> StoreResult<ExerciseEffect> {
    let level = user_level(state, user_id).await?;
    algorithm
        .progression_for_exercise(state.catalog.as_ref(), exercise_id, repetitions, level)
        .ok_or_else(|| StoreError::not_found("exercise", exercise_id))
}

/// Summed progressed effect over several exercises; unknown ids are skipped
pub async fn get_total_progression(
    state: &AppState,
    user_id: &str,
    exercise_ids: &[String],
    repetitions: u32,
    algorithm: ProgressionAlgorithm,
) -> StoreResult<ExerciseEffect> {
    let level = user_level(state, user_id).await?;
    Ok(algorithm.total_progression(state.catalog.as_ref(), exercise_ids, repetitions, level))
}
