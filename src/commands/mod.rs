pub mod analysis;
pub mod profile;
pub mod progression;
pub mod recommendation;
pub mod workout;

use crate::catalog::ExerciseCatalog;
use crate::db::AppState;
use crate::filter::ExerciseFilter;
use crate::models::{Exercise, WeeklyPreset, Weekday};
use crate::store::{StoreError, StoreResult};

/// Catalog exercises matching `filter`, in catalog order
pub fn get_exercises(state: &AppState, filter: &ExerciseFilter) -> Vec<Exercise> {
  state.catalog.search(filter)
}

pub fn get_exercise(state: &AppState, id: &str) -> StoreResult<Exercise> {
  state
    .catalog
    .get_by_id(id)
    .cloned()
    .ok_or_else(|| StoreError::not_found("exercise", id))
}

/// Build a weekly plan from stored routines. Unknown routine ids are skipped.
pub async fn build_weekly_preset(
  state: &AppState,
  id: &str,
  name: &str,
  assignments: &[(Weekday, &str)],
) -> StoreResult<WeeklyPreset> {
  let mut preset = WeeklyPreset::new(id, name);
  for (day, routine_id) in assignments {
    match state.routines.get_by_id(routine_id).await? {
      Some(routine) => preset.add_routine(*day, routine),
      None => tracing::debug!(routine_id = %routine_id, day = %day, "Skipping unknown routine"),
    }
  }
  Ok(preset)
}
