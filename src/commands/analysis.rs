use chrono::{DateTime, Utc};

use crate::analysis::{AnalysisPeriod, AnalysisResult, TodaySummary, WorkoutAnalytics};
use crate::db::AppState;
use crate::models::WeeklyPreset;
use crate::routine_analytics::{analyze_routine, analyze_weekly_preset, RoutineAnalysisResult};
use crate::store::StoreResult;

/// ---------------------------------------------------------------------------
/// Workout History Analysis
/// ---------------------------------------------------------------------------

pub async fn get_workout_analysis(
  state: &AppState,
  period: AnalysisPeriod,
  preset: Option<&WeeklyPreset>,
) -> StoreResult<AnalysisResult> {
  get_workout_analysis_at(state, period, preset, Utc::now()).await
}

/// Load the period's logs and analyse them as of `now`
pub async fn get_workout_analysis_at(
  state: &AppState,
  period: AnalysisPeriod,
  preset: Option<&WeeklyPreset>,
  now: DateTime<Utc>,
) -> StoreResult<AnalysisResult> {
  let analytics = WorkoutAnalytics::new(state.catalog.as_ref(), state.calendar());
  let start = analytics.period_start(period, now);
  let logs = state.history.get_by_date_range(start, now).await?;

  let result = analytics.analyze_at(&logs, period, preset, now);
  tracing::debug!(
    ?period,
    logs = logs.len(),
    days = result.workout_days_count,
    minutes = result.total_time_minutes,
    "Computed workout analysis"
  );
  Ok(result)
}

pub async fn get_today_summary(state: &AppState, now: DateTime<Utc>) -> StoreResult<TodaySummary> {
  let calendar = state.calendar();
  let (start, end) = calendar.today_range(now);
  let logs = state.history.get_by_date_range(start, end).await?;
  Ok(WorkoutAnalytics::new(state.catalog.as_ref(), calendar).today_summary(&logs, now))
}

/// ---------------------------------------------------------------------------
/// Routine Projection
/// ---------------------------------------------------------------------------

/// `None` when no routine has this id
pub async fn get_routine_analysis(state: &AppState, routine_id: &str) -> StoreResult<Option<RoutineAnalysisResult>> {
  Ok(state.routines.get_by_id(routine_id).await?.as_ref().map(analyze_routine))
}

pub fn get_weekly_preset_analysis(preset: &WeeklyPreset) -> RoutineAnalysisResult {
  analyze_weekly_preset(preset)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::analysis::BodyPart;
  use crate::commands::build_weekly_preset;
  use crate::db::AppState;
  use crate::models::Weekday;
  use crate::test_utils::*;
  use serial_test::serial;

  #[tokio::test]
  async fn test_weekly_analysis_reads_only_the_current_week() {
    let state = test_state_with_logs(vec![
      mock_log("ex009", utc(2024, 3, 4, 9, 0), 3),   // Mon
      mock_log("ex015", utc(2024, 3, 5, 9, 0), 2),   // Tue
      mock_log("ex001", utc(2024, 2, 28, 9, 0), 3),  // last week
    ]);

    let result = get_workout_analysis_at(&state, AnalysisPeriod::Weekly, None, utc(2024, 3, 6, 12, 0))
      .await
      .unwrap();

    assert_eq!(result.total_time_minutes, 30);
    assert_eq!(result.workout_days_count, 2);
    assert_eq!(result.muscle_distribution[&BodyPart::Core], 50);
    assert_eq!(result.muscle_distribution[&BodyPart::Lower], 50);
  }

  #[tokio::test]
  async fn test_weekly_analysis_against_stored_routines() {
    let state = test_state_with_logs(vec![mock_log("ex005", utc(2024, 3, 4, 9, 0), 3)]);
    let preset = build_weekly_preset(&state, "p1", "Week", &[(Weekday::Mon, "routine001")])
      .await
      .unwrap();

    let result = get_workout_analysis_at(&state, AnalysisPeriod::Weekly, Some(&preset), utc(2024, 3, 6, 12, 0))
      .await
      .unwrap();

    // routine001 plans 6 sets on Monday
    assert_eq!(result.daily_completion_rate[&Weekday::Mon], 50);
    assert_eq!(result.daily_completion_rate[&Weekday::Tue], 0);
  }

  #[tokio::test]
  async fn test_routine_analysis_missing_routine_is_none() {
    let state = test_state();
    assert!(get_routine_analysis(&state, "missing").await.unwrap().is_none());

    let chest = get_routine_analysis(&state, "routine001").await.unwrap().unwrap();
    assert!(chest.total_time_minutes > 0);
    assert!(chest.muscle_impact.contains_key("가슴"));
  }

  #[tokio::test]
  async fn test_today_summary_over_store() {
    let mut heavy = mock_log("ex005", utc(2024, 3, 6, 8, 0), 0);
    heavy.sets = vec![crate::models::ExerciseSet::new(10.0, 12)];
    let state = test_state_with_logs(vec![heavy, mock_log("ex009", utc(2024, 3, 5, 8, 0), 2)]);

    let summary = get_today_summary(&state, utc(2024, 3, 6, 12, 0)).await.unwrap();
    assert_eq!(summary.workout_count, 1);
    assert_eq!(summary.total_sets, 1);
    assert_eq!(summary.total_volume, 120.0);
  }

  #[tokio::test]
  #[serial]
  async fn test_monthly_analysis_with_sqlite_backend() {
    let pool = setup_test_db().await;
    let state = AppState::sqlite(pool.clone(), test_config()).await.unwrap();

    state.history.save(mock_log("ex014", utc(2024, 3, 4, 7, 0), 4)).await.unwrap();
    let result = get_workout_analysis_at(&state, AnalysisPeriod::Monthly, None, utc(2024, 3, 6, 12, 0))
      .await
      .unwrap();

    assert_eq!(result.total_calories, 200);
    assert!(result.daily_completion_rate.is_empty());

    teardown_test_db(pool).await;
  }
}
