//! Deterministic analysis layer for workout history
//!
//! Turns raw workout logs into period statistics: time, calories, distinct
//! training days, body-part distribution and, for weekly analysis, how much of
//! the planned sets were actually done on each weekday.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::calendar::CalendarConvention;
use crate::catalog::ExerciseCatalog;
use crate::models::{WeeklyPreset, Weekday, WorkoutLog};

/// ---------------------------------------------------------------------------
/// Period & Body Parts
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisPeriod {
  /// From the first day of the current week
  Weekly,
  /// From the 1st of the current month
  Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
  Upper,
  Lower,
  Core,
  FullBody,
  Other,
}

const UPPER_KEYWORDS: &[&str] = &["가슴", "어깨", "팔", "등", "chest", "shoulder", "arm", "back"];
const LOWER_KEYWORDS: &[&str] = &["하체", "다리", "허벅지", "종아리", "leg", "thigh", "calf"];
const CORE_KEYWORDS: &[&str] = &["복근", "코어", "abs", "core"];
const FULL_BODY_KEYWORDS: &[&str] = &["전신", "full body"];

impl BodyPart {
  /// Bucket for a primary muscle label. Checked upper, lower, core, full body, in that order.
  pub fn classify(primary_muscle: Option<&str>) -> Self {
    let Some(muscle) = primary_muscle else {
      return BodyPart::Other;
    };
    let muscle = muscle.to_lowercase();
    let has = |keywords: &[&str]| keywords.iter().any(|k| muscle.contains(k));

    if has(UPPER_KEYWORDS) {
      BodyPart::Upper
    } else if has(LOWER_KEYWORDS) {
      BodyPart::Lower
    } else if has(CORE_KEYWORDS) {
      BodyPart::Core
    } else if has(FULL_BODY_KEYWORDS) {
      BodyPart::FullBody
    } else {
      BodyPart::Other
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      BodyPart::Upper => "상체",
      BodyPart::Lower => "하체",
      BodyPart::Core => "코어",
      BodyPart::FullBody => "전신",
      BodyPart::Other => "기타",
    }
  }
}

/// ---------------------------------------------------------------------------
/// Results
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
  pub period: AnalysisPeriod,
  pub total_time_minutes: u32,
  pub total_calories: u32,
  pub workout_days_count: u32,
  /// Weekday -> percent of planned sets done. Weekly analysis only.
  pub daily_completion_rate: BTreeMap<Weekday, u32>,
  /// Body part -> percent of logs in the period
  pub muscle_distribution: BTreeMap<BodyPart, u32>,
}

/// Today's totals for the home screen
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySummary {
  pub workout_count: usize,
  /// Sum of weight x reps
  pub total_volume: f64,
  pub total_sets: usize,
}

/// ---------------------------------------------------------------------------
/// Analytics
/// ---------------------------------------------------------------------------

/// Period analytics over a catalog, in one local calendar
pub struct WorkoutAnalytics<'a, C: ExerciseCatalog + ?Sized> {
  catalog: &'a C,
  calendar: CalendarConvention,
}

impl<'a, C: ExerciseCatalog + ?Sized> WorkoutAnalytics<'a, C> {
  pub fn new(catalog: &'a C, calendar: CalendarConvention) -> Self {
    Self { catalog, calendar }
  }

  /// Local midnight at which `period` starts, relative to `now`
  pub fn period_start(&self, period: AnalysisPeriod, now: DateTime<Utc>) -> DateTime<Utc> {
    match period {
      AnalysisPeriod::Weekly => self.calendar.start_of_week(now),
      AnalysisPeriod::Monthly => self.calendar.start_of_month(now),
    }
  }

  /// Logs dated within `[period start, now]`
  pub fn filter_by_period<'l>(
    &self,
    logs: &'l [WorkoutLog],
    period: AnalysisPeriod,
    now: DateTime<Utc>,
  ) -> Vec<&'l WorkoutLog> {
    let start = self.period_start(period, now);
    logs.iter().filter(|l| l.date >= start && l.date <= now).collect()
  }

  pub fn analyze(&self, logs: &[WorkoutLog], period: AnalysisPeriod, preset: Option<&WeeklyPreset>) -> AnalysisResult {
    self.analyze_at(logs, period, preset, Utc::now())
  }

  pub fn analyze_at(
    &self,
    logs: &[WorkoutLog],
    period: AnalysisPeriod,
    preset: Option<&WeeklyPreset>,
    now: DateTime<Utc>,
  ) -> AnalysisResult {
    let filtered = self.filter_by_period(logs, period, now);

    let mut total_time: u32 = 0;
    let mut total_calories: u32 = 0;
    let mut body_part_counts: BTreeMap<BodyPart, u32> = BTreeMap::new();

    for log in &filtered {
      let Some(exercise) = self.catalog.get_by_id(&log.exercise_id) else {
        debug!(exercise_id = %log.exercise_id, log_id = %log.id, "Skipping log with unknown exercise");
        continue;
      };
      total_time = total_time.saturating_add(exercise.duration_minutes);
      total_calories = total_calories.saturating_add(exercise.effect.calories_burned);
      *body_part_counts.entry(BodyPart::classify(exercise.primary_muscle())).or_insert(0) += 1;
    }

    let days: BTreeSet<NaiveDate> = filtered.iter().map(|l| self.calendar.local_date(l.date)).collect();

    // Unresolved logs still count toward the denominator
    let total_logs = filtered.len();
    let muscle_distribution = if total_logs > 0 {
      body_part_counts
        .into_iter()
        .map(|(part, count)| (part, (count as f64 / total_logs as f64 * 100.0).round() as u32))
        .collect()
    } else {
      BTreeMap::new()
    };

    AnalysisResult {
      period,
      total_time_minutes: total_time,
      total_calories,
      workout_days_count: days.len() as u32,
      daily_completion_rate: calculate_daily_completion(&filtered, period, preset, &self.calendar),
      muscle_distribution,
    }
  }

  /// Totals over today's local day
  pub fn today_summary(&self, logs: &[WorkoutLog], now: DateTime<Utc>) -> TodaySummary {
    let (start, end) = self.calendar.today_range(now);
    logs
      .iter()
      .filter(|l| l.date >= start && l.date <= end)
      .fold(TodaySummary::default(), |mut acc, log| {
        acc.workout_count += 1;
        acc.total_volume += log.total_volume();
        acc.total_sets += log.set_count();
        acc
      })
  }
}

/// Percent of `target` sets performed, capped at 100.
///
/// With no target, any work counts as 100 and no work as 0.
pub fn completion_percent(performed_sets: usize, target_sets: u32) -> u32 {
  if target_sets == 0 {
    return if performed_sets > 0 { 100 } else { 0 };
  }
  let percent = (performed_sets as f64 / target_sets as f64 * 100.0).round() as u32;
  percent.min(100)
}

/// Planned-vs-done per weekday for logs already restricted to one week.
///
/// Every weekday is present for [`AnalysisPeriod::Weekly`]; monthly analysis
/// returns an empty map.
pub fn calculate_daily_completion(
  logs: &[&WorkoutLog],
  period: AnalysisPeriod,
  preset: Option<&WeeklyPreset>,
  calendar: &CalendarConvention,
) -> BTreeMap<Weekday, u32> {
  let mut rates = BTreeMap::new();
  if period != AnalysisPeriod::Weekly {
    return rates;
  }

  for day in Weekday::ALL {
    let target_sets = preset.map(|p| p.target_sets_for(day)).unwrap_or(0);
    let performed_sets: usize = logs
      .iter()
      .filter(|l| calendar.weekday_of(l.date) == day)
      .map(|l| l.set_count())
      .sum();
    rates.insert(day, completion_percent(performed_sets, target_sets));
  }
  rates
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::calendar::WeekStart;
  use crate::catalog::InMemoryCatalog;
  use crate::models::{ExerciseSet, Routine};
  use crate::test_utils::{mock_log, utc};

  fn analytics(catalog: &InMemoryCatalog) -> WorkoutAnalytics<'_, InMemoryCatalog> {
    WorkoutAnalytics::new(catalog, CalendarConvention::utc(WeekStart::Monday))
  }

  /// Wednesday 2024-03-06 12:00 UTC
  fn now() -> DateTime<Utc> {
    utc(2024, 3, 6, 12, 0)
  }

  #[test]
  fn test_body_part_classification() {
    assert_eq!(BodyPart::classify(Some("어깨")), BodyPart::Upper);
    assert_eq!(BodyPart::classify(Some("하체")), BodyPart::Lower);
    assert_eq!(BodyPart::classify(Some("코어")), BodyPart::Core);
    assert_eq!(BodyPart::classify(Some("전신")), BodyPart::FullBody);
    assert_eq!(BodyPart::classify(Some("대퇴사두근")), BodyPart::Other);
    assert_eq!(BodyPart::classify(Some("Upper Back")), BodyPart::Upper);
    assert_eq!(BodyPart::classify(None), BodyPart::Other);
  }

  #[test]
  fn test_empty_logs() {
    let catalog = InMemoryCatalog::with_defaults();
    let result = analytics(&catalog).analyze_at(&[], AnalysisPeriod::Weekly, None, now());

    assert_eq!(result.total_time_minutes, 0);
    assert_eq!(result.workout_days_count, 0);
    assert!(result.muscle_distribution.is_empty());
    assert_eq!(result.daily_completion_rate.len(), 7);
    assert!(result.daily_completion_rate.values().all(|&p| p == 0));
  }

  #[test]
  fn test_weekly_filter_and_totals() {
    let catalog = InMemoryCatalog::with_defaults();
    let logs = vec![
      mock_log("ex003", utc(2024, 3, 4, 9, 0), 2),   // Mon, 10 min, 30 kcal
      mock_log("ex009", utc(2024, 3, 4, 18, 0), 3),  // Mon, 10 min, 80 kcal
      mock_log("ex015", utc(2024, 3, 6, 8, 0), 1),   // Wed, 20 min, 150 kcal
      mock_log("ex001", utc(2024, 3, 3, 23, 0), 4),  // previous Sunday
      mock_log("ex001", utc(2024, 3, 6, 13, 0), 4),  // after now
    ];

    let result = analytics(&catalog).analyze_at(&logs, AnalysisPeriod::Weekly, None, now());
    assert_eq!(result.total_time_minutes, 40);
    assert_eq!(result.total_calories, 260);
    assert_eq!(result.workout_days_count, 2);
  }

  #[test]
  fn test_monthly_period_and_completion_left_empty() {
    let catalog = InMemoryCatalog::with_defaults();
    let logs = vec![
      mock_log("ex003", utc(2024, 3, 1, 9, 0), 2),
      mock_log("ex003", utc(2024, 2, 29, 9, 0), 2),
    ];
    let result = analytics(&catalog).analyze_at(&logs, AnalysisPeriod::Monthly, None, now());
    assert_eq!(result.workout_days_count, 1);
    assert!(result.daily_completion_rate.is_empty());
  }

  #[test]
  fn test_distribution_counts_unknown_logs_in_denominator() {
    let catalog = InMemoryCatalog::with_defaults();
    let logs = vec![
      mock_log("ex001", utc(2024, 3, 4, 9, 0), 1),   // 어깨 -> upper
      mock_log("ex009", utc(2024, 3, 4, 10, 0), 1),  // 코어 -> core
      mock_log("ex015", utc(2024, 3, 5, 10, 0), 1),  // 하체 -> lower
      mock_log("nope", utc(2024, 3, 5, 11, 0), 1),
    ];
    let result = analytics(&catalog).analyze_at(&logs, AnalysisPeriod::Weekly, None, now());

    assert_eq!(result.muscle_distribution[&BodyPart::Upper], 25);
    assert_eq!(result.muscle_distribution[&BodyPart::Core], 25);
    assert_eq!(result.muscle_distribution[&BodyPart::Lower], 25);
    assert!(!result.muscle_distribution.contains_key(&BodyPart::Other));
    // unknown exercise adds no time
    assert_eq!(result.total_time_minutes, 60 + 10 + 20);
  }

  #[test]
  fn test_distribution_sums_to_about_100() {
    let catalog = InMemoryCatalog::with_defaults();
    let logs = vec![
      mock_log("ex001", utc(2024, 3, 4, 9, 0), 1),
      mock_log("ex002", utc(2024, 3, 4, 10, 0), 1),
      mock_log("ex009", utc(2024, 3, 5, 10, 0), 1),
    ];
    let result = analytics(&catalog).analyze_at(&logs, AnalysisPeriod::Weekly, None, now());

    let sum: u32 = result.muscle_distribution.values().sum();
    let parts = result.muscle_distribution.len() as u32;
    assert!(sum.abs_diff(100) <= parts, "sum was {}", sum);
  }

  #[test]
  fn test_daily_completion_matches_plan() {
    let catalog = InMemoryCatalog::with_defaults();
    let exercise = catalog.get_by_id("ex005").unwrap().clone();

    let mut routine = Routine::new("r1", "Push");
    routine.add_exercise(exercise, 3, 10, 70.0).unwrap();
    let mut preset = WeeklyPreset::new("p1", "Week");
    preset.add_routine(Weekday::Mon, routine);

    let mut log = mock_log("ex005", utc(2024, 3, 4, 10, 0), 0);
    log.sets = vec![
      ExerciseSet::new(70.0, 10),
      ExerciseSet::new(70.0, 10),
      ExerciseSet::new(70.0, 8),
    ];

    let result = analytics(&catalog).analyze_at(&[log], AnalysisPeriod::Weekly, Some(&preset), now());
    assert_eq!(result.daily_completion_rate[&Weekday::Mon], 100);
    for day in Weekday::ALL.into_iter().filter(|d| *d != Weekday::Mon) {
      assert_eq!(result.daily_completion_rate[&day], 0);
    }
  }

  #[test]
  fn test_completion_percent_edges() {
    assert_eq!(completion_percent(5, 0), 100);
    assert_eq!(completion_percent(0, 0), 0);
    assert_eq!(completion_percent(12, 6), 100);
    assert_eq!(completion_percent(2, 3), 67);
    assert_eq!(completion_percent(0, 4), 0);
  }

  #[test]
  fn test_week_start_changes_window() {
    let catalog = InMemoryCatalog::with_defaults();
    // Sunday before the Wednesday `now`
    let logs = vec![mock_log("ex003", utc(2024, 3, 3, 9, 0), 2)];

    let monday = analytics(&catalog).analyze_at(&logs, AnalysisPeriod::Weekly, None, now());
    assert_eq!(monday.workout_days_count, 0);

    let sunday = WorkoutAnalytics::new(&catalog, CalendarConvention::utc(WeekStart::Sunday));
    let result = sunday.analyze_at(&logs, AnalysisPeriod::Weekly, None, now());
    assert_eq!(result.workout_days_count, 1);
    assert_eq!(result.daily_completion_rate[&Weekday::Sun], 100);
  }

  #[test]
  fn test_today_summary() {
    let catalog = InMemoryCatalog::with_defaults();
    let mut heavy = mock_log("ex005", utc(2024, 3, 6, 7, 0), 0);
    heavy.sets = vec![ExerciseSet::new(60.0, 10), ExerciseSet::new(60.0, 8)];
    let logs = vec![
      heavy,
      mock_log("ex009", utc(2024, 3, 6, 23, 59), 2),
      mock_log("ex009", utc(2024, 3, 5, 23, 59), 2),
    ];

    let summary = analytics(&catalog).today_summary(&logs, now());
    assert_eq!(summary.workout_count, 2);
    assert_eq!(summary.total_sets, 4);
    assert_eq!(summary.total_volume, 1080.0);
  }
}
