//! Projected load of a routine or a weekly plan
//!
//! An exercise's nominal duration, calories and muscle-growth score assume a
//! standard 3 x 10 volume. A routine that asks for more (or less) scales those
//! figures by its own sets x reps relative to that baseline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Routine, RoutineExercise, WeeklyPreset};

/// 3 sets x 10 reps
pub const STANDARD_VOLUME: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineAnalysisResult {
  pub total_time_minutes: u32,
  pub total_calories: u32,
  /// Muscle label -> share of the total muscle score, in percent
  pub muscle_impact: BTreeMap<String, u32>,
}

impl RoutineAnalysisResult {
  /// Muscles by descending share; equal shares keep label order
  pub fn ranked_muscles(&self) -> Vec<(&str, u32)> {
    let mut ranked: Vec<(&str, u32)> = self.muscle_impact.iter().map(|(m, p)| (m.as_str(), *p)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
  }
}

/// Planned volume relative to [`STANDARD_VOLUME`]; 1.0 when nothing is planned
pub fn intensity_ratio(routine_exercise: &RoutineExercise) -> f64 {
  match routine_exercise.target_volume() {
    0 => 1.0,
    volume => volume as f64 / STANDARD_VOLUME as f64,
  }
}

/// Convert raw scores to rounded percentages of their sum. Empty when the sum is 0.
fn to_percentages(scores: &BTreeMap<String, f64>) -> BTreeMap<String, u32> {
  let total: f64 = scores.values().sum();
  if total <= 0.0 {
    return BTreeMap::new();
  }
  scores
    .iter()
    .map(|(muscle, score)| (muscle.clone(), (score / total * 100.0).round() as u32))
    .collect()
}

pub fn analyze_routine(routine: &Routine) -> RoutineAnalysisResult {
  let mut time = 0.0;
  let mut calories = 0.0;
  let mut muscle_scores: BTreeMap<String, f64> = BTreeMap::new();

  for item in &routine.exercises {
    let ratio = intensity_ratio(item);
    let exercise = &item.exercise;

    time += exercise.duration_minutes as f64 * ratio;
    calories += exercise.effect.calories_burned as f64 * ratio;

    for muscle in &exercise.target_muscles {
      *muscle_scores.entry(muscle.clone()).or_insert(0.0) += exercise.effect.muscle_growth as f64 * ratio;
    }
  }

  RoutineAnalysisResult {
    total_time_minutes: time.round() as u32,
    total_calories: calories.round() as u32,
    muscle_impact: to_percentages(&muscle_scores),
  }
}

/// Aggregate over every routine planned in the week.
///
/// Each routine's muscle percentages are weighted by its total time before
/// re-normalising, which approximates the absolute scores rather than
/// reproducing them.
pub fn analyze_weekly_preset(preset: &WeeklyPreset) -> RoutineAnalysisResult {
  let mut total_time: u32 = 0;
  let mut total_calories: u32 = 0;
  let mut weighted: BTreeMap<String, f64> = BTreeMap::new();

  for routines in preset.weekly_schedule.values() {
    for routine in routines {
      let result = analyze_routine(routine);
      total_time = total_time.saturating_add(result.total_time_minutes);
      total_calories = total_calories.saturating_add(result.total_calories);

      for (muscle, percent) in &result.muscle_impact {
        *weighted.entry(muscle.clone()).or_insert(0.0) += *percent as f64 * result.total_time_minutes as f64;
      }
    }
  }

  RoutineAnalysisResult {
    total_time_minutes: total_time,
    total_calories,
    muscle_impact: to_percentages(&weighted),
  }
}
