use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::exercise::Exercise;
use super::workout::ValidationError;

pub const DEFAULT_TARGET_SETS: u32 = 3;
pub const DEFAULT_TARGET_REPS: u32 = 10;

/// An exercise inside a routine, with the user's own volume targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineExercise {
  pub exercise: Exercise,
  pub target_sets: u32,
  pub target_reps: u32,
  /// kg
  pub target_weight: f64,
}

impl RoutineExercise {
  pub fn new(exercise: Exercise, target_sets: u32, target_reps: u32, target_weight: f64) -> Result<Self, ValidationError> {
    if target_weight < 0.0 {
      return Err(ValidationError::NegativeTargetWeight(target_weight));
    }
    Ok(Self {
      exercise,
      target_sets,
      target_reps,
      target_weight,
    })
  }

  /// 3 x 10 at bodyweight
  pub fn with_defaults(exercise: Exercise) -> Self {
    Self {
      exercise,
      target_sets: DEFAULT_TARGET_SETS,
      target_reps: DEFAULT_TARGET_REPS,
      target_weight: 0.0,
    }
  }

  pub fn target_volume(&self) -> u32 {
    self.target_sets.saturating_mul(self.target_reps)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
  pub id: String,
  pub name: String,
  /// Execution order
  #[serde(default)]
  pub exercises: Vec<RoutineExercise>,
}

impl Routine {
  pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      exercises: Vec::new(),
    }
  }

  pub fn add_exercise(&mut self, exercise: Exercise, sets: u32, reps: u32, weight: f64) -> Result<(), ValidationError> {
    self.exercises.push(RoutineExercise::new(exercise, sets, reps, weight)?);
    Ok(())
  }

  pub fn total_target_sets(&self) -> u32 {
    self.exercises.iter().map(|e| e.target_sets).sum()
  }
}

/// ---------------------------------------------------------------------------
/// Weekly Preset
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Weekday {
  Mon,
  Tue,
  Wed,
  Thu,
  Fri,
  Sat,
  Sun,
}

impl Weekday {
  pub const ALL: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Weekday::Mon => "MON",
      Weekday::Tue => "TUE",
      Weekday::Wed => "WED",
      Weekday::Thu => "THU",
      Weekday::Fri => "FRI",
      Weekday::Sat => "SAT",
      Weekday::Sun => "SUN",
    }
  }
}

impl From<chrono::Weekday> for Weekday {
  fn from(day: chrono::Weekday) -> Self {
    match day {
      chrono::Weekday::Mon => Weekday::Mon,
      chrono::Weekday::Tue => Weekday::Tue,
      chrono::Weekday::Wed => Weekday::Wed,
      chrono::Weekday::Thu => Weekday::Thu,
      chrono::Weekday::Fri => Weekday::Fri,
      chrono::Weekday::Sat => Weekday::Sat,
      chrono::Weekday::Sun => Weekday::Sun,
    }
  }
}

impl From<Weekday> for chrono::Weekday {
  fn from(day: Weekday) -> Self {
    match day {
      Weekday::Mon => chrono::Weekday::Mon,
      Weekday::Tue => chrono::Weekday::Tue,
      Weekday::Wed => chrono::Weekday::Wed,
      Weekday::Thu => chrono::Weekday::Thu,
      Weekday::Fri => chrono::Weekday::Fri,
      Weekday::Sat => chrono::Weekday::Sat,
      Weekday::Sun => chrono::Weekday::Sun,
    }
  }
}

impl std::fmt::Display for Weekday {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Target schedule: which routines are planned on which weekday
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPreset {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub weekly_schedule: BTreeMap<Weekday, Vec<Routine>>,
}

impl WeeklyPreset {
  pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      weekly_schedule: BTreeMap::new(),
    }
  }

  /// Routines planned for `day`, in insertion order. Empty when nothing is planned.
  pub fn get_routine_day(&self, day: Weekday) -> &[Routine] {
    self.weekly_schedule.get(&day).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn add_routine(&mut self, day: Weekday, routine: Routine) {
    self.weekly_schedule.entry(day).or_default().push(routine);
  }

  /// Sum of target sets over every routine exercise planned on `day`
  pub fn target_sets_for(&self, day: Weekday) -> u32 {
    self.get_routine_day(day).iter().map(Routine::total_target_sets).sum()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::{DifficultyLevel, ExerciseCategory};
  use crate::test_utils::mock_exercise;

  #[test]
  fn test_preset_returns_routines_in_insertion_order() {
    let mut preset = WeeklyPreset::new("p1", "Split");
    preset.add_routine(Weekday::Mon, Routine::new("r1", "Chest"));
    preset.add_routine(Weekday::Mon, Routine::new("r2", "Back"));
    preset.add_routine(Weekday::Wed, Routine::new("r3", "Legs"));

    let monday: Vec<&str> = preset.get_routine_day(Weekday::Mon).iter().map(|r| r.id.as_str()).collect();
    assert_eq!(monday, vec!["r1", "r2"]);
    assert_eq!(preset.get_routine_day(Weekday::Wed).len(), 1);
    assert!(preset.get_routine_day(Weekday::Sun).is_empty());
  }

  #[test]
  fn test_target_sets_sum_per_day() {
    let ex = mock_exercise("ex1", ExerciseCategory::Strength, DifficultyLevel::Beginner);
    let mut a = Routine::new("r1", "A");
    a.add_exercise(ex.clone(), 3, 10, 60.0).unwrap();
    a.add_exercise(ex.clone(), 4, 8, 40.0).unwrap();
    let mut b = Routine::new("r2", "B");
    b.add_exercise(ex, 2, 12, 0.0).unwrap();

    let mut preset = WeeklyPreset::new("p1", "Week");
    preset.add_routine(Weekday::Fri, a);
    preset.add_routine(Weekday::Fri, b);

    assert_eq!(preset.target_sets_for(Weekday::Fri), 9);
    assert_eq!(preset.target_sets_for(Weekday::Sat), 0);
  }

  #[test]
  fn test_negative_target_weight_rejected() {
    let ex = mock_exercise("ex1", ExerciseCategory::Strength, DifficultyLevel::Beginner);
    let mut routine = Routine::new("r1", "A");
    assert_eq!(
      routine.add_exercise(ex, 3, 10, -1.0),
      Err(ValidationError::NegativeTargetWeight(-1.0))
    );
    assert!(routine.exercises.is_empty());
  }

  #[test]
  fn test_weekday_serializes_uppercase() {
    assert_eq!(serde_json::to_string(&Weekday::Thu).unwrap(), "\"THU\"");
    assert_eq!(Weekday::from(chrono::Weekday::Sun), Weekday::Sun);
  }
}
