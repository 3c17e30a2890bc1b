use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
  #[error("A workout log needs at least one set")]
  EmptySets,

  #[error("Set weight must be >= 0 (got {0})")]
  NegativeWeight(f64),

  #[error("Target weight must be >= 0 (got {0})")]
  NegativeTargetWeight(f64),

  #[error("Recommendation limit must be > 0")]
  InvalidLimit,
}

/// One performed set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
  /// kg
  pub weight: f64,
  pub reps: u32,
  #[serde(default = "default_completed")]
  pub completed: bool,
}

fn default_completed() -> bool {
  true
}

impl ExerciseSet {
  pub fn new(weight: f64, reps: u32) -> Self {
    Self {
      weight,
      reps,
      completed: true,
    }
  }

  pub fn volume(&self) -> f64 {
    self.weight * self.reps as f64
  }
}

/// A finished exercise. `date` travels as epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLog {
  #[serde(default)]
  pub id: String,
  pub exercise_id: String,
  #[serde(with = "chrono::serde::ts_milliseconds")]
  pub date: DateTime<Utc>,
  pub sets: Vec<ExerciseSet>,
  #[serde(default)]
  pub memo: String,
  #[serde(default)]
  pub duration_seconds: i64,
}

impl WorkoutLog {
  /// Build a log for a just-finished exercise.
  ///
  /// Fails when no sets were recorded or a set carries a negative weight.
  pub fn finish(
    exercise_id: impl Into<String>,
    date: DateTime<Utc>,
    sets: Vec<ExerciseSet>,
    duration_seconds: i64,
  ) -> Result<Self, ValidationError> {
    let log = Self {
      id: String::new(),
      exercise_id: exercise_id.into(),
      date,
      sets,
      memo: String::new(),
      duration_seconds: duration_seconds.max(0),
    };
    log.validate()?;
    Ok(log)
  }

  pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
    self.memo = memo.into();
    self
  }

  pub fn validate(&self) -> Result<(), ValidationError> {
    if self.sets.is_empty() {
      return Err(ValidationError::EmptySets);
    }
    if let Some(set) = self.sets.iter().find(|s| s.weight < 0.0) {
      return Err(ValidationError::NegativeWeight(set.weight));
    }
    Ok(())
  }

  pub fn set_count(&self) -> usize {
    self.sets.len()
  }

  /// Sum of weight x reps over all sets
  pub fn total_volume(&self) -> f64 {
    self.sets.iter().map(ExerciseSet::volume).sum()
  }
}
