use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::Add;

/// Training effect of one session of an exercise.
///
/// Growth/endurance/flexibility are unitless 0-100 scores, calories are kcal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseEffect {
  pub muscle_growth: u32,
  pub endurance_gain: u32,
  pub flexibility_gain: u32,
  pub calories_burned: u32,
}

impl ExerciseEffect {
  pub fn new(muscle_growth: u32, endurance_gain: u32, flexibility_gain: u32, calories_burned: u32) -> Self {
    Self {
      muscle_growth,
      endurance_gain,
      flexibility_gain,
      calories_burned,
    }
  }
}

impl Add for ExerciseEffect {
  type Output = Self;

  fn add(self, other: Self) -> Self {
    Self {
      muscle_growth: self.muscle_growth.saturating_add(other.muscle_growth),
      endurance_gain: self.endurance_gain.saturating_add(other.endurance_gain),
      flexibility_gain: self.flexibility_gain.saturating_add(other.flexibility_gain),
      calories_burned: self.calories_burned.saturating_add(other.calories_burned),
    }
  }
}

impl Sum for ExerciseEffect {
  fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
    iter.fold(Self::default(), Add::add)
  }
}

/// ---------------------------------------------------------------------------
/// Category & Difficulty
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExerciseCategory {
  Stretching,
  Strength,
  Cardio,
  Balance,
  Flexibility,
}

impl ExerciseCategory {
  pub const ALL: [ExerciseCategory; 5] = [
    ExerciseCategory::Stretching,
    ExerciseCategory::Strength,
    ExerciseCategory::Cardio,
    ExerciseCategory::Balance,
    ExerciseCategory::Flexibility,
  ];

  /// Label shown to users (and matched by free-text search)
  pub fn display_name(&self) -> &'static str {
    match self {
      ExerciseCategory::Stretching => "스트레칭",
      ExerciseCategory::Strength => "근력",
      ExerciseCategory::Cardio => "유산소",
      ExerciseCategory::Balance => "밸런스",
      ExerciseCategory::Flexibility => "유연성",
    }
  }

  pub fn from_display_name(value: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|c| c.display_name() == value)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DifficultyLevel {
  Beginner,
  Intermediate,
  Advanced,
}

impl DifficultyLevel {
  pub const ALL: [DifficultyLevel; 3] = [
    DifficultyLevel::Beginner,
    DifficultyLevel::Intermediate,
    DifficultyLevel::Advanced,
  ];

  /// Ordinal used for comparisons: 1 = beginner, 3 = advanced
  pub fn level(&self) -> u8 {
    match self {
      DifficultyLevel::Beginner => 1,
      DifficultyLevel::Intermediate => 2,
      DifficultyLevel::Advanced => 3,
    }
  }

  pub fn display_name(&self) -> &'static str {
    match self {
      DifficultyLevel::Beginner => "초급",
      DifficultyLevel::Intermediate => "중급",
      DifficultyLevel::Advanced => "고급",
    }
  }

  pub fn from_display_name(value: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|d| d.display_name() == value)
  }
}

/// ---------------------------------------------------------------------------
/// Exercise
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
  pub id: String,
  pub name: String,
  pub category: ExerciseCategory,
  pub difficulty: DifficultyLevel,
  pub duration_minutes: u32,
  pub calories_per_session: u32,
  /// First entry is the primary muscle group
  pub target_muscles: Vec<String>,
  #[serde(default)]
  pub description: String,
  pub effect: ExerciseEffect,
}

impl Exercise {
  pub fn primary_muscle(&self) -> Option<&str> {
    self.target_muscles.first().map(String::as_str)
  }

  /// Case-insensitive substring match over name, description, category label
  /// and target muscles. A blank query matches everything.
  pub fn matches_search_query(&self, query: &str) -> bool {
    if query.trim().is_empty() {
      return true;
    }

    let q = query.to_lowercase();
    self.name.to_lowercase().contains(&q)
      || self.description.to_lowercase().contains(&q)
      || self.category.display_name().to_lowercase().contains(&q)
      || self.target_muscles.iter().any(|m| m.to_lowercase().contains(&q))
  }

  /// At most one difficulty step above the user's level
  pub fn is_recommended_for(&self, user_level: DifficultyLevel) -> bool {
    self.difficulty.level() <= user_level.level() + 1
  }

  pub fn is_suitable_for(&self, user_level: DifficultyLevel) -> bool {
    self.difficulty == user_level
  }
}
