//! Composable exercise predicates

use serde::{Deserialize, Serialize};

use crate::models::{DifficultyLevel, Exercise, ExerciseCategory};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ExerciseFilter {
  Category(ExerciseCategory),
  Difficulty(DifficultyLevel),
  /// Case-insensitive; matches when a target muscle contains the query or the query contains it
  TargetMuscle(String),
  /// Free text over name, description, category label and muscles
  SearchQuery(String),
  /// Logical AND; an empty list matches everything
  Composite(Vec<ExerciseFilter>),
}

impl ExerciseFilter {
  pub fn matches(&self, exercise: &Exercise) -> bool {
    match self {
      ExerciseFilter::Category(category) => exercise.category == *category,
      ExerciseFilter::Difficulty(level) => exercise.difficulty == *level,
      ExerciseFilter::TargetMuscle(query) => {
        let q = query.to_lowercase();
        exercise.target_muscles.iter().any(|m| {
          let m = m.to_lowercase();
          m.contains(&q) || q.contains(&m)
        })
      }
      ExerciseFilter::SearchQuery(query) => exercise.matches_search_query(query),
      ExerciseFilter::Composite(filters) => filters.iter().all(|f| f.matches(exercise)),
    }
  }

  /// AND together whichever criteria are set
  pub fn from_criteria(
    category: Option<ExerciseCategory>,
    difficulty: Option<DifficultyLevel>,
    target_muscle: Option<&str>,
  ) -> Self {
    let mut filters = Vec::new();
    if let Some(c) = category {
      filters.push(ExerciseFilter::Category(c));
    }
    if let Some(d) = difficulty {
      filters.push(ExerciseFilter::Difficulty(d));
    }
    if let Some(m) = target_muscle {
      filters.push(ExerciseFilter::TargetMuscle(m.to_string()));
    }
    ExerciseFilter::Composite(filters)
  }

  pub fn apply<'a>(&self, exercises: &'a [Exercise]) -> Vec<&'a Exercise> {
    exercises.iter().filter(|e| self.matches(e)).collect()
  }
}
