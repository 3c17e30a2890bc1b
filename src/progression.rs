//! Training-effect progression
//!
//! Scales an exercise's nominal effect by how many repetitions were done and
//! by the user's skill level. Beginners gain more from the same work; every
//! extra repetition is worth a little less, down to half the nominal effect.

use serde::{Deserialize, Serialize};

use crate::catalog::ExerciseCatalog;
use crate::models::{DifficultyLevel, ExerciseEffect};

/// Share of the effect lost per repetition
const REPETITION_DECAY: f64 = 0.01;
/// Upper bound on the repetition penalty
const MAX_REPETITION_PENALTY: f64 = 0.5;

// ---------------------------------------------------------------------------
/// Algorithm Selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionAlgorithm {
    /// Level multiplier with diminishing returns per repetition
    #[default]
    Default,
    /// Every field multiplied by the repetition count
    Linear,
}

impl std::fmt::Display for ProgressionAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Linear => write!(f, "linear"),
        }
    }
}

impl std::str::FromStr for ProgressionAlgorithm {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "linear" => Ok(Self::Linear),
            _ => Err(format!("Unknown progression algorithm: {}", s)),
        }
    }
}

/// 1.5 for beginners, 1.0 intermediate, 0.7 advanced
pub fn level_multiplier(level: DifficultyLevel) -> f64 {
    match level {
        DifficultyLevel::Beginner => 1.5,
        DifficultyLevel::Intermediate => 1.0,
        DifficultyLevel::Advanced => 0.7,
    }
}

/// Retained share after `repetitions`, never below 0.5
pub fn repetition_factor(repetitions: u32) -> f64 {
    1.0 - (repetitions as f64 * REPETITION_DECAY).min(MAX_REPETITION_PENALTY)
}

impl ProgressionAlgorithm {
    pub fn calculate_progression(
        &self,
        effect: ExerciseEffect,
        repetitions: u32,
        level: DifficultyLevel,
    ) -> ExerciseEffect {
        match self {
            Self::Default => {
                let multiplier = level_multiplier(level) * repetition_factor(repetitions);
                let scale = |v: u32| (v as f64 * multiplier).floor() as u32;
                ExerciseEffect {
                    muscle_growth: scale(effect.muscle_growth),
                    endurance_gain: scale(effect.endurance_gain),
                    flexibility_gain: scale(effect.flexibility_gain),
                    // calories are per session, not per level
                    calories_burned: effect.calories_burned,
                }
            }
            Self::Linear => ExerciseEffect {
                muscle_growth: effect.muscle_growth.saturating_mul(repetitions),
                endurance_gain: effect.endurance_gain.saturating_mul(repetitions),
                flexibility_gain: effect.flexibility_gain.saturating_mul(repetitions),
                calories_burned: effect.calories_burned.saturating_mul(repetitions),
            },
        }
    }

    /// Progressed effect of one catalog exercise, `None` if the id is unknown
    pub fn progression_for_exercise<C: ExerciseCatalog + ?Sized>(
        &self,
        catalog: &C,
        exercise_id: &str,
        repetitions: u32,
        level: DifficultyLevel,
    ) -> Option<ExerciseEffect> {
        catalog
            .get_effect(exercise_id)
            .map(|effect| self.calculate_progression(effect, repetitions, level))
    }

    /// Sum of progressed effects; unknown ids contribute nothing
    pub fn total_progression<C: ExerciseCatalog + ?Sized>(
        &self,
        catalog: &C,
        exercise_ids: &[String],
        repetitions: u32,
        level: DifficultyLevel,
    ) -> ExerciseEffect {
        exercise_ids
            .iter()
            .filter_map(|id| self.progression_for_exercise(catalog, id, repetitions, level))
            .sum()
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
