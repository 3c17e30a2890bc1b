pub mod exercise;
pub mod workout;
pub mod routine;
pub mod profile;

pub use exercise::{DifficultyLevel, Exercise, ExerciseCategory, ExerciseEffect};
pub use workout::{ExerciseSet, ValidationError, WorkoutLog};
pub use routine::{Routine, RoutineExercise, WeeklyPreset, Weekday};
pub use profile::{BmiCategory, UserProfile};
