//! Exercise recommendation strategies
//!
//! Each strategy is a self-contained selection rule over a candidate list.
//! Strategies never return more than `limit` items and return an empty list
//! for empty input. [`RecommendationStrategy::Hybrid`] blends three
//! sub-strategies by fixed weights.

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::models::{DifficultyLevel, Exercise, ExerciseCategory, WorkoutLog};

pub const DEFAULT_BALANCE_RATIO: f64 = 0.3;
pub const DEFAULT_STALE_AFTER_DAYS: i64 = 7;

/// Share of the limit given to each hybrid sub-strategy.
///
/// The time strategy receives whatever the floors of the other two leave over,
/// so `time` is informational.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridWeights {
  pub level: f64,
  pub history: f64,
  pub time: f64,
}

impl Default for HybridWeights {
  fn default() -> Self {
    Self {
      level: 0.5,
      history: 0.3,
      time: 0.2,
    }
  }
}

#[derive(Debug, Clone)]
pub enum RecommendationStrategy {
  /// Difficulty at most one step above the user, easiest first
  LevelBased { user_level: DifficultyLevel },
  /// Exact category, input order
  CategoryBased { category: ExerciseCategory },
  /// At least `min_calories` per session, highest first
  CalorieBased { min_calories: u32 },
  /// At most `max_minutes`, shortest first
  DurationBased { max_minutes: u32 },
  /// Mostly undone exercises from the favourite category, the rest from other categories
  HistoryBased {
    done_exercise_ids: HashSet<String>,
    balance_ratio: f64,
  },
  /// Never performed, or not performed for more than `threshold_days`
  TimeBased {
    last_performed: HashMap<String, DateTime<Utc>>,
    threshold_days: i64,
  },
  Hybrid {
    level: Box<RecommendationStrategy>,
    history: Box<RecommendationStrategy>,
    time: Box<RecommendationStrategy>,
    weights: HybridWeights,
  },
}

impl RecommendationStrategy {
  pub fn level_based(user_level: DifficultyLevel) -> Self {
    Self::LevelBased { user_level }
  }

  pub fn category_based(category: ExerciseCategory) -> Self {
    Self::CategoryBased { category }
  }

  pub fn calorie_based(min_calories: u32) -> Self {
    Self::CalorieBased { min_calories }
  }

  pub fn duration_based(max_minutes: u32) -> Self {
    Self::DurationBased { max_minutes }
  }

  pub fn history_based(done_exercise_ids: impl IntoIterator<Item = String>) -> Self {
    Self::HistoryBased {
      done_exercise_ids: done_exercise_ids.into_iter().collect(),
      balance_ratio: DEFAULT_BALANCE_RATIO,
    }
  }

  pub fn time_based(last_performed: HashMap<String, DateTime<Utc>>) -> Self {
    Self::TimeBased {
      last_performed,
      threshold_days: DEFAULT_STALE_AFTER_DAYS,
    }
  }

  pub fn hybrid(level: Self, history: Self, time: Self) -> Self {
    Self::Hybrid {
      level: Box::new(level),
      history: Box::new(history),
      time: Box::new(time),
      weights: HybridWeights::default(),
    }
  }

  /// Standard hybrid for a user: level + workout history + staleness
  pub fn for_user(user_level: DifficultyLevel, logs: &[WorkoutLog]) -> Self {
    Self::hybrid(
      Self::level_based(user_level),
      Self::history_based(done_exercise_ids(logs)),
      Self::time_based(last_performed_by_exercise(logs)),
    )
  }

  pub fn recommend(&self, candidates: &[Exercise], limit: usize) -> Vec<Exercise> {
    self.recommend_at(candidates, limit, Utc::now())
  }

  /// Same as [`recommend`](Self::recommend) with an explicit clock for the time-based rule
  pub fn recommend_at(&self, candidates: &[Exercise], limit: usize, now: DateTime<Utc>) -> Vec<Exercise> {
    if limit == 0 || candidates.is_empty() {
      return Vec::new();
    }

    match self {
      Self::LevelBased { user_level } => {
        let mut picked: Vec<Exercise> = candidates
          .iter()
          .filter(|e| e.is_recommended_for(*user_level))
          .cloned()
          .collect();
        picked.sort_by_key(|e| e.difficulty.level());
        picked.truncate(limit);
        picked
      }

      Self::CategoryBased { category } => candidates
        .iter()
        .filter(|e| e.category == *category)
        .take(limit)
        .cloned()
        .collect(),

      Self::CalorieBased { min_calories } => {
        let mut picked: Vec<Exercise> = candidates
          .iter()
          .filter(|e| e.calories_per_session >= *min_calories)
          .cloned()
          .collect();
        picked.sort_by(|a, b| b.calories_per_session.cmp(&a.calories_per_session));
        picked.truncate(limit);
        picked
      }

      Self::DurationBased { max_minutes } => {
        let mut picked: Vec<Exercise> = candidates
          .iter()
          .filter(|e| e.duration_minutes <= *max_minutes)
          .cloned()
          .collect();
        picked.sort_by_key(|e| e.duration_minutes);
        picked.truncate(limit);
        picked
      }

      Self::HistoryBased {
        done_exercise_ids,
        balance_ratio,
      } => recommend_from_history(candidates, limit, done_exercise_ids, *balance_ratio),

      Self::TimeBased {
        last_performed,
        threshold_days,
      } => {
        // None: threshold beyond TimeDelta range, nothing performed goes stale
        let threshold = TimeDelta::try_days(*threshold_days);
        candidates
          .iter()
          .filter(|e| match (last_performed.get(&e.id), threshold) {
            (None, _) => true,
            (Some(last), Some(threshold)) => now - *last > threshold,
            (Some(_), None) => false,
          })
          .take(limit)
          .cloned()
          .collect()
      }

      Self::Hybrid {
        level,
        history,
        time,
        weights,
      } => {
        let level_count = (limit as f64 * weights.level).floor() as usize;
        let history_count = (limit as f64 * weights.history).floor() as usize;
        let time_count = limit.saturating_sub(level_count + history_count);

        let mut seen = HashSet::new();
        let mut merged = Vec::with_capacity(limit);
        let parts = [
          level.recommend_at(candidates, level_count, now),
          history.recommend_at(candidates, history_count, now),
          time.recommend_at(candidates, time_count, now),
        ];
        for exercise in parts.into_iter().flatten() {
          if seen.insert(exercise.id.clone()) {
            merged.push(exercise);
          }
        }
        merged.truncate(limit);

        // Overlapping sub-results are deduplicated without backfill, so the
        // blend can come back short of `limit`.
        if merged.len() < limit {
          debug!(
            requested = limit,
            returned = merged.len(),
            "Hybrid recommendation under-filled after de-duplication"
          );
        }
        merged
      }
    }
  }
}

fn recommend_from_history(
  candidates: &[Exercise],
  limit: usize,
  done: &HashSet<String>,
  balance_ratio: f64,
) -> Vec<Exercise> {
  // Category counts in first-seen order so ties resolve to the earliest category
  let mut counts: Vec<(ExerciseCategory, usize)> = Vec::new();
  for exercise in candidates.iter().filter(|e| done.contains(&e.id)) {
    match counts.iter_mut().find(|(c, _)| *c == exercise.category) {
      Some((_, n)) => *n += 1,
      None => counts.push((exercise.category, 1)),
    }
  }
  let favorite = counts
    .iter()
    .fold(None::<(ExerciseCategory, usize)>, |best, &(c, n)| match best {
      Some((_, best_n)) if best_n >= n => best,
      _ => Some((c, n)),
    })
    .map(|(c, _)| c);

  let favorite_count = (limit as f64 * (1.0 - balance_ratio)).floor() as usize;
  let balance_count = limit.saturating_sub(favorite_count);

  let undone = |e: &&Exercise| !done.contains(&e.id);

  let mut picked: Vec<Exercise> = match favorite {
    Some(category) => candidates
      .iter()
      .filter(undone)
      .filter(|e| e.category == category)
      .take(favorite_count)
      .cloned()
      .collect(),
    None => Vec::new(),
  };

  picked.extend(
    candidates
      .iter()
      .filter(undone)
      .filter(|e| Some(e.category) != favorite)
      .take(balance_count)
      .cloned(),
  );

  picked.truncate(limit);
  picked
}

// ---------------------------------------------------------------------------
/// History Helpers
// ---------------------------------------------------------------------------

pub fn done_exercise_ids(logs: &[WorkoutLog]) -> HashSet<String> {
  logs.iter().map(|l| l.exercise_id.clone()).collect()
}

/// Most recent log date per exercise id
pub fn last_performed_by_exercise(logs: &[WorkoutLog]) -> HashMap<String, DateTime<Utc>> {
  let mut last: HashMap<String, DateTime<Utc>> = HashMap::new();
  for log in logs {
    last
      .entry(log.exercise_id.clone())
      .and_modify(|d| {
        if log.date > *d {
          *d = log.date;
        }
      })
      .or_insert(log.date);
  }
  last
}

/// Score-ranked full list: +10 for the user's level, +5 for an adjacent level,
/// +20 when not among `recent_ids`. Ties keep catalog order.
pub fn rank_for_profile(
  candidates: &[Exercise],
  recent_ids: &HashSet<String>,
  user_level: DifficultyLevel,
) -> Vec<Exercise> {
  let score = |e: &Exercise| -> u32 {
    let mut s = 0;
    let diff = (e.difficulty.level() as i32 - user_level.level() as i32).abs();
    if diff == 0 {
      s += 10;
    } else if diff == 1 {
      s += 5;
    }
    if !recent_ids.contains(&e.id) {
      s += 20;
    }
    s
  };

  let mut ranked = candidates.to_vec();
  ranked.sort_by(|a, b| score(b).cmp(&score(a)));
  ranked
}
