//! In-memory stores, optionally seeded with sample data
//!
//! Nothing here survives a restart. Used by tests and by the binary when no
//! database is wanted.

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::{ensure_id, ProfileStore, RoutineStore, StoreResult, WorkoutHistoryStore};
use crate::catalog::ExerciseCatalog;
use crate::models::{ExerciseSet, Routine, RoutineExercise, UserProfile, WorkoutLog};

/// ---------------------------------------------------------------------------
/// Sample Data
/// ---------------------------------------------------------------------------

pub const SAMPLE_USER_ID: &str = "user001";

pub fn sample_profile() -> UserProfile {
  UserProfile {
    user_id: SAMPLE_USER_ID.to_string(),
    name: "홍길동".to_string(),
    age: 25,
    height: 175.0,
    weight: 70.0,
    level: 1,
    place: vec!["헬스장".to_string(), "집".to_string()],
    goal: "근육 증량".to_string(),
  }
}

/// Chest, leg and full-body routines built from catalog exercises.
/// Entries whose exercise is missing from `catalog` are left out.
pub fn sample_routines<C: ExerciseCatalog + ?Sized>(catalog: &C) -> Vec<Routine> {
  let plan: [(&str, &str, &[(&str, u32, u32, f64)]); 3] = [
    ("routine001", "가슴 루틴", &[("ex005", 3, 10, 0.0), ("ex006", 3, 12, 0.0)]),
    ("routine002", "하체 루틴", &[("ex007", 4, 8, 0.0), ("ex011", 3, 12, 10.0)]),
    (
      "routine003",
      "전신 루틴",
      &[("ex005", 3, 10, 0.0), ("ex007", 3, 10, 0.0), ("ex013", 4, 12, 45.0)],
    ),
  ];

  plan
    .iter()
    .map(|(id, name, items)| {
      let mut routine = Routine::new(*id, *name);
      routine.exercises = items
        .iter()
        .filter_map(|(exercise_id, sets, reps, weight)| {
          let exercise = catalog.get_by_id(exercise_id)?.clone();
          RoutineExercise::new(exercise, *sets, *reps, *weight).ok()
        })
        .collect();
      routine
    })
    .collect()
}

/// One log yesterday, one today
pub fn sample_logs(now: DateTime<Utc>) -> Vec<WorkoutLog> {
  vec![
    WorkoutLog {
      id: "log001".to_string(),
      exercise_id: "ex005".to_string(),
      date: now - TimeDelta::days(1),
      sets: vec![
        ExerciseSet::new(0.0, 15),
        ExerciseSet::new(0.0, 15),
        ExerciseSet::new(0.0, 12),
      ],
      memo: "컨디션 좋았음".to_string(),
      duration_seconds: 720,
    },
    WorkoutLog {
      id: "log002".to_string(),
      exercise_id: "ex007".to_string(),
      date: now,
      sets: vec![
        ExerciseSet::new(20.0, 8),
        ExerciseSet::new(20.0, 8),
        ExerciseSet::new(20.0, 6),
      ],
      memo: "스쿼트 무거워짐".to_string(),
      duration_seconds: 900,
    },
  ]
}

/// ---------------------------------------------------------------------------
/// Workout History
/// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct InMemoryWorkoutHistoryStore {
  logs: RwLock<Vec<WorkoutLog>>,
}

impl InMemoryWorkoutHistoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_logs(logs: Vec<WorkoutLog>) -> Self {
    Self { logs: RwLock::new(logs) }
  }
}

#[async_trait::async_trait]
impl WorkoutHistoryStore for InMemoryWorkoutHistoryStore {
  async fn get_by_id(&self, id: &str) -> StoreResult<Option<WorkoutLog>> {
    Ok(self.logs.read().await.iter().find(|l| l.id == id).cloned())
  }

  async fn get_by_date_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> StoreResult<Vec<WorkoutLog>> {
    let mut logs: Vec<WorkoutLog> = self
      .logs
      .read()
      .await
      .iter()
      .filter(|l| l.date >= start && l.date <= end)
      .cloned()
      .collect();
    logs.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(logs)
  }

  async fn save(&self, mut log: WorkoutLog) -> StoreResult<WorkoutLog> {
    log.validate()?;
    ensure_id(&mut log.id);

    let mut logs = self.logs.write().await;
    match logs.iter_mut().find(|l| l.id == log.id) {
      Some(existing) => {
        debug!(log_id = %log.id, "Updating workout log");
        *existing = log.clone();
      }
      None => {
        debug!(log_id = %log.id, exercise_id = %log.exercise_id, "Adding workout log");
        logs.push(log.clone());
      }
    }
    Ok(log)
  }

  async fn delete(&self, id: &str) -> StoreResult<()> {
    self.logs.write().await.retain(|l| l.id != id);
    debug!(log_id = %id, "Deleted workout log");
    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// Routines
/// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct InMemoryRoutineStore {
  routines: RwLock<Vec<Routine>>,
}

impl InMemoryRoutineStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_routines(routines: Vec<Routine>) -> Self {
    Self {
      routines: RwLock::new(routines),
    }
  }
}

#[async_trait::async_trait]
impl RoutineStore for InMemoryRoutineStore {
  async fn get_by_id(&self, id: &str) -> StoreResult<Option<Routine>> {
    Ok(self.routines.read().await.iter().find(|r| r.id == id).cloned())
  }

  async fn get_all(&self) -> StoreResult<Vec<Routine>> {
    Ok(self.routines.read().await.clone())
  }

  async fn save(&self, mut routine: Routine) -> StoreResult<Routine> {
    ensure_id(&mut routine.id);

    let mut routines = self.routines.write().await;
    match routines.iter_mut().find(|r| r.id == routine.id) {
      Some(existing) => *existing = routine.clone(),
      None => routines.push(routine.clone()),
    }
    debug!(routine_id = %routine.id, name = %routine.name, "Saved routine");
    Ok(routine)
  }

  async fn delete(&self, id: &str) -> StoreResult<()> {
    self.routines.write().await.retain(|r| r.id != id);
    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// Profiles
/// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
  profiles: RwLock<HashMap<String, UserProfile>>,
}

impl InMemoryProfileStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_profiles(profiles: Vec<UserProfile>) -> Self {
    Self {
      profiles: RwLock::new(profiles.into_iter().map(|p| (p.user_id.clone(), p)).collect()),
    }
  }
}

#[async_trait::async_trait]
impl ProfileStore for InMemoryProfileStore {
  async fn get(&self, user_id: &str) -> StoreResult<Option<UserProfile>> {
    Ok(self.profiles.read().await.get(user_id).cloned())
  }

  async fn save(&self, profile: UserProfile) -> StoreResult<()> {
    debug!(user_id = %profile.user_id, "Saved profile");
    self.profiles.write().await.insert(profile.user_id.clone(), profile);
    Ok(())
  }
}
