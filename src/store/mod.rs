//! Repository collaborators
//!
//! The analytics never touch storage. Callers fetch logs, routines and
//! profiles through these traits and hand the materialised collections to the
//! pure functions. Two backends exist: an in-memory fixture store and SQLite.

pub mod memory;
pub mod sqlite;

use chrono::{DateTime, Utc};

use crate::models::{Routine, UserProfile, ValidationError, WorkoutLog};

pub use memory::{InMemoryProfileStore, InMemoryRoutineStore, InMemoryWorkoutHistoryStore};
pub use sqlite::{SqliteProfileStore, SqliteRoutineStore, SqliteWorkoutHistoryStore};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("{entity} not found: {id}")]
  NotFound { entity: &'static str, id: String },

  #[error("Invalid data: {0}")]
  Validation(#[from] ValidationError),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Migration error: {0}")]
  Migration(#[from] sqlx::migrate::MigrateError),

  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Corrupt {column} value: {value}")]
  Corrupt { column: &'static str, value: i64 },
}

impl StoreError {
  pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
    StoreError::NotFound { entity, id: id.into() }
  }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Workout history
#[async_trait::async_trait]
pub trait WorkoutHistoryStore: Send + Sync {
  async fn get_by_id(&self, id: &str) -> StoreResult<Option<WorkoutLog>>;

  /// Logs with `start <= date <= end`, newest first
  async fn get_by_date_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> StoreResult<Vec<WorkoutLog>>;

  /// Insert or replace by id. An empty id gets a fresh UUID; the stored log is returned.
  async fn save(&self, log: WorkoutLog) -> StoreResult<WorkoutLog>;

  /// Deleting an unknown id is not an error
  async fn delete(&self, id: &str) -> StoreResult<()>;
}

#[async_trait::async_trait]
pub trait RoutineStore: Send + Sync {
  async fn get_by_id(&self, id: &str) -> StoreResult<Option<Routine>>;

  async fn get_all(&self) -> StoreResult<Vec<Routine>>;

  /// Insert or replace by id. An empty id gets a fresh UUID.
  async fn save(&self, routine: Routine) -> StoreResult<Routine>;

  async fn delete(&self, id: &str) -> StoreResult<()>;
}

#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
  async fn get(&self, user_id: &str) -> StoreResult<Option<UserProfile>>;

  async fn save(&self, profile: UserProfile) -> StoreResult<()>;
}

/// Fill in a missing id
pub(crate) fn ensure_id(id: &mut String) {
  if id.trim().is_empty() {
    *id = uuid::Uuid::new_v4().to_string();
  }
}
