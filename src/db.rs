use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::sync::Arc;
use tracing::info;

use crate::calendar::CalendarConvention;
use crate::catalog::InMemoryCatalog;
use crate::config::AppConfig;
use crate::store::memory::{sample_logs, sample_profile, sample_routines};
use crate::store::sqlite::load_or_seed_catalog;
use crate::store::{
  InMemoryProfileStore, InMemoryRoutineStore, InMemoryWorkoutHistoryStore, ProfileStore, RoutineStore,
  SqliteProfileStore, SqliteRoutineStore, SqliteWorkoutHistoryStore, StoreResult, WorkoutHistoryStore,
};

pub type DbPool = SqlitePool;

/// Application state: the catalog plus one store per entity, built once at startup
#[derive(Clone)]
pub struct AppState {
  pub catalog: Arc<InMemoryCatalog>,
  pub history: Arc<dyn WorkoutHistoryStore>,
  pub routines: Arc<dyn RoutineStore>,
  pub profiles: Arc<dyn ProfileStore>,
  pub config: AppConfig,
}

impl AppState {
  /// SQLite-backed state. Seeds the exercise catalog on first run.
  pub async fn sqlite(pool: DbPool, config: AppConfig) -> StoreResult<Self> {
    let catalog = load_or_seed_catalog(&pool).await?;
    Ok(Self {
      catalog: Arc::new(catalog),
      history: Arc::new(SqliteWorkoutHistoryStore::new(pool.clone())),
      routines: Arc::new(SqliteRoutineStore::new(pool.clone())),
      profiles: Arc::new(SqliteProfileStore::new(pool)),
      config,
    })
  }

  /// Memory-backed state preloaded with the sample routines, profile and logs
  pub fn in_memory(config: AppConfig) -> Self {
    let catalog = InMemoryCatalog::with_defaults();
    let routines = sample_routines(&catalog);
    Self {
      history: Arc::new(InMemoryWorkoutHistoryStore::with_logs(sample_logs(chrono::Utc::now()))),
      routines: Arc::new(InMemoryRoutineStore::with_routines(routines)),
      profiles: Arc::new(InMemoryProfileStore::with_profiles(vec![sample_profile()])),
      catalog: Arc::new(catalog),
      config,
    }
  }

  pub fn calendar(&self) -> CalendarConvention {
    self.config.calendar()
  }
}

/// Open the connection pool and run migrations
pub async fn initialize_db(config: &AppConfig) -> StoreResult<DbPool> {
  info!(url = %config.database_url, "Initializing database");

  // Every connection to `:memory:` opens its own database
  let max_connections = if config.database_url.contains(":memory:") { 1 } else { 5 };

  let pool = SqlitePoolOptions::new()
    .max_connections(max_connections)
    .connect(&config.database_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  info!("Database initialized");
  Ok(pool)
}

/// Store the sample profile and routines unless the user already has a profile
pub async fn seed_sample_data(state: &AppState) -> StoreResult<()> {
  let profile = sample_profile();
  if state.profiles.get(&profile.user_id).await?.is_some() {
    return Ok(());
  }

  state.profiles.save(profile).await?;
  for routine in sample_routines(state.catalog.as_ref()) {
    state.routines.save(routine).await?;
  }
  info!("Seeded sample profile and routines");
  Ok(())
}
