pub mod analysis;
pub mod calendar;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod db;
pub mod filter;
pub mod logging;
pub mod models;
pub mod progression;
pub mod recommendation;
pub mod routine_analytics;
pub mod store;

#[cfg(test)]
pub mod test_utils;

use chrono::Utc;
use tracing::{info, warn};

use analysis::AnalysisPeriod;
use config::{AppConfig, ConfigError};
use db::AppState;
use store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
  #[error("Configuration error: {0}")]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Store(#[from] StoreError),
}

/// Start up against the configured database and print the default user's
/// weekly picture and recommendations.
pub async fn run() -> Result<(), AppError> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  let config = AppConfig::from_env()?;
  logging::init_tracing(&config.log_level);

  let pool = db::initialize_db(&config).await?;
  let state = AppState::sqlite(pool.clone(), config).await?;
  db::seed_sample_data(&state).await?;
  info!(exercises = state.catalog.len(), "Database ready");

  let now = Utc::now();
  let user_id = state.config.default_user_id.clone();

  let weekly = commands::analysis::get_workout_analysis_at(&state, AnalysisPeriod::Weekly, None, now).await?;
  info!(
    minutes = weekly.total_time_minutes,
    calories = weekly.total_calories,
    days = weekly.workout_days_count,
    "This week"
  );
  for (part, percent) in &weekly.muscle_distribution {
    info!(body_part = part.label(), percent, "Muscle distribution");
  }

  match commands::recommendation::recommend_for_user(&state, &user_id, state.config.recommendation_limit, now).await {
    Ok(picked) => {
      for exercise in &picked {
        info!(id = %exercise.id, name = %exercise.name, difficulty = ?exercise.difficulty, "Recommended");
      }
    }
    Err(StoreError::NotFound { .. }) => warn!(user_id = %user_id, "No profile for user, skipping recommendations"),
    Err(e) => return Err(e.into()),
  }

  pool.close().await;
  Ok(())
}
