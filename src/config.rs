//! Runtime configuration from environment variables
//!
//! `.env` is loaded by the binary before [`AppConfig::from_env`] runs.

use chrono::{FixedOffset, Local};
use std::env;

use crate::calendar::{CalendarConvention, WeekStart};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://fit-tracker.db?mode=rwc";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_USER_ID: &str = "user001";
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 4;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
  #[error("Invalid value for {key}: {value:?} ({reason})")]
  Invalid { key: &'static str, value: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub database_url: String,
  pub week_start: WeekStart,
  pub utc_offset: FixedOffset,
  pub log_level: String,
  pub default_user_id: String,
  pub recommendation_limit: usize,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      database_url: DEFAULT_DATABASE_URL.to_string(),
      week_start: WeekStart::Monday,
      utc_offset: *Local::now().offset(),
      log_level: DEFAULT_LOG_LEVEL.to_string(),
      default_user_id: DEFAULT_USER_ID.to_string(),
      recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
    }
  }
}

fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
  ConfigError::Invalid {
    key,
    value: value.to_string(),
    reason: reason.into(),
  }
}

impl AppConfig {
  /// Read `FIT_*` variables, falling back to defaults for unset ones
  pub fn from_env() -> Result<Self, ConfigError> {
    let defaults = Self::default();

    let week_start = match env::var("FIT_WEEK_START") {
      Ok(v) => v.parse::<WeekStart>().map_err(|e| invalid("FIT_WEEK_START", &v, e))?,
      Err(_) => defaults.week_start,
    };

    let utc_offset = match env::var("FIT_UTC_OFFSET_MINUTES") {
      Ok(v) => {
        let minutes: i32 = v
          .trim()
          .parse()
          .map_err(|_| invalid("FIT_UTC_OFFSET_MINUTES", &v, "expected whole minutes"))?;
        minutes
          .checked_mul(60)
          .and_then(FixedOffset::east_opt)
          .ok_or_else(|| invalid("FIT_UTC_OFFSET_MINUTES", &v, "offset out of range"))?
      }
      Err(_) => defaults.utc_offset,
    };

    let recommendation_limit = match env::var("FIT_RECOMMENDATION_LIMIT") {
      Ok(v) => match v.trim().parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => return Err(invalid("FIT_RECOMMENDATION_LIMIT", &v, "expected a positive integer")),
      },
      Err(_) => defaults.recommendation_limit,
    };

    Ok(Self {
      database_url: env::var("FIT_DATABASE_URL").unwrap_or(defaults.database_url),
      week_start,
      utc_offset,
      log_level: env::var("FIT_LOG_LEVEL").unwrap_or(defaults.log_level),
      default_user_id: env::var("FIT_DEFAULT_USER").unwrap_or(defaults.default_user_id),
      recommendation_limit,
    })
  }

  pub fn calendar(&self) -> CalendarConvention {
    CalendarConvention::new(self.week_start, self.utc_offset)
  }
}
