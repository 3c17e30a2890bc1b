//! Tracing subscriber setup

use tracing_subscriber::{fmt, EnvFilter};

/// Install a compact stdout subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`. Calling this more than
/// once is harmless; later calls leave the first subscriber in place.
pub fn init_tracing(default_level: &str) {
  let filter = std::env::var("RUST_LOG")
    .ok()
    .and_then(|directive| EnvFilter::try_new(directive).ok())
    .or_else(|| EnvFilter::try_new(default_level).ok())
    .unwrap_or_else(|| EnvFilter::new("info"))
    .add_directive("sqlx=warn".parse().unwrap_or_else(|_| tracing::Level::WARN.into()));

  let _ = fmt()
    .with_env_filter(filter)
    .with_target(false)
    .compact()
    .try_init();
}
