//! Structured logging setup
//!
//! `RUST_LOG` drives the filter (default `info`), `LOG_FORMAT` picks the
//! output shape: `pretty` (default), `compact` or `json`.

use std::env;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Compact,
  Json,
}

impl LogFormat {
  pub fn from_env() -> Self {
    Self::parse(env::var("LOG_FORMAT").ok().as_deref())
  }

  fn parse(value: Option<&str>) -> Self {
    match value {
      Some("json") => Self::Json,
      Some("compact") => Self::Compact,
      _ => Self::Pretty,
    }
  }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let registry = tracing_subscriber::registry().with(filter);

  let result = match LogFormat::from_env() {
    LogFormat::Json => registry.with(fmt::layer().json().with_target(true)).try_init(),
    LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
    LogFormat::Pretty => registry.with(fmt::layer().with_target(false)).try_init(),
  };

  if result.is_ok() {
    tracing::debug!("logging initialized");
  }
}
