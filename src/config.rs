use std::env;
use std::net::SocketAddr;

/// ---------------------------------------------------------------------------
/// Configuration Defaults
/// ---------------------------------------------------------------------------

const DEFAULT_DATABASE_URL: &str = "sqlite://workout-log.db?mode=rwc";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_RECENT_LOGS_LIMIT: i64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Invalid value for {key}: {value}")]
  InvalidValue { key: String, value: String },
}

/// Server settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct ServerConfig {
  pub database_url: String,
  pub host: String,
  pub port: u16,
  /// How many sets an exercise-only log query returns when no limit is given
  pub recent_logs_limit: i64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      database_url: DEFAULT_DATABASE_URL.to_string(),
      host: DEFAULT_HOST.to_string(),
      port: DEFAULT_PORT,
      recent_logs_limit: DEFAULT_RECENT_LOGS_LIMIT,
    }
  }
}

impl ServerConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    let defaults = Self::default();

    let recent_logs_limit = parse_var("RECENT_LOGS_LIMIT", defaults.recent_logs_limit)?;
    // 0 would hide every row and SQLite reads a negative LIMIT as unbounded
    if recent_logs_limit <= 0 {
      return Err(ConfigError::InvalidValue {
        key: "RECENT_LOGS_LIMIT".into(),
        value: recent_logs_limit.to_string(),
      });
    }

    Ok(Self {
      database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
      host: env::var("HOST").unwrap_or(defaults.host),
      port: parse_var("PORT", defaults.port)?,
      recent_logs_limit,
    })
  }

  pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
    let addr = format!("{}:{}", self.host, self.port);
    addr
      .parse()
      .map_err(|_| ConfigError::InvalidValue { key: "HOST".into(), value: addr })
  }
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
  match env::var(key) {
    Ok(raw) if !raw.trim().is_empty() => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
      key: key.to_string(),
      value: raw,
    }),
    _ => Ok(default),
  }
}
