//! Application configuration
//!
//! Central location for configuration constants and the runtime
//! settings read from the environment.

use crate::error::{AppError, Result};
use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

// ===== Dashboard =====

/// Latest reports fetched per report kind for the dashboard
pub const DASHBOARD_RECENT_PER_KIND: i64 = 3;

/// Maximum entries in the merged "recent reports" list
pub const DASHBOARD_RECENT_LIMIT: usize = 6;

// ===== Authentication =====

/// Minimum password length accepted on sign-up and sign-in
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Default session lifetime (7 days)
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 168;

/// Random bytes in a bearer session token
pub const SESSION_TOKEN_BYTES: usize = 32;

// ===== Database =====

/// Connections in the application pool
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 8;

/// How long a connection waits on a locked database
pub const DEFAULT_DB_BUSY_TIMEOUT_SECS: u64 = 5;

// ===== Server =====

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_DATABASE_PATH: &str = "data/agroflight.db";

/// Runtime settings
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub database_path: PathBuf,
    pub session_ttl_hours: i64,
    pub db_max_connections: u32,
    pub db_busy_timeout: Duration,
    /// Built frontend to serve for page routes, if any
    pub static_dir: Option<PathBuf>,
}

impl Config {
    /// Load settings from the environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let session_ttl_hours: i64 =
            try_load("SESSION_TTL_HOURS", &DEFAULT_SESSION_TTL_HOURS.to_string())?;
        if session_ttl_hours <= 0 {
            return Err(AppError::Config(format!(
                "SESSION_TTL_HOURS must be positive, got {}",
                session_ttl_hours
            )));
        }

        let db_max_connections: u32 =
            try_load("DB_MAX_CONNECTIONS", &DEFAULT_DB_MAX_CONNECTIONS.to_string())?;
        if db_max_connections == 0 {
            return Err(AppError::Config(
                "DB_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }
        let busy_timeout_secs: u64 =
            try_load("DB_BUSY_TIMEOUT_SECS", &DEFAULT_DB_BUSY_TIMEOUT_SECS.to_string())?;

        Ok(Self {
            bind_addr: try_load("BIND_ADDR", DEFAULT_BIND_ADDR)?,
            database_path: try_load("DATABASE_PATH", DEFAULT_DATABASE_PATH)?,
            session_ttl_hours,
            db_max_connections,
            db_busy_timeout: Duration::from_secs(busy_timeout_secs),
            static_dir: env::var("STATIC_DIR").ok().map(PathBuf::from),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            db_busy_timeout: Duration::from_secs(DEFAULT_DB_BUSY_TIMEOUT_SECS),
            static_dir: None,
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        tracing::info!("{} not set, using default: {}", key, default);
        default.to_string()
    });

    raw.parse()
        .map_err(|e| AppError::Config(format!("Invalid {} value {:?}: {}", key, raw, e)))
}
