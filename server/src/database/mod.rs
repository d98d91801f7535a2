//! Database module
//!
//! This module provides all database functionality including:
//! - Schema and migrations
//! - Model definitions
//! - The `ReportStore` seam and its SQLite repository

pub mod models;
pub mod repository;
pub mod schema;
pub mod store;

pub use models::*;
pub use repository::Repository;
pub use schema::{initialize_database, schema_version};
pub use store::ReportStore;

use crate::config::Config;
use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Connection settings for the report database at `config.database_path`.
fn connect_options(config: &Config) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(&config.database_path)
        .create_if_missing(true)
        .busy_timeout(config.db_busy_timeout)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
}

/// Open the report database, bring its schema up to date and return the
/// application pool.
///
/// Migrations run over a single connection that is closed before the
/// pool of `config.db_max_connections` is opened.
pub async fn create_pool(config: &Config) -> Result<SqlitePool> {
    let path = &config.database_path;
    tracing::info!("Opening report database at {:?}", path);

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let migrator = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(connect_options(config))
        .await?;
    initialize_database(&migrator).await?;
    migrator.close().await;

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(connect_options(config))
        .await?;

    tracing::info!(
        "Report database ready ({} connections, schema version {})",
        config.db_max_connections,
        schema_version(&pool).await?
    );

    Ok(pool)
}
