//! Application state and initialization
//!
//! All services are built here over one connection pool and shared with
//! the request handlers through `AppState`.

use crate::config::Config;
use crate::database::{create_pool, Repository};
use crate::error::Result;
use crate::services::{AuthService, DashboardService, ListingService, SubmissionService};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth_service: AuthService,
    pub submission_service: SubmissionService<Repository>,
    pub dashboard_service: DashboardService<Repository>,
    pub listing_service: ListingService<Repository>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let repo = Repository::new(pool);

        Self {
            auth_service: AuthService::new(repo.clone(), config.session_ttl_hours),
            submission_service: SubmissionService::new(repo.clone()),
            dashboard_service: DashboardService::new(repo.clone()),
            listing_service: ListingService::new(repo),
            config: Arc::new(config),
        }
    }
}

/// Application setup - called once on startup
pub async fn setup(config: Config) -> Result<AppState> {
    tracing::info!("Initializing application");

    let pool = create_pool(&config).await?;
    let state = AppState::new(pool, config);

    let pruned = state.auth_service.prune_expired_sessions().await?;
    if pruned > 0 {
        tracing::info!("Removed {} expired sessions", pruned);
    }

    tracing::info!("Application initialized successfully");

    Ok(state)
}
