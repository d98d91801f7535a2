//! Dashboard handler

use super::Viewer;
use crate::app::AppState;
use crate::services::Dashboard;
use axum::{extract::State, Json};

/// Home page summary; anonymous callers get an empty dashboard.
pub async fn get_dashboard(State(state): State<AppState>, viewer: Viewer) -> Json<Dashboard> {
    Json(state.dashboard_service.load(viewer.0.as_ref()).await)
}
