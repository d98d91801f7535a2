//! HTTP routing
//!
//! API routes under `/api`, plus the frontend's page routes when a built
//! frontend directory is configured.

use crate::app::AppState;
use crate::commands;
use crate::pages::Page;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/api/health", get(commands::health))
        // Auth
        .route("/api/auth/sign-up", post(commands::auth::sign_up))
        .route("/api/auth/sign-in", post(commands::auth::sign_in))
        .route("/api/auth/sign-out", post(commands::auth::sign_out))
        .route("/api/auth/user", get(commands::auth::current_user))
        // Reports
        .route("/api/reports", get(commands::reports::list_reports))
        .route("/api/reports/spray", post(commands::reports::submit_spray))
        .route(
            "/api/reports/aerial-flight",
            post(commands::reports::submit_aerial_flight),
        )
        .route("/api/reports/solid", post(commands::reports::submit_solid))
        .route("/api/forms/:kind", get(commands::reports::get_form_fields))
        // Dashboard
        .route("/api/dashboard", get(commands::dashboard::get_dashboard));

    if let Some(dir) = state.config.static_dir.clone() {
        tracing::info!("Serving frontend from {:?}", dir);
        let index = dir.join("index.html");

        for page in Page::ALL {
            router = router.route_service(page.path(), ServeFile::new(&index));
        }
        router = router.fallback_service(ServeDir::new(&dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
