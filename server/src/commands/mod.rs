//! HTTP handlers exposed to the frontend
//!
//! This module organizes handlers into logical submodules:
//! - `auth`: sign-up, sign-in, sign-out and the current user
//! - `reports`: report submission, listing and form descriptions
//! - `dashboard`: home page summary

pub mod auth;
pub mod dashboard;
pub mod reports;

use crate::app::AppState;
use crate::database::User;
use crate::error::{AppError, Result};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
    Json,
};
use serde::Serialize;
use std::convert::Infallible;

/// The signed-in user, if the request carries a live bearer session
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    pub fn require(self) -> Result<User> {
        self.0.ok_or(AppError::Unauthorized)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        match bearer_token(&parts.headers) {
            Some(token) => Ok(CurrentUser(state.auth_service.current_user(token).await?)),
            None => Ok(CurrentUser(None)),
        }
    }
}

/// The signed-in user for read-only views.
///
/// A failed session lookup is logged and the view is served as anonymous.
pub struct Viewer(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for Viewer {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Infallible> {
        let Some(token) = bearer_token(&parts.headers) else {
            return Ok(Viewer(None));
        };

        match state.auth_service.current_user(token).await {
            Ok(user) => Ok(Viewer(user)),
            Err(e) => {
                tracing::error!("Session lookup failed, serving anonymous view: {}", e);
                Ok(Viewer(None))
            }
        }
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Service information structure
#[derive(Serialize)]
pub struct HealthInfo {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthInfo> {
    Json(HealthInfo {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
