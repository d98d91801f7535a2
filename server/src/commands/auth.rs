//! Authentication handlers

use super::{bearer_token, CurrentUser};
use crate::app::AppState;
use crate::database::{Session, User};
use crate::error::{AppError, Result};
use crate::notice::Notice;
use crate::pages::Page;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: Session,
    pub notice: Option<Notice>,
    pub redirect_to: Page,
}

#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub user: Option<User>,
}

pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
    let session = state.auth_service.sign_up(&req.email, &req.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session,
            notice: Some(Notice::signed_up()),
            redirect_to: Page::Home,
        }),
    ))
}

pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<SessionResponse>> {
    let session = state.auth_service.sign_in(&req.email, &req.password).await?;

    Ok(Json(SessionResponse {
        session,
        notice: None,
        redirect_to: Page::Home,
    }))
}

pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> Result<StatusCode> {
    let token = bearer_token(&headers).ok_or(AppError::Unauthorized)?;
    state.auth_service.sign_out(token).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn current_user(user: CurrentUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse { user: user.0 })
}
