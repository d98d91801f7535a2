//! Report handlers
//!
//! Submission, listing and the field descriptions of each form.

use super::{CurrentUser, Viewer};
use crate::app::AppState;
use crate::database::ReportKind;
use crate::error::Result;
use crate::forms::{form_fields, FieldSpec, FormFields};
use crate::services::{ListingView, SubmissionOutcome};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

pub async fn submit_spray(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(fields): Json<FormFields>,
) -> Result<Response> {
    let user = user.require()?;
    let outcome = state.submission_service.submit_spray(&user, fields).await;
    Ok(outcome_response(outcome))
}

pub async fn submit_aerial_flight(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(fields): Json<FormFields>,
) -> Result<Response> {
    let user = user.require()?;
    let outcome = state.submission_service.submit_aerial_flight(&user, fields).await;
    Ok(outcome_response(outcome))
}

pub async fn submit_solid(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(fields): Json<FormFields>,
) -> Result<Response> {
    let user = user.require()?;
    let outcome = state.submission_service.submit_solid(&user, fields).await;
    Ok(outcome_response(outcome))
}

fn outcome_response<R: Serialize>(outcome: SubmissionOutcome<R>) -> Response {
    let status = match &outcome {
        SubmissionOutcome::Saved { .. } => StatusCode::CREATED,
        SubmissionOutcome::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SubmissionOutcome::Failed { .. } => StatusCode::BAD_GATEWAY,
    };

    (status, Json(outcome)).into_response()
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn list_reports(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(params): Query<ListingQuery>,
) -> Json<ListingView> {
    Json(state.listing_service.search(viewer.0.as_ref(), &params.q).await)
}

pub async fn get_form_fields(Path(kind): Path<ReportKind>) -> Json<&'static [FieldSpec]> {
    Json(form_fields(kind))
}
