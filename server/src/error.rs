//! Error types for the Agroflight service
//!
//! All errors use thiserror for structured error handling.
//! These errors render as JSON responses carrying a user-facing notice.

use crate::notice::Notice;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Generic(String),
}

/// Failures reported by the auth collaborator.
///
/// The display strings are the backend messages the UI special-cases,
/// see [`Notice::from_auth_error`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("User already registered")]
    AlreadyRegistered,

    #[error("{0}")]
    Rejected(String),
}

/// Form constraint violations, raised before any store call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Campo obrigatório não preenchido: {0}")]
    MissingField(&'static str),

    #[error("Valor numérico inválido em {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Data inválida em {field}: {value}")]
    InvalidDate { field: &'static str, value: String },

    #[error("{field} deve ter pelo menos {min} caracteres")]
    TooShort { field: &'static str, min: usize },

    #[error("Email inválido: {0}")]
    InvalidEmail(String),
}

impl AppError {
    /// The underlying failure text, without this crate's category prefix
    pub fn backend_message(&self) -> String {
        match self {
            AppError::Database(e) => e.to_string(),
            AppError::Io(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Auth(AuthError::InvalidCredentials) | AppError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Auth(AuthError::AlreadyRegistered) => StatusCode::CONFLICT,
            AppError::Auth(AuthError::Rejected(_)) => StatusCode::BAD_REQUEST,
            AppError::Form(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            other => {
                tracing::error!("Unhandled error: {:?}", other);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let notice = match &self {
            AppError::Auth(e) => Notice::from_auth_error(e),
            AppError::Form(e) => Notice::invalid_form(e),
            other => Notice::error("Erro", other.to_string()),
        };

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
            "notice": notice,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
