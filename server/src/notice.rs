//! User-facing notices
//!
//! The frontend renders these as toasts. The service decides the wording,
//! the frontend only decides how it looks.

use crate::error::{AuthError, FormError};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }

    /// Map an auth failure to the message shown on the login screen.
    pub fn from_auth_error(error: &AuthError) -> Self {
        match error {
            AuthError::InvalidCredentials => {
                Self::error("Erro no login", "Email ou senha incorretos.")
            }
            AuthError::AlreadyRegistered => Self::error(
                "Usuário já cadastrado",
                "Este email já está em uso. Faça login ou use outro email.",
            ),
            AuthError::Rejected(message) => Self::error("Erro", message.clone()),
        }
    }

    pub fn invalid_form(error: &FormError) -> Self {
        Self::error("Verifique os campos do formulário", error.to_string())
    }

    /// Submission failure; the backend's text is shown as-is.
    pub fn save_failed(message: impl Into<String>) -> Self {
        Self::error("Erro ao salvar relatório", message)
    }

    pub fn signed_up() -> Self {
        Self::success("Cadastro realizado!", "Sua conta foi criada com sucesso.")
    }
}
