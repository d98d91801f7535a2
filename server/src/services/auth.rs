//! Authentication service
//!
//! Email/password accounts with Argon2id password hashes and opaque
//! bearer session tokens. Only the SHA-256 of a token is stored.

use crate::config::{MIN_PASSWORD_LENGTH, SESSION_TOKEN_BYTES};
use crate::database::{Repository, Session, User};
use crate::error::{AppError, AuthError, FormError, Result};
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Argon2id hash (default parameters) that matches no password
const UNKNOWN_USER_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$rt87uYySLN4CI4YrVAu8fQ$NF8mYFGdcd0KjEW2NJ0YMlBS8KB4BZXIGr+u2qkqLyg";

/// Service for sign-up, sign-in and session lookup
#[derive(Clone)]
pub struct AuthService {
    repo: Repository,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(repo: Repository, session_ttl_hours: i64) -> Self {
        Self {
            repo,
            session_ttl: Duration::hours(session_ttl_hours),
        }
    }

    /// Create an account and sign it in
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session> {
        let email = check_credentials(email, password)?;
        tracing::info!("Signing up: {}", email);

        let password_hash = hash_password(password)?;
        let user = self.repo.create_user(&email, &password_hash).await?;

        tracing::info!("User registered: {}", user.id);
        self.open_session(user).await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let email = check_credentials(email, password)?;

        let Some(credentials) = self.repo.find_credentials(&email).await? else {
            // Same Argon2 cost as a wrong password for a known email
            verify_password(password, UNKNOWN_USER_HASH)?;
            tracing::info!("Rejected sign-in for: {}", email);
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, &credentials.password_hash)? {
            tracing::info!("Rejected sign-in for: {}", email);
            return Err(AuthError::InvalidCredentials.into());
        }

        let user = credentials.into_user();
        self.prune_expired_sessions().await?;

        tracing::info!("User signed in: {}", user.id);
        self.open_session(user).await
    }

    /// Drop expired sessions of every user
    pub async fn prune_expired_sessions(&self) -> Result<u64> {
        self.repo.delete_expired_sessions(Utc::now()).await
    }

    /// Revoke a session. Unknown tokens are not an error.
    pub async fn sign_out(&self, token: &str) -> Result<()> {
        if self.repo.delete_session(&token_hash(token)).await? {
            tracing::info!("Session revoked");
        }
        Ok(())
    }

    /// The user behind a bearer token, if the session is live
    pub async fn current_user(&self, token: &str) -> Result<Option<User>> {
        self.repo.find_session_user(&token_hash(token), Utc::now()).await
    }

    async fn open_session(&self, user: User) -> Result<Session> {
        let token = generate_token();
        let expires_at = Utc::now() + self.session_ttl;

        self.repo
            .create_session(&token_hash(&token), &user.id, expires_at)
            .await?;

        Ok(Session {
            token,
            user,
            expires_at,
        })
    }
}

/// Email and password input constraints; returns the normalised email.
fn check_credentials(email: &str, password: &str) -> Result<String> {
    let email = email.trim().to_lowercase();

    if email.is_empty() {
        return Err(FormError::MissingField("email").into());
    }
    if !looks_like_email(&email) {
        return Err(FormError::InvalidEmail(email).into());
    }
    if password.is_empty() {
        return Err(FormError::MissingField("password").into());
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(FormError::TooShort {
            field: "password",
            min: MIN_PASSWORD_LENGTH,
        }
        .into());
    }

    Ok(email)
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, stored: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| AppError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

fn generate_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn token_hash(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
