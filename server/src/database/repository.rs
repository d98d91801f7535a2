//! Repository layer for database operations
//!
//! Users and sessions for the auth service, plus the SQLite
//! implementation of [`ReportStore`].

use super::models::*;
use super::store::ReportStore;
use crate::error::{AuthError, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a user; a taken email is reported as [`AuthError::AlreadyRegistered`].
    pub async fn create_user(&self, email: &str, password_hash: &str) -> Result<User> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, email, created_at
            "#,
        )
        .bind(&id)
        .bind(email)
        .bind(password_hash)
        .bind(now)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => {
                tracing::debug!("Created user: {}", id);
                Ok(user)
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AuthError::AlreadyRegistered.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Look up stored credentials by normalised email
    pub async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            r#"
            SELECT id, email, password_hash, created_at FROM users WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credentials)
    }

    pub async fn create_session(
        &self,
        token_hash: &str,
        user_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (token_hash, user_id, created_at, expires_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(token_hash)
        .bind(user_id)
        .bind(Utc::now())
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!("Created session for user: {}", user_id);
        Ok(())
    }

    /// Resolve a session to its user if it has not expired
    pub async fn find_session_user(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.email, u.created_at
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token_hash = ? AND s.expires_at > ?
            "#,
        )
        .bind(token_hash)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Delete a session, returning whether one existed
    pub async fn delete_session(&self, token_hash: &str) -> Result<bool> {
        let rows = sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
            .bind(token_hash)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }

    /// Delete every session, of any user, that expired by `now`
    pub async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64> {
        let rows = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows > 0 {
            tracing::debug!("Pruned {} expired sessions", rows);
        }
        Ok(rows)
    }

    async fn list_owned<R>(&self, kind: ReportKind, owner: &str, limit: Option<i64>) -> Result<Vec<R>>
    where
        R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        // SQLite treats a negative LIMIT as unbounded.
        let sql = format!(
            "SELECT * FROM {} WHERE user_id = ? ORDER BY created_at DESC, rowid DESC LIMIT ?",
            kind.table()
        );

        let rows = sqlx::query_as::<_, R>(&sql)
            .bind(owner)
            .bind(limit.unwrap_or(-1))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}

impl ReportStore for Repository {
    async fn insert_spray_report(&self, owner: &str, report: &NewSprayReport) -> Result<SprayReport> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let row = sqlx::query_as::<_, SprayReport>(
            r#"
            INSERT INTO spray_report (
                id, user_id, flight_date, crop, product, dose_per_hectare, flight_height,
                speed, spray_volume, area_hectares, temperature, humidity, wind_speed, notes,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(owner)
        .bind(report.flight_date)
        .bind(&report.crop)
        .bind(&report.product)
        .bind(report.dose_per_hectare)
        .bind(report.flight_height)
        .bind(report.speed)
        .bind(report.spray_volume)
        .bind(report.area_hectares)
        .bind(report.temperature)
        .bind(report.humidity)
        .bind(report.wind_speed)
        .bind(&report.notes)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created spray report: {} for user: {}", id, owner);
        Ok(row)
    }

    async fn insert_aerial_flight_report(
        &self,
        owner: &str,
        report: &NewAerialFlightReport,
    ) -> Result<AerialFlightReport> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let row = sqlx::query_as::<_, AerialFlightReport>(
            r#"
            INSERT INTO aerial_flight_report (
                id, user_id, flight_date, crop, operation_type, altitude, speed,
                flight_duration, area_hectares, temperature, humidity, wind_speed, notes,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(owner)
        .bind(report.flight_date)
        .bind(&report.crop)
        .bind(&report.operation_type)
        .bind(report.altitude)
        .bind(report.speed)
        .bind(report.flight_duration)
        .bind(report.area_hectares)
        .bind(report.temperature)
        .bind(report.humidity)
        .bind(report.wind_speed)
        .bind(&report.notes)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created aerial flight report: {} for user: {}", id, owner);
        Ok(row)
    }

    async fn insert_solid_application_report(
        &self,
        owner: &str,
        report: &NewSolidApplicationReport,
    ) -> Result<SolidApplicationReport> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let row = sqlx::query_as::<_, SolidApplicationReport>(
            r#"
            INSERT INTO solid_application_report (
                id, user_id, application_date, crop, product, quantity_kg, dose_per_hectare,
                application_height, speed, area_hectares, temperature, humidity, wind_speed,
                notes, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(owner)
        .bind(report.application_date)
        .bind(&report.crop)
        .bind(&report.product)
        .bind(report.quantity_kg)
        .bind(report.dose_per_hectare)
        .bind(report.application_height)
        .bind(report.speed)
        .bind(report.area_hectares)
        .bind(report.temperature)
        .bind(report.humidity)
        .bind(report.wind_speed)
        .bind(&report.notes)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created solid application report: {} for user: {}", id, owner);
        Ok(row)
    }

    async fn list_spray_reports(&self, owner: &str, limit: Option<i64>) -> Result<Vec<SprayReport>> {
        self.list_owned(ReportKind::Spray, owner, limit).await
    }

    async fn list_aerial_flight_reports(
        &self,
        owner: &str,
        limit: Option<i64>,
    ) -> Result<Vec<AerialFlightReport>> {
        self.list_owned(ReportKind::AerialFlight, owner, limit).await
    }

    async fn list_solid_application_reports(
        &self,
        owner: &str,
        limit: Option<i64>,
    ) -> Result<Vec<SolidApplicationReport>> {
        self.list_owned(ReportKind::Solid, owner, limit).await
    }

    async fn count_reports(&self, kind: ReportKind, owner: &str) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE user_id = ?", kind.table());

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(owner)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
