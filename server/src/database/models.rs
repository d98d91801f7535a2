//! Database models
//!
//! Rust structs representing database entities.
//! All models use serde for serialization to the frontend.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An account that owns reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Stored login credentials for a user
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: String,
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserCredentials {
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            email: self.email,
            created_at: self.created_at,
        }
    }
}

/// An issued bearer session
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    /// Plain token, returned to the client once and never stored
    pub token: String,
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

/// The three report tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Spray,
    AerialFlight,
    Solid,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [ReportKind::Spray, ReportKind::AerialFlight, ReportKind::Solid];

    pub fn table(self) -> &'static str {
        match self {
            ReportKind::Spray => "spray_report",
            ReportKind::AerialFlight => "aerial_flight_report",
            ReportKind::Solid => "solid_application_report",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportKind::Spray => "Pulverização",
            ReportKind::AerialFlight => "Voo Agrícola",
            ReportKind::Solid => "Aplicação de Sólido",
        }
    }
}

/// Spraying operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SprayReport {
    pub id: String,
    pub user_id: String,
    pub flight_date: NaiveDate,
    pub crop: String,
    pub product: String,
    /// Litres per hectare
    pub dose_per_hectare: f64,
    /// Metres
    pub flight_height: f64,
    pub speed: f64,
    /// Litres of spray mix
    pub spray_volume: f64,
    pub area_hectares: f64,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSprayReport {
    pub flight_date: NaiveDate,
    pub crop: String,
    pub product: String,
    pub dose_per_hectare: f64,
    pub flight_height: f64,
    pub speed: f64,
    pub spray_volume: f64,
    pub area_hectares: f64,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub notes: Option<String>,
}

/// Monitoring / mapping flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AerialFlightReport {
    pub id: String,
    pub user_id: String,
    pub flight_date: NaiveDate,
    pub crop: String,
    pub operation_type: String,
    /// Metres
    pub altitude: f64,
    pub speed: f64,
    /// Minutes
    pub flight_duration: f64,
    pub area_hectares: f64,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAerialFlightReport {
    pub flight_date: NaiveDate,
    pub crop: String,
    pub operation_type: String,
    pub altitude: f64,
    pub speed: f64,
    pub flight_duration: f64,
    pub area_hectares: f64,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub notes: Option<String>,
}

/// Solid material (granules, seeds, lime) application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SolidApplicationReport {
    pub id: String,
    pub user_id: String,
    pub application_date: NaiveDate,
    pub crop: String,
    pub product: String,
    pub quantity_kg: f64,
    /// Kilograms per hectare
    pub dose_per_hectare: f64,
    pub application_height: f64,
    pub speed: f64,
    pub area_hectares: f64,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSolidApplicationReport {
    pub application_date: NaiveDate,
    pub crop: String,
    pub product: String,
    pub quantity_kg: f64,
    pub dose_per_hectare: f64,
    pub application_height: f64,
    pub speed: f64,
    pub area_hectares: f64,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub notes: Option<String>,
}

/// A report of any kind, tagged for the frontend
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportEntry {
    Spray(SprayReport),
    AerialFlight(AerialFlightReport),
    Solid(SolidApplicationReport),
}

impl ReportEntry {
    pub fn kind(&self) -> ReportKind {
        match self {
            ReportEntry::Spray(_) => ReportKind::Spray,
            ReportEntry::AerialFlight(_) => ReportKind::AerialFlight,
            ReportEntry::Solid(_) => ReportKind::Solid,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            ReportEntry::Spray(r) => r.created_at,
            ReportEntry::AerialFlight(r) => r.created_at,
            ReportEntry::Solid(r) => r.created_at,
        }
    }
}

/// Per-kind report counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportTotals {
    pub spray: i64,
    pub aerial_flight: i64,
    pub solid: i64,
}

impl ReportTotals {
    pub fn total(&self) -> i64 {
        self.spray + self.aerial_flight + self.solid
    }
}
