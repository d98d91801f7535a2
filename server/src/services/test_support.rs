//! In-memory `ReportStore` that records every call
//!
//! Used by the service tests to assert how many backend requests a flow
//! issues, and to inject backend failures.

use crate::database::*;
use crate::error::{AppError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Insert { kind: ReportKind, owner: String },
    List { kind: ReportKind, owner: String, limit: Option<i64> },
    Count { kind: ReportKind, owner: String },
}

#[derive(Default)]
struct StoreState {
    calls: Vec<StoreCall>,
    spray: Vec<SprayReport>,
    flights: Vec<AerialFlightReport>,
    solids: Vec<SolidApplicationReport>,
    failure: Option<String>,
}

#[derive(Clone, Default)]
pub struct RecordingStore {
    state: Arc<Mutex<StoreState>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `message`
    pub fn fail_with(&self, message: &str) {
        self.state.lock().unwrap().failure = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn seed_spray(&self, row: SprayReport) {
        self.state.lock().unwrap().spray.push(row);
    }

    pub fn seed_flight(&self, row: AerialFlightReport) {
        self.state.lock().unwrap().flights.push(row);
    }

    pub fn seed_solid(&self, row: SolidApplicationReport) {
        self.state.lock().unwrap().solids.push(row);
    }

    fn record(&self, call: StoreCall) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match &state.failure {
            Some(message) => Err(AppError::Generic(message.clone())),
            None => Ok(()),
        }
    }

    fn list<R: Clone>(
        &self,
        rows: impl Fn(&StoreState) -> &Vec<R>,
        owner_of: impl Fn(&R) -> &str,
        created_at: impl Fn(&R) -> DateTime<Utc>,
        owner: &str,
        limit: Option<i64>,
    ) -> Vec<R> {
        let state = self.state.lock().unwrap();
        let mut owned: Vec<R> = rows(&state)
            .iter()
            .filter(|r| owner_of(r) == owner)
            .cloned()
            .collect();
        owned.sort_by_key(|r| std::cmp::Reverse(created_at(r)));
        if let Some(limit) = limit {
            owned.truncate(limit as usize);
        }
        owned
    }
}

impl ReportStore for RecordingStore {
    async fn insert_spray_report(&self, owner: &str, report: &NewSprayReport) -> Result<SprayReport> {
        self.record(StoreCall::Insert { kind: ReportKind::Spray, owner: owner.to_string() })?;
        let row = spray_row(owner, report, Utc::now());
        self.seed_spray(row.clone());
        Ok(row)
    }

    async fn insert_aerial_flight_report(
        &self,
        owner: &str,
        report: &NewAerialFlightReport,
    ) -> Result<AerialFlightReport> {
        self.record(StoreCall::Insert { kind: ReportKind::AerialFlight, owner: owner.to_string() })?;
        let row = flight_row(owner, report, Utc::now());
        self.seed_flight(row.clone());
        Ok(row)
    }

    async fn insert_solid_application_report(
        &self,
        owner: &str,
        report: &NewSolidApplicationReport,
    ) -> Result<SolidApplicationReport> {
        self.record(StoreCall::Insert { kind: ReportKind::Solid, owner: owner.to_string() })?;
        let row = solid_row(owner, report, Utc::now());
        self.seed_solid(row.clone());
        Ok(row)
    }

    async fn list_spray_reports(&self, owner: &str, limit: Option<i64>) -> Result<Vec<SprayReport>> {
        self.record(StoreCall::List { kind: ReportKind::Spray, owner: owner.to_string(), limit })?;
        Ok(self.list(|s| &s.spray, |r| r.user_id.as_str(), |r| r.created_at, owner, limit))
    }

    async fn list_aerial_flight_reports(
        &self,
        owner: &str,
        limit: Option<i64>,
    ) -> Result<Vec<AerialFlightReport>> {
        self.record(StoreCall::List { kind: ReportKind::AerialFlight, owner: owner.to_string(), limit })?;
        Ok(self.list(|s| &s.flights, |r| r.user_id.as_str(), |r| r.created_at, owner, limit))
    }

    async fn list_solid_application_reports(
        &self,
        owner: &str,
        limit: Option<i64>,
    ) -> Result<Vec<SolidApplicationReport>> {
        self.record(StoreCall::List { kind: ReportKind::Solid, owner: owner.to_string(), limit })?;
        Ok(self.list(|s| &s.solids, |r| r.user_id.as_str(), |r| r.created_at, owner, limit))
    }

    async fn count_reports(&self, kind: ReportKind, owner: &str) -> Result<i64> {
        self.record(StoreCall::Count { kind, owner: owner.to_string() })?;
        let state = self.state.lock().unwrap();
        let count = match kind {
            ReportKind::Spray => state.spray.iter().filter(|r| r.user_id == owner).count(),
            ReportKind::AerialFlight => state.flights.iter().filter(|r| r.user_id == owner).count(),
            ReportKind::Solid => state.solids.iter().filter(|r| r.user_id == owner).count(),
        };
        Ok(count as i64)
    }
}

pub fn test_user(id: &str) -> User {
    User {
        id: id.to_string(),
        email: format!("{}@example.com", id),
        created_at: Utc::now(),
    }
}

pub fn at(minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2025, 8, 18)
        .unwrap()
        .and_hms_opt(12, minute, 0)
        .unwrap()
        .and_utc()
}

pub fn new_spray(crop: &str, product: &str) -> NewSprayReport {
    NewSprayReport {
        flight_date: NaiveDate::from_ymd_opt(2025, 8, 18).unwrap(),
        crop: crop.to_string(),
        product: product.to_string(),
        dose_per_hectare: 2.5,
        flight_height: 3.0,
        speed: 5.0,
        spray_volume: 10.0,
        area_hectares: 150.0,
        temperature: None,
        humidity: None,
        wind_speed: None,
        notes: None,
    }
}

pub fn new_flight(crop: &str, operation_type: &str) -> NewAerialFlightReport {
    NewAerialFlightReport {
        flight_date: NaiveDate::from_ymd_opt(2025, 8, 19).unwrap(),
        crop: crop.to_string(),
        operation_type: operation_type.to_string(),
        altitude: 50.0,
        speed: 8.0,
        flight_duration: 25.0,
        area_hectares: 80.0,
        temperature: None,
        humidity: None,
        wind_speed: None,
        notes: None,
    }
}

pub fn new_solid(crop: &str, product: &str) -> NewSolidApplicationReport {
    NewSolidApplicationReport {
        application_date: NaiveDate::from_ymd_opt(2025, 8, 17).unwrap(),
        crop: crop.to_string(),
        product: product.to_string(),
        quantity_kg: 500.0,
        dose_per_hectare: 10.0,
        application_height: 4.0,
        speed: 6.0,
        area_hectares: 50.0,
        temperature: None,
        humidity: None,
        wind_speed: None,
        notes: None,
    }
}

pub fn spray_row(owner: &str, r: &NewSprayReport, created_at: DateTime<Utc>) -> SprayReport {
    SprayReport {
        id: Uuid::new_v4().to_string(),
        user_id: owner.to_string(),
        flight_date: r.flight_date,
        crop: r.crop.clone(),
        product: r.product.clone(),
        dose_per_hectare: r.dose_per_hectare,
        flight_height: r.flight_height,
        speed: r.speed,
        spray_volume: r.spray_volume,
        area_hectares: r.area_hectares,
        temperature: r.temperature,
        humidity: r.humidity,
        wind_speed: r.wind_speed,
        notes: r.notes.clone(),
        created_at,
        updated_at: created_at,
    }
}

pub fn flight_row(owner: &str, r: &NewAerialFlightReport, created_at: DateTime<Utc>) -> AerialFlightReport {
    AerialFlightReport {
        id: Uuid::new_v4().to_string(),
        user_id: owner.to_string(),
        flight_date: r.flight_date,
        crop: r.crop.clone(),
        operation_type: r.operation_type.clone(),
        altitude: r.altitude,
        speed: r.speed,
        flight_duration: r.flight_duration,
        area_hectares: r.area_hectares,
        temperature: r.temperature,
        humidity: r.humidity,
        wind_speed: r.wind_speed,
        notes: r.notes.clone(),
        created_at,
        updated_at: created_at,
    }
}

pub fn solid_row(owner: &str, r: &NewSolidApplicationReport, created_at: DateTime<Utc>) -> SolidApplicationReport {
    SolidApplicationReport {
        id: Uuid::new_v4().to_string(),
        user_id: owner.to_string(),
        application_date: r.application_date,
        crop: r.crop.clone(),
        product: r.product.clone(),
        quantity_kg: r.quantity_kg,
        dose_per_hectare: r.dose_per_hectare,
        application_height: r.application_height,
        speed: r.speed,
        area_hectares: r.area_hectares,
        temperature: r.temperature,
        humidity: r.humidity,
        wind_speed: r.wind_speed,
        notes: r.notes.clone(),
        created_at,
        updated_at: created_at,
    }
}
