//! Report persistence seam
//!
//! Services talk to report storage only through [`ReportStore`], so the
//! insert/select/count contract can be exercised without SQLite.

use super::models::*;
use crate::error::Result;
use std::future::Future;

/// Insert, owner-scoped select and count over the three report tables.
///
/// `limit: None` means every row. Rows always come back newest first.
pub trait ReportStore: Clone + Send + Sync + 'static {
    fn insert_spray_report(
        &self,
        owner: &str,
        report: &NewSprayReport,
    ) -> impl Future<Output = Result<SprayReport>> + Send;

    fn insert_aerial_flight_report(
        &self,
        owner: &str,
        report: &NewAerialFlightReport,
    ) -> impl Future<Output = Result<AerialFlightReport>> + Send;

    fn insert_solid_application_report(
        &self,
        owner: &str,
        report: &NewSolidApplicationReport,
    ) -> impl Future<Output = Result<SolidApplicationReport>> + Send;

    fn list_spray_reports(
        &self,
        owner: &str,
        limit: Option<i64>,
    ) -> impl Future<Output = Result<Vec<SprayReport>>> + Send;

    fn list_aerial_flight_reports(
        &self,
        owner: &str,
        limit: Option<i64>,
    ) -> impl Future<Output = Result<Vec<AerialFlightReport>>> + Send;

    fn list_solid_application_reports(
        &self,
        owner: &str,
        limit: Option<i64>,
    ) -> impl Future<Output = Result<Vec<SolidApplicationReport>>> + Send;

    fn count_reports(
        &self,
        kind: ReportKind,
        owner: &str,
    ) -> impl Future<Output = Result<i64>> + Send;
}
