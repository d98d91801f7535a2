//! Dashboard service
//!
//! Latest reports across all kinds plus per-kind totals for the home page.

use crate::config::{DASHBOARD_RECENT_LIMIT, DASHBOARD_RECENT_PER_KIND};
use crate::database::{
    AerialFlightReport, ReportEntry, ReportKind, ReportStore, ReportTotals,
    SolidApplicationReport, SprayReport, User,
};
use serde::Serialize;

#[derive(Debug, Default, Serialize)]
pub struct Dashboard {
    pub authenticated: bool,
    pub recent: Vec<ReportEntry>,
    pub totals: ReportTotals,
}

#[derive(Clone)]
pub struct DashboardService<S> {
    store: S,
}

impl<S: ReportStore> DashboardService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Build the dashboard for `user`.
    ///
    /// Without a user nothing is queried. The six queries run concurrently;
    /// if any of them fails the whole dashboard falls back to empty.
    pub async fn load(&self, user: Option<&User>) -> Dashboard {
        let Some(user) = user else {
            return Dashboard::default();
        };
        let owner = user.id.as_str();
        let limit = Some(DASHBOARD_RECENT_PER_KIND);

        let fetched = tokio::try_join!(
            self.store.list_spray_reports(owner, limit),
            self.store.list_aerial_flight_reports(owner, limit),
            self.store.list_solid_application_reports(owner, limit),
            self.store.count_reports(ReportKind::Spray, owner),
            self.store.count_reports(ReportKind::AerialFlight, owner),
            self.store.count_reports(ReportKind::Solid, owner),
        );

        match fetched {
            Ok((spray, flights, solids, spray_total, flight_total, solid_total)) => Dashboard {
                authenticated: true,
                recent: merge_recent(spray, flights, solids, DASHBOARD_RECENT_LIMIT),
                totals: ReportTotals {
                    spray: spray_total,
                    aerial_flight: flight_total,
                    solid: solid_total,
                },
            },
            Err(e) => {
                tracing::error!("Failed to load dashboard for {}: {}", owner, e);
                Dashboard {
                    authenticated: true,
                    ..Dashboard::default()
                }
            }
        }
    }
}

/// Merge per-kind lists into one, newest first, keeping at most `limit`.
pub fn merge_recent(
    spray: Vec<SprayReport>,
    flights: Vec<AerialFlightReport>,
    solids: Vec<SolidApplicationReport>,
    limit: usize,
) -> Vec<ReportEntry> {
    let mut merged: Vec<ReportEntry> = spray
        .into_iter()
        .map(ReportEntry::Spray)
        .chain(flights.into_iter().map(ReportEntry::AerialFlight))
        .chain(solids.into_iter().map(ReportEntry::Solid))
        .collect();

    merged.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    merged.truncate(limit);
    merged
}
