//! Report listing service
//!
//! Loads every report the user owns and filters them in memory.

use crate::database::{
    AerialFlightReport, ReportStore, ReportTotals, SolidApplicationReport, SprayReport, User,
};
use serde::Serialize;

/// All of a user's reports, one list per kind, newest first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportListing {
    pub spray: Vec<SprayReport>,
    pub aerial_flight: Vec<AerialFlightReport>,
    pub solid: Vec<SolidApplicationReport>,
}

impl ReportListing {
    pub fn totals(&self) -> ReportTotals {
        ReportTotals {
            spray: self.spray.len() as i64,
            aerial_flight: self.aerial_flight.len() as i64,
            solid: self.solid.len() as i64,
        }
    }

    /// Reports whose crop, product or operation type contains `term`,
    /// ignoring case. An empty term keeps everything.
    pub fn filter(&self, term: &str) -> ReportListing {
        if term.is_empty() {
            return self.clone();
        }
        let needle = term.to_lowercase();

        ReportListing {
            spray: matching(&self.spray, &needle),
            aerial_flight: matching(&self.aerial_flight, &needle),
            solid: matching(&self.solid, &needle),
        }
    }
}

/// Text fields the listing search looks at
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;

    fn matches(&self, needle_lower: &str) -> bool {
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle_lower))
    }
}

impl Searchable for SprayReport {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.crop.as_str(), self.product.as_str()]
    }
}

impl Searchable for AerialFlightReport {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.crop.as_str(), self.operation_type.as_str()]
    }
}

impl Searchable for SolidApplicationReport {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.crop.as_str(), self.product.as_str()]
    }
}

fn matching<R: Searchable + Clone>(rows: &[R], needle_lower: &str) -> Vec<R> {
    rows.iter()
        .filter(|r| r.matches(needle_lower))
        .cloned()
        .collect()
}

/// Listing as served: unfiltered tab counts plus the filtered rows
#[derive(Debug, Serialize)]
pub struct ListingView {
    pub query: String,
    pub totals: ReportTotals,
    pub reports: ReportListing,
}

#[derive(Clone)]
pub struct ListingService<S> {
    store: S,
}

impl<S: ReportStore> ListingService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetch every report `user` owns. Without a user nothing is queried;
    /// on a fetch error the listing is empty.
    pub async fn load(&self, user: Option<&User>) -> ReportListing {
        let Some(user) = user else {
            return ReportListing::default();
        };
        let owner = user.id.as_str();

        let fetched = tokio::try_join!(
            self.store.list_spray_reports(owner, None),
            self.store.list_aerial_flight_reports(owner, None),
            self.store.list_solid_application_reports(owner, None),
        );

        match fetched {
            Ok((spray, aerial_flight, solid)) => ReportListing {
                spray,
                aerial_flight,
                solid,
            },
            Err(e) => {
                tracing::error!("Failed to load reports for {}: {}", owner, e);
                ReportListing::default()
            }
        }
    }

    pub async fn search(&self, user: Option<&User>, query: &str) -> ListingView {
        let listing = self.load(user).await;

        ListingView {
            query: query.to_string(),
            totals: listing.totals(),
            reports: listing.filter(query),
        }
    }
}
