//! Services module
//!
//! Business logic services that coordinate between commands and the store.

pub mod auth;
pub mod dashboard;
pub mod listing;
pub mod submission;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::AuthService;
pub use dashboard::{Dashboard, DashboardService};
pub use listing::{ListingService, ListingView, ReportListing};
pub use submission::{SubmissionOutcome, SubmissionService};
