//! Report submission service
//!
//! Shapes a submitted form, attaches the caller as owner and issues exactly
//! one insert. Failures keep the submitted form so the user can retry.

use crate::database::{
    AerialFlightReport, NewAerialFlightReport, NewSolidApplicationReport, NewSprayReport,
    ReportKind, ReportStore, SolidApplicationReport, SprayReport, User,
};
use crate::error::Result;
use crate::forms::{FormFields, ReportForm};
use crate::notice::Notice;
use crate::pages::Page;
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// Result of one form submission
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionOutcome<R> {
    /// Row created; the frontend navigates to `redirect_to`
    Saved {
        report: R,
        notice: Notice,
        redirect_to: Page,
    },
    /// Form constraints failed; nothing was sent to the store
    Rejected { notice: Notice, form: FormFields },
    /// The store refused the insert
    Failed { notice: Notice, form: FormFields },
}

impl<R> SubmissionOutcome<R> {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmissionOutcome::Saved { .. })
    }
}

#[derive(Clone)]
pub struct SubmissionService<S> {
    store: S,
}

impl<S: ReportStore> SubmissionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn submit_spray(
        &self,
        owner: &User,
        fields: FormFields,
    ) -> SubmissionOutcome<SprayReport> {
        let report = match shape::<NewSprayReport>(&fields, today()) {
            Ok(report) => report,
            Err(outcome) => return outcome.with_form(fields),
        };

        let result = self.store.insert_spray_report(&owner.id, &report).await;
        conclude(ReportKind::Spray, result, fields)
    }

    pub async fn submit_aerial_flight(
        &self,
        owner: &User,
        fields: FormFields,
    ) -> SubmissionOutcome<AerialFlightReport> {
        let report = match shape::<NewAerialFlightReport>(&fields, today()) {
            Ok(report) => report,
            Err(outcome) => return outcome.with_form(fields),
        };

        let result = self.store.insert_aerial_flight_report(&owner.id, &report).await;
        conclude(ReportKind::AerialFlight, result, fields)
    }

    pub async fn submit_solid(
        &self,
        owner: &User,
        fields: FormFields,
    ) -> SubmissionOutcome<SolidApplicationReport> {
        let report = match shape::<NewSolidApplicationReport>(&fields, today()) {
            Ok(report) => report,
            Err(outcome) => return outcome.with_form(fields),
        };

        let result = self.store.insert_solid_application_report(&owner.id, &report).await;
        conclude(ReportKind::Solid, result, fields)
    }
}

/// A rejection waiting for the form it rejected
struct Rejection(Notice);

impl Rejection {
    fn with_form<R>(self, form: FormFields) -> SubmissionOutcome<R> {
        SubmissionOutcome::Rejected { notice: self.0, form }
    }
}

fn shape<F: ReportForm>(fields: &FormFields, today: NaiveDate) -> std::result::Result<F, Rejection> {
    F::shape(fields, today).map_err(|e| {
        tracing::debug!("Form rejected: {}", e);
        Rejection(Notice::invalid_form(&e))
    })
}

fn conclude<R>(kind: ReportKind, result: Result<R>, form: FormFields) -> SubmissionOutcome<R> {
    match result {
        Ok(report) => {
            tracing::info!("{} report saved", kind.label());
            SubmissionOutcome::Saved {
                report,
                notice: Notice::success(
                    format!("Relatório de {} Salvo!", kind.label()),
                    "Os dados foram registrados com sucesso no sistema.",
                ),
                redirect_to: Page::Reports,
            }
        }
        Err(e) => {
            tracing::error!("Failed to save {} report: {}", kind.table(), e);
            SubmissionOutcome::Failed {
                notice: Notice::save_failed(e.backend_message()),
                form,
            }
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
