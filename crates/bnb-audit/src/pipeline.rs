//! End-to-end run: fetch both registries, reconcile, write the report.

use crate::config::{AppConfig, DatasetConfig};
use crate::error::AppError;
use crate::sources::{BusinessRecordSource, DatasetGateway, RentalRecordSource, SodaClient};
use crate::workflows::{Reconciler, Reconciliation, ReconciliationSummary, ReportWriter};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// A reconciliation along with the truncation state of both fetches.
#[derive(Debug, Clone)]
pub struct FetchedReconciliation {
    pub reconciliation: Reconciliation,
    pub rentals_truncated: bool,
    pub businesses_truncated: bool,
}

/// What a completed run produced.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub report_path: PathBuf,
    pub summary: ReconciliationSummary,
    pub rentals_truncated: bool,
    pub businesses_truncated: bool,
    pub generated_at: DateTime<Utc>,
}

impl PipelineOutcome {
    pub fn truncated(&self) -> bool {
        self.rentals_truncated || self.businesses_truncated
    }

    /// One line per dataset that hit the row cap.
    pub fn truncation_warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.rentals_truncated {
            warnings.push(
                "Warning: rental licenses were capped by the row limit; the report is incomplete",
            );
        }
        if self.businesses_truncated {
            warnings.push(
                "Warning: business licenses were capped by the row limit; the report is incomplete",
            );
        }
        warnings
    }
}

/// Runs against the live registries described by `config`.
pub async fn run(config: &AppConfig) -> Result<PipelineOutcome, AppError> {
    let gateway = SodaClient::new(&config.datasets).map_err(AppError::Client)?;
    run_with(&gateway, config).await
}

/// Runs against any gateway, writing the report to the configured path.
pub async fn run_with<G: DatasetGateway>(
    gateway: &G,
    config: &AppConfig,
) -> Result<PipelineOutcome, AppError> {
    let fetched = reconcile_from(gateway, &config.datasets).await?;
    let report_path = config.report.output_path.clone();

    ReportWriter::write_to_path(&report_path, &fetched.reconciliation.rows)
        .map_err(AppError::ReportWrite)?;

    Ok(PipelineOutcome {
        report_path,
        summary: fetched.reconciliation.summary,
        rentals_truncated: fetched.rentals_truncated,
        businesses_truncated: fetched.businesses_truncated,
        generated_at: Utc::now(),
    })
}

/// Fetches both registries concurrently and joins them. Both fetches finish
/// before either failure is reported; the rental stage is reported first.
pub async fn reconcile_from<G: DatasetGateway>(
    gateway: &G,
    datasets: &DatasetConfig,
) -> Result<FetchedReconciliation, AppError> {
    let rental_source = RentalRecordSource::new(gateway, datasets);
    let business_source = BusinessRecordSource::new(gateway, datasets);

    let (rentals, businesses) = tokio::join!(rental_source.fetch(), business_source.fetch());
    let rentals = rentals.map_err(AppError::RentalFetch)?;
    let businesses = businesses.map_err(AppError::BusinessFetch)?;

    let reconciliation = Reconciler::reconcile(&rentals.records, &businesses.records);
    let summary = &reconciliation.summary;
    info!(
        rentals = summary.rentals,
        businesses = summary.businesses,
        rows = summary.rows,
        unmatched_rentals = summary.unmatched_rentals,
        "reconciliation complete"
    );

    Ok(FetchedReconciliation {
        rentals_truncated: rentals.truncated,
        businesses_truncated: businesses.truncated,
        reconciliation,
    })
}
