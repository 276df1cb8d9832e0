pub mod reconcile;
pub mod report;

pub use reconcile::{Reconciliation, ReconciliationSummary, Reconciler};
pub use report::{CombinedReportRow, ReportColumn, ReportError, ReportWriter};
