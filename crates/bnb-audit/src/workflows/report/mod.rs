mod columns;
mod writer;

pub use columns::{CombinedReportRow, ReportColumn, REPORT_HEADERS};
pub use writer::{ReportError, ReportWriter};
