use super::columns::{CombinedReportRow, REPORT_HEADERS};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("unable to create {path}: {source}")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to flush report: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to encode report row: {0}")]
    Csv(#[from] csv::Error),
}

/// CSV sink for reconciled rows. The header row is always written.
pub struct ReportWriter;

impl ReportWriter {
    pub fn write_to_path<P: AsRef<Path>>(
        path: P,
        rows: &[CombinedReportRow],
    ) -> Result<(), ReportError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| ReportError::Create {
            path: path.display().to_string(),
            source,
        })?;
        Self::write_to(BufWriter::new(file), rows)?;
        info!(path = %path.display(), rows = rows.len(), "report written");
        Ok(())
    }

    pub fn write_to<W: Write>(writer: W, rows: &[CombinedReportRow]) -> Result<(), ReportError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        csv_writer.write_record(REPORT_HEADERS)?;
        for row in rows {
            csv_writer.write_record(row.values())?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
