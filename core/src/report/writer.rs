use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::DumpError;

use super::row::ReportRow;

/// Destination of the audit report. Written once per run.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn write(&self, rows: &[ReportRow]) -> Result<(), DumpError>;
}

/// Serializes the rows, header included, into one CSV buffer.
pub fn encode_csv(rows: &[ReportRow], path: &Path) -> Result<Vec<u8>, DumpError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.into_inner().map_err(|e| DumpError::Report {
        path: path.to_path_buf(),
        source: e.into_error(),
    })
}

/// Writes the report as one CSV file in a single write call.
#[derive(Debug, Clone)]
pub struct CsvReportWriter {
    path: PathBuf,
}

impl CsvReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ReportSink for CsvReportWriter {
    async fn write(&self, rows: &[ReportRow]) -> Result<(), DumpError> {
        let bytes = encode_csv(rows, &self.path)?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|source| DumpError::Report {
                path: self.path.clone(),
                source,
            })?;
        tracing::info!(
            target: "dhubdump.report",
            path = %self.path.display(),
            rows = rows.len(),
            "report written"
        );
        Ok(())
    }
}
