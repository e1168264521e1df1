use std::path::PathBuf;

use thiserror::Error;

use super::{AssemblyError, ClientError};

#[derive(Error, Debug)]
pub enum CliError {
    #[error("dump failed: {0}")]
    Dump(#[from] DumpError),
    #[error("config error: {0}")]
    Config(String),
    #[error("logging setup failed: {0}")]
    Logging(String),
}

/// Failures that abort a whole dump run.
///
/// Per-file failures never surface here; they end up as report rows.
#[derive(Error, Debug)]
pub enum DumpError {
    #[error("cannot dump to {} - path does not exist", .0.display())]
    OutputMissing(PathBuf),
    #[error("cannot dump to {} - path is not a directory", .0.display())]
    OutputNotDirectory(PathBuf),
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(
        "invalid dump spec '{0}' (expected products, claims, vocs, samples, token or a numeric id)"
    )]
    InvalidRequest(String),
    #[error("task assembly failed: {0}")]
    Assembly(#[from] AssemblyError),
    #[error("client error: {0}")]
    Client(#[from] ClientError),
    #[error("failed to write report {}: {source}", path.display())]
    Report {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("report serialization failed: {0}")]
    ReportEncode(#[from] csv::Error),
}

impl DumpError {
    /// Whether this error was raised before any request could be issued.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            Self::OutputMissing(_) | Self::OutputNotDirectory(_) | Self::InvalidRequest(_)
        )
    }
}
