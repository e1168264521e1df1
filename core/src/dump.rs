//! Wires pre-flight, assembly, directory creation and execution into one run.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::client::DatahubClient;
use crate::config::DumpConfig;
use crate::error::{ClientError, ClientErrorKind, DumpError};
use crate::executor::{DumpExecutor, ExecutionOpts, ExecutionResult, OutputStore};
use crate::report::{CsvReportWriter, ReportSink};
use crate::task::{assemble_requests, ensure_directories, preflight, DumpRequest};

/// One invocation of the dump.
pub struct DumpRunner {
    client: Arc<dyn DatahubClient>,
    report: Option<Arc<dyn ReportSink>>,
    store: Option<Arc<dyn OutputStore>>,
}

impl DumpRunner {
    pub fn new(client: Arc<dyn DatahubClient>) -> Self {
        Self {
            client,
            report: None,
            store: None,
        }
    }

    /// Replaces the CSV report at `<root>/<report_file>`.
    pub fn with_report(mut self, report: Arc<dyn ReportSink>) -> Self {
        self.report = Some(report);
        self
    }

    pub fn with_store(mut self, store: Arc<dyn OutputStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Runs the requested dumps. `now` anchors every period window.
    ///
    /// Fails before touching the client when the output root is unusable or
    /// the requests do not assemble.
    pub async fn run(
        &self,
        cfg: &DumpConfig,
        requests: &[DumpRequest],
        opts: ExecutionOpts,
        now: DateTime<Utc>,
    ) -> Result<ExecutionResult, DumpError> {
        let root = opts.output_root.clone();
        preflight(&root)?;

        let queue = assemble_requests(requests, cfg, now)?;
        tracing::info!(
            target: "dhubdump.assembly",
            tasks = queue.len(),
            requests = %requests.iter().map(ToString::to_string).collect::<Vec<_>>().join(","),
            "work queue assembled"
        );

        let created = ensure_directories(&root, &queue)?;
        tracing::debug!(target: "dhubdump.assembly", created, "output directories ready");

        let report = match &self.report {
            Some(report) => report.clone(),
            None => Arc::new(CsvReportWriter::new(root.join(&cfg.report_file))),
        };
        let mut executor = DumpExecutor::new(self.client.clone(), report, opts);
        if let Some(store) = &self.store {
            executor = executor.with_store(store.clone());
        }

        self.client.start().await?;
        let result = executor.run(&queue).await;
        self.client.stop().await;
        result
    }
}

/// Authenticates and hands back the access token.
pub async fn acquire_token(client: &dyn DatahubClient) -> Result<String, DumpError> {
    client.start().await?;
    let token = client.token();
    client.stop().await;
    let missing = || ClientError::new(ClientErrorKind::Auth, "no access token issued");
    Ok(token.ok_or_else(missing)?)
}
