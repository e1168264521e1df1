use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tracing::Instrument;
use uuid::Uuid;

use crate::client::DatahubClient;
use crate::error::DumpError;
use crate::query::Format;
use crate::report::{FetchStatus, ReportRow, ReportSink};
use crate::task::{DumpTask, WorkQueue};

use super::completion::{Completion, CompletionAccumulator};
use super::progress::ProgressMonitor;
use super::store::{FsOutputStore, OutputStore};
use super::types::{ExecutionOpts, ExecutionResult};

/// Executes one dump run. Construct a fresh executor per run.
pub struct DumpExecutor {
    client: Arc<dyn DatahubClient>,
    store: Arc<dyn OutputStore>,
    report: Arc<dyn ReportSink>,
    opts: ExecutionOpts,
}

/// Shared by the dispatcher and every in-flight sub-fetch.
struct DispatchContext {
    client: Arc<dyn DatahubClient>,
    store: Arc<dyn OutputStore>,
    root: PathBuf,
    open: AtomicUsize,
}

struct Fetched {
    size: u64,
    content_type: Option<String>,
}

impl DumpExecutor {
    pub fn new(
        client: Arc<dyn DatahubClient>,
        report: Arc<dyn ReportSink>,
        opts: ExecutionOpts,
    ) -> Self {
        Self {
            client,
            store: Arc::new(FsOutputStore),
            report,
            opts,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn OutputStore>) -> Self {
        self.store = store;
        self
    }

    /// Dispatches every task and waits until all of them settled.
    ///
    /// Individual fetch failures end up in the report; only a failing report
    /// write is returned as an error.
    pub async fn run(&self, queue: &WorkQueue) -> Result<ExecutionResult, DumpError> {
        let run_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!("dump.run", run_id = %run_id);
        self.run_inner(queue, run_id).instrument(span).await
    }

    async fn run_inner(
        &self,
        queue: &WorkQueue,
        run_id: String,
    ) -> Result<ExecutionResult, DumpError> {
        let start = Instant::now();
        let total_tasks = queue.len();
        let formats = self.opts.fetch_formats();

        tracing::info!(
            target: "dhubdump.exec",
            tasks = total_tasks,
            formats = formats.len(),
            time_between_ms = self.opts.time_between.as_millis() as u64,
            "dump started"
        );

        let progress = ProgressMonitor::new(total_tasks * formats.len(), self.opts.progress_bar);
        let ctx = Arc::new(DispatchContext {
            client: self.client.clone(),
            store: self.store.clone(),
            root: self.opts.output_root.clone(),
            open: AtomicUsize::new(0),
        });
        let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();

        let dispatcher = tokio::spawn(
            dispatch_all(
                queue.tasks().to_vec(),
                formats.clone(),
                self.opts.time_between,
                ctx,
                tx,
                progress.clone(),
            )
            .in_current_span(),
        );

        let mut acc = CompletionAccumulator::new(total_tasks, &formats);
        let mut report_written = false;
        if acc.try_fire() {
            self.report.write(acc.rows()).await?;
            report_written = true;
        }

        while let Some(completion) = rx.recv().await {
            progress.completed();
            if acc.record(completion) {
                self.report.write(acc.rows()).await?;
                report_written = true;
            }
        }

        if let Err(e) = dispatcher.await {
            tracing::error!(target: "dhubdump.exec", error = %e, "dispatcher stopped unexpectedly");
        }
        if !report_written {
            tracing::warn!(
                target: "dhubdump.exec",
                completed = acc.rows().len(),
                expected = total_tasks * formats.len(),
                "not every fetch completed, report not written"
            );
        }

        let failed = acc.failed();
        progress.finish(failed);

        let result = ExecutionResult {
            run_id,
            total_tasks,
            completed: acc.rows().len(),
            failed,
            duration_ms: start.elapsed().as_millis() as u64,
            report_written,
        };
        tracing::info!(
            target: "dhubdump.exec",
            tasks = result.total_tasks,
            completed = result.completed,
            failed = result.failed,
            duration_ms = result.duration_ms,
            "dump finished"
        );
        Ok(result)
    }
}

/// Starts every task in order, `time_between` apart. Never waits for a
/// sub-fetch to finish.
async fn dispatch_all(
    tasks: Vec<DumpTask>,
    formats: Vec<Format>,
    time_between: Duration,
    ctx: Arc<DispatchContext>,
    tx: mpsc::UnboundedSender<Completion>,
    progress: ProgressMonitor,
) {
    let total = tasks.len();
    for (idx, task) in tasks.into_iter().enumerate() {
        if idx > 0 {
            tokio::time::sleep(time_between).await;
        }
        let task = Arc::new(task);
        let started = Utc::now();
        tracing::debug!(
            target: "dhubdump.exec",
            index = idx + 1,
            total,
            dir = %task.directory,
            task = %task.name,
            "dispatch"
        );

        for &format in &formats {
            let open_at_start = ctx.open.fetch_add(1, Ordering::SeqCst) + 1;
            let ctx = ctx.clone();
            let task = task.clone();
            let tx = tx.clone();
            tokio::spawn(
                async move {
                    let completion = perform(&ctx, &task, format, started, open_at_start).await;
                    // Receiver only goes away when the run itself is gone.
                    let _ = tx.send(completion);
                }
                .in_current_span(),
            );
        }
        progress.dispatched(idx + 1, total, time_between);
    }
}

async fn perform(
    ctx: &DispatchContext,
    task: &DumpTask,
    format: Format,
    started: DateTime<Utc>,
    open_at_start: usize,
) -> Completion {
    let path = task.output_path(&ctx.root, format);
    let mut row = ReportRow::for_task(task, format, started);
    row.open_at_start = open_at_start;

    let status = match fetch_to_file(ctx, task, format, &path, &mut row.uri).await {
        Ok(fetched) => {
            row.size = Some(fetched.size);
            row.content_type = fetched.content_type;
            FetchStatus::Ok
        }
        Err(msg) => {
            if let Err(e) = ctx.store.remove(&path).await {
                tracing::warn!(
                    target: "dhubdump.exec",
                    path = %path.display(),
                    error = %e,
                    "failed to remove partial output"
                );
            }
            tracing::error!(target: "dhubdump.exec", "{msg}");
            FetchStatus::Error(msg)
        }
    };

    row.open_at_end = ctx.open.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
    Completion {
        format,
        row: row.finish(Utc::now(), status),
    }
}

async fn fetch_to_file(
    ctx: &DispatchContext,
    task: &DumpTask,
    format: Format,
    path: &Path,
    uri: &mut String,
) -> Result<Fetched, String> {
    let mut sink = ctx
        .store
        .create(path)
        .await
        .map_err(|e| saving_error(path, &e))?;

    let query = task.query.bulk().as_format(format);
    *uri = ctx.client.resolve_uri(&query);
    tracing::debug!(target: "dhubdump.exec", uri = %uri, "request");

    let response = ctx
        .client
        .stream(&query)
        .await
        .map_err(|e| fetching_error(path, &e))?;
    let content_type = response.content_type;
    let mut body = response.body;

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| fetching_error(path, &e))?;
        sink.write_all(&chunk)
            .await
            .map_err(|e| saving_error(path, &e))?;
    }
    sink.shutdown().await.map_err(|e| saving_error(path, &e))?;
    drop(sink);

    // Content length is not reliable for bulk responses; measure the file.
    let size = ctx
        .store
        .size(path)
        .await
        .map_err(|e| saving_error(path, &e))?;
    Ok(Fetched { size, content_type })
}

fn saving_error(path: &Path, err: &dyn std::fmt::Display) -> String {
    format!("error saving {} --> {err}", path.display())
}

fn fetching_error(path: &Path, err: &dyn std::fmt::Display) -> String {
    format!("error fetching {} --> {err}", path.display())
}
