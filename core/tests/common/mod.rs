#![allow(dead_code)]

use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::task::{Context, Poll};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use tokio::io::AsyncWrite;

use dhubdump_core::client::{DatahubClient, FetchPage, ResponseStream};
use dhubdump_core::config::DumpConfig;
use dhubdump_core::error::{ClientError, ClientErrorKind, DumpError};
use dhubdump_core::executor::{FsOutputStore, OutputSink, OutputStore};
use dhubdump_core::query::{Format, Query};
use dhubdump_core::report::{ReportRow, ReportSink};

/// Serves a fixed two-chunk body for every query.
#[derive(Default)]
pub struct StubClient {
    pub starts: AtomicUsize,
    pub streams: AtomicUsize,
    /// Requests in this format answer with a remote error.
    pub fail_format: Option<Format>,
    /// Responses in this format are held back this long.
    pub delay: Option<(Format, Duration)>,
}

impl StubClient {
    pub fn calls(&self) -> usize {
        self.starts.load(Ordering::SeqCst) + self.streams.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatahubClient for StubClient {
    fn name(&self) -> &str {
        "stub"
    }

    async fn start(&self) -> Result<(), ClientError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) {}

    fn token(&self) -> Option<String> {
        Some("stub-token".to_string())
    }

    fn resolve_uri(&self, query: &Query) -> String {
        let params: Vec<String> = query
            .params()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        format!("stub://{}?{}", query.path(), params.join("&"))
    }

    async fn stream(&self, query: &Query) -> Result<ResponseStream, ClientError> {
        self.streams.fetch_add(1, Ordering::SeqCst);
        let format = query.format().unwrap_or(Format::Json);
        if let Some((slow, delay)) = self.delay {
            if slow == format {
                tokio::time::sleep(delay).await;
            }
        }
        if self.fail_format == Some(format) {
            return Err(ClientError::new(ClientErrorKind::Status, "service unavailable")
                .with_status(503));
        }
        let chunks = vec![
            Ok(Bytes::from_static(b"<dump>")),
            Ok(Bytes::from_static(b"</dump>")),
        ];
        Ok(ResponseStream {
            content_type: Some(format!("application/{}", format.ext())),
            body: futures::stream::iter(chunks).boxed(),
        })
    }

    async fn fetch(&self, _query: &Query) -> Result<FetchPage, ClientError> {
        Ok(FetchPage::default())
    }
}

/// Keeps every report write in memory.
#[derive(Default)]
pub struct RecordingReport {
    pub writes: Mutex<Vec<Vec<ReportRow>>>,
}

impl RecordingReport {
    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    pub fn rows(&self) -> Vec<ReportRow> {
        self.writes
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl ReportSink for RecordingReport {
    async fn write(&self, rows: &[ReportRow]) -> Result<(), DumpError> {
        self.writes.lock().unwrap().push(rows.to_vec());
        Ok(())
    }
}

/// File store whose sinks for one file name accept a single write, then fail.
pub struct FailingStore {
    pub file_name: String,
    inner: FsOutputStore,
}

impl FailingStore {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            inner: FsOutputStore,
        }
    }
}

#[async_trait]
impl OutputStore for FailingStore {
    async fn create(&self, path: &Path) -> io::Result<OutputSink> {
        let sink = self.inner.create(path).await?;
        if path.file_name().and_then(|n| n.to_str()) == Some(self.file_name.as_str()) {
            return Ok(Box::new(FailingSink {
                inner: sink,
                writes_left: 1,
            }));
        }
        Ok(sink)
    }

    async fn remove(&self, path: &Path) -> io::Result<()> {
        self.inner.remove(path).await
    }

    async fn size(&self, path: &Path) -> io::Result<u64> {
        self.inner.size(path).await
    }
}

struct FailingSink {
    inner: OutputSink,
    writes_left: usize,
}

impl AsyncWrite for FailingSink {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        if self.writes_left == 0 {
            return Poll::Ready(Err(io::Error::new(io::ErrorKind::Other, "disk full")));
        }
        let res = Pin::new(&mut self.inner).poll_write(cx, buf);
        if let Poll::Ready(Ok(_)) = res {
            self.writes_left -= 1;
        }
        res
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_shutdown(cx)
    }
}

/// One product, no channels, no tour types: six tasks.
pub fn single_product_config() -> DumpConfig {
    DumpConfig {
        products: vec!["accommodation".to_string()],
        channels: Vec::new(),
        tour_types: Vec::new(),
        ..DumpConfig::default()
    }
}

pub fn output_file(root: &Path, dir: &str, file: &str) -> PathBuf {
    dir.split('/')
        .filter(|p| !p.is_empty() && *p != ".")
        .fold(root.to_path_buf(), |acc, p| acc.join(p))
        .join(file)
}
