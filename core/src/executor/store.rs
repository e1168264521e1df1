use std::io;
use std::path::Path;

use async_trait::async_trait;
use tokio::io::{AsyncWrite, BufWriter};

pub type OutputSink = Box<dyn AsyncWrite + Send + Unpin>;

/// Where dumped responses are written.
#[async_trait]
pub trait OutputStore: Send + Sync {
    async fn create(&self, path: &Path) -> io::Result<OutputSink>;

    /// Removes a (partial) output file. A missing file is not an error.
    async fn remove(&self, path: &Path) -> io::Result<()>;

    async fn size(&self, path: &Path) -> io::Result<u64>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FsOutputStore;

#[async_trait]
impl OutputStore for FsOutputStore {
    async fn create(&self, path: &Path) -> io::Result<OutputSink> {
        let file = tokio::fs::File::create(path).await?;
        Ok(Box::new(BufWriter::new(file)))
    }

    async fn remove(&self, path: &Path) -> io::Result<()> {
        match tokio::fs::remove_file(path).await {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    async fn size(&self, path: &Path) -> io::Result<u64> {
        Ok(tokio::fs::metadata(path).await?.len())
    }
}
