//! The seam between the dump engine and the remote datahub.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use serde_json::Value;

use crate::error::ClientError;
use crate::query::Query;

/// A response whose body is consumed as a stream of chunks.
pub struct ResponseStream {
    pub content_type: Option<String>,
    pub body: BoxStream<'static, Result<Bytes, ClientError>>,
}

impl std::fmt::Debug for ResponseStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseStream")
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchMeta {
    pub total: u64,
    pub pages: u64,
}

#[derive(Debug, Clone, Default)]
pub struct FetchPage {
    pub items: Vec<Value>,
    pub meta: FetchMeta,
}

#[async_trait]
pub trait DatahubClient: Send + Sync {
    fn name(&self) -> &str;

    /// Authenticates; must complete before any `stream` or `fetch`.
    async fn start(&self) -> Result<(), ClientError>;

    async fn stop(&self);

    fn token(&self) -> Option<String>;

    /// The literal URI a request for `query` goes to.
    fn resolve_uri(&self, query: &Query) -> String;

    async fn stream(&self, query: &Query) -> Result<ResponseStream, ClientError>;

    async fn fetch(&self, query: &Query) -> Result<FetchPage, ClientError>;
}
