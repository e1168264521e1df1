use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dhubdump_core::api::{
    ClientError, ClientErrorKind, DatahubClient, FetchMeta, FetchPage, Query, ResponseStream,
};
use futures::StreamExt;
use serde::Deserialize;
use serde_json::Value;

const BODY_PREVIEW_LIMIT: usize = 512;
/// Re-authenticate this long before the token actually expires.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

fn from_reqwest(err: reqwest::Error, url: &str) -> ClientError {
    let kind = if err.is_timeout() {
        ClientErrorKind::Timeout
    } else if err.is_connect() {
        ClientErrorKind::Connect
    } else if err.is_body() {
        ClientErrorKind::Body
    } else if err.is_decode() {
        ClientErrorKind::Decode
    } else if err.is_status() {
        ClientErrorKind::Status
    } else {
        ClientErrorKind::Unknown
    };
    let mut out = ClientError::new(kind, err.to_string()).with_url(url);
    if let Some(status) = err.status() {
        out = out.with_status(status.as_u16());
    }
    out
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    if trimmed.chars().count() > BODY_PREVIEW_LIMIT {
        out.push_str("...");
    }
    out
}

/// Turns a non-2xx response into an error carrying a body preview.
async fn ensure_success(
    resp: reqwest::Response,
    kind: ClientErrorKind,
) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let url = resp.url().to_string();
    let body = resp
        .text()
        .await
        .map_err(|err| from_reqwest(err, &url))?;
    Err(ClientError::new(kind, preview_body(&body))
        .with_status(status.as_u16())
        .with_url(url))
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: Option<Instant>,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        match self.expires_at {
            Some(at) => Instant::now() + TOKEN_REFRESH_MARGIN < at,
            None => true,
        }
    }
}

/// Datahub REST client authenticating with OAuth2 client credentials.
pub struct DatahubHttpClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    secret: String,
    token: Mutex<Option<AccessToken>>,
    /// Held while re-authenticating so concurrent requests refresh once.
    refresh: tokio::sync::Mutex<()>,
    verbose: bool,
}

impl DatahubHttpClient {
    pub fn new(
        base_url: &str,
        client_id: impl Into<String>,
        secret: impl Into<String>,
        timeout_ms: u64,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: client_id.into(),
            secret: secret.into(),
            token: Mutex::new(None),
            refresh: tokio::sync::Mutex::new(()),
            verbose: false,
        })
    }

    /// Logs every datahub request and response at info level.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    fn token_url(&self) -> String {
        format!("{}/oauth/v2/token", self.base_url)
    }

    fn api_url(&self, query: &Query) -> String {
        format!("{}/api/v1/{}", self.base_url, query.path())
    }

    fn current_token(&self) -> Option<AccessToken> {
        self.token.lock().ok().and_then(|guard| guard.clone())
    }

    fn store_token(&self, token: Option<AccessToken>) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = token;
        }
    }

    async fn authenticate(&self) -> Result<AccessToken, ClientError> {
        let url = self.token_url();
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.secret.as_str()),
        ];
        let endpoint = reqwest::Url::parse_with_params(&url, &params).map_err(|err| {
            ClientError::new(ClientErrorKind::Auth, err.to_string()).with_url(url.clone())
        })?;

        tracing::debug!(target: "dhubdump.client", stage = "auth.in", url = %url, client_id = %self.client_id);
        let resp = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(|err| from_reqwest(err, &url))?;
        let resp = ensure_success(resp, ClientErrorKind::Auth).await?;
        let body: TokenResponse = resp.json().await.map_err(|err| {
            ClientError::new(
                ClientErrorKind::Auth,
                format!("failed to decode token response: {err}"),
            )
            .with_url(url.clone())
        })?;

        let token = AccessToken {
            value: body.access_token,
            expires_at: body
                .expires_in
                .map(|secs| Instant::now() + Duration::from_secs(secs)),
        };
        tracing::debug!(target: "dhubdump.client", stage = "auth.out", expires_in = ?body.expires_in);
        Ok(token)
    }

    /// The active token, refreshed when it is about to expire.
    async fn bearer(&self) -> Result<String, ClientError> {
        match self.current_token() {
            None => return Err(ClientError::not_started()),
            Some(token) if token.is_fresh() => return Ok(token.value),
            Some(_) => {}
        }

        let _refresh = self.refresh.lock().await;
        // Whoever held the lock before us may already have refreshed.
        match self.current_token() {
            None => Err(ClientError::not_started()),
            Some(token) if token.is_fresh() => Ok(token.value),
            Some(_) => {
                tracing::info!(
                    target: "dhubdump.client",
                    "access token expiring, re-authenticating"
                );
                let token = self.authenticate().await?;
                let value = token.value.clone();
                self.store_token(Some(token));
                Ok(value)
            }
        }
    }

    async fn send(&self, query: &Query) -> Result<reqwest::Response, ClientError> {
        let bearer = self.bearer().await?;
        let url = self.resolve_uri(query);
        let endpoint = reqwest::Url::parse_with_params(&self.api_url(query), query.params())
            .map_err(|err| {
                ClientError::new(ClientErrorKind::Unknown, err.to_string()).with_url(url.clone())
            })?;
        if self.verbose {
            tracing::info!(target: "dhubdump.client", uri = %url, "datahub request");
        }
        let started = Instant::now();
        let resp = self
            .http
            .get(endpoint)
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|err| from_reqwest(err, &url))?;
        if self.verbose {
            tracing::info!(
                target: "dhubdump.client",
                uri = %url,
                status = resp.status().as_u16(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "datahub response"
            );
        }
        ensure_success(resp, ClientErrorKind::Status).await
    }
}

#[async_trait]
impl DatahubClient for DatahubHttpClient {
    fn name(&self) -> &str {
        "datahub-http"
    }

    async fn start(&self) -> Result<(), ClientError> {
        let token = self.authenticate().await?;
        self.store_token(Some(token));
        tracing::info!(target: "dhubdump.client", base_url = %self.base_url, "authenticated");
        Ok(())
    }

    async fn stop(&self) {
        self.store_token(None);
    }

    fn token(&self) -> Option<String> {
        self.current_token().map(|t| t.value)
    }

    fn resolve_uri(&self, query: &Query) -> String {
        let base = self.api_url(query);
        match reqwest::Url::parse_with_params(&base, query.params()) {
            Ok(url) => url.to_string(),
            Err(_) => base,
        }
    }

    async fn stream(&self, query: &Query) -> Result<ResponseStream, ClientError> {
        let resp = self.send(query).await?;
        let url = resp.url().to_string();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp
            .bytes_stream()
            .map(move |chunk| chunk.map_err(|err| from_reqwest(err, &url)))
            .boxed();
        Ok(ResponseStream { content_type, body })
    }

    async fn fetch(&self, query: &Query) -> Result<FetchPage, ClientError> {
        let resp = self.send(query).await?;
        let url = resp.url().to_string();
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|err| from_reqwest(err, &url))?;
        let value: Value = serde_json::from_str(&body).map_err(|err| {
            ClientError::new(
                ClientErrorKind::Decode,
                format!(
                    "failed to decode response body: {err} | body={}",
                    preview_body(&body)
                ),
            )
            .with_status(status)
            .with_url(url.clone())
        })?;
        Ok(parse_page(value))
    }
}

/// Reads items and paging meta from a plain or HAL JSON listing.
fn parse_page(value: Value) -> FetchPage {
    let meta = FetchMeta {
        total: value.get("total").and_then(Value::as_u64).unwrap_or(0),
        pages: value.get("pages").and_then(Value::as_u64).unwrap_or(0),
    };
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => map
            .remove("_embedded")
            .and_then(|embedded| match embedded {
                Value::Object(inner) => inner.into_iter().find_map(|(_, v)| match v {
                    Value::Array(items) => Some(items),
                    _ => None,
                }),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    };
    let meta = FetchMeta {
        total: if meta.total == 0 { items.len() as u64 } else { meta.total },
        ..meta
    };
    FetchPage { items, meta }
}
