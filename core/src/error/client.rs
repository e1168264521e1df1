use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
    Auth,
    Timeout,
    Connect,
    Status,
    Body,
    Decode,
    NotStarted,
    Unknown,
}

impl ClientErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Status => "status",
            Self::Body => "body",
            Self::Decode => "decode",
            Self::NotStarted => "not_started",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ClientErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error reported by a [`crate::client::DatahubClient`].
#[derive(Error, Debug)]
#[error("datahub error kind={kind}{}{}: {message}", status_suffix(.status), url_suffix(.url))]
pub struct ClientError {
    pub kind: ClientErrorKind,
    pub status: Option<u16>,
    pub url: Option<String>,
    pub message: String,
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" status={s}")).unwrap_or_default()
}

fn url_suffix(url: &Option<String>) -> String {
    url.as_ref()
        .map(|u| format!(" url={u}"))
        .unwrap_or_default()
}

impl ClientError {
    pub fn new(kind: ClientErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            url: None,
            message: message.into(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn not_started() -> Self {
        Self::new(ClientErrorKind::NotStarted, "client has not been started")
    }
}
