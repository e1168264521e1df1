use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Product,
    Vocabulary,
    Claim,
}

impl ResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Vocabulary => "vocabulary",
            Self::Claim => "claim",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialization requested from the datahub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Xml,
    Json,
    /// Hypermedia JSON, used for paged `fetch` calls.
    JsonHal,
}

/// Formats written for every dump task, in dispatch order.
pub const DUMP_FORMATS: [Format; 2] = [Format::Xml, Format::Json];

impl Format {
    /// File extension of the dumped file.
    pub fn ext(self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Json | Self::JsonHal => "json",
        }
    }

    /// Value of the `format` request parameter.
    pub fn param(self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Json => "json",
            Self::JsonHal => "json_hal",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

/// Publication filter. Configured and named by its short key (`all`, `pub`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PubState {
    /// No publication filter.
    #[default]
    #[serde(rename = "all")]
    Ignore,
    #[serde(rename = "pub")]
    Published,
}

impl PubState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Published => "published",
        }
    }

    /// Name segment used for generated task names.
    pub fn key(self) -> &'static str {
        match self {
            Self::Ignore => "all",
            Self::Published => "pub",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoftDeleteState {
    /// No soft-delete filter.
    #[default]
    Ignore,
    Active,
    Deleted,
}

impl SoftDeleteState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Active => "active",
            Self::Deleted => "deleted",
        }
    }
}

/// Last-modified window; `to == None` leaves the upper bound open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastModRange {
    pub from: DateTime<Utc>,
    pub to: Option<DateTime<Utc>>,
}

impl LastModRange {
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to: Some(to) }
    }

    pub fn since(from: DateTime<Utc>) -> Self {
        Self { from, to: None }
    }

    /// Human readable form used in the report, e.g. `2024-01-01T00:00:00Z..`.
    pub fn expr(&self) -> String {
        let from = self.from.to_rfc3339_opts(SecondsFormat::Secs, true);
        match self.to {
            Some(to) => format!("{from}..{}", to.to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => format!("{from}.."),
        }
    }
}
