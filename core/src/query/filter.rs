use chrono::SecondsFormat;

use super::types::{Format, LastModRange, PubState, ResourceType, SoftDeleteState};

/// One filter step. Applying it to a [`Query`] produces a new query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOp {
    ForTypes(Vec<String>),
    ForTouristicTypes(Vec<String>),
    ForChannels(Vec<String>),
    Published,
    IgnorePublished,
    SoftDelete(SoftDeleteState),
    LastModBetween(LastModRange),
    ForId(String),
    Require(String),
    Bulk,
    As(Format),
    Size(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    resource: ResourceType,
    types: Vec<String>,
    touristic_types: Vec<String>,
    channels: Vec<String>,
    pub_state: PubState,
    soft_delete: SoftDeleteState,
    lastmod: Option<LastModRange>,
    id: Option<String>,
    required: Vec<String>,
    bulk: bool,
    format: Option<Format>,
    size: Option<u32>,
}

impl Query {
    pub fn new(resource: ResourceType) -> Self {
        Self {
            resource,
            types: Vec::new(),
            touristic_types: Vec::new(),
            channels: Vec::new(),
            pub_state: PubState::default(),
            soft_delete: SoftDeleteState::default(),
            lastmod: None,
            id: None,
            required: Vec::new(),
            bulk: false,
            format: None,
            size: None,
        }
    }

    /// Derive a new query with `op` layered on top of this one.
    pub fn apply(&self, op: FilterOp) -> Self {
        let mut next = self.clone();
        match op {
            FilterOp::ForTypes(types) => next.types = types,
            FilterOp::ForTouristicTypes(types) => next.touristic_types = types,
            FilterOp::ForChannels(channels) => next.channels = channels,
            FilterOp::Published => next.pub_state = PubState::Published,
            FilterOp::IgnorePublished => next.pub_state = PubState::Ignore,
            FilterOp::SoftDelete(state) => next.soft_delete = state,
            FilterOp::LastModBetween(range) => next.lastmod = Some(range),
            FilterOp::ForId(id) => next.id = Some(id),
            FilterOp::Require(field) => {
                if !next.required.contains(&field) {
                    next.required.push(field);
                }
            }
            FilterOp::Bulk => next.bulk = true,
            FilterOp::As(format) => next.format = Some(format),
            FilterOp::Size(size) => next.size = Some(size),
        }
        next
    }

    pub fn for_types<I, S>(&self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.apply(FilterOp::ForTypes(
            types.into_iter().map(Into::into).collect(),
        ))
    }

    pub fn for_touristic_types<I, S>(&self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.apply(FilterOp::ForTouristicTypes(
            types.into_iter().map(Into::into).collect(),
        ))
    }

    pub fn for_channels<I, S>(&self, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.apply(FilterOp::ForChannels(
            channels.into_iter().map(Into::into).collect(),
        ))
    }

    pub fn published(&self) -> Self {
        self.apply(FilterOp::Published)
    }

    pub fn with_pub_state(&self, state: PubState) -> Self {
        match state {
            PubState::Published => self.apply(FilterOp::Published),
            PubState::Ignore => self.apply(FilterOp::IgnorePublished),
        }
    }

    pub fn lastmod_between(&self, range: LastModRange) -> Self {
        self.apply(FilterOp::LastModBetween(range))
    }

    pub fn bulk(&self) -> Self {
        self.apply(FilterOp::Bulk)
    }

    pub fn as_format(&self, format: Format) -> Self {
        self.apply(FilterOp::As(format))
    }

    pub fn resource(&self) -> ResourceType {
        self.resource
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn touristic_types(&self) -> &[String] {
        &self.touristic_types
    }

    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    pub fn pub_state(&self) -> PubState {
        self.pub_state
    }

    pub fn soft_delete(&self) -> SoftDeleteState {
        self.soft_delete
    }

    pub fn lastmod(&self) -> Option<&LastModRange> {
        self.lastmod.as_ref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn is_bulk(&self) -> bool {
        self.bulk
    }

    pub fn format(&self) -> Option<Format> {
        self.format
    }

    /// Path of the resource below the API root, e.g. `product`.
    pub fn path(&self) -> String {
        match &self.id {
            Some(id) => format!("{}/{}", self.resource.as_str(), id),
            None => self.resource.as_str().to_string(),
        }
    }

    /// Request parameters in a stable order.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Some(format) = self.format {
            out.push(("format".to_string(), format.param().to_string()));
        }
        if !self.types.is_empty() {
            out.push(("types".to_string(), self.types.join(",")));
        }
        if !self.touristic_types.is_empty() {
            out.push(("touristictypes".to_string(), self.touristic_types.join(",")));
        }
        if !self.channels.is_empty() {
            out.push(("channels".to_string(), self.channels.join(",")));
        }
        if self.pub_state == PubState::Published {
            out.push(("published".to_string(), "true".to_string()));
        }
        match self.soft_delete {
            SoftDeleteState::Ignore => {}
            SoftDeleteState::Active => out.push(("deleted".to_string(), "false".to_string())),
            SoftDeleteState::Deleted => out.push(("deleted".to_string(), "true".to_string())),
        }
        if let Some(range) = &self.lastmod {
            out.push((
                "lastmodfrom".to_string(),
                range.from.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
            if let Some(to) = range.to {
                out.push((
                    "lastmodto".to_string(),
                    to.to_rfc3339_opts(SecondsFormat::Secs, true),
                ));
            }
        }
        for field in &self.required {
            out.push((field.clone(), "*".to_string()));
        }
        if self.bulk {
            out.push(("bulk".to_string(), "true".to_string()));
        }
        if let Some(size) = self.size {
            out.push(("size".to_string(), size.to_string()));
        }
        out
    }

    pub fn types_summary(&self) -> String {
        self.types.join("|")
    }

    pub fn touristic_types_summary(&self) -> String {
        self.touristic_types.join("|")
    }

    pub fn channels_summary(&self) -> String {
        self.channels.join("|")
    }

    pub fn lastmod_expr(&self) -> String {
        self.lastmod.map(|r| r.expr()).unwrap_or_default()
    }
}
