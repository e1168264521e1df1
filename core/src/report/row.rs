use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::query::Format;
use crate::task::DumpTask;

/// Outcome of one (task, format) fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Ok,
    Error(String),
}

impl FetchStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("ok"),
            Self::Error(msg) => f.write_str(msg),
        }
    }
}

impl Serialize for FetchStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One line of the audit report. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    #[serde(serialize_with = "timestamp")]
    pub start: DateTime<Utc>,
    #[serde(serialize_with = "timestamp")]
    pub end: DateTime<Utc>,
    pub duration_ms: i64,
    pub dir: String,
    pub name: String,
    pub types: String,
    pub touristic_types: String,
    pub channels: String,
    pub lastmod: String,
    pub soft_delete: &'static str,
    pub pub_state: &'static str,
    pub status: FetchStatus,
    pub uri: String,
    pub open_at_start: usize,
    pub open_at_end: usize,
    pub size: Option<u64>,
    pub content_type: Option<String>,
}

impl ReportRow {
    /// Row for `task` in `format`, before the fetch outcome is known.
    pub fn for_task(task: &DumpTask, format: Format, start: DateTime<Utc>) -> Self {
        let q = &task.query;
        Self {
            start,
            end: start,
            duration_ms: 0,
            dir: task.directory.clone(),
            name: task.file_name(format),
            types: q.types_summary(),
            touristic_types: q.touristic_types_summary(),
            channels: q.channels_summary(),
            lastmod: q.lastmod_expr(),
            soft_delete: q.soft_delete().as_str(),
            pub_state: q.pub_state().as_str(),
            status: FetchStatus::Ok,
            uri: String::new(),
            open_at_start: 0,
            open_at_end: 0,
            size: None,
            content_type: None,
        }
    }

    pub fn finish(mut self, end: DateTime<Utc>, status: FetchStatus) -> Self {
        self.end = end;
        self.duration_ms = (end - self.start).num_milliseconds();
        self.status = status;
        self
    }
}

fn timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Query, ResourceType};
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_row_from_task() {
        let task = DumpTask::new(
            "bychannel/westtoer",
            "westtoer-pub-all",
            Query::new(ResourceType::Product)
                .for_types(["reca", "accommodation"])
                .for_channels(["westtoer*"])
                .published(),
        );
        let start = Utc.with_ymd_and_hms(2024, 1, 8, 12, 0, 0).unwrap();
        let row = ReportRow::for_task(&task, Format::Json, start)
            .finish(start + Duration::milliseconds(1500), FetchStatus::Ok);

        assert_eq!(row.name, "westtoer-pub-all.json");
        assert_eq!(row.types, "reca|accommodation");
        assert_eq!(row.channels, "westtoer*");
        assert_eq!(row.pub_state, "published");
        assert_eq!(row.soft_delete, "ignore");
        assert_eq!(row.duration_ms, 1500);
        assert_eq!(row.status.to_string(), "ok");
    }
}
