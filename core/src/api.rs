//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `dhubdump_core::api` instead of reaching into internal modules.

pub use crate::client::{DatahubClient, FetchMeta, FetchPage, ResponseStream};
pub use crate::config::{
    load_default, load_from_path, ApiConfig, AppConfig, DumpConfig, LoggingConfig, PeriodConfig,
};
pub use crate::dump::{acquire_token, DumpRunner};
pub use crate::error::{AssemblyError, CliError, ClientError, ClientErrorKind, DumpError};
pub use crate::executor::{ExecutionOpts, ExecutionResult, OutputStore};
pub use crate::query::{Format, LastModRange, PubState, Query, ResourceType, DUMP_FORMATS};
pub use crate::report::{CsvReportWriter, FetchStatus, ReportRow, ReportSink};
pub use crate::task::{parse_requests, DumpRequest, DumpTask, WorkQueue};
