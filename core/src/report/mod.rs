mod row;
mod writer;

pub use row::{FetchStatus, ReportRow};
pub use writer::{encode_csv, CsvReportWriter, ReportSink};
