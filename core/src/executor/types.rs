use std::path::PathBuf;
use std::time::Duration;

use crate::query::{Format, DUMP_FORMATS};

#[derive(Debug, Clone)]
pub struct ExecutionOpts {
    /// Dump root; task directories are resolved below it.
    pub output_root: PathBuf,

    /// Delay between two task dispatches.
    pub time_between: Duration,

    /// Formats fetched for every task.
    pub formats: Vec<Format>,

    /// Enable visual progress bar
    pub progress_bar: bool,
}

impl ExecutionOpts {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            time_between: Duration::from_millis(100),
            formats: DUMP_FORMATS.to_vec(),
            progress_bar: false,
        }
    }

    pub fn with_time_between(mut self, time_between: Duration) -> Self {
        self.time_between = time_between;
        self
    }

    pub fn with_progress_bar(mut self, enabled: bool) -> Self {
        self.progress_bar = enabled;
        self
    }

    /// Formats to fetch, each once, in listed order.
    pub fn fetch_formats(&self) -> Vec<Format> {
        let mut out: Vec<Format> = Vec::with_capacity(self.formats.len());
        for format in &self.formats {
            if !out.contains(format) {
                out.push(*format);
            }
        }
        out
    }
}

#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub run_id: String,
    pub total_tasks: usize,
    /// Completed (task, format) pairs.
    pub completed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub report_written: bool,
}
