//! Paced execution of a [`WorkQueue`](crate::task::WorkQueue).
//!
//! ```text
//! WorkQueue
//!   ↓  dispatcher: one task every `time_between`, never waits for completions
//! per task × format: spawn sub-fetch (open sink → resolve uri → stream → size)
//!   ↓  mpsc<Completion>
//! collector: CompletionAccumulator::record → barrier fires once → ReportSink::write
//! ```

mod completion;
mod engine;
mod progress;
mod store;
mod types;

pub use completion::{Completion, CompletionAccumulator};
pub use engine::DumpExecutor;
pub use progress::ProgressMonitor;
pub use store::{FsOutputStore, OutputSink, OutputStore};
pub use types::{ExecutionOpts, ExecutionResult};
