//! Task assembly: turns dump requests and the configured dimensions into a
//! flat, ordered [`WorkQueue`].
//!
//! Assembly is pure. Creating the directories the tasks point at is a
//! separate step ([`ensure_directories`]) run by the orchestrator.

mod adhoc;
mod assembly;
mod fs;
mod request;
mod types;

pub use adhoc::{claims_task, item_task, sample_tasks, vocabularies_task};
pub use assembly::assemble_products;
pub use fs::{ensure_directories, preflight};
pub use request::{assemble_requests, parse_requests, DumpRequest, DEFAULT_REQUESTS};
pub use types::{join_dir, name_join, DumpTask, WorkQueue};
