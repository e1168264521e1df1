pub mod api;
pub mod client;
pub mod config;
pub mod dump;
pub mod error;
pub mod executor;
pub mod query;
pub mod report;
pub mod task;
