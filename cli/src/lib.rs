//! dhubdump-cli library, exposes the modules for unit tests

pub mod app;
pub mod commands;
