//! Immutable datahub query values.
//!
//! A [`Query`] is never changed in place: every [`FilterOp`] applied to it
//! yields a new value, so tasks derived from a common parent can never see
//! each other's filters.

mod filter;
mod types;

pub use filter::{FilterOp, Query};
pub use types::{Format, LastModRange, PubState, ResourceType, SoftDeleteState, DUMP_FORMATS};
