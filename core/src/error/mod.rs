pub mod assembly;
pub mod client;
#[allow(clippy::module_inception)]
pub mod error;

pub use assembly::AssemblyError;
pub use client::{ClientError, ClientErrorKind};
pub use error::{CliError, DumpError};
