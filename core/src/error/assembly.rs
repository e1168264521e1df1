use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("duplicate task '{name}' in directory '{directory}'")]
    DuplicateTask { directory: String, name: String },

    #[error("period '{0}' must span at least one day")]
    EmptyPeriod(String),
}
