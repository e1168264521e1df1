pub mod datahub;
pub mod factory;
