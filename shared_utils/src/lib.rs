//! Small helpers shared across the workspace: environment variable access and
//! the configuration error type every crate reports config failures with.

pub mod config;
pub mod env;

pub use config::ConfigError;
