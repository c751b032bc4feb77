//! Audic command-line player

pub mod config;
pub mod logging;
pub mod progress;

pub use config::CliConfig;
