//! Shared utilities for the news agent workspace
//!
//! Logging setup and environment-backed configuration lookup.

pub mod config;
pub mod logging;

pub use config::{Config, ConfigError};
pub use logging::{init_tracing, init_tracing_with_default};
