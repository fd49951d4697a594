//! Shared utilities module
//!
//! This module contains error handling and logging utilities used across
//! the crate.

pub mod error;
pub mod logging;

pub use error::{ConfigError, ConfigResult};
pub use logging::LoggingUtils;
