//! Logging utilities module
//!
//! This module provides centralized logging initialization. The crate itself
//! only emits warning-level events for non-fatal failures (a configuration
//! source that could not be closed after a successful read); embedding
//! applications that already install their own `tracing` subscriber can skip
//! this module entirely.

/// Logging utilities for embedding applications
pub struct LoggingUtils;

impl LoggingUtils {
    /// Initialize logging with the specified default level
    pub fn initialize(level: &str) -> crate::Result<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level));

        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| crate::shared::error::ConfigError::Setup(
                format!("Failed to initialize logging: {}", e)
            ))?;

        Ok(())
    }
}
