//! Error handling module
//!
//! This module provides centralized error handling for the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed cause attached to decode and read failures.
pub type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Configuration error types
///
/// A single taxonomy covers every failure stage: loading a setting from a
/// snapshot, decoding its raw text, reading the backing sources, and misuse
/// detected while a setting handler is being built. All variants are
/// recoverable from the caller's point of view except [`Setup`], which
/// signals a programming error in the configuration of the configuration.
///
/// [`Setup`]: ConfigError::Setup
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required setting has no value in the file or the defaults.
    #[error("setting \"{name}\" of type {type_name} is required and missing from the configuration")]
    MissingRequired {
        name: String,
        type_name: &'static str,
    },

    /// A present value does not fully match the setting's constraint pattern.
    #[error("setting \"{name}\" value \"{value}\" does not match the constraint pattern: {pattern}")]
    ConstraintViolation {
        name: String,
        value: String,
        pattern: String,
    },

    /// A present value cannot be decoded into the setting's type.
    #[error("setting \"{name}\" of type {type_name} has an invalid value \"{value}\"")]
    InvalidValue {
        name: String,
        type_name: &'static str,
        value: String,
        #[source]
        cause: Option<Cause>,
    },

    /// A present value is outside a closed set of recognized values.
    #[error("unrecognized value of setting \"{name}\": {value}")]
    Unrecognized { name: String, value: String },

    /// The defaults resource exists but could not be read.
    #[error("error reading configuration defaults from {}", .resource.display())]
    ReadDefaults {
        resource: PathBuf,
        #[source]
        cause: Cause,
    },

    /// The primary configuration file could not be read.
    #[error("error reading configuration file {}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        cause: Cause,
    },

    /// Setup-time misuse: colliding mapped values, a malformed constraint
    /// pattern, duplicate plugin registrations, or a registry id bound to
    /// two different setting types.
    #[error("configuration setup error: {0}")]
    Setup(String),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;
