//! typed-props - typed configuration settings read from properties files
//!
//! This library reads a flat `key=value` properties file with an optional
//! defaults resource, exposes each recognized key as a strongly-typed
//! setting with validation rules, and caches parsed snapshots so the
//! backing file is not re-read on every access.

pub mod configuration;
pub mod properties;
pub mod settings;
pub mod shared;
pub mod source;

pub use configuration::{CachePolicy, Configuration, DEFAULT_DEFAULTS_RESOURCE};
pub use properties::{Properties, Snapshot};
pub use settings::{Codec, Setting, SettingDefinition};
pub use shared::error::ConfigError;

/// Crate result type
pub type Result<T> = std::result::Result<T, shared::error::ConfigError>;

#[cfg(test)]
mod tests;
