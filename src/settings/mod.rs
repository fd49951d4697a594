//! Typed configuration settings
//!
//! This module contains the setting family: the [`Setting`] container that
//! captures and validates one named key, the [`Codec`] decode contract each
//! value type implements, and the [`SettingDefinition`] registry contract
//! that [`Configuration`] memoizes settings by.
//!
//! [`Configuration`]: crate::configuration::Configuration

pub mod codecs;
pub mod datetime;
pub mod enumerated;
pub mod mapped;
pub mod plugin;

use std::fmt;

use regex::Regex;

use crate::properties::Properties;
use crate::shared::error::ConfigError;

pub use codecs::{
    BoolCodec, DoubleCodec, FloatCodec, IntCodec, LongCodec, PathCodec, StringCodec, UriCodec,
};
pub use datetime::{DateTimeCodec, DEFAULT_DATETIME_FORMAT};
pub use enumerated::EnumCodec;
pub use mapped::MappedCodec;
pub use plugin::{Plugin, PluginCatalog, PluginCodec};

/// Constraint pattern accepting characters that may appear in an unquoted
/// SQL literal.
pub const SQL_LITERAL_PATTERN: &str = r"[\w\^\&\|\]\[\\~!@#$%*()<>?,./;:{}]+";

/// Decode contract shared by all setting value types.
///
/// A codec turns the raw captured string of one setting into its semantic
/// value. Decoding is stateless with respect to the setting lifecycle: it is
/// re-run on every [`Setting::value`] call and must not cache results, so a
/// codec reconfigured after `load` (a changed date format, say) takes effect
/// immediately.
pub trait Codec {
    /// The semantic type this codec decodes to.
    type Value;

    /// Human-readable name of the decoded type, used in error messages.
    fn type_name(&self) -> &'static str;

    /// Decode a present raw value. `name` is the setting's key, used to
    /// attribute failures.
    fn decode(&self, name: &str, raw: &str) -> crate::Result<Self::Value>;
}

/// Registry contract tying a stable identifier to a setting factory.
///
/// `Configuration` memoizes constructed settings by [`ID`](Self::ID), an
/// explicit tag rather than a runtime type identity, so two definitions must
/// never share an id. [`define`](Self::define) builds the setting with its
/// name, codec, and flags; setup-time misuse (a mapped-value collision, a
/// malformed constraint) surfaces here as [`ConfigError::Setup`].
pub trait SettingDefinition: 'static {
    /// The codec of the defined setting.
    type Codec: Codec + 'static;

    /// Stable identifier, unique across all definitions used with one
    /// `Configuration`.
    const ID: &'static str;

    /// Build the setting handler for this definition.
    fn define() -> crate::Result<Setting<Self::Codec>>;
}

/// One named, typed configuration setting.
///
/// Captures the raw string for its key when [`load`](Self::load)ed from a
/// snapshot, enforces the required flag and the optional constraint pattern,
/// and decodes on demand through its codec. `load` precedes
/// [`value`](Self::value); `Configuration` guarantees that ordering.
pub struct Setting<C: Codec> {
    name: String,
    codec: C,
    value_string: Option<String>,
    required: bool,
    constraint: Option<Constraint>,
    transient: bool,
}

struct Constraint {
    pattern: String,
    regex: Regex,
}

impl<C: Codec> fmt::Debug for Setting<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setting")
            .field("name", &self.name)
            .field("type", &self.codec.type_name())
            .field("value", &self.value_string)
            .field("required", &self.required)
            .field("transient", &self.transient)
            .finish()
    }
}

impl<C: Codec> Setting<C> {
    /// Create a setting handler for the given properties key.
    pub fn new(name: impl Into<String>, codec: C) -> Self {
        Self {
            name: name.into(),
            codec,
            value_string: None,
            required: false,
            constraint: None,
            transient: false,
        }
    }

    /// The key of this setting in the properties file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The codec decoding this setting's values.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Mutable access to the codec, e.g. to change a date format.
    pub fn codec_mut(&mut self) -> &mut C {
        &mut self.codec
    }

    /// Name of the semantic type this setting decodes to.
    pub fn type_name(&self) -> &'static str {
        self.codec.type_name()
    }

    /// Whether the configuration contains a value for this setting. Always
    /// true for required settings after a successful load.
    pub fn is_set(&self) -> bool {
        self.value_string.is_some()
    }

    /// The raw captured string, if any.
    pub fn raw_value(&self) -> Option<&str> {
        self.value_string.as_deref()
    }

    /// Whether a missing value fails the load.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Toggle the require-on-load behavior. A value from the defaults
    /// resource satisfies the requirement as well as one from the file.
    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// Builder form of [`set_required`](Self::set_required).
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Whether this setting must never be memoized across reads.
    pub fn is_transient(&self) -> bool {
        self.transient
    }

    /// Mark this setting as never-cacheable.
    pub fn set_transient(&mut self, transient: bool) {
        self.transient = transient;
    }

    /// Builder form of [`set_transient`](Self::set_transient).
    pub fn transient(mut self, transient: bool) -> Self {
        self.transient = transient;
        self
    }

    /// The regular expression this setting's values must fully match, if any.
    pub fn constraint_pattern(&self) -> Option<&str> {
        self.constraint.as_ref().map(|c| c.pattern.as_str())
    }

    /// Impose or clear a regular-expression check on this setting's values.
    /// The pattern is anchored to the whole value. A malformed pattern is a
    /// setup error.
    pub fn set_constraint_pattern(&mut self, pattern: Option<&str>) -> crate::Result<()> {
        self.constraint = match pattern {
            None => None,
            Some(pattern) => {
                let regex = Regex::new(&format!(r"\A(?:{})\z", pattern)).map_err(|e| {
                    ConfigError::Setup(format!(
                        "invalid constraint pattern \"{}\" for setting \"{}\": {}",
                        pattern, self.name, e
                    ))
                })?;
                Some(Constraint {
                    pattern: pattern.to_string(),
                    regex,
                })
            }
        };
        Ok(())
    }

    /// Builder form of [`set_constraint_pattern`](Self::set_constraint_pattern).
    pub fn constraint(mut self, pattern: &str) -> crate::Result<Self> {
        self.set_constraint_pattern(Some(pattern))?;
        Ok(self)
    }

    /// Capture this setting's raw value from a snapshot.
    ///
    /// Fails when the setting is required but absent, or when a present
    /// value does not fully match the constraint pattern. Idempotent for a
    /// given snapshot value.
    pub fn load(&mut self, snapshot: &Properties) -> crate::Result<()> {
        self.value_string = snapshot.get(&self.name).map(str::to_owned);
        if self.required && self.value_string.is_none() {
            return Err(ConfigError::MissingRequired {
                name: self.name.clone(),
                type_name: self.codec.type_name(),
            });
        }
        if let (Some(constraint), Some(value)) = (&self.constraint, &self.value_string) {
            if !constraint.regex.is_match(value) {
                return Err(ConfigError::ConstraintViolation {
                    name: self.name.clone(),
                    value: value.clone(),
                    pattern: constraint.pattern.clone(),
                });
            }
        }
        Ok(())
    }

    /// Decode the captured raw value.
    ///
    /// Returns `None` for an optional setting with no captured value. The
    /// decode re-runs on every call; results are never cached.
    pub fn value(&self) -> crate::Result<Option<C::Value>> {
        match &self.value_string {
            None => Ok(None),
            Some(raw) => self.codec.decode(&self.name, raw).map(Some),
        }
    }
}
