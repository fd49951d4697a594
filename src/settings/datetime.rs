//! Date/time codec

use chrono::NaiveDateTime;

use super::Codec;
use crate::shared::error::ConfigError;

/// Format applied when no explicit format has been assigned.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date-and-time values in a configurable strftime format.
///
/// The format string is interpreted on every decode, so changing it through
/// [`Setting::codec_mut`](super::Setting::codec_mut) after `load` affects
/// subsequent [`value`](super::Setting::value) calls.
#[derive(Debug, Clone, Default)]
pub struct DateTimeCodec {
    format: Option<String>,
}

impl DateTimeCodec {
    /// Create a codec using [`DEFAULT_DATETIME_FORMAT`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with an explicit strftime format.
    pub fn with_format(format: impl Into<String>) -> Self {
        Self {
            format: Some(format.into()),
        }
    }

    /// The format that parses the text of this setting.
    pub fn format(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_DATETIME_FORMAT)
    }

    /// Assign the parsing format, or `None` to restore the default.
    pub fn set_format(&mut self, format: Option<String>) {
        self.format = format;
    }
}

impl Codec for DateTimeCodec {
    type Value = NaiveDateTime;

    fn type_name(&self) -> &'static str {
        "date/time"
    }

    fn decode(&self, name: &str, raw: &str) -> crate::Result<NaiveDateTime> {
        NaiveDateTime::parse_from_str(raw, self.format()).map_err(|e| {
            ConfigError::InvalidValue {
                name: name.to_string(),
                type_name: self.type_name(),
                value: raw.to_string(),
                cause: Some(Box::new(e)),
            }
        })
    }
}
