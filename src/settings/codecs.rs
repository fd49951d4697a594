//! Scalar codecs
//!
//! Boolean, numeric, string, file-path, and URI decode rules.

use std::path::PathBuf;

use url::Url;

use super::Codec;
use crate::shared::error::ConfigError;

/// Boolean values. Case-insensitive `true`/`yes`/`on`/`1` decode to true,
/// `false`/`no`/`off`/`0` to false; anything else is invalid.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolCodec;

impl Codec for BoolCodec {
    type Value = bool;

    fn type_name(&self) -> &'static str {
        "boolean"
    }

    fn decode(&self, name: &str, raw: &str) -> crate::Result<bool> {
        match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                name: name.to_string(),
                type_name: self.type_name(),
                value: raw.to_string(),
                cause: None,
            }),
        }
    }
}

macro_rules! numeric_codec {
    ($(#[$doc:meta])* $codec:ident, $target:ty, $type_name:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $codec;

        impl Codec for $codec {
            type Value = $target;

            fn type_name(&self) -> &'static str {
                $type_name
            }

            fn decode(&self, name: &str, raw: &str) -> crate::Result<$target> {
                raw.parse::<$target>().map_err(|e| ConfigError::InvalidValue {
                    name: name.to_string(),
                    type_name: $type_name,
                    value: raw.to_string(),
                    cause: Some(Box::new(e)),
                })
            }
        }
    };
}

numeric_codec!(
    /// 32-bit signed integers.
    IntCodec, i32, "integer"
);
numeric_codec!(
    /// 64-bit signed integers.
    LongCodec, i64, "long"
);
numeric_codec!(
    /// Single-precision floating point.
    FloatCodec, f32, "float"
);
numeric_codec!(
    /// Double-precision floating point.
    DoubleCodec, f64, "double"
);

/// Strings, passed through without transformation.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl Codec for StringCodec {
    type Value = String;

    fn type_name(&self) -> &'static str {
        "string"
    }

    fn decode(&self, _name: &str, raw: &str) -> crate::Result<String> {
        Ok(raw.to_string())
    }
}

/// File paths. The value is wrapped as-is; no existence check is performed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathCodec;

impl Codec for PathCodec {
    type Value = PathBuf;

    fn type_name(&self) -> &'static str {
        "file path"
    }

    fn decode(&self, _name: &str, raw: &str) -> crate::Result<PathBuf> {
        Ok(PathBuf::from(raw))
    }
}

/// URIs, syntax-validated on decode.
#[derive(Debug, Clone, Copy, Default)]
pub struct UriCodec;

impl Codec for UriCodec {
    type Value = Url;

    fn type_name(&self) -> &'static str {
        "URI"
    }

    fn decode(&self, name: &str, raw: &str) -> crate::Result<Url> {
        Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
            name: name.to_string(),
            type_name: self.type_name(),
            value: raw.to_string(),
            cause: Some(Box::new(e)),
        })
    }
}
