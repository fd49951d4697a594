//! Enumerated codec

use super::Codec;
use crate::shared::error::ConfigError;

/// Values drawn from a fixed enumeration of named constants.
///
/// The raw text is upper-cased before the lookup, so `red` matches the
/// constant `RED`. Constant names must be all-uppercase; supplying one that
/// is not, or supplying the same name twice, is a setup error.
#[derive(Debug, Clone)]
pub struct EnumCodec<E> {
    type_name: &'static str,
    variants: Vec<(&'static str, E)>,
}

impl<E: Clone> EnumCodec<E> {
    /// Build the codec from `(NAME, variant)` pairs.
    pub fn new(
        type_name: &'static str,
        variants: impl IntoIterator<Item = (&'static str, E)>,
    ) -> crate::Result<Self> {
        let variants: Vec<(&'static str, E)> = variants.into_iter().collect();
        for (i, (name, _)) in variants.iter().enumerate() {
            if name.chars().any(|c| c.is_lowercase()) {
                return Err(ConfigError::Setup(format!(
                    "enumerated constant \"{}\" of type {} is not all-uppercase",
                    name, type_name
                )));
            }
            if variants[..i].iter().any(|(seen, _)| seen == name) {
                return Err(ConfigError::Setup(format!(
                    "enumerated constant \"{}\" of type {} is listed twice",
                    name, type_name
                )));
            }
        }
        Ok(Self {
            type_name,
            variants,
        })
    }
}

impl<E: Clone> Codec for EnumCodec<E> {
    type Value = E;

    fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn decode(&self, name: &str, raw: &str) -> crate::Result<E> {
        let folded = raw.to_uppercase();
        self.variants
            .iter()
            .find(|(constant, _)| *constant == folded)
            .map(|(_, variant)| variant.clone())
            .ok_or_else(|| ConfigError::Unrecognized {
                name: name.to_string(),
                value: raw.to_string(),
            })
    }
}
