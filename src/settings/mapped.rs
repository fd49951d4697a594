//! Mapped (closed-set) codec

use std::collections::HashMap;
use std::fmt::Display;

use super::Codec;
use crate::shared::error::ConfigError;

/// Values drawn from a closed set supplied at construction.
///
/// The lookup table is a copy built once; later changes to the structure the
/// values came from do not affect what this codec recognizes. Two allowed
/// values sharing a string form make the set ambiguous, which is a setup
/// error raised from the constructor before any load is attempted.
#[derive(Debug, Clone)]
pub struct MappedCodec<V> {
    type_name: &'static str,
    table: HashMap<String, V>,
}

impl<V: Clone> MappedCodec<V> {
    /// Build the table from the string forms of the allowed values.
    ///
    /// `setting` names the setting in the collision diagnostic.
    pub fn from_values(
        setting: &str,
        type_name: &'static str,
        values: impl IntoIterator<Item = V>,
    ) -> crate::Result<Self>
    where
        V: Display,
    {
        let mut table = HashMap::new();
        for value in values {
            let key = value.to_string();
            if table.insert(key.clone(), value).is_some() {
                return Err(ConfigError::Setup(format!(
                    "value \"{}\" of setting \"{}\" has a non-unique string form \
                     among possible values of that setting",
                    key, setting
                )));
            }
        }
        Ok(Self { type_name, table })
    }

    /// Build the table from explicit raw-text-to-value pairs. Later pairs
    /// replace earlier ones for the same text.
    pub fn from_map(
        type_name: &'static str,
        entries: impl IntoIterator<Item = (String, V)>,
    ) -> Self {
        Self {
            type_name,
            table: entries.into_iter().collect(),
        }
    }
}

impl<V: Clone> Codec for MappedCodec<V> {
    type Value = V;

    fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn decode(&self, name: &str, raw: &str) -> crate::Result<V> {
        self.table
            .get(raw)
            .cloned()
            .ok_or_else(|| ConfigError::Unrecognized {
                name: name.to_string(),
                value: raw.to_string(),
            })
    }
}
