//! Plugin-lookup codec
//!
//! The original system resolved a fully-qualified class name through the
//! caller's class loader. Reimplemented here as an explicit catalog of named
//! factories: the setting's raw text selects a [`Plugin`] handle that can
//! construct instances on demand.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::Codec;
use crate::shared::error::ConfigError;

type Factory<T> = Rc<dyn Fn() -> T>;

/// A named constructible capability resolved from a [`PluginCatalog`].
pub struct Plugin<T> {
    name: String,
    factory: Factory<T>,
}

impl<T> Plugin<T> {
    /// The name the plugin was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Construct a fresh instance.
    pub fn instantiate(&self) -> T {
        (self.factory)()
    }
}

impl<T> Clone for Plugin<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            factory: self.factory.clone(),
        }
    }
}

impl<T> fmt::Debug for Plugin<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin").field("name", &self.name).finish()
    }
}

/// Registry of named factories for one capability type.
pub struct PluginCatalog<T> {
    type_name: &'static str,
    entries: HashMap<String, Factory<T>>,
}

impl<T> PluginCatalog<T> {
    /// Create an empty catalog. `type_name` labels the capability in error
    /// messages.
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            entries: HashMap::new(),
        }
    }

    /// Register a factory under a name. Registering the same name twice is a
    /// setup error.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn() -> T + 'static,
    ) -> crate::Result<()> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(ConfigError::Setup(format!(
                "plugin \"{}\" of type {} is already registered",
                name, self.type_name
            )));
        }
        self.entries.insert(name, Rc::new(factory));
        Ok(())
    }
}

/// Codec resolving raw text to a registered [`Plugin`].
pub struct PluginCodec<T> {
    catalog: PluginCatalog<T>,
}

impl<T> PluginCodec<T> {
    /// Create the codec over a populated catalog.
    pub fn new(catalog: PluginCatalog<T>) -> Self {
        Self { catalog }
    }
}

impl<T> Codec for PluginCodec<T> {
    type Value = Plugin<T>;

    fn type_name(&self) -> &'static str {
        self.catalog.type_name
    }

    fn decode(&self, name: &str, raw: &str) -> crate::Result<Plugin<T>> {
        self.catalog
            .entries
            .get(raw)
            .map(|factory| Plugin {
                name: raw.to_string(),
                factory: factory.clone(),
            })
            .ok_or_else(|| ConfigError::Unrecognized {
                name: name.to_string(),
                value: raw.to_string(),
            })
    }
}
