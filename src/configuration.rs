//! Settings container
//!
//! [`Configuration`] owns the backing-source locations, reads them into
//! merged [`Snapshot`]s, caches the current snapshot, and memoizes loaded
//! [`Setting`] instances per definition id.
//!
//! # Concurrency
//!
//! A `Configuration` is mutable shared state for single-threaded or
//! externally-synchronized use. Every operation that may touch the snapshot
//! cache or the memo table takes `&mut self`, so the compiler enforces that
//! contract; wrap the container in a lock to share it across threads.

use std::any::Any;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use tracing::warn;

use crate::properties::{Properties, Snapshot};
use crate::settings::{Codec, Setting, SettingDefinition};
use crate::shared::error::ConfigError;
use crate::source::{FsOpener, ReadSource, SourceOpener};

/// Conventional defaults-resource location, applied until reassigned.
pub const DEFAULT_DEFAULTS_RESOURCE: &str = "config/defaults.properties";

/// Snapshot caching policy.
///
/// With [`NoCache`](CachePolicy::NoCache), the single-argument read
/// operations re-read the backing sources on every call; callers should
/// obtain one snapshot from [`Configuration::read_configuration`] and use
/// the `*_in` operations instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Keep the last snapshot until explicitly invalidated. The default.
    #[default]
    Cache,
    /// Re-read the backing sources on every snapshot request.
    NoCache,
}

/// Provides access to typed settings read from a properties file with an
/// optional defaults resource.
pub struct Configuration {
    host: String,
    opener: Box<dyn SourceOpener>,
    config_file: Option<PathBuf>,
    defaults_resource: Option<PathBuf>,
    policy: CachePolicy,
    snapshot: Option<Snapshot>,
    settings: HashMap<&'static str, Rc<dyn Any>>,
}

impl Configuration {
    /// Create a settings container reading through the filesystem. `host`
    /// labels this container in log messages.
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_opener(host, Box::new(FsOpener::default()))
    }

    /// Create a settings container reading through a custom source opener.
    pub fn with_opener(host: impl Into<String>, opener: Box<dyn SourceOpener>) -> Self {
        Self {
            host: host.into(),
            opener,
            config_file: None,
            defaults_resource: Some(PathBuf::from(DEFAULT_DEFAULTS_RESOURCE)),
            policy: CachePolicy::default(),
            snapshot: None,
            settings: HashMap::new(),
        }
    }

    /// Read a setting and decode it to its value type.
    ///
    /// Avoid this on a [`NoCache`](CachePolicy::NoCache) container, where it
    /// re-reads the entire properties file per setting fetched; use
    /// [`read_setting_in`](Self::read_setting_in) with one snapshot instead.
    pub fn read_setting<D: SettingDefinition>(
        &mut self,
    ) -> crate::Result<Option<<D::Codec as Codec>::Value>> {
        let snapshot = self.read_configuration()?;
        self.read_setting_in::<D>(&snapshot)
    }

    /// A version of [`read_setting`](Self::read_setting) for use with
    /// non-caching containers: call
    /// [`read_configuration`](Self::read_configuration) once, then read all
    /// the settings needed against the returned snapshot.
    pub fn read_setting_in<D: SettingDefinition>(
        &mut self,
        snapshot: &Snapshot,
    ) -> crate::Result<Option<<D::Codec as Codec>::Value>> {
        let setting = self.find_setting_in::<D>(snapshot)?;
        setting.value()
    }

    /// Return the loaded setting instance itself, memoized per definition id
    /// unless the setting is transient.
    ///
    /// Memoization is keyed by id only: a hit is returned unconditionally,
    /// even if the snapshot it was loaded from has since been replaced.
    /// Reassigning the file, the defaults resource, or the cache policy, or
    /// calling [`invalidate`](Self::invalidate), discards the memo table
    /// along with the snapshot cache.
    pub fn find_setting<D: SettingDefinition>(
        &mut self,
    ) -> crate::Result<Rc<Setting<D::Codec>>> {
        let snapshot = self.read_configuration()?;
        self.find_setting_in::<D>(&snapshot)
    }

    /// A version of [`find_setting`](Self::find_setting) taking an explicit
    /// snapshot, for use with non-caching containers.
    pub fn find_setting_in<D: SettingDefinition>(
        &mut self,
        snapshot: &Snapshot,
    ) -> crate::Result<Rc<Setting<D::Codec>>> {
        if let Some(memoized) = self.settings.get(D::ID) {
            return Rc::clone(memoized).downcast::<Setting<D::Codec>>().map_err(|_| {
                ConfigError::Setup(format!(
                    "setting id \"{}\" is registered with two different setting types",
                    D::ID
                ))
            });
        }
        let mut setting = D::define()?;
        setting.load(snapshot)?;
        let setting = Rc::new(setting);
        if !setting.is_transient() {
            self.settings
                .insert(D::ID, Rc::clone(&setting) as Rc<dyn Any>);
        }
        Ok(setting)
    }

    /// Return the current snapshot, reading the backing sources if the cache
    /// is empty or caching is disabled.
    pub fn read_configuration(&mut self) -> crate::Result<Snapshot> {
        if self.policy == CachePolicy::Cache {
            if let Some(snapshot) = &self.snapshot {
                return Ok(Arc::clone(snapshot));
            }
        }
        let snapshot = self.read_from_sources()?;
        if self.policy == CachePolicy::Cache {
            self.snapshot = Some(Arc::clone(&snapshot));
        }
        Ok(snapshot)
    }

    /// Read defaults and primary file into a fresh merged snapshot.
    ///
    /// An absent defaults resource is skipped silently; an absent or
    /// unreadable primary file is an error. Streams are closed on every
    /// path, with close failures after a successful read logged and
    /// suppressed.
    fn read_from_sources(&self) -> crate::Result<Snapshot> {
        let mut defaults: Option<Snapshot> = None;
        if let Some(resource) = &self.defaults_resource {
            if self.opener.exists(resource) {
                let mut layer = Properties::new();
                let source = self
                    .opener
                    .open(resource)
                    .map_err(|e| ConfigError::ReadDefaults {
                        resource: resource.clone(),
                        cause: Box::new(e),
                    })?;
                let source = Self::load_layer(&mut layer, source).map_err(|e| {
                    ConfigError::ReadDefaults {
                        resource: resource.clone(),
                        cause: e,
                    }
                })?;
                self.close_quietly(source, resource);
                defaults = Some(Arc::new(layer));
            }
        }

        let mut config = match defaults {
            Some(defaults) => Properties::with_defaults(defaults),
            None => Properties::new(),
        };
        if let Some(path) = &self.config_file {
            let source = self.opener.open(path).map_err(|e| ConfigError::ReadFile {
                path: path.clone(),
                cause: Box::new(e),
            })?;
            let source =
                Self::load_layer(&mut config, source).map_err(|e| ConfigError::ReadFile {
                    path: path.clone(),
                    cause: e,
                })?;
            self.close_quietly(source, path);
        }
        Ok(Arc::new(config))
    }

    /// Parse one source into a layer, returning the stream for the close
    /// step. On a parse failure the stream is closed here, since the read
    /// failure is what gets reported.
    fn load_layer(
        layer: &mut Properties,
        mut source: Box<dyn ReadSource>,
    ) -> Result<Box<dyn ReadSource>, crate::shared::error::Cause> {
        match layer.load(&mut source) {
            Ok(()) => Ok(source),
            Err(e) => {
                let _ = source.close();
                Err(Box::new(e))
            }
        }
    }

    fn close_quietly(&self, source: Box<dyn ReadSource>, location: &Path) {
        if let Err(e) = source.close() {
            warn!(
                host = %self.host,
                location = %location.display(),
                error = %e,
                "Could not close a configuration source"
            );
        }
    }

    /// The primary configuration file, if one is assigned.
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Assign or clear the primary configuration file. With `None`, only the
    /// defaults resource is read. Invalidates the cache.
    pub fn set_config_file(&mut self, config_file: Option<PathBuf>) {
        self.invalidate();
        self.config_file = config_file;
    }

    /// The defaults-resource location, if any. Resolved by the source
    /// opener; [`DEFAULT_DEFAULTS_RESOURCE`] until reassigned.
    pub fn defaults_resource(&self) -> Option<&Path> {
        self.defaults_resource.as_deref()
    }

    /// Assign or clear the defaults-resource location. Invalidates the
    /// cache.
    pub fn set_defaults_resource(&mut self, defaults_resource: Option<PathBuf>) {
        self.invalidate();
        self.defaults_resource = defaults_resource;
    }

    /// Whether this container caches the snapshots it reads. The default is
    /// true.
    pub fn is_caching_enabled(&self) -> bool {
        self.policy == CachePolicy::Cache
    }

    /// Switch the caching policy. Invalidates the cache.
    pub fn set_caching_enabled(&mut self, enabled: bool) {
        self.invalidate();
        self.policy = if enabled {
            CachePolicy::Cache
        } else {
            CachePolicy::NoCache
        };
    }

    /// Discard the cached snapshot and the setting memo table. The next read
    /// constructs everything afresh.
    pub fn invalidate(&mut self) {
        self.snapshot = None;
        self.settings.clear();
    }
}
