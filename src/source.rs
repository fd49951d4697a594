//! Configuration source access
//!
//! This module is the thin I/O seam between [`Configuration`] and the
//! outside world: opening a stream for a configuration file or a defaults
//! resource, probing for resource existence, and closing streams in a way
//! that makes close failures observable. Keeping it behind a trait lets
//! tests substitute in-memory sources and count physical reads.
//!
//! [`Configuration`]: crate::configuration::Configuration

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// A readable configuration stream with an explicit close step.
///
/// Dropping a reader discards any close error; callers that care route
/// through [`close`](ReadSource::close) instead so a failure can be reported
/// (it is logged and suppressed after a successful read, never raised).
pub trait ReadSource: Read {
    /// Close the stream, surfacing any failure.
    fn close(self: Box<Self>) -> io::Result<()> {
        Ok(())
    }
}

/// Opens configuration sources by location.
pub trait SourceOpener {
    /// Whether a source exists at the location. Used for the defaults
    /// resource, whose absence is not an error.
    fn exists(&self, location: &Path) -> bool;

    /// Open the source at the location for reading.
    fn open(&self, location: &Path) -> io::Result<Box<dyn ReadSource>>;
}

impl ReadSource for File {}

/// Filesystem-backed opener resolving relative locations against a base
/// directory, the way the original resolved defaults resources against a
/// host class.
#[derive(Debug, Clone)]
pub struct FsOpener {
    base: PathBuf,
}

impl FsOpener {
    /// Create an opener resolving relative locations against `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn resolve(&self, location: &Path) -> PathBuf {
        if location.is_absolute() {
            location.to_path_buf()
        } else {
            self.base.join(location)
        }
    }
}

impl Default for FsOpener {
    fn default() -> Self {
        Self::new(".")
    }
}

impl SourceOpener for FsOpener {
    fn exists(&self, location: &Path) -> bool {
        self.resolve(location).is_file()
    }

    fn open(&self, location: &Path) -> io::Result<Box<dyn ReadSource>> {
        let file = File::open(self.resolve(location))?;
        Ok(Box::new(file))
    }
}
