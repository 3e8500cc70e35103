//! Installed-version lookup.

use anyhow::anyhow;
use log::debug;
use std::path::PathBuf;

use crate::error::LookupError;
use crate::runtime::Runtime;

/// Answers whether a version token is installed.
#[cfg_attr(test, mockall::automock)]
pub trait VersionLookup {
    fn get_version(&self, version: &str) -> Result<(), LookupError>;
}

/// Lookup backed by the version directories under the base directory.
///
/// A directory named after a concrete release (`0.11.0`, `0.12.0-dev.1+abc`)
/// is installed. A directory named after a floating alias (`master`) is
/// reported as [`LookupError::UnsupportedAlias`], since the name says nothing
/// about which release it holds.
pub struct InstalledVersions<'a, R: Runtime> {
    runtime: &'a R,
    base_dir: PathBuf,
}

impl<'a, R: Runtime> InstalledVersions<'a, R> {
    pub fn new(runtime: &'a R, base_dir: PathBuf) -> Self {
        Self { runtime, base_dir }
    }
}

impl<R: Runtime> VersionLookup for InstalledVersions<'_, R> {
    #[tracing::instrument(skip(self))]
    fn get_version(&self, version: &str) -> Result<(), LookupError> {
        let version_dir = self.base_dir.join(version);

        if !self.runtime.exists(&version_dir) {
            debug!("{:?} does not exist", version_dir);
            return Err(LookupError::NotInstalled(version.to_string()));
        }

        if !self.runtime.is_dir(&version_dir) {
            return Err(anyhow!("{:?} exists but is not a directory", version_dir).into());
        }

        if is_release(version) {
            Ok(())
        } else {
            debug!("{} is installed under an alias name", version);
            Err(LookupError::UnsupportedAlias(version.to_string()))
        }
    }
}

fn is_release(version: &str) -> bool {
    version.starts_with(|c: char| c.is_ascii_digit())
}
