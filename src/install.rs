//! Install collaborator.

use anyhow::{Result, bail};
use std::path::PathBuf;

/// Fetches and unpacks a version into `<base_dir>/<version>`.
#[cfg_attr(test, mockall::automock)]
pub trait Install {
    fn install(&self, version: &str) -> Result<()>;
}

/// Installer for setups where releases are unpacked by hand.
///
/// Always fails, naming the directory the release is expected in.
pub struct ManualInstaller {
    base_dir: PathBuf,
}

impl ManualInstaller {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }
}

impl Install for ManualInstaller {
    fn install(&self, version: &str) -> Result<()> {
        bail!(
            "automatic installation is not available; unpack version {} into {:?}",
            version,
            self.base_dir.join(version)
        )
    }
}
