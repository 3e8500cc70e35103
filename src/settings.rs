//! Persistent settings and the version map (remote version index) source.

use anyhow::{Context, Result, bail};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::runtime::Runtime;

/// Built-in version index.
pub const DEFAULT_VERSION_MAP_URL: &str = "https://ziglang.org/download/index.json";

/// Version index published by the mach engine project.
pub const MACH_VERSION_MAP_URL: &str = "https://machengine.org/zig/index.json";

const SETTINGS_FILE: &str = "settings.json";

/// Configuration mutators for the version index source.
#[cfg_attr(test, mockall::automock)]
pub trait VersionMap {
    /// Restore the built-in index URL.
    fn reset_version_map(&self) -> Result<()>;

    /// Point the index at `url`.
    fn set_version_map_url(&self, url: &str) -> Result<()>;
}

/// Settings stored in `<base_dir>/settings.json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_version_map_url")]
    pub version_map_url: String,
}

fn default_version_map_url() -> String {
    DEFAULT_VERSION_MAP_URL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version_map_url: default_version_map_url(),
        }
    }
}

/// Reads and writes [`Settings`] through the runtime.
pub struct SettingsStore<'a, R: Runtime> {
    runtime: &'a R,
    base_dir: PathBuf,
}

impl<'a, R: Runtime> SettingsStore<'a, R> {
    pub fn new(runtime: &'a R, base_dir: PathBuf) -> Self {
        Self { runtime, base_dir }
    }

    pub fn path(&self) -> PathBuf {
        self.base_dir.join(SETTINGS_FILE)
    }

    /// Load settings, falling back to defaults when the file does not exist yet.
    #[tracing::instrument(skip(self))]
    pub fn load(&self) -> Result<Settings> {
        let path = self.path();
        if !self.runtime.exists(&path) {
            debug!("No settings at {:?}, using defaults", path);
            return Ok(Settings::default());
        }

        let content = self.runtime.read_to_string(&path)?;
        let settings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings {:?}", path))?;
        Ok(settings)
    }

    #[tracing::instrument(skip(self, settings))]
    pub fn save(&self, settings: &Settings) -> Result<()> {
        self.runtime.create_dir_all(&self.base_dir)?;
        let json = serde_json::to_string_pretty(settings)?;
        self.runtime.write(&self.path(), json.as_bytes())?;
        Ok(())
    }

    fn update_url(&self, url: &str) -> Result<()> {
        let mut settings = self.load()?;
        settings.version_map_url = url.to_string();
        self.save(&settings)?;
        info!("Version map set to {}", url);
        Ok(())
    }
}

impl<R: Runtime> VersionMap for SettingsStore<'_, R> {
    fn reset_version_map(&self) -> Result<()> {
        self.update_url(DEFAULT_VERSION_MAP_URL)
    }

    fn set_version_map_url(&self, url: &str) -> Result<()> {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            bail!("Version map URL must use http or https: {}", url);
        }
        self.update_url(url)
    }
}
