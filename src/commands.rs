//! Command entry points used by the binary.

use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use crate::install::Install;
use crate::list::list_versions;
use crate::lookup::InstalledVersions;
use crate::paths::resolve_base_dir;
use crate::resolver::{DEFAULT_ALIAS, VersionResolver};
use crate::runtime::Runtime;
use crate::settings::{SettingsStore, VersionMap};

/// Activate `version`, installing it through `installer` if the user agrees.
#[tracing::instrument(skip(runtime, installer, root))]
pub fn use_version<R: Runtime, I: Install>(
    runtime: R,
    installer: &I,
    version: &str,
    root: Option<PathBuf>,
) -> Result<()> {
    let base_dir = resolve_base_dir(&runtime, root)?;
    debug!("Using base directory {:?}", base_dir);

    let lookup = InstalledVersions::new(&runtime, base_dir.clone());
    let settings = SettingsStore::new(&runtime, base_dir.clone());
    let resolver = VersionResolver::new(&runtime, base_dir, &lookup, &settings, installer);

    let outcome = resolver.use_version(version)?;
    if let Some(hint) = outcome.hint() {
        eprintln!("{}", hint);
    }
    println!("Now using {}", outcome.version);
    Ok(())
}

/// Set the version map URL, or restore the built-in one for `default`.
#[tracing::instrument(skip(runtime, root))]
pub fn set_version_map<R: Runtime>(runtime: R, url: &str, root: Option<PathBuf>) -> Result<()> {
    let base_dir = resolve_base_dir(&runtime, root)?;
    let settings = SettingsStore::new(&runtime, base_dir);

    if url == DEFAULT_ALIAS {
        settings.reset_version_map()?;
    } else {
        settings.set_version_map_url(url)?;
    }
    println!("Version map set to {}", settings.load()?.version_map_url);
    Ok(())
}

/// Print installed versions, marking the active one with `*`.
#[tracing::instrument(skip(runtime, root))]
pub fn list<R: Runtime>(runtime: R, root: Option<PathBuf>) -> Result<()> {
    let base_dir = resolve_base_dir(&runtime, root)?;
    let versions = list_versions(&runtime, &base_dir)?;

    if versions.is_empty() {
        println!("No versions installed.");
        return Ok(());
    }

    for version in versions {
        let marker = if version.active { "*" } else { " " };
        println!("{} {}", marker, version.name);
    }
    Ok(())
}
