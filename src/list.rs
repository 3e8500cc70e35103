//! Listing of installed versions.

use anyhow::Result;
use log::debug;
use std::path::Path;

use crate::link::{ACTIVE_LINK, SymlinkManager};
use crate::runtime::Runtime;

#[derive(Debug, Clone, PartialEq)]
pub struct InstalledVersion {
    pub name: String,
    pub active: bool,
}

/// Version directories under `base_dir`, sorted by name, with the one `bin` points at marked active.
#[tracing::instrument(skip(runtime))]
pub fn list_versions<R: Runtime>(runtime: &R, base_dir: &Path) -> Result<Vec<InstalledVersion>> {
    if !runtime.exists(base_dir) {
        debug!("{:?} does not exist, nothing installed", base_dir);
        return Ok(Vec::new());
    }

    let active = SymlinkManager::new(runtime, base_dir.to_path_buf()).active_version();

    let mut versions: Vec<InstalledVersion> = runtime
        .read_dir(base_dir)?
        .into_iter()
        .filter(|path| !runtime.is_symlink(path) && runtime.is_dir(path))
        .filter_map(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .filter(|name| name != ACTIVE_LINK)
        .map(|name| InstalledVersion {
            active: active.as_deref() == Some(name.as_str()),
            name,
        })
        .collect();

    versions.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(versions)
}
