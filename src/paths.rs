use anyhow::{Context, Result};
use log::debug;
use std::path::PathBuf;

use crate::runtime::Runtime;

/// Environment variable overriding the base directory.
pub const BASE_DIR_ENV: &str = "ZVM_PATH";

/// Resolve the base directory: explicit path first, then `ZVM_PATH`, then `~/.zvm`.
#[tracing::instrument(skip(runtime))]
pub fn resolve_base_dir<R: Runtime>(runtime: &R, explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    if let Ok(path) = runtime.env_var(BASE_DIR_ENV) {
        if !path.is_empty() {
            debug!("Using {} from {}", path, BASE_DIR_ENV);
            return Ok(PathBuf::from(path));
        }
    }

    default_base_dir(runtime)
}

/// Get the default base directory
#[tracing::instrument(skip(runtime))]
pub fn default_base_dir<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    let home_dir = runtime
        .home_dir()
        .context("Could not find home directory")?;
    Ok(home_dir.join(".zvm"))
}
