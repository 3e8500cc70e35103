//! Resolution of a requested version token to an active version.
//!
//! The resolver asks the [`VersionLookup`] whether the token is installed and
//! then branches:
//!
//! - installed, or installed under an alias name: link it
//! - `default`: reset the version map, then link
//! - `mach`: point the version map at the mach index, then link; a failure to
//!   switch is recovered from and reported as a hint
//! - anything else: ask the user, install, then link

use log::{debug, info, warn};
use std::path::{Component, Path, PathBuf};

use crate::error::{LookupError, UseError};
use crate::install::Install;
use crate::link::{ACTIVE_LINK, Activation, SymlinkManager};
use crate::lookup::VersionLookup;
use crate::runtime::Runtime;
use crate::settings::{MACH_VERSION_MAP_URL, VersionMap};

/// Alias that restores the built-in version map.
pub const DEFAULT_ALIAS: &str = "default";

/// Alias that switches to the mach version map.
pub const MACH_ALIAS: &str = "mach";

/// Shown when switching to the mach version map fails.
pub const RESET_HINT: &str = "Run `zvm vmu default` to reset your version map.";

/// How a token was resolved before the link was updated.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The version was already installed.
    Installed,
    /// The lookup reported an install under an alias name; linked as is.
    Alias,
    /// The `default` alias reset the version map.
    VersionMapReset,
    /// The `mach` alias switched the version map.
    VersionMapSwitched,
    /// The `mach` alias could not switch the version map, but `use` went on.
    Recovered { hint: String, cause: String },
    /// The version was installed after the user agreed.
    FreshInstall,
}

/// Successful result of [`VersionResolver::use_version`].
#[derive(Debug, Clone, PartialEq)]
pub struct UseOutcome {
    pub version: String,
    pub resolution: Resolution,
    pub activation: Activation,
}

impl UseOutcome {
    /// User-facing recovery hint, if resolution had to recover from a failure.
    pub fn hint(&self) -> Option<&str> {
        match &self.resolution {
            Resolution::Recovered { hint, .. } => Some(hint),
            _ => None,
        }
    }
}

pub struct VersionResolver<'a, R: Runtime, L: VersionLookup, M: VersionMap, I: Install> {
    runtime: &'a R,
    lookup: &'a L,
    version_map: &'a M,
    installer: &'a I,
    links: SymlinkManager<'a, R>,
}

impl<'a, R, L, M, I> VersionResolver<'a, R, L, M, I>
where
    R: Runtime,
    L: VersionLookup,
    M: VersionMap,
    I: Install,
{
    pub fn new(
        runtime: &'a R,
        base_dir: PathBuf,
        lookup: &'a L,
        version_map: &'a M,
        installer: &'a I,
    ) -> Self {
        Self {
            runtime,
            lookup,
            version_map,
            installer,
            links: SymlinkManager::new(runtime, base_dir),
        }
    }

    /// Make `version` the active version, installing it first if the user agrees.
    #[tracing::instrument(skip(self))]
    pub fn use_version(&self, version: &str) -> Result<UseOutcome, UseError> {
        validate_version(version)?;

        let resolution = match self.lookup.get_version(version) {
            Ok(()) => Resolution::Installed,
            Err(LookupError::UnsupportedAlias(_)) => {
                debug!("{} is a version map alias", version);
                Resolution::Alias
            }
            Err(LookupError::NotInstalled(_)) => self.resolve_missing(version)?,
            Err(LookupError::Other(e)) => return Err(UseError::Lookup(e)),
        };

        let activation = self.links.activate(version)?;
        info!("Now using {}", version);

        Ok(UseOutcome {
            version: version.to_string(),
            resolution,
            activation,
        })
    }

    fn resolve_missing(&self, version: &str) -> Result<Resolution, UseError> {
        match version {
            DEFAULT_ALIAS => {
                self.version_map
                    .reset_version_map()
                    .map_err(UseError::AliasResetFailed)?;
                Ok(Resolution::VersionMapReset)
            }
            MACH_ALIAS => match self.version_map.set_version_map_url(MACH_VERSION_MAP_URL) {
                Ok(()) => Ok(Resolution::VersionMapSwitched),
                Err(e) => {
                    warn!("Could not switch to the mach version map: {:#}", e);
                    Ok(Resolution::Recovered {
                        hint: RESET_HINT.to_string(),
                        cause: format!("{:#}", e),
                    })
                }
            },
            _ => {
                let prompt = format!(
                    "It looks like {} isn't installed. Would you like to install it?",
                    version
                );
                if !self.runtime.confirm(&prompt) {
                    return Err(UseError::UserDeclinedInstall {
                        version: version.to_string(),
                    });
                }

                self.installer
                    .install(version)
                    .map_err(|source| UseError::InstallFailed {
                        version: version.to_string(),
                        source,
                    })?;
                Ok(Resolution::FreshInstall)
            }
        }
    }
}

/// A token must name exactly one directory directly under the base directory,
/// and must not collide with the active link.
fn validate_version(version: &str) -> Result<(), UseError> {
    let invalid = |reason| UseError::InvalidVersion {
        version: version.to_string(),
        reason,
    };

    if version.is_empty() {
        return Err(invalid("version must not be empty"));
    }
    if version == ACTIVE_LINK {
        return Err(invalid("name is reserved for the active link"));
    }

    let mut components = Path::new(version).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == version => Ok(()),
        _ => Err(invalid("version must be a single directory name")),
    }
}
