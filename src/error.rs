//! Error types for version selection.
//!
//! Only the fatal outcomes of `use` are errors. Recoverable conditions (a
//! failed mach index switch, a missing `bin` link on first activation) are
//! reported through [`crate::resolver::Resolution`] and the log instead.

use std::path::PathBuf;
use thiserror::Error;

/// Answer from a [`crate::lookup::VersionLookup`] when a version is not plainly installed.
#[derive(Debug, Error)]
pub enum LookupError {
    /// No directory exists for the version.
    #[error("version {0} is not installed")]
    NotInstalled(String),

    /// The version is installed under an alias name rather than a concrete release.
    #[error("version {0} is an alias, not a concrete release")]
    UnsupportedAlias(String),

    /// Any other lookup failure; treated as fatal and passed through as is.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Fatal failures of `use`.
#[derive(Debug, Error)]
pub enum UseError {
    /// The token cannot name a directory under the base directory.
    #[error("invalid version {version:?}: {reason}")]
    InvalidVersion {
        /// The rejected token.
        version: String,
        /// Why the token was rejected.
        reason: &'static str,
    },

    /// The version is missing and the user refused to install it.
    #[error("version {version} is not installed")]
    UserDeclinedInstall {
        /// The version the user declined.
        version: String,
    },

    /// The install collaborator failed.
    #[error("failed to install version {version}")]
    InstallFailed {
        /// The version being installed.
        version: String,
        /// Underlying installer error.
        #[source]
        source: anyhow::Error,
    },

    /// Resetting the version map for the `default` alias failed.
    #[error("failed to reset the version map")]
    AliasResetFailed(#[source] anyhow::Error),

    /// The `bin` link could not be created.
    #[error("failed to link {link:?} to {target:?}")]
    SymlinkCreateFailed {
        /// The active link path.
        link: PathBuf,
        /// The version directory it should point at.
        target: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: anyhow::Error,
    },

    /// Opaque lookup failure, passed through unchanged.
    #[error(transparent)]
    Lookup(anyhow::Error),
}
