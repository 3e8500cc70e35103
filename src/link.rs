//! Management of the `bin` link that selects the active version.

use log::{debug, warn};
use std::path::PathBuf;

use crate::error::UseError;
use crate::runtime::Runtime;

/// Name of the active link inside the base directory.
pub const ACTIVE_LINK: &str = "bin";

/// Result of a successful activation.
#[derive(Debug, Clone, PartialEq)]
pub struct Activation {
    /// Path of the active link.
    pub link: PathBuf,
    /// Directory the link now points at.
    pub target: PathBuf,
    /// Why the previous link could not be removed, if it could not.
    pub removal_warning: Option<String>,
}

/// Keeps `<base_dir>/bin` pointing at exactly one version directory.
pub struct SymlinkManager<'a, R: Runtime> {
    runtime: &'a R,
    base_dir: PathBuf,
}

impl<'a, R: Runtime> SymlinkManager<'a, R> {
    pub fn new(runtime: &'a R, base_dir: PathBuf) -> Self {
        Self { runtime, base_dir }
    }

    pub fn link_path(&self) -> PathBuf {
        self.base_dir.join(ACTIVE_LINK)
    }

    /// Repoint the active link at `<base_dir>/<version>`.
    ///
    /// The old link is removed first. Failing to remove it is only a warning
    /// (there is nothing to remove on first use). Failing to create the new
    /// link is fatal and leaves no active version.
    #[tracing::instrument(skip(self))]
    pub fn activate(&self, version: &str) -> Result<Activation, UseError> {
        let link = self.link_path();
        let target = self.base_dir.join(version);

        let removal_warning = match self.runtime.remove_symlink(&link) {
            Ok(()) => {
                debug!("Removed previous link {:?}", link);
                None
            }
            Err(e) => {
                warn!("Could not remove {:?}: {:#}", link, e);
                Some(format!("{:#}", e))
            }
        };

        self.runtime
            .symlink(&target, &link)
            .map_err(|source| UseError::SymlinkCreateFailed {
                link: link.clone(),
                target: target.clone(),
                source,
            })?;

        debug!("Linked {:?} -> {:?}", link, target);
        Ok(Activation {
            link,
            target,
            removal_warning,
        })
    }

    /// Version the active link currently points at, if it points inside the base directory.
    #[tracing::instrument(skip(self))]
    pub fn active_version(&self) -> Option<String> {
        let link = self.link_path();
        if !self.runtime.is_symlink(&link) {
            return None;
        }

        let target = self.runtime.read_link(&link).ok()?;
        let target = if target.is_relative() {
            self.base_dir.join(target)
        } else {
            target
        };

        if target.parent() != Some(self.base_dir.as_path()) {
            debug!("{:?} points outside {:?}", link, self.base_dir);
            return None;
        }
        target.file_name().map(|n| n.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{MockRuntime, RealRuntime};
    use mockall::predicate::eq;
    use tempfile::tempdir;

    fn base() -> PathBuf {
        PathBuf::from("/home/user/.zvm")
    }

    #[test]
    fn test_activate_replaces_existing_link() {
        let mut runtime = MockRuntime::new();
        let link = base().join("bin");

        // --- 1. Remove old link ---
        runtime
            .expect_remove_symlink()
            .with(eq(link.clone()))
            .times(1)
            .returning(|_| Ok(()));

        // --- 2. Create new link, exactly once ---
        runtime
            .expect_symlink()
            .with(eq(base().join("0.11.0")), eq(link.clone()))
            .times(1)
            .returning(|_, _| Ok(()));

        let manager = SymlinkManager::new(&runtime, base());
        let activation = manager.activate("0.11.0").unwrap();
        assert_eq!(activation.link, link);
        assert_eq!(activation.target, base().join("0.11.0"));
        assert_eq!(activation.removal_warning, None);
    }

    #[test]
    fn test_activate_continues_when_removal_fails() {
        let mut runtime = MockRuntime::new();

        runtime
            .expect_remove_symlink()
            .returning(|_| Err(anyhow::anyhow!("No such file or directory")));
        runtime
            .expect_symlink()
            .times(1)
            .returning(|_, _| Ok(()));

        let manager = SymlinkManager::new(&runtime, base());
        let activation = manager.activate("0.11.0").unwrap();
        assert!(
            activation
                .removal_warning
                .unwrap()
                .contains("No such file or directory")
        );
    }

    #[test]
    fn test_activate_fails_when_creation_fails() {
        let mut runtime = MockRuntime::new();

        runtime.expect_remove_symlink().returning(|_| Ok(()));
        runtime
            .expect_symlink()
            .returning(|_, _| Err(anyhow::anyhow!("Permission denied")));

        let manager = SymlinkManager::new(&runtime, base());
        let err = manager.activate("0.11.0").unwrap_err();
        match err {
            UseError::SymlinkCreateFailed { link, target, .. } => {
                assert_eq!(link, base().join("bin"));
                assert_eq!(target, base().join("0.11.0"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_first_activation_on_disk() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("0.11.0")).unwrap();

        let manager = SymlinkManager::new(&runtime, dir.path().to_path_buf());
        let activation = manager.activate("0.11.0").unwrap();

        assert!(activation.removal_warning.is_some());
        assert_eq!(
            std::fs::read_link(dir.path().join("bin")).unwrap(),
            dir.path().join("0.11.0")
        );
        assert_eq!(manager.active_version().as_deref(), Some("0.11.0"));
    }

    #[test]
    fn test_switching_versions_on_disk() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("0.11.0")).unwrap();
        std::fs::create_dir(dir.path().join("0.12.0")).unwrap();

        let manager = SymlinkManager::new(&runtime, dir.path().to_path_buf());
        manager.activate("0.11.0").unwrap();
        let activation = manager.activate("0.12.0").unwrap();

        assert_eq!(activation.removal_warning, None);
        assert_eq!(manager.active_version().as_deref(), Some("0.12.0"));
    }

    #[test]
    fn test_active_version_without_link() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_is_symlink()
            .with(eq(base().join("bin")))
            .returning(|_| false);

        let manager = SymlinkManager::new(&runtime, base());
        assert_eq!(manager.active_version(), None);
    }

    #[test]
    fn test_active_version_ignores_foreign_target() {
        let mut runtime = MockRuntime::new();
        runtime.expect_is_symlink().returning(|_| true);
        runtime
            .expect_read_link()
            .returning(|_| Ok(PathBuf::from("/opt/zig/0.11.0")));

        let manager = SymlinkManager::new(&runtime, base());
        assert_eq!(manager.active_version(), None);
    }

    #[test]
    fn test_active_version_resolves_relative_target() {
        let mut runtime = MockRuntime::new();
        runtime.expect_is_symlink().returning(|_| true);
        runtime
            .expect_read_link()
            .returning(|_| Ok(PathBuf::from("0.11.0")));

        let manager = SymlinkManager::new(&runtime, base());
        assert_eq!(manager.active_version().as_deref(), Some("0.11.0"));
    }
}
