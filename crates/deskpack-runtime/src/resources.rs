//! Locating bundled resource files
//!
//! Resources are looked up across an ordered list of directories; the
//! first directory containing the requested relative path wins. In a
//! development checkout the list is the project's icon directory
//! followed by each mounted profile's resource directory, most recent
//! mount first, so a `linux` resource shadows the `base` one. Packaged
//! applications search relative to the executable.

use std::path::{Path, PathBuf};

use crate::build_settings::executable_dir;
use crate::error::RuntimeError;

/// Ordered resource search list.
#[derive(Debug, Clone)]
pub struct ResourceLocator {
    directories: Vec<PathBuf>,
}

impl ResourceLocator {
    /// A locator over an explicit directory list.
    pub fn new(directories: Vec<PathBuf>) -> Self {
        Self { directories }
    }

    /// Search list for a development checkout: `src/main/icons`, then
    /// `src/main/resources/<profile>` for each mounted profile in
    /// reverse mount order.
    pub fn dev(project_root: &Path, profiles: &[String]) -> Self {
        let main = project_root.join("src").join("main");
        let mut directories = vec![main.join("icons")];
        for profile in profiles.iter().rev() {
            directories.push(main.join("resources").join(profile));
        }
        Self { directories }
    }

    /// Search list for a packaged application: the executable's
    /// directory, preceded in macOS bundles by `../Resources`.
    ///
    /// Returns `None` when the executable location cannot be
    /// determined.
    pub fn packaged() -> Option<Self> {
        let exe_dir = executable_dir()?;
        let mut directories = Vec::new();
        if cfg!(target_os = "macos") {
            if let Some(contents) = exe_dir.parent() {
                directories.push(contents.join("Resources"));
            }
        }
        directories.push(exe_dir);
        Some(Self { directories })
    }

    /// The search list, in lookup order.
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Find `relative` in the first directory that contains it.
    pub fn find(&self, relative: impl AsRef<Path>) -> Result<PathBuf, RuntimeError> {
        let relative = relative.as_ref();
        for directory in &self.directories {
            let candidate = directory.join(relative);
            if candidate.exists() {
                return Ok(candidate);
            }
        }
        Err(RuntimeError::ResourceMissing(relative.to_path_buf()))
    }
}
