//! Locating profile settings files
//!
//! A profile named `p` may contribute a settings fragment from up to
//! two roots: the tool's defaults root and the project root, each under
//! the `src/build/settings/p.json` convention. The locator probes both
//! candidates per profile and keeps the ones that exist; absent
//! candidates are skipped silently. Output order is the merge order:
//! defaults before project within a profile, profiles in caller order.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which root a located settings file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsOrigin {
    /// The tool's built-in defaults root.
    Default,
    /// The project being worked on.
    Project,
}

impl fmt::Display for SettingsOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Project => write!(f, "project"),
        }
    }
}

/// An existing settings file together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsSource {
    /// Profile that contributed the file.
    pub profile: String,
    /// Root the file was found under.
    pub origin: SettingsOrigin,
    /// Absolute or caller-relative path to the file.
    pub path: PathBuf,
}

/// Settings directory convention under a project or defaults root.
pub fn settings_dir(root: &Path) -> PathBuf {
    root.join("src").join("build").join("settings")
}

/// Enumerate the settings files that exist for `profiles`.
///
/// For each profile, in the order given, the defaults-root candidate is
/// probed first and the project-root candidate second, so that later
/// entries override earlier ones when the result is folded. Candidates
/// that do not exist are skipped without error; the same path can
/// appear twice if both roots coincide.
pub fn locate_settings_files(
    default_root: Option<&Path>,
    project_root: &Path,
    profiles: &[String],
) -> Vec<SettingsSource> {
    let mut sources = Vec::new();
    for profile in profiles {
        let file_name = format!("{profile}.json");
        if let Some(default_root) = default_root {
            let candidate = settings_dir(default_root).join(&file_name);
            if candidate.is_file() {
                sources.push(SettingsSource {
                    profile: profile.clone(),
                    origin: SettingsOrigin::Default,
                    path: candidate,
                });
            }
        }
        let candidate = settings_dir(project_root).join(&file_name);
        if candidate.is_file() {
            sources.push(SettingsSource {
                profile: profile.clone(),
                origin: SettingsOrigin::Project,
                path: candidate,
            });
        }
    }
    sources
}
