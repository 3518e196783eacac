//! Project configuration state
//!
//! A [`ProjectState`] owns everything the resolution pipeline needs:
//! the project directory, the optional defaults root, the mounted
//! profiles, and the settings they currently resolve to. It is a plain
//! value passed around explicitly; there is no process-wide store, and
//! no interior synchronization. Callers sharing one across threads
//! wrap it in their own lock.

use serde_json::{Map, Value};
use std::path::{Component, Path, PathBuf};

use crate::error::SettingsError;
use crate::loader::load_settings;
use crate::locate::{locate_settings_files, SettingsSource};
use crate::platform::PlatformInfo;
use crate::public;
use crate::registry::ProfileRegistry;
use crate::resolve::expand_str;

/// Key the loader seed binds to the project directory.
pub const PROJECT_DIR_KEY: &str = "project_dir";

/// Resolved project configuration: the mounted profiles plus the
/// settings mapping they produce.
///
/// The state starts uninitialized; every operation that needs the
/// project directory fails with [`SettingsError::ProjectDirUnset`]
/// until [`ProjectState::init`] has run. Failed operations leave the
/// state exactly as it was.
#[derive(Debug, Clone, Default)]
pub struct ProjectState {
    settings: Map<String, Value>,
    profiles: ProfileRegistry,
    project_dir: Option<PathBuf>,
    default_root: Option<PathBuf>,
    sources: Vec<SettingsSource>,
}

/// Deep copy of a [`ProjectState`] at a point in time.
#[derive(Debug, Clone)]
pub struct StateSnapshot(ProjectState);

impl ProjectState {
    /// An uninitialized state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize for a project directory and mount the platform's
    /// core profiles.
    ///
    /// The seed mapping binds `project_dir` to the (absolutized)
    /// project directory before any file is merged, so settings can
    /// reference `${project_dir}` from the very first layer. On error
    /// the state stays as it was, uninitialized included.
    pub fn init(
        &mut self,
        project_dir: impl Into<PathBuf>,
        default_root: Option<PathBuf>,
        platform: &PlatformInfo,
    ) -> Result<(), SettingsError> {
        let project_dir = absolute(project_dir.into())?;
        let mut state = ProjectState {
            settings: seed_settings(&project_dir),
            profiles: ProfileRegistry::new(),
            project_dir: Some(project_dir),
            default_root,
            sources: Vec::new(),
        };
        for profile in platform.core_profiles() {
            state.enable_profile(&profile)?;
        }
        *self = state;
        Ok(())
    }

    /// Mount `profile` and re-resolve the whole settings stack.
    ///
    /// Returns whether the profile was newly mounted. The stack is
    /// re-located and re-loaded from the seed either way; there is no
    /// incremental merge state to get out of sync. On error nothing is
    /// committed, not even the mount.
    pub fn enable_profile(&mut self, profile: &str) -> Result<bool, SettingsError> {
        let project_dir = match &self.project_dir {
            Some(dir) => dir.clone(),
            None => return Err(SettingsError::ProjectDirUnset),
        };

        let mut profiles = self.profiles.clone();
        let newly_mounted = profiles.mount(profile);

        let sources = locate_settings_files(
            self.default_root.as_deref(),
            &project_dir,
            profiles.names(),
        );
        let paths: Vec<PathBuf> = sources.iter().map(|source| source.path.clone()).collect();
        let settings = load_settings(&paths, &seed_settings(&project_dir))?;

        self.profiles = profiles;
        self.settings = settings;
        self.sources = sources;
        Ok(newly_mounted)
    }

    /// The resolved settings mapping.
    pub fn settings(&self) -> &Map<String, Value> {
        &self.settings
    }

    /// A single resolved setting, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    /// The allow-listed projection of the resolved settings.
    pub fn public_settings(&self) -> Map<String, Value> {
        public::public_settings(&self.settings)
    }

    /// The mounted profiles, in mount order.
    pub fn profiles(&self) -> &ProfileRegistry {
        &self.profiles
    }

    /// The settings files behind the current resolution, in merge order.
    pub fn sources(&self) -> &[SettingsSource] {
        &self.sources
    }

    /// The project directory, once initialized.
    pub fn project_dir(&self) -> Result<&Path, SettingsError> {
        match &self.project_dir {
            Some(dir) => Ok(dir),
            None => Err(SettingsError::ProjectDirUnset),
        }
    }

    /// The defaults root, when one is configured.
    pub fn default_root(&self) -> Option<&Path> {
        self.default_root.as_deref()
    }

    pub fn is_initialized(&self) -> bool {
        self.project_dir.is_some()
    }

    /// Expand placeholders in `template` and resolve it against the
    /// project directory.
    ///
    /// Relative results join onto the project directory; absolute ones
    /// stand alone. The result is lexically normalized (`.` dropped,
    /// `..` popping its parent) without consulting the filesystem.
    pub fn resolve_path(&self, template: &str) -> Result<PathBuf, SettingsError> {
        let project_dir = self.project_dir()?;
        let expanded = expand_str(template, &self.settings);
        Ok(normalize(&project_dir.join(expanded)))
    }

    /// Deep copy of the current state, for later [`restore`].
    ///
    /// [`restore`]: ProjectState::restore
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot(self.clone())
    }

    /// Replace this state with a previously taken snapshot.
    pub fn restore(&mut self, snapshot: StateSnapshot) {
        *self = snapshot.0;
    }
}

/// The seed mapping a resolution pass starts from.
pub fn seed_settings(project_dir: &Path) -> Map<String, Value> {
    let mut seed = Map::new();
    seed.insert(
        PROJECT_DIR_KEY.to_string(),
        Value::String(project_dir.display().to_string()),
    );
    seed
}

fn absolute(path: PathBuf) -> Result<PathBuf, SettingsError> {
    if path.is_absolute() {
        return Ok(path);
    }
    match std::env::current_dir() {
        Ok(cwd) => Ok(cwd.join(path)),
        Err(source) => Err(SettingsError::Io { path, source }),
    }
}

/// Lexical path normalization, no filesystem access.
fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // ".." at the root stays at the root.
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(Component::ParentDir),
            },
            other => parts.push(other),
        }
    }

    let mut normalized = PathBuf::new();
    for part in &parts {
        normalized.push(part.as_os_str());
    }
    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}
