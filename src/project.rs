//! Project discovery and validation.
//!
//! A deskpack project is any directory holding a base settings file at
//! `src/build/settings/base.json`. Commands that operate on an existing
//! project walk up from the working directory to find that marker, check
//! the expected layout, then load settings through a [`ProjectState`].

use std::env;
use std::path::{Path, PathBuf};

use deskpack_settings::{
    read_settings_file, settings_dir, PlatformInfo, ProjectState, SettingsError,
};
use thiserror::Error;

/// Environment variable overriding the default-settings root.
pub const DEFAULTS_ENV_VAR: &str = "DESKPACK_DEFAULTS";

/// Errors raised while locating or validating a project.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error(
        "no deskpack project found at or above {0} (run `deskpack new` or change into a project)"
    )]
    NotFound(PathBuf),

    #[error("project {0} has no src/ directory")]
    MissingSource(PathBuf),

    #[error("project {0} has no base settings file (expected src/build/settings/base.json)")]
    MissingSettings(PathBuf),

    #[error("base settings file {path} is invalid: {source}")]
    InvalidBase {
        path: PathBuf,
        #[source]
        source: SettingsError,
    },

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Walk up from `start` until a directory with a base settings file is
/// found.
pub fn discover_project_root(start: &Path) -> Result<PathBuf, ProjectError> {
    for dir in start.ancestors() {
        if settings_dir(dir).join("base.json").is_file() {
            return Ok(dir.to_path_buf());
        }
    }
    Err(ProjectError::NotFound(start.to_path_buf()))
}

/// Check that `root` has the layout settings loading expects: a `src/`
/// tree and a base settings file that parses as a JSON object.
pub fn validate_structure(root: &Path) -> Result<(), ProjectError> {
    if !root.join("src").is_dir() {
        return Err(ProjectError::MissingSource(root.to_path_buf()));
    }
    let base = settings_dir(root).join("base.json");
    if !base.is_file() {
        return Err(ProjectError::MissingSettings(root.to_path_buf()));
    }
    if let Err(source) = read_settings_file(&base) {
        return Err(ProjectError::InvalidBase { path: base, source });
    }
    Ok(())
}

/// Root of the built-in default settings, if one is configured.
///
/// `DESKPACK_DEFAULTS` wins when set and is taken at its word; otherwise
/// a `defaults` directory beside the executable is used when present.
/// The settings locator skips candidates that do not exist, so a missing
/// root is harmless.
pub fn default_settings_root() -> Option<PathBuf> {
    if let Some(dir) = env::var_os(DEFAULTS_ENV_VAR) {
        return Some(PathBuf::from(dir));
    }
    let exe = env::current_exe().ok()?;
    let dir = exe.parent()?.join("defaults");
    if dir.is_dir() {
        Some(dir)
    } else {
        None
    }
}

/// Open the project at `dir`, or the one enclosing the working
/// directory, and load settings for the platform's core profiles plus
/// `extra_profiles` in the given order.
pub fn open_project(
    dir: Option<&Path>,
    extra_profiles: &[String],
) -> Result<ProjectState, ProjectError> {
    let root = match dir {
        Some(dir) => dir.to_path_buf(),
        None => {
            let cwd = env::current_dir().map_err(|source| ProjectError::Io {
                path: PathBuf::from("."),
                source,
            })?;
            discover_project_root(&cwd)?
        }
    };
    validate_structure(&root)?;

    let mut state = ProjectState::new();
    state.init(&root, default_settings_root(), &PlatformInfo::detect())?;
    for profile in extra_profiles {
        state.enable_profile(profile)?;
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn make_project(root: &Path) {
        let settings = settings_dir(root);
        fs::create_dir_all(&settings).unwrap();
        fs::write(
            settings.join("base.json"),
            r#"{"app_name": "Demo", "data_dir": "${project_dir}/data"}"#,
        )
        .unwrap();
    }

    #[test]
    fn test_discover_from_nested_directory() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("proj");
        make_project(&root);
        let nested = root.join("src/main/app");
        fs::create_dir_all(&nested).unwrap();

        let found = discover_project_root(&nested).unwrap();
        assert_eq!(found, root);
    }

    #[test]
    fn test_discover_fails_outside_project() {
        let dir = TempDir::new().unwrap();
        let err = discover_project_root(dir.path()).unwrap_err();
        assert!(matches!(err, ProjectError::NotFound(_)));
    }

    #[test]
    fn test_validate_missing_src() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("proj");
        fs::create_dir_all(&root).unwrap();

        let err = validate_structure(&root).unwrap_err();
        assert!(matches!(err, ProjectError::MissingSource(_)));
    }

    #[test]
    fn test_validate_missing_base() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();

        let err = validate_structure(dir.path()).unwrap_err();
        assert!(matches!(err, ProjectError::MissingSettings(_)));
    }

    #[test]
    fn test_validate_malformed_base() {
        let dir = TempDir::new().unwrap();
        make_project(dir.path());
        fs::write(settings_dir(dir.path()).join("base.json"), "not json").unwrap();

        let err = validate_structure(dir.path()).unwrap_err();
        assert!(matches!(err, ProjectError::InvalidBase { .. }));
    }

    #[test]
    fn test_validate_accepts_full_layout() {
        let dir = TempDir::new().unwrap();
        make_project(dir.path());

        validate_structure(dir.path()).unwrap();
    }

    #[test]
    fn test_open_project_resolves_settings() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("proj");
        make_project(&root);

        let state = open_project(Some(&root), &[]).unwrap();
        assert_eq!(state.get("app_name"), Some(&json!("Demo")));

        let data_dir = state.get("data_dir").unwrap().as_str().unwrap();
        assert!(data_dir.ends_with("/data"));
        assert!(!data_dir.contains("${"));
    }

    #[test]
    fn test_open_project_mounts_extra_profiles() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("proj");
        make_project(&root);
        fs::write(
            settings_dir(&root).join("release.json"),
            r#"{"app_name": "Demo Release"}"#,
        )
        .unwrap();

        let state = open_project(Some(&root), &["release".to_string()]).unwrap();
        assert_eq!(state.get("app_name"), Some(&json!("Demo Release")));
        assert!(state.profiles().is_mounted("release"));
    }

    #[test]
    fn test_defaults_root_env_override() {
        let dir = TempDir::new().unwrap();
        env::set_var(DEFAULTS_ENV_VAR, dir.path());
        let root = default_settings_root();
        env::remove_var(DEFAULTS_ENV_VAR);

        assert_eq!(root, Some(dir.path().to_path_buf()));
    }
}
