//! Settings baking for packaged applications.
//!
//! Baking projects the resolved settings through the `public_settings`
//! allow-list, stamps and digests them as a [`BuildSettings`] document,
//! and writes `build_settings.json` where the packaging step picks it
//! up. A project that declares no allow-list ships its full settings.

use std::fs;
use std::path::{Path, PathBuf};

use deskpack_runtime::{BuildSettings, RuntimeError, ARTIFACT_FILE_NAME};
use deskpack_settings::{ProjectState, SettingsError};

/// Errors for baking operations.
#[derive(Debug, thiserror::Error)]
pub enum BakeError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of a bake.
pub struct BakedSettings {
    /// Where the artifact landed.
    pub path: PathBuf,
    /// The artifact document as written.
    pub artifact: BuildSettings,
    /// Whether the public projection applied. False means the project
    /// declares no `public_settings` and the full settings shipped.
    pub projected: bool,
}

/// Bake the state's settings into `out_dir/build_settings.json`.
pub fn bake_settings(state: &ProjectState, out_dir: &Path) -> Result<BakedSettings, BakeError> {
    let projection = state.public_settings();
    let projected = !projection.is_empty();
    let settings = if projected {
        projection
    } else {
        state.settings().clone()
    };

    let artifact = BuildSettings::new(settings)?;
    fs::create_dir_all(out_dir).map_err(|source| BakeError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;
    let path = out_dir.join(ARTIFACT_FILE_NAME);
    artifact.write_to_file(&path).map_err(|source| BakeError::Io {
        path: path.clone(),
        source,
    })?;

    Ok(BakedSettings {
        path,
        artifact,
        projected,
    })
}
