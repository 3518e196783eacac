//! Error types for settings resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating, merging, and resolving project settings.
///
/// Loading is all-or-nothing: any of these aborts the whole resolution
/// pass and leaves the caller's previous state untouched. Placeholder
/// tokens that name an unknown key are deliberately NOT represented
/// here; they stay literal in the output so that `${...}` text remains
/// expressible in settings values.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Two settings layers disagree on the shape of a value.
    #[error("cannot merge {overriding} into {base}")]
    TypeMismatch {
        /// Shape of the value in the lower-precedence layer.
        base: &'static str,
        /// Shape of the value in the higher-precedence layer.
        overriding: &'static str,
    },

    /// A settings file exists but does not parse as JSON.
    #[error("malformed settings file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A settings file present at locate time was gone at read time.
    #[error("settings file {0} vanished before it could be read")]
    FileVanished(PathBuf),

    /// Any other I/O failure while reading a settings file.
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A state or path operation was attempted before initialization.
    #[error("project directory is not set; initialize the project state first")]
    ProjectDirUnset,
}
