//! Error types for the packaged-application runtime.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading baked settings or locating resources.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// No build-settings artifact at the given or discovered location.
    #[error("build settings artifact {0} does not exist")]
    ArtifactMissing(PathBuf),

    /// The artifact exists but does not parse as a build-settings
    /// document.
    #[error("malformed build settings artifact {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The settings payload no longer matches the recorded digest.
    #[error("build settings digest mismatch: recorded {expected}, computed {computed}")]
    DigestMismatch { expected: String, computed: String },

    /// The settings mapping could not be canonicalized for hashing.
    #[error("failed to canonicalize settings for hashing: {0}")]
    Canonicalize(String),

    /// No candidate directory contained the requested resource.
    #[error("resource {0} not found in any resource directory")]
    ResourceMissing(PathBuf),

    /// Any other I/O failure.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
