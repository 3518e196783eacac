//! Baked build-settings artifact
//!
//! The packaging step writes the settings a packaged application is
//! allowed to see into a `build_settings.json` artifact inside the
//! bundle. The runtime loads it back and verifies that the settings
//! payload still matches the digest recorded at bake time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::env;
use std::fs;
use std::io;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::RuntimeError;

/// Schema version for build_settings
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "deskpack/build_settings@1";

/// Artifact file name inside a bundle.
pub const ARTIFACT_FILE_NAME: &str = "build_settings.json";

/// Environment variable overriding artifact discovery.
pub const ARTIFACT_ENV_VAR: &str = "DESKPACK_BUILD_SETTINGS";

/// Settings baked into a packaged application (build_settings.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSettings {
    /// Schema version
    pub schema_version: u32,

    /// Schema identifier
    pub schema_id: String,

    /// When the artifact was baked
    pub created_at: DateTime<Utc>,

    /// The settings mapping shipped to the application
    pub settings: Map<String, Value>,

    /// SHA-256 hex digest of the canonical (RFC 8785) settings bytes
    pub settings_sha256: String,
}

impl BuildSettings {
    /// Bake a settings mapping into an artifact document.
    pub fn new(settings: Map<String, Value>) -> Result<Self, RuntimeError> {
        let settings_sha256 = compute_digest(&settings)?;
        Ok(Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            settings,
            settings_sha256,
        })
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write to file
    pub fn write_to_file(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("JSON error: {}", e))
        })?;
        fs::write(path, json)
    }

    /// Load an artifact from `path` and verify its digest.
    pub fn load(path: &Path) -> Result<Self, RuntimeError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                return Err(RuntimeError::ArtifactMissing(path.to_path_buf()));
            }
            Err(source) => {
                return Err(RuntimeError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let artifact: Self =
            serde_json::from_str(&text).map_err(|source| RuntimeError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
        artifact.verify()?;
        Ok(artifact)
    }

    /// Load the artifact of the running executable, via [`discover_path`].
    pub fn discover() -> Result<Self, RuntimeError> {
        match discover_path() {
            Some(path) => Self::load(&path),
            None => Err(RuntimeError::ArtifactMissing(PathBuf::from(
                ARTIFACT_FILE_NAME,
            ))),
        }
    }

    /// Check the recorded digest against the settings payload.
    pub fn verify(&self) -> Result<(), RuntimeError> {
        let computed = compute_digest(&self.settings)?;
        if computed != self.settings_sha256 {
            return Err(RuntimeError::DigestMismatch {
                expected: self.settings_sha256.clone(),
                computed,
            });
        }
        Ok(())
    }

    /// Get a settings value by path (dot-separated)
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current: Option<&Value> = None;
        for part in path.split('.') {
            current = match current {
                None => self.settings.get(part),
                Some(value) => value.get(part),
            };
            current?;
        }
        current
    }

    /// Get a settings value as string
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|v| v.as_str())
    }

    /// Get a settings value as u64
    pub fn get_u64(&self, path: &str) -> Option<u64> {
        self.get(path).and_then(|v| v.as_u64())
    }

    /// Get a settings value as bool
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(|v| v.as_bool())
    }
}

/// SHA-256 hex digest of the canonical (RFC 8785) JSON bytes of a
/// settings mapping.
///
/// Canonicalization makes the digest independent of key order, so a
/// re-serialized artifact verifies as long as the values are intact.
pub fn compute_digest(settings: &Map<String, Value>) -> Result<String, RuntimeError> {
    let canonical = serde_json_canonicalizer::to_vec(settings)
        .map_err(|e| RuntimeError::Canonicalize(e.to_string()))?;
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    Ok(hex::encode(hasher.finalize()))
}

/// Locate the artifact for the running executable.
///
/// Order: the `DESKPACK_BUILD_SETTINGS` environment variable, then
/// `build_settings.json` beside the executable, then (in macOS
/// bundles) `../Resources/build_settings.json` relative to the
/// executable. An explicit override is taken at its word even if the
/// file is missing, so failures name the configured path.
pub fn discover_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(ARTIFACT_ENV_VAR) {
        return Some(PathBuf::from(path));
    }

    let exe_dir = executable_dir()?;
    let adjacent = exe_dir.join(ARTIFACT_FILE_NAME);
    if adjacent.is_file() {
        return Some(adjacent);
    }
    if cfg!(target_os = "macos") {
        if let Some(contents) = exe_dir.parent() {
            let resources = contents.join("Resources").join(ARTIFACT_FILE_NAME);
            if resources.is_file() {
                return Some(resources);
            }
        }
    }
    None
}

/// Whether the current process looks like a packaged application.
pub fn is_packaged() -> bool {
    discover_path().is_some()
}

pub(crate) fn executable_dir() -> Option<PathBuf> {
    let exe = env::current_exe().ok()?;
    exe.parent().map(Path::to_path_buf)
}
