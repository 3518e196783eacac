//! Loading and resolving layered settings
//!
//! The loader folds a sequence of settings files, in locate order, onto
//! a seed mapping, then expands placeholders against the merged result
//! itself. It is a pure read: no caching, no global state, and a second
//! run over an unchanged filesystem produces an identical mapping,
//! key order included.

use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::SettingsError;
use crate::merge::{merge_maps, value_shape};
use crate::resolve::expand_placeholders;

/// Read a single settings file as a JSON mapping.
///
/// A file that was located but is gone by read time fails with
/// [`SettingsError::FileVanished`]; the loader never retries. A root
/// value other than a mapping cannot be folded onto the accumulator and
/// fails as a shape mismatch.
pub fn read_settings_file(path: &Path) -> Result<Map<String, Value>, SettingsError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(source) if source.kind() == ErrorKind::NotFound => {
            return Err(SettingsError::FileVanished(path.to_path_buf()));
        }
        Err(source) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let value: Value = serde_json::from_str(&text).map_err(|source| SettingsError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(SettingsError::TypeMismatch {
            base: "mapping",
            overriding: value_shape(&other),
        }),
    }
}

/// Load `paths` in order, folding each file onto `seed`, then resolve
/// placeholders with the merged mapping as its own context.
///
/// The fold is strictly sequential: each file merges onto the
/// accumulated result of everything before it, so later files override
/// earlier ones. Any read, parse, or merge failure aborts the whole
/// load with no partial result.
pub fn load_settings(
    paths: &[PathBuf],
    seed: &Map<String, Value>,
) -> Result<Map<String, Value>, SettingsError> {
    let mut merged = seed.clone();
    for path in paths {
        let layer = read_settings_file(path)?;
        merged = merge_maps(&merged, &layer)?;
    }

    // Self-referential resolution: values may reference any key of the
    // final merged mapping, including keys from other files or the seed.
    let mut resolved = Map::with_capacity(merged.len());
    for (key, value) in &merged {
        resolved.insert(key.clone(), expand_placeholders(value, &merged));
    }
    Ok(resolved)
}
