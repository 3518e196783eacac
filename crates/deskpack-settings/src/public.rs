//! Public-settings projection
//!
//! Resolved settings routinely contain values a packaged application
//! must not ship (signing material, upload credentials, the whole
//! `secret` profile). The projection keeps only the top-level keys the
//! settings themselves allow-list under `public_settings`.

use serde_json::{Map, Value};

/// Key whose array value lists the settings a packaged application may
/// see.
pub const PUBLIC_SETTINGS_KEY: &str = "public_settings";

/// Project `settings` down to the top-level keys named in its
/// `public_settings` allow-list.
///
/// The result keeps the settings mapping's own key order. A missing or
/// non-array `public_settings` entry projects to an empty mapping;
/// allow-list entries that are not strings, or that name keys absent
/// from the settings, have no effect. The allow-list key itself is
/// included only if it allow-lists itself.
pub fn public_settings(settings: &Map<String, Value>) -> Map<String, Value> {
    let mut projected = Map::new();
    let allowed = match settings.get(PUBLIC_SETTINGS_KEY) {
        Some(Value::Array(names)) => names,
        _ => return projected,
    };
    for (key, value) in settings {
        if allowed.iter().any(|name| name.as_str() == Some(key)) {
            projected.insert(key.clone(), value.clone());
        }
    }
    projected
}
