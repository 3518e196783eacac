//! Baking settings and loading them back the way a packaged
//! application would.

use std::fs;
use std::path::Path;

use deskpack::{bake_settings, new_project, ProjectParams};
use deskpack_runtime::{BuildSettings, RuntimeError, SCHEMA_ID, SCHEMA_VERSION};
use deskpack_settings::{settings_dir, OsFamily, PlatformInfo, ProjectState};
use tempfile::TempDir;

fn linux() -> PlatformInfo {
    PlatformInfo {
        os: OsFamily::Linux,
        linux_distribution: None,
    }
}

fn scaffolded_state(root: &Path) -> ProjectState {
    new_project(
        root,
        &ProjectParams {
            name: "Gallery".to_string(),
            author: "Pat Example".to_string(),
            version: "1.2.3".to_string(),
            bundle_identifier: None,
        },
    )
    .unwrap();
    let mut state = ProjectState::new();
    state.init(root, None, &linux()).unwrap();
    state
}

#[test]
fn test_bake_and_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("Gallery");
    let state = scaffolded_state(&root);

    let baked = bake_settings(&state, &root.join("target/deskpack")).unwrap();
    assert!(baked.projected);

    let loaded = BuildSettings::load(&baked.path).unwrap();
    assert_eq!(loaded.schema_version, SCHEMA_VERSION);
    assert_eq!(loaded.schema_id, SCHEMA_ID);
    assert_eq!(loaded.settings, baked.artifact.settings);

    // The scaffolded allow-list exposes exactly app_name and version.
    let keys: Vec<&String> = loaded.settings.keys().collect();
    assert_eq!(keys, ["app_name", "version"]);
    assert_eq!(loaded.get_str("app_name"), Some("Gallery"));
    assert_eq!(loaded.get_str("version"), Some("1.2.3"));
}

#[test]
fn test_tampered_artifact_is_rejected() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("Gallery");
    let state = scaffolded_state(&root);

    let baked = bake_settings(&state, &root.join("out")).unwrap();

    let text = fs::read_to_string(&baked.path).unwrap();
    fs::write(&baked.path, text.replace("Gallery", "Tampered")).unwrap();

    let err = BuildSettings::load(&baked.path).unwrap_err();
    assert!(matches!(err, RuntimeError::DigestMismatch { .. }));
}

#[test]
fn test_bake_without_allowlist_ships_everything() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(settings_dir(dir.path())).unwrap();
    fs::write(
        settings_dir(dir.path()).join("base.json"),
        r#"{"app_name": "Bare", "data_dir": "${project_dir}/data"}"#,
    )
    .unwrap();
    let mut state = ProjectState::new();
    state.init(dir.path(), None, &linux()).unwrap();

    let baked = bake_settings(&state, &dir.path().join("out")).unwrap();
    assert!(!baked.projected);

    let loaded = BuildSettings::load(&baked.path).unwrap();
    assert_eq!(loaded.get_str("app_name"), Some("Bare"));
    assert!(loaded.get_str("project_dir").is_some());
    // Placeholders were resolved before baking.
    let data_dir = loaded.get_str("data_dir").unwrap();
    assert!(!data_dir.contains("${"));
}
