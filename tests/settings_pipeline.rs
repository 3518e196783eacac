//! End-to-end settings resolution over a real project tree.
//!
//! Exercises the full pipeline: locating profile fragments across the
//! default and project roots, folding them in mount order, and resolving
//! `${...}` references against the merged result.

use std::fs;
use std::path::Path;

use deskpack_settings::{settings_dir, OsFamily, PlatformInfo, ProjectState, SettingsOrigin};
use serde_json::{json, Value};
use tempfile::TempDir;

fn linux() -> PlatformInfo {
    PlatformInfo {
        os: OsFamily::Linux,
        linux_distribution: None,
    }
}

fn write_profile(root: &Path, profile: &str, value: &Value) {
    let dir = settings_dir(root);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join(format!("{}.json", profile)),
        serde_json::to_string_pretty(value).unwrap(),
    )
    .unwrap();
}

#[test]
fn test_profiles_layer_over_defaults_and_each_other() {
    let dir = TempDir::new().unwrap();
    let defaults = dir.path().join("defaults");
    let project = dir.path().join("project");

    write_profile(
        &defaults,
        "base",
        &json!({"telemetry": false, "inputs": ["defaults"]}),
    );
    write_profile(
        &project,
        "base",
        &json!({
            "app_name": "Demo",
            "data_dir": "${project_dir}/data",
            "inputs": ["project"]
        }),
    );
    write_profile(
        &project,
        "linux",
        &json!({"app_name": "Demo for Linux", "inputs": ["linux"]}),
    );
    write_profile(&project, "secret", &json!({"api_token": "hush"}));

    let mut state = ProjectState::new();
    state.init(&project, Some(defaults), &linux()).unwrap();

    assert_eq!(state.profiles().names(), ["base", "secret", "linux"]);

    // Later layers win scalars; sequences concatenate across layers.
    assert_eq!(state.get("app_name"), Some(&json!("Demo for Linux")));
    assert_eq!(state.get("telemetry"), Some(&json!(false)));
    assert_eq!(state.get("api_token"), Some(&json!("hush")));
    assert_eq!(
        state.get("inputs"),
        Some(&json!(["defaults", "project", "linux"]))
    );

    let data_dir = state.get("data_dir").unwrap().as_str().unwrap();
    assert_eq!(
        data_dir,
        format!("{}/data", state.project_dir().unwrap().display())
    );
}

#[test]
fn test_source_order_defaults_before_project_per_profile() {
    let dir = TempDir::new().unwrap();
    let defaults = dir.path().join("defaults");
    let project = dir.path().join("project");

    write_profile(&defaults, "base", &json!({"a": 1}));
    write_profile(&project, "base", &json!({"b": 2}));
    write_profile(&project, "linux", &json!({"c": 3}));

    let mut state = ProjectState::new();
    state.init(&project, Some(defaults), &linux()).unwrap();

    let order: Vec<(String, SettingsOrigin)> = state
        .sources()
        .iter()
        .map(|source| (source.profile.clone(), source.origin))
        .collect();
    assert_eq!(
        order,
        [
            ("base".to_string(), SettingsOrigin::Default),
            ("base".to_string(), SettingsOrigin::Project),
            ("linux".to_string(), SettingsOrigin::Project),
        ]
    );
}

#[test]
fn test_enabling_profile_relayers_the_stack() {
    let dir = TempDir::new().unwrap();
    write_profile(
        dir.path(),
        "base",
        &json!({"app_name": "Demo", "flags": ["a"]}),
    );
    write_profile(
        dir.path(),
        "release",
        &json!({"app_name": "Demo Release", "flags": ["r"]}),
    );

    let mut state = ProjectState::new();
    state.init(dir.path(), None, &linux()).unwrap();
    assert_eq!(state.get("app_name"), Some(&json!("Demo")));

    assert!(state.enable_profile("release").unwrap());
    assert_eq!(state.get("app_name"), Some(&json!("Demo Release")));
    assert_eq!(state.get("flags"), Some(&json!(["a", "r"])));

    // Mounting again is a no-op and re-resolution is stable.
    assert!(!state.enable_profile("release").unwrap());
    assert_eq!(state.get("flags"), Some(&json!(["a", "r"])));
    assert_eq!(
        state.profiles().names(),
        ["base", "secret", "linux", "release"]
    );
}

#[test]
fn test_public_projection_follows_settings_order() {
    let dir = TempDir::new().unwrap();
    write_profile(
        dir.path(),
        "base",
        &json!({
            "app_name": "Demo",
            "version": "1.0.0",
            "api_token": "hush",
            "public_settings": ["version", "app_name"]
        }),
    );

    let mut state = ProjectState::new();
    state.init(dir.path(), None, &linux()).unwrap();

    // Projection order comes from the settings mapping, not from the
    // allow-list.
    let public = state.public_settings();
    let keys: Vec<&String> = public.keys().collect();
    assert_eq!(keys, ["app_name", "version"]);
    assert!(!public.contains_key("api_token"));
    assert!(!public.contains_key("project_dir"));
}

#[test]
fn test_dangling_reference_survives_loading() {
    let dir = TempDir::new().unwrap();
    write_profile(
        dir.path(),
        "base",
        &json!({"greeting": "hello ${nobody}"}),
    );

    let mut state = ProjectState::new();
    state.init(dir.path(), None, &linux()).unwrap();

    assert_eq!(state.get("greeting"), Some(&json!("hello ${nobody}")));
}

#[test]
fn test_resolve_path_expands_and_normalizes() {
    let dir = TempDir::new().unwrap();
    write_profile(dir.path(), "base", &json!({"cache_name": "cache"}));

    let mut state = ProjectState::new();
    state.init(dir.path(), None, &linux()).unwrap();

    let resolved = state
        .resolve_path("data/${cache_name}/../logs")
        .unwrap();
    assert_eq!(resolved, state.project_dir().unwrap().join("data/logs"));
}

#[test]
fn test_malformed_profile_aborts_initialization() {
    let dir = TempDir::new().unwrap();
    write_profile(dir.path(), "base", &json!({"app_name": "Demo"}));
    fs::write(settings_dir(dir.path()).join("linux.json"), "{ broken").unwrap();

    let mut state = ProjectState::new();
    let err = state.init(dir.path(), None, &linux()).unwrap_err();

    assert!(err.to_string().contains("linux.json"));
    assert!(!state.is_initialized());
}

#[test]
fn test_snapshot_restore_isolates_changes() {
    let dir = TempDir::new().unwrap();
    write_profile(dir.path(), "base", &json!({"app_name": "Demo"}));
    write_profile(dir.path(), "beta", &json!({"app_name": "Demo Beta"}));

    let mut state = ProjectState::new();
    state.init(dir.path(), None, &linux()).unwrap();
    let snapshot = state.snapshot();

    state.enable_profile("beta").unwrap();
    assert_eq!(state.get("app_name"), Some(&json!("Demo Beta")));

    state.restore(snapshot);
    assert_eq!(state.get("app_name"), Some(&json!("Demo")));
    assert!(!state.profiles().is_mounted("beta"));
}
