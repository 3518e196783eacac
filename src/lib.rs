//! deskpack - desktop application packaging and scaffolding
//!
//! This crate implements the deskpack developer tool: project discovery
//! and validation, project/component scaffolding, and baking the
//! build-settings artifact a packaged application reads back at runtime.
//! Settings resolution itself lives in `deskpack-settings`; the packaged
//! side in `deskpack-runtime`.

pub mod bake;
pub mod project;
pub mod scaffold;

pub use bake::{bake_settings, BakeError, BakedSettings};
pub use project::{
    default_settings_root, discover_project_root, open_project, validate_structure, ProjectError,
};
pub use scaffold::{
    create_component, expand_template, new_project, normalize_version, project_from_template,
    replicate_tree, to_camel_case, to_snake_case, ComponentKind, ExcludeRules, ProjectParams,
    ScaffoldError, ScaffoldFilter,
};
