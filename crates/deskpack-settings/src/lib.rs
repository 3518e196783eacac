//! deskpack settings resolution
//!
//! Projects declare their settings as JSON profile fragments under
//! `src/build/settings/`. This crate turns the fragments of the mounted
//! profiles into one resolved mapping: locate the files each profile
//! contributes, fold them together with the deep merger, then expand
//! `${key}` placeholders against the merged result itself.

pub mod error;
pub mod loader;
pub mod locate;
pub mod merge;
pub mod platform;
pub mod public;
pub mod registry;
pub mod resolve;
pub mod state;

pub use error::SettingsError;
pub use loader::{load_settings, read_settings_file};
pub use locate::{locate_settings_files, settings_dir, SettingsOrigin, SettingsSource};
pub use merge::{deep_merge, merge_maps};
pub use platform::{OsFamily, PlatformInfo};
pub use public::{public_settings, PUBLIC_SETTINGS_KEY};
pub use registry::ProfileRegistry;
pub use resolve::{expand_placeholders, expand_str};
pub use state::{seed_settings, ProjectState, StateSnapshot, PROJECT_DIR_KEY};
