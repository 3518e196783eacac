//! deskpack packaged-application runtime
//!
//! A packaged application links this crate to read the settings baked
//! into its bundle at packaging time and to locate its bundled
//! resources. The packaging tool depends on it too, for the artifact
//! schema it writes.

pub mod build_settings;
pub mod error;
pub mod resources;

pub use build_settings::{
    compute_digest, discover_path, is_packaged, BuildSettings, ARTIFACT_ENV_VAR,
    ARTIFACT_FILE_NAME, SCHEMA_ID, SCHEMA_VERSION,
};
pub use error::RuntimeError;
pub use resources::ResourceLocator;
