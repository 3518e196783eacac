//! Embedded scaffolding boilerplate.
//!
//! Template files are embedded at compile time with `include_str!`, so
//! the installed binary scaffolds projects without carrying a data
//! directory around.

/// Files passed through placeholder expansion, by path relative to the
/// project root. Applies to the embedded boilerplate and to template
/// directories replicated with `--template`.
pub const FILTERED_FILES: &[&str] = &[
    "Cargo.toml",
    "src/build/settings/base.json",
    "src/build/settings/mac.json",
    "src/main/app/main.rs",
];

/// Directories created empty in a fresh project.
pub const PROJECT_DIRS: &[&str] = &["src/main/icons", "src/main/resources/base"];

pub const PROJECT_MANIFEST: &str = include_str!("boilerplate/project/Cargo.toml.in");
pub const PROJECT_GITIGNORE: &str = include_str!("boilerplate/project/gitignore");
pub const PROJECT_MAIN: &str = include_str!("boilerplate/project/main.rs.in");
pub const SETTINGS_BASE: &str = include_str!("boilerplate/project/base.json");
pub const SETTINGS_SECRET: &str = include_str!("boilerplate/project/secret.json");
pub const SETTINGS_MAC: &str = include_str!("boilerplate/project/mac.json");
pub const SETTINGS_LINUX: &str = include_str!("boilerplate/project/linux.json");
pub const SETTINGS_WINDOWS: &str = include_str!("boilerplate/project/windows.json");

/// Source file template for `deskpack create`.
pub const COMPONENT: &str = include_str!("boilerplate/component.rs.in");

/// One file of the project boilerplate.
pub struct BoilerplateFile {
    /// Destination path relative to the project root.
    pub path: &'static str,
    /// Raw template contents.
    pub contents: &'static str,
    /// Whether the contents pass through placeholder expansion.
    pub filtered: bool,
}

fn file(path: &'static str, contents: &'static str) -> BoilerplateFile {
    BoilerplateFile {
        path,
        contents,
        filtered: FILTERED_FILES.contains(&path),
    }
}

/// Every file of the project boilerplate, in creation order.
pub fn project_files() -> Vec<BoilerplateFile> {
    vec![
        file("Cargo.toml", PROJECT_MANIFEST),
        file(".gitignore", PROJECT_GITIGNORE),
        file("src/build/settings/base.json", SETTINGS_BASE),
        file("src/build/settings/secret.json", SETTINGS_SECRET),
        file("src/build/settings/mac.json", SETTINGS_MAC),
        file("src/build/settings/linux.json", SETTINGS_LINUX),
        file("src/build/settings/windows.json", SETTINGS_WINDOWS),
        file("src/main/app/main.rs", PROJECT_MAIN),
    ]
}
