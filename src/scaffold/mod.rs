//! Project and component scaffolding.
//!
//! `new_project` writes the embedded boilerplate; `project_from_template`
//! replicates a caller-supplied directory instead. Both expand the
//! `${token}` references in the files that carry them. `create_component`
//! drops a single component or view source file into an existing project.

mod boilerplate;
mod template;

pub use boilerplate::{project_files, BoilerplateFile, FILTERED_FILES, PROJECT_DIRS};
pub use template::{expand_template, normalize_version, to_camel_case, to_snake_case};

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

/// Patterns never copied out of a template directory.
const DEFAULT_EXCLUDES: &[&str] = &[
    ".git",
    ".git/**",
    "target",
    "target/**",
    ".DS_Store",
    "**/.DS_Store",
    "**/*.swp",
];

/// Errors for scaffolding operations.
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    #[error("destination {0} already exists")]
    DestinationExists(PathBuf),

    #[error("template directory {0} does not exist")]
    TemplateMissing(PathBuf),

    #[error("'{0}' is not a usable name (start with a letter; letters, digits, spaces, '-' and '_' only)")]
    InvalidName(String),

    #[error("'{0}' is not a version of the form X.Y or X.Y.Z")]
    InvalidVersion(String),

    #[error("glob pattern error: {0}")]
    Glob(#[from] globset::Error),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Exclusion rules applied to paths relative to a template root.
#[derive(Debug)]
pub struct ExcludeRules {
    glob_set: GlobSet,
}

impl Default for ExcludeRules {
    fn default() -> Self {
        Self::new().unwrap()
    }
}

impl ExcludeRules {
    /// Rules with only the default patterns.
    pub fn new() -> Result<Self, globset::Error> {
        Self::build(&[])
    }

    /// Rules with the default patterns plus `patterns`.
    pub fn with_patterns(patterns: &[&str]) -> Result<Self, globset::Error> {
        Self::build(patterns)
    }

    fn build(extra: &[&str]) -> Result<Self, globset::Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in DEFAULT_EXCLUDES {
            builder.add(Glob::new(pattern)?);
        }
        for pattern in extra {
            if !pattern.is_empty() {
                builder.add(Glob::new(pattern)?);
            }
        }
        Ok(Self {
            glob_set: builder.build()?,
        })
    }

    /// Check a path relative to the template root.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.glob_set.is_match(path_str.as_ref())
    }
}

/// How a template tree is replicated: which entries to skip and which
/// files to pass through placeholder expansion.
pub struct ScaffoldFilter {
    pub excludes: ExcludeRules,
    pub replacements: HashMap<String, String>,
    pub filter_files: Vec<PathBuf>,
}

impl ScaffoldFilter {
    /// Filter with the default excludes and the standard filtered-file
    /// list.
    pub fn new(replacements: HashMap<String, String>) -> Self {
        Self {
            excludes: ExcludeRules::default(),
            replacements,
            filter_files: FILTERED_FILES.iter().map(PathBuf::from).collect(),
        }
    }

    fn should_filter(&self, relative: &Path) -> bool {
        self.filter_files.iter().any(|file| file == relative)
    }
}

/// Replicate `source` under `dest`, skipping excluded entries and
/// expanding placeholders in the filter-listed files.
///
/// Returns the created paths in creation order. Entries are visited
/// name-sorted so the order is stable across runs.
pub fn replicate_tree(
    source: &Path,
    dest: &Path,
    filter: &ScaffoldFilter,
) -> Result<Vec<PathBuf>, ScaffoldError> {
    fs::create_dir_all(dest).map_err(|err| ScaffoldError::Io {
        path: dest.to_path_buf(),
        source: err,
    })?;

    let mut created = Vec::new();
    for entry in WalkDir::new(source)
        .follow_links(false)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()))
    {
        let entry = entry?;
        let relative = match entry.path().strip_prefix(source) {
            Ok(relative) => relative,
            Err(_) => continue,
        };

        // Skip the template root itself
        if relative.as_os_str().is_empty() {
            continue;
        }

        if filter.excludes.is_excluded(relative) {
            continue;
        }

        let target = dest.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|err| ScaffoldError::Io {
                path: target.clone(),
                source: err,
            })?;
        } else if filter.should_filter(relative) {
            let text = fs::read_to_string(entry.path()).map_err(|err| ScaffoldError::Io {
                path: entry.path().to_path_buf(),
                source: err,
            })?;
            write_file(&target, &expand_template(&text, &filter.replacements))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|err| ScaffoldError::Io {
                path: target.clone(),
                source: err,
            })?;
        }
        created.push(target);
    }
    Ok(created)
}

/// Inputs for a fresh project.
pub struct ProjectParams {
    /// Human-facing application name, e.g. "My Gallery".
    pub name: String,
    pub author: String,
    /// Accepted as `X.Y` or `X.Y.Z`; normalized to three components.
    pub version: String,
    /// macOS bundle identifier; derived from the name when absent.
    pub bundle_identifier: Option<String>,
}

impl ProjectParams {
    /// The replacement map shared by the embedded boilerplate and
    /// replicated template directories.
    pub fn replacements(&self) -> Result<HashMap<String, String>, ScaffoldError> {
        if !valid_name(&self.name) {
            return Err(ScaffoldError::InvalidName(self.name.clone()));
        }
        let version = normalize_version(&self.version)
            .ok_or_else(|| ScaffoldError::InvalidVersion(self.version.clone()))?;
        let crate_name = to_snake_case(&self.name);
        let bundle_identifier = match &self.bundle_identifier {
            Some(id) => id.clone(),
            None => format!("com.example.{}", crate_name),
        };

        let mut replacements = HashMap::new();
        replacements.insert("app_name".to_string(), self.name.clone());
        replacements.insert("crate_name".to_string(), crate_name);
        replacements.insert("author".to_string(), self.author.clone());
        replacements.insert("version".to_string(), version);
        replacements.insert("mac_bundle_identifier".to_string(), bundle_identifier);
        replacements.insert(
            "runtime_version".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        Ok(replacements)
    }
}

fn valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-' || c == '_')
}

/// Scaffold a project at `dest` from the embedded boilerplate.
///
/// `dest` must not exist yet. Returns the created paths, boilerplate
/// files first, then the empty resource directories.
pub fn new_project(dest: &Path, params: &ProjectParams) -> Result<Vec<PathBuf>, ScaffoldError> {
    let replacements = params.replacements()?;
    if dest.exists() {
        return Err(ScaffoldError::DestinationExists(dest.to_path_buf()));
    }

    let mut created = Vec::new();
    for file in project_files() {
        let target = dest.join(file.path);
        let contents = if file.filtered {
            expand_template(file.contents, &replacements)
        } else {
            file.contents.to_string()
        };
        write_file(&target, &contents)?;
        created.push(target);
    }
    for dir in PROJECT_DIRS {
        let target = dest.join(dir);
        fs::create_dir_all(&target).map_err(|err| ScaffoldError::Io {
            path: target.clone(),
            source: err,
        })?;
        created.push(target);
    }
    Ok(created)
}

/// Scaffold a project at `dest` by replicating the template directory.
pub fn project_from_template(
    source: &Path,
    dest: &Path,
    params: &ProjectParams,
) -> Result<Vec<PathBuf>, ScaffoldError> {
    let replacements = params.replacements()?;
    if !source.is_dir() {
        return Err(ScaffoldError::TemplateMissing(source.to_path_buf()));
    }
    if dest.exists() {
        return Err(ScaffoldError::DestinationExists(dest.to_path_buf()));
    }
    replicate_tree(source, dest, &ScaffoldFilter::new(replacements))
}

/// What `deskpack create` can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Component,
    View,
}

impl ComponentKind {
    /// Directory under `src/main/app` receiving the generated file.
    pub fn directory(self) -> &'static str {
        match self {
            ComponentKind::Component => "components",
            ComponentKind::View => "views",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            ComponentKind::Component => "component",
            ComponentKind::View => "view",
        }
    }
}

/// Generate a component or view source file inside the project at
/// `root`.
///
/// The type is named from `name` in CamelCase and the file takes the
/// snake_case form, so `nav-bar` yields `struct NavBar` in `nav_bar.rs`.
/// An existing file is only replaced with `force`.
pub fn create_component(
    root: &Path,
    kind: ComponentKind,
    name: &str,
    inherit: &str,
    force: bool,
) -> Result<PathBuf, ScaffoldError> {
    if !valid_name(name) {
        return Err(ScaffoldError::InvalidName(name.to_string()));
    }
    let file_name = format!("{}.rs", to_snake_case(name));
    let target = root
        .join("src/main/app")
        .join(kind.directory())
        .join(file_name);
    if target.exists() && !force {
        return Err(ScaffoldError::DestinationExists(target));
    }

    let mut replacements = HashMap::new();
    replacements.insert("name".to_string(), to_camel_case(name));
    replacements.insert("kind".to_string(), kind.noun().to_string());
    replacements.insert("inherit".to_string(), inherit.to_string());
    write_file(
        &target,
        &expand_template(boilerplate::COMPONENT, &replacements),
    )?;
    Ok(target)
}

fn write_file(path: &Path, contents: &str) -> Result<(), ScaffoldError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| ScaffoldError::Io {
            path: parent.to_path_buf(),
            source: err,
        })?;
    }
    fs::write(path, contents).map_err(|err| ScaffoldError::Io {
        path: path.to_path_buf(),
        source: err,
    })
}
