//! deskpack CLI
//!
//! Entry point for the `deskpack` command-line tool.

use clap::{Parser, Subcommand};
use deskpack::bake::bake_settings;
use deskpack::project::{self, ProjectError};
use deskpack::scaffold::{self, ComponentKind, ProjectParams};
use serde_json::{json, Value};
use std::env;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "deskpack")]
#[command(about = "Desktop application packaging and scaffolding", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a new project in a directory named after the app
    New {
        /// Application name, e.g. "My Gallery"
        name: String,

        /// Author recorded in the project settings
        #[arg(long, default_value = "Anonymous")]
        author: String,

        /// Initial version, X.Y or X.Y.Z
        #[arg(long = "set-version", default_value = "0.1.0")]
        version: String,

        /// macOS bundle identifier (default: com.example.<crate name>)
        #[arg(long = "bundle-id")]
        bundle_id: Option<String>,

        /// Replicate this template directory instead of the embedded
        /// boilerplate
        #[arg(long)]
        template: Option<PathBuf>,
    },

    /// Generate a component or view source file in this project
    Create {
        /// What to generate: component or view
        kind: String,

        /// Name for the new type, e.g. nav-bar or NavBar
        name: String,

        /// Base type embedded in the generated struct
        #[arg(long, default_value = "Frame")]
        inherit: String,

        /// Replace the file if it already exists
        #[arg(long)]
        force: bool,
    },

    /// Print the resolved settings for this project
    Settings {
        /// Project directory (default: discovered from the working directory)
        #[arg(long)]
        project_dir: Option<PathBuf>,

        /// Extra profile to mount; repeatable, mounted in order
        #[arg(long = "profile")]
        profiles: Vec<String>,

        /// Print only the public projection
        #[arg(long)]
        public: bool,

        /// Compact single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Validate the project layout and settings
    Verify {
        /// Project directory (default: discovered from the working directory)
        #[arg(long)]
        project_dir: Option<PathBuf>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Bake the build-settings artifact for packaging
    Bake {
        /// Project directory (default: discovered from the working directory)
        #[arg(long)]
        project_dir: Option<PathBuf>,

        /// Extra profile to mount; repeatable, mounted in order
        #[arg(long = "profile")]
        profiles: Vec<String>,

        /// Output directory for build_settings.json, relative to the
        /// project root unless absolute
        #[arg(long, default_value = "target/deskpack")]
        out: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::New {
            name,
            author,
            version,
            bundle_id,
            template,
        } => {
            run_new(&name, author, version, bundle_id, template);
        }
        Commands::Create {
            kind,
            name,
            inherit,
            force,
        } => {
            run_create(&kind, &name, &inherit, force);
        }
        Commands::Settings {
            project_dir,
            profiles,
            public,
            compact,
        } => {
            run_settings(project_dir, profiles, public, compact);
        }
        Commands::Verify { project_dir, json } => {
            run_verify(project_dir, json);
        }
        Commands::Bake {
            project_dir,
            profiles,
            out,
        } => {
            run_bake(project_dir, profiles, out);
        }
    }
}

fn run_new(
    name: &str,
    author: String,
    version: String,
    bundle_id: Option<String>,
    template: Option<PathBuf>,
) {
    let dest = match env::current_dir() {
        Ok(cwd) => cwd.join(name),
        Err(e) => {
            eprintln!("Error reading working directory: {}", e);
            process::exit(1);
        }
    };
    let params = ProjectParams {
        name: name.to_string(),
        author,
        version,
        bundle_identifier: bundle_id,
    };

    let result = match template {
        Some(dir) => scaffold::project_from_template(&dir, &dest, &params),
        None => scaffold::new_project(&dest, &params),
    };
    match result {
        Ok(_) => {
            println!("Created {}", dest.display());
            println!();
            println!("Next steps:");
            println!("  cd {}", name);
            println!("  deskpack settings");
        }
        Err(e) => {
            eprintln!("Error scaffolding project: {}", e);
            process::exit(1);
        }
    }
}

fn run_create(kind: &str, name: &str, inherit: &str, force: bool) {
    let kind = match kind {
        "component" => ComponentKind::Component,
        "view" => ComponentKind::View,
        other => {
            eprintln!("Invalid kind '{}'. Valid: component, view", other);
            process::exit(1);
        }
    };

    let root = match project_root() {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Error locating project: {}", e);
            process::exit(1);
        }
    };
    if let Err(e) = project::validate_structure(&root) {
        eprintln!("Error validating project: {}", e);
        process::exit(1);
    }

    match scaffold::create_component(&root, kind, name, inherit, force) {
        Ok(path) => println!("Created {}", path.display()),
        Err(e) => {
            eprintln!("Error generating source file: {}", e);
            process::exit(1);
        }
    }
}

fn run_settings(project_dir: Option<PathBuf>, profiles: Vec<String>, public: bool, compact: bool) {
    let state = match project::open_project(project_dir.as_deref(), &profiles) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Error loading project settings: {}", e);
            process::exit(1);
        }
    };

    let map = if public {
        state.public_settings()
    } else {
        state.settings().clone()
    };
    let value = Value::Object(map);
    let output = if compact {
        serde_json::to_string(&value)
    } else {
        serde_json::to_string_pretty(&value)
    };
    match output {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn run_verify(project_dir: Option<PathBuf>, json_output: bool) {
    let state = match project::open_project(project_dir.as_deref(), &[]) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };
    let root = match state.project_dir() {
        Ok(root) => root.to_path_buf(),
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    if json_output {
        let payload = json!({
            "root": root,
            "profiles": state.profiles().names(),
            "sources": state.sources(),
            "resolved_keys": state.settings().len(),
        });
        match serde_json::to_string_pretty(&payload) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("Project valid: {}", root.display());
        println!();
        println!("  Profiles: {}", state.profiles().names().join(", "));
        println!("  Settings files:");
        for source in state.sources() {
            println!("    {:<8} {}", source.origin.to_string(), source.path.display());
        }
        println!("  Resolved keys: {}", state.settings().len());
    }
}

fn run_bake(project_dir: Option<PathBuf>, profiles: Vec<String>, out: PathBuf) {
    let state = match project::open_project(project_dir.as_deref(), &profiles) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Error loading project settings: {}", e);
            process::exit(1);
        }
    };

    let out_dir = if out.is_absolute() {
        out
    } else {
        match state.project_dir() {
            Ok(root) => root.join(out),
            Err(e) => {
                eprintln!("Error resolving output directory: {}", e);
                process::exit(1);
            }
        }
    };

    match bake_settings(&state, &out_dir) {
        Ok(baked) => {
            println!(
                "Baked {} settings to {}",
                baked.artifact.settings.len(),
                baked.path.display()
            );
            if !baked.projected {
                println!("Note: no public_settings allow-list; the full settings were baked.");
            }
        }
        Err(e) => {
            eprintln!("Error baking settings: {}", e);
            process::exit(1);
        }
    }
}

fn project_root() -> Result<PathBuf, ProjectError> {
    let cwd = env::current_dir().map_err(|source| ProjectError::Io {
        path: PathBuf::from("."),
        source,
    })?;
    project::discover_project_root(&cwd)
}
