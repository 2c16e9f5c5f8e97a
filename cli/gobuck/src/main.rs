//! gobuck CLI — generate BUCK files for vendored Go packages.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use manifest::{GobuckManifest, MANIFEST_NAME};

#[derive(Parser)]
#[command(name = "gobuck", version, about = "Generate BUCK files for vendored Go packages")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter gobuck.toml in the current directory
    Init {
        /// Overwrite an existing gobuck.toml
        #[arg(long)]
        force: bool,
    },
    /// Render a BUCK file for every target descriptor
    Render {
        /// Descriptor file (.json or .toml); defaults to the manifest's [vendor] setting
        #[arg(long)]
        targets: Option<PathBuf>,
        /// Directory containing vendor/; defaults to the manifest's [vendor] setting
        #[arg(long)]
        third_party_dir: Option<PathBuf>,
    },
    /// Check that BUCK files on disk are up to date
    Check {
        /// Descriptor file (.json or .toml)
        #[arg(long)]
        targets: Option<PathBuf>,
        /// Directory containing vendor/
        #[arg(long)]
        third_party_dir: Option<PathBuf>,
    },
    /// Print the BUCK file for one target without writing it
    Show {
        /// Import path of the target
        import_path: String,
        /// Descriptor file (.json or .toml)
        #[arg(long)]
        targets: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { force } => commands::init::run(&cwd, force),

        Commands::Render {
            targets,
            third_party_dir,
        } => {
            let (manifest, project_dir) = load_manifest_required(&cwd)?;
            commands::render::run(
                &project_dir,
                &manifest,
                targets.as_deref(),
                third_party_dir.as_deref(),
            )
            .map(|_| ())
        }

        Commands::Check {
            targets,
            third_party_dir,
        } => {
            let (manifest, project_dir) = load_manifest_required(&cwd)?;
            commands::check::run(
                &project_dir,
                &manifest,
                targets.as_deref(),
                third_party_dir.as_deref(),
            )
        }

        Commands::Show {
            import_path,
            targets,
        } => {
            let (manifest, project_dir) = load_manifest_required(&cwd)?;
            commands::show::run(&project_dir, &manifest, &import_path, targets.as_deref())
        }
    }
}

/// Load manifest, returning error if not found.
fn load_manifest_required(cwd: &Path) -> anyhow::Result<(GobuckManifest, PathBuf)> {
    require_manifest(GobuckManifest::find_and_load(cwd)?)
}

fn require_manifest(
    found: Option<(GobuckManifest, PathBuf)>,
) -> anyhow::Result<(GobuckManifest, PathBuf)> {
    match found {
        Some((manifest, dir)) => Ok((manifest, dir)),
        None => anyhow::bail!("no {MANIFEST_NAME} found (run `gobuck init` first)"),
    }
}
