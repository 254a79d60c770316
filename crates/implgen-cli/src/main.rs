//! implgen CLI - Java implementation generator
//!
//! Commands:
//! - `implgen generate` - Generate implementations for the manifest's root types
//! - `implgen check` - Validate an implgen.toml manifest

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod generate;
mod logging;
mod manifest;
mod sink;

#[derive(Parser)]
#[command(name = "implgen")]
#[command(author, version, about = "Generates Java implementations of abstract types", long_about = None)]
struct Cli {
    /// Log level used when IMPLGEN_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate implementations from a catalog snapshot
    Generate {
        /// Path to the catalog snapshot (JSON)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Path to implgen.toml manifest
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Output directory for generated sources
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Generate only these root types (repeatable)
        #[arg(short = 't', long = "type")]
        types: Vec<String>,
    },

    /// Validate an implgen.toml manifest
    Check {
        /// Path to implgen.toml (default: ./implgen.toml)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Catalog snapshot to check the listed types against
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    match cli.command {
        Commands::Generate {
            catalog,
            manifest,
            output,
            types,
        } => {
            let report = generate::run(generate::GenerateArgs {
                catalog,
                manifest,
                output,
                types,
            })?;
            for (root, error) in report.failures() {
                eprintln!("error: {root}: {error}");
            }
            Ok(ExitCode::from(report.exit_status()))
        }
        Commands::Check { manifest, catalog } => {
            manifest::check(manifest, catalog)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
