//! Generate command implementation

use crate::manifest::{load_catalog, Manifest, TypeEntry};
use crate::sink::SourceSink;
use anyhow::{Context, Result};
use implgen_codegen::generate;
use implgen_core::{GenerationError, TypeCatalog};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Command-line inputs of `implgen generate`
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    pub catalog: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub types: Vec<String>,
}

/// Outcome of one root type
#[derive(Debug)]
pub enum Outcome {
    Written(PathBuf),
    Skipped,
    Failed(GenerationError),
}

/// Outcomes of a run, in manifest order
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub outcomes: Vec<(String, Outcome)>,
}

impl GenerateReport {
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.outcomes.iter().filter_map(|(_, outcome)| match outcome {
            Outcome::Written(path) => Some(path.as_path()),
            _ => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &GenerationError)> {
        self.outcomes.iter().filter_map(|(name, outcome)| match outcome {
            Outcome::Failed(error) => Some((name.as_str(), error)),
            _ => None,
        })
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, Outcome::Skipped))
            .count()
    }

    /// Process exit status: the error code of a single failed root, 1 for
    /// several roots with failures, 0 otherwise
    pub fn exit_status(&self) -> u8 {
        let failures: Vec<_> = self.failures().collect();
        match failures.as_slice() {
            [] => 0,
            [(_, error)] if self.outcomes.len() == 1 => {
                u8::try_from(error.error_code()).unwrap_or(1)
            }
            _ => 1,
        }
    }
}

/// Generate command implementation
pub fn run(args: GenerateArgs) -> Result<GenerateReport> {
    let manifest = Manifest::discover(args.manifest.as_deref())?;

    let catalog_path = args
        .catalog
        .or_else(|| manifest.catalog.clone())
        .context("No catalog given: pass --catalog or set `catalog` in the manifest")?;
    let output = args
        .output
        .or_else(|| manifest.output.clone())
        .context("No output directory given: pass --output or set `output` in the manifest")?;

    let entries = manifest.select(&args.types);
    if entries.is_empty() {
        anyhow::bail!("Nothing to generate: the manifest lists no types and no --type was given");
    }

    let catalog = load_catalog(&catalog_path)?;
    info!(
        catalog = %catalog_path.display(),
        declarations = catalog.len(),
        roots = entries.len(),
        "catalog loaded"
    );

    let sink = SourceSink::new(output);
    info!(output = %sink.root().display(), "writing sources");
    let report = run_entries(&catalog, &entries, &sink);
    println!(
        "Generated {} file(s), skipped {}, failed {}",
        report.written().count(),
        report.skipped(),
        report.failures().count()
    );
    Ok(report)
}

/// Run every entry, continuing past failures
pub fn run_entries(
    catalog: &dyn TypeCatalog,
    entries: &[TypeEntry],
    sink: &SourceSink,
) -> GenerateReport {
    let mut report = GenerateReport::default();
    for entry in entries {
        let outcome = match generate(catalog, &entry.name, &entry.config) {
            Ok(Some(unit)) => match sink.write(&unit) {
                Ok(path) => {
                    info!(root = %entry.name, path = %path.display(), "written");
                    Outcome::Written(path)
                }
                Err(err) => {
                    error!(root = %entry.name, "{err:#}");
                    Outcome::Failed(GenerationError::EmitFailed(format!("{err:#}")))
                }
            },
            Ok(None) => {
                warn!(root = %entry.name, "auto_generate is off, nothing written");
                Outcome::Skipped
            }
            Err(err) => {
                error!(root = %entry.name, code = err.error_code(), "{err}");
                Outcome::Failed(err)
            }
        };
        report.outcomes.push((entry.name.clone(), outcome));
    }
    report
}

#[cfg(test)]
#[path = "generate/generate_tests.rs"]
mod generate_tests;
