//! Manifest parsing and validation

use anyhow::{Context, Result};
use implgen_codegen::NamingStrategyKind;
use implgen_core::{is_qualified_name, GenerationConfig, InMemoryCatalog, TypeCatalog};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Manifest file looked up in the working directory
pub const DEFAULT_MANIFEST: &str = "implgen.toml";

/// implgen.toml manifest structure
///
/// ```toml
/// catalog = "build/catalog.json"
/// output = "build/generated"
///
/// [[types]]
/// name = "com.example.Customer"
/// thread_safe = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Catalog snapshot used when `--catalog` is not given
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    /// Output directory used when `--output` is not given
    #[serde(default)]
    pub output: Option<PathBuf>,

    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

/// One root type and the configuration it is generated with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeEntry {
    pub name: String,

    #[serde(flatten)]
    pub config: GenerationConfig,
}

impl TypeEntry {
    /// Entry with the default configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: GenerationConfig::default(),
        }
    }
}

impl Manifest {
    /// Load manifest from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read manifest: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse manifest from string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse manifest")
    }

    /// Load `path`, or `implgen.toml` if present, or an empty manifest
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_MANIFEST).exists() => Self::from_file(DEFAULT_MANIFEST),
            None => Ok(Self::default()),
        }
    }

    /// Entries to run: all of them, or the `requested` names
    ///
    /// A requested name without an entry runs with the default configuration.
    pub fn select(&self, requested: &[String]) -> Vec<TypeEntry> {
        if requested.is_empty() {
            return self.types.clone();
        }
        requested
            .iter()
            .map(|name| {
                self.types
                    .iter()
                    .find(|entry| &entry.name == name)
                    .cloned()
                    .unwrap_or_else(|| TypeEntry::new(name.clone()))
            })
            .collect()
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.types {
            validate_entry(entry)?;
            if !seen.insert(entry.name.as_str()) {
                anyhow::bail!("Type '{}' is listed more than once", entry.name);
            }
        }
        Ok(())
    }

    /// Check that every listed root exists in `catalog`
    pub fn validate_against(&self, catalog: &InMemoryCatalog) -> Result<()> {
        for entry in &self.types {
            if catalog.lookup(&entry.name).is_none() {
                anyhow::bail!("Type '{}' is not in the catalog", entry.name);
            }
        }
        Ok(())
    }
}

/// Config values plus the naming strategy identifier
pub fn validate_entry(entry: &TypeEntry) -> Result<()> {
    if !is_qualified_name(&entry.name) {
        anyhow::bail!("Type name '{}' is not a qualified name", entry.name);
    }
    entry
        .config
        .validate()
        .with_context(|| format!("Invalid configuration for '{}'", entry.name))?;
    entry
        .config
        .naming_strategy
        .parse::<NamingStrategyKind>()
        .with_context(|| format!("Invalid configuration for '{}'", entry.name))?;
    Ok(())
}

/// Load a catalog snapshot
pub fn load_catalog(path: impl AsRef<Path>) -> Result<InMemoryCatalog> {
    let bytes = std::fs::read(path.as_ref())
        .with_context(|| format!("Failed to read catalog: {:?}", path.as_ref()))?;
    InMemoryCatalog::from_json(&bytes)
        .with_context(|| format!("Failed to parse catalog: {:?}", path.as_ref()))
}

/// Check command implementation
pub fn check(manifest_path: Option<PathBuf>, catalog_path: Option<PathBuf>) -> Result<()> {
    let path = manifest_path.unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST));

    println!("Checking manifest: {}", path.display());

    let manifest = Manifest::from_file(&path)?;
    manifest.validate()?;
    println!("✓ Types: {}", manifest.types.len());

    if let Some(catalog_path) = catalog_path.or_else(|| manifest.catalog.clone()) {
        let catalog = load_catalog(&catalog_path)?;
        manifest.validate_against(&catalog)?;
        println!("✓ Catalog: {} declarations", catalog.len());
    }

    println!("\nManifest is valid!");

    Ok(())
}

#[cfg(test)]
#[path = "manifest/manifest_tests.rs"]
mod manifest_tests;
