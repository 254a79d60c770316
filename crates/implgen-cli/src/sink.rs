//! Writes generated units below an output directory

use anyhow::{Context, Result};
use implgen_codegen::GeneratedUnit;
use std::fs;
use std::path::{Path, PathBuf};

/// Source tree receiving generated files
#[derive(Debug, Clone)]
pub struct SourceSink {
    root: PathBuf,
}

impl SourceSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `unit` to `<root>/<package path>/<Name>.java`, replacing any previous file
    pub fn write(&self, unit: &GeneratedUnit) -> Result<PathBuf> {
        let path = self.root.join(unit.relative_path());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&path, &unit.source)
            .with_context(|| format!("Failed to write: {}", path.display()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use tempfile::TempDir;

    fn unit(package: &str, source: &str) -> GeneratedUnit {
        GeneratedUnit {
            package: package.to_string(),
            simple_name: "CustomerImpl".to_string(),
            is_abstract: false,
            source: source.to_string(),
        }
    }

    #[test]
    fn SourceSink___write___creates_package_directories() {
        let temp_dir = TempDir::new().unwrap();
        let sink = SourceSink::new(temp_dir.path());

        let path = sink.write(&unit("com.example.impl", "class A {}\n")).unwrap();

        assert_eq!(
            path,
            temp_dir.path().join("com/example/impl/CustomerImpl.java")
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "class A {}\n");
    }

    #[test]
    fn SourceSink___write_twice___replaces_file() {
        let temp_dir = TempDir::new().unwrap();
        let sink = SourceSink::new(temp_dir.path());

        sink.write(&unit("", "old")).unwrap();
        let path = sink.write(&unit("", "new")).unwrap();

        assert_eq!(path, temp_dir.path().join("CustomerImpl.java"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn SourceSink___root_is_a_file___returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("out");
        fs::write(&blocker, "").unwrap();
        let sink = SourceSink::new(&blocker);

        let result = sink.write(&unit("com.example", "class A {}"));

        assert!(result.is_err());
        assert_eq!(sink.root(), blocker.as_path());
    }
}
