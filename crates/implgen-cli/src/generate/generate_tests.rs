#![allow(non_snake_case)]

use super::*;
use implgen_core::{InMemoryCatalog, MethodDecl, TypeDecl, TypeRef};
use std::fs;
use tempfile::TempDir;

fn catalog() -> InMemoryCatalog {
    [
        TypeDecl::interface("com.example.Customer")
            .with_method(MethodDecl::getter("getName", TypeRef::declared("java.lang.String"))),
        TypeDecl::interface("com.example.Order")
            .with_method(MethodDecl::getter("getTotal", TypeRef::parse("double").unwrap())),
    ]
    .into_iter()
    .collect()
}

#[test]
fn run_entries___all_roots_valid___writes_each_file() {
    let temp_dir = TempDir::new().unwrap();
    let entries = [TypeEntry::new("com.example.Customer"), TypeEntry::new("com.example.Order")];

    let report = run_entries(&catalog(), &entries, &SourceSink::new(temp_dir.path()));

    assert_eq!(report.exit_status(), 0);
    assert_eq!(report.written().count(), 2);
    assert!(temp_dir.path().join("com/example/impl/CustomerImpl.java").exists());
    assert!(temp_dir.path().join("com/example/impl/OrderImpl.java").exists());
}

#[test]
fn run_entries___failed_root___continues_with_others() {
    let temp_dir = TempDir::new().unwrap();
    let entries = [TypeEntry::new("com.example.Missing"), TypeEntry::new("com.example.Order")];

    let report = run_entries(&catalog(), &entries, &SourceSink::new(temp_dir.path()));

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "com.example.Missing");
    assert!(temp_dir.path().join("com/example/impl/OrderImpl.java").exists());
    assert_eq!(report.exit_status(), 1);
}

#[test]
fn run_entries___single_failed_root___exits_with_error_code() {
    let temp_dir = TempDir::new().unwrap();
    let entries = [TypeEntry::new("com.example.Missing")];

    let report = run_entries(&catalog(), &entries, &SourceSink::new(temp_dir.path()));

    assert_eq!(
        report.exit_status(),
        GenerationError::UnknownType(String::new()).error_code() as u8
    );
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn run_entries___auto_generate_off___skips_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    let mut entry = TypeEntry::new("com.example.Customer");
    entry.config.auto_generate = false;

    let report = run_entries(&catalog(), &[entry], &SourceSink::new(temp_dir.path()));

    assert_eq!(report.skipped(), 1);
    assert_eq!(report.written().count(), 0);
    assert_eq!(report.exit_status(), 0);
}

#[test]
fn run___manifest_and_catalog_files___generates_sources() {
    let temp_dir = TempDir::new().unwrap();
    let catalog_path = temp_dir.path().join("catalog.json");
    fs::write(&catalog_path, catalog().to_json().unwrap()).unwrap();
    let manifest_path = temp_dir.path().join("implgen.toml");
    fs::write(
        &manifest_path,
        "[[types]]\nname = \"com.example.Customer\"\nname_suffix = \"Bean\"\n",
    )
    .unwrap();
    let output = temp_dir.path().join("out");

    let report = run(GenerateArgs {
        catalog: Some(catalog_path),
        manifest: Some(manifest_path),
        output: Some(output.clone()),
        types: Vec::new(),
    })
    .unwrap();

    assert_eq!(report.exit_status(), 0);
    let source =
        fs::read_to_string(output.join("com/example/impl/CustomerBean.java")).unwrap();
    assert!(source.contains("public class CustomerBean implements com.example.Customer"));
}

#[test]
fn run___missing_catalog___returns_error() {
    let temp_dir = TempDir::new().unwrap();

    let result = run(GenerateArgs {
        catalog: None,
        manifest: Some(write_manifest(&temp_dir, "[[types]]\nname = \"com.example.Customer\"\n")),
        output: Some(temp_dir.path().join("out")),
        types: Vec::new(),
    });

    assert!(result.is_err());
}

#[test]
fn run___empty_selection___returns_error() {
    let temp_dir = TempDir::new().unwrap();

    let result = run(GenerateArgs {
        catalog: Some(temp_dir.path().join("catalog.json")),
        manifest: Some(write_manifest(&temp_dir, "")),
        output: Some(temp_dir.path().join("out")),
        types: Vec::new(),
    });

    assert!(result.is_err());
}

fn write_manifest(temp_dir: &TempDir, content: &str) -> PathBuf {
    let path = temp_dir.path().join("implgen.toml");
    fs::write(&path, content).unwrap();
    path
}
