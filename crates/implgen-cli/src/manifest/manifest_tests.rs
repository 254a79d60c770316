#![allow(non_snake_case)]

use super::*;
use implgen_core::{ConcurrencyModel, TypeDecl, TypeRef, Visibility};
use std::io::Write;
use tempfile::NamedTempFile;

// Manifest parsing tests

#[test]
fn Manifest___from_str___parses_flattened_config() {
    let toml = r#"
catalog = "build/catalog.json"
output = "build/generated"

[[types]]
name = "com.example.Customer"
thread_safe = true
concurrency = "atomic"
field_visibility = "protected"
super_type = "com.example.Base"

[[types]]
name = "com.example.Order"
"#;

    let manifest = Manifest::from_str(toml).unwrap();

    assert_eq!(manifest.catalog, Some(PathBuf::from("build/catalog.json")));
    assert_eq!(manifest.types.len(), 2);
    let customer = &manifest.types[0].config;
    assert_eq!(customer.concurrency, ConcurrencyModel::Atomic);
    assert_eq!(customer.field_visibility, Visibility::Protected);
    assert_eq!(customer.super_type, Some(TypeRef::declared("com.example.Base")));
    assert_eq!(manifest.types[1].config.name_suffix, "Impl");
}

#[test]
fn Manifest___from_str___parses_empty_manifest() {
    let manifest = Manifest::from_str("").unwrap();

    assert!(manifest.types.is_empty());
    assert!(manifest.catalog.is_none());
}

#[test]
fn Manifest___from_str___rejects_malformed_type() {
    let toml = r#"
[[types]]
name = "com.example.Customer"
super_type = "java.util.List<"
"#;

    assert!(Manifest::from_str(toml).is_err());
}

#[test]
fn Manifest___from_file___reads_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[[types]]\nname = \"com.example.Customer\"").unwrap();

    let manifest = Manifest::from_file(file.path()).unwrap();

    assert_eq!(manifest.types[0].name, "com.example.Customer");
}

#[test]
fn Manifest___from_file___missing_file_returns_error() {
    let result = Manifest::from_file("/nonexistent/implgen.toml");

    assert!(result.is_err());
}

// Selection tests

#[test]
fn Manifest___select_nothing___returns_all_entries() {
    let manifest = Manifest {
        types: vec![TypeEntry::new("com.example.A"), TypeEntry::new("com.example.B")],
        ..Manifest::default()
    };

    let selected = manifest.select(&[]);

    assert_eq!(selected.len(), 2);
}

#[test]
fn Manifest___select_unknown_name___uses_default_config() {
    let mut entry = TypeEntry::new("com.example.A");
    entry.config.thread_safe = false;
    let manifest = Manifest {
        types: vec![entry],
        ..Manifest::default()
    };

    let selected = manifest.select(&["com.example.A".to_string(), "com.example.Z".to_string()]);

    assert_eq!(selected.len(), 2);
    assert!(!selected[0].config.thread_safe);
    assert_eq!(selected[1].name, "com.example.Z");
    assert!(selected[1].config.thread_safe);
}

// Manifest validation tests

#[test]
fn Manifest___validate___accepts_valid_manifest() {
    let manifest = Manifest {
        types: vec![TypeEntry::new("com.example.Customer")],
        ..Manifest::default()
    };

    assert!(manifest.validate().is_ok());
}

#[test]
fn Manifest___validate___rejects_duplicate_type() {
    let manifest = Manifest {
        types: vec![
            TypeEntry::new("com.example.Customer"),
            TypeEntry::new("com.example.Customer"),
        ],
        ..Manifest::default()
    };

    assert!(manifest.validate().is_err());
}

#[test]
fn Manifest___validate___rejects_unknown_naming_strategy() {
    let mut entry = TypeEntry::new("com.example.Customer");
    entry.config.naming_strategy = "reverse".into();
    let manifest = Manifest {
        types: vec![entry],
        ..Manifest::default()
    };

    let error = manifest.validate().unwrap_err();

    assert!(format!("{error:#}").contains("unknown naming strategy"));
}

#[test]
fn Manifest___validate___rejects_invalid_type_name() {
    let manifest = Manifest {
        types: vec![TypeEntry::new("com..Customer")],
        ..Manifest::default()
    };

    assert!(manifest.validate().is_err());
}

#[test]
fn Manifest___validate_against___rejects_missing_root() {
    let catalog: InMemoryCatalog = [TypeDecl::interface("com.example.Customer")]
        .into_iter()
        .collect();
    let manifest = Manifest {
        types: vec![TypeEntry::new("com.example.Customer"), TypeEntry::new("com.example.Order")],
        ..Manifest::default()
    };

    let error = manifest.validate_against(&catalog).unwrap_err();

    assert!(error.to_string().contains("com.example.Order"));
}

#[test]
fn load_catalog___reads_snapshot() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"types": [{{"qualified_name": "com.example.Customer"}}]}}"#).unwrap();

    let catalog = load_catalog(file.path()).unwrap();

    assert_eq!(catalog.len(), 1);
}

#[test]
fn load_catalog___invalid_json___returns_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();

    assert!(load_catalog(file.path()).is_err());
}
