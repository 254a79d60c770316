#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// ============================================================================
// Parameterized config JSON parsing tests
// ============================================================================

#[test_case(r#"{"concurrency": "read_write_lock"}"#, ConcurrencyModel::ReadWriteLock)]
#[test_case(r#"{"concurrency": "atomic"}"#, ConcurrencyModel::Atomic)]
#[test_case(r#"{}"#, ConcurrencyModel::ReadWriteLock)]
fn GenerationConfig___concurrency_json___parses_correctly(
    json: &str,
    expected: ConcurrencyModel,
) {
    let config = GenerationConfig::from_json(json.as_bytes()).unwrap();
    assert_eq!(config.concurrency, expected);
}

#[test_case(r#"{"field_visibility": "private"}"#, Visibility::Private)]
#[test_case(r#"{"field_visibility": "default"}"#, Visibility::Default)]
#[test_case(r#"{"field_visibility": "package"}"#, Visibility::Default)]
#[test_case(r#"{"field_visibility": "protected"}"#, Visibility::Protected)]
#[test_case(r#"{"field_visibility": "public"}"#, Visibility::Public)]
fn GenerationConfig___field_visibility_json___parses_correctly(json: &str, expected: Visibility) {
    let config = GenerationConfig::from_json(json.as_bytes()).unwrap();
    assert_eq!(config.field_visibility, expected);
}

#[test_case(r#"{"serial_version": 0}"#, 0)]
#[test_case(r#"{"serial_version": 7}"#, 7)]
#[test_case(r#"{"serial_version": -1}"#, -1 ; "negative")]
#[test_case(r#"{}"#, 1)]
fn GenerationConfig___serial_version_json___parses_correctly(json: &str, expected: i64) {
    let config = GenerationConfig::from_json(json.as_bytes()).unwrap();
    assert_eq!(config.serial_version, expected);
}

#[test_case(r#"{"thread_safe": false}"#, false)]
#[test_case(r#"{"thread_safe": true}"#, true)]
#[test_case(r#"{}"#, true)]
fn GenerationConfig___thread_safe_json___parses_correctly(json: &str, expected: bool) {
    let config = GenerationConfig::from_json(json.as_bytes()).unwrap();
    assert_eq!(config.thread_safe, expected);
}

// ============================================================================
// Parameterized validation tests
// ============================================================================

#[test_case("com.example.impl" ; "qualified")]
#[test_case("impl" ; "single segment")]
#[test_case("" ; "empty means default")]
fn GenerationConfig___validate_package_name___accepts(package: &str) {
    let config = GenerationConfig {
        package_name: package.into(),
        ..GenerationConfig::default()
    };

    assert!(config.validate().is_ok());
}

#[test_case("com..example" ; "empty segment")]
#[test_case("com.example." ; "trailing dot")]
#[test_case("com.class.impl" ; "reserved segment")]
#[test_case("com.1st" ; "leading digit")]
fn GenerationConfig___validate_package_name___rejects(package: &str) {
    let config = GenerationConfig {
        package_name: package.into(),
        ..GenerationConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(GenerationError::ConfigError(_))
    ));
}

#[test_case("WidgetImpl", true ; "identifier")]
#[test_case("Widget$Impl", true ; "dollar")]
#[test_case("class", false ; "reserved word")]
#[test_case("Widget Impl", false ; "space")]
#[test_case("", false ; "empty")]
fn GenerationConfig___validate_class_name___checks_identifier(name: &str, valid: bool) {
    let config = GenerationConfig {
        class_name: Some(name.into()),
        ..GenerationConfig::default()
    };

    assert_eq!(config.validate().is_ok(), valid);
}

#[test_case("Impl", true ; "default suffix")]
#[test_case("", true ; "empty")]
#[test_case("Bean_2", true ; "underscore and digit")]
#[test_case("-Impl", false ; "hyphen")]
#[test_case("Im pl", false ; "space")]
fn GenerationConfig___validate_name_suffix___checks_characters(suffix: &str, valid: bool) {
    let config = GenerationConfig {
        name_suffix: suffix.into(),
        ..GenerationConfig::default()
    };

    assert_eq!(config.validate().is_ok(), valid);
}
