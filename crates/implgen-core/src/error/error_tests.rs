#![allow(non_snake_case)]

use super::*;

#[test]
fn GenerationError___unknown_retain_kind___returns_code_3() {
    let err = GenerationError::UnknownRetainKind("DEEP".into());

    let code = err.error_code();

    assert_eq!(code, 3);
}

#[test]
fn GenerationError___invalid_naming_input___displays_correctly() {
    let err = GenerationError::InvalidNamingInput("'Widget' must start with 'I'".into());

    let display = err.to_string();

    assert_eq!(display, "invalid naming input: 'Widget' must start with 'I'");
}

#[test]
fn GenerationError___all_variants___have_unique_codes() {
    let errors = vec![
        GenerationError::MalformedTypeDescriptor("".into()),
        GenerationError::InvalidNamingInput("".into()),
        GenerationError::UnknownRetainKind("".into()),
        GenerationError::UnknownNamingStrategy("".into()),
        GenerationError::UnknownType("".into()),
        GenerationError::ConfigError("".into()),
        GenerationError::SerializationError("".into()),
        GenerationError::EmitFailed("".into()),
    ];

    let codes: Vec<u32> = errors.iter().map(|e| e.error_code()).collect();
    let unique: std::collections::HashSet<u32> = codes.iter().copied().collect();

    assert_eq!(
        codes.len(),
        unique.len(),
        "All error codes should be unique"
    );
}

#[test]
fn GenerationError___from_serde_error___converts_to_serialization_error() {
    let json_err = serde_json::from_str::<String>("invalid").unwrap_err();

    let err: GenerationError = json_err.into();

    assert!(matches!(err, GenerationError::SerializationError(_)));
}

#[test]
fn GenerationError___from_fmt_error___converts_to_emit_failed() {
    let err: GenerationError = std::fmt::Error.into();

    assert!(matches!(err, GenerationError::EmitFailed(_)));
}
