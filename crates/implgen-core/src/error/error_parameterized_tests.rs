#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// ============================================================================
// Parameterized error code mapping tests
// ============================================================================

#[test_case(GenerationError::MalformedTypeDescriptor("test".into()), 1, "MalformedTypeDescriptor")]
#[test_case(GenerationError::InvalidNamingInput("test".into()), 2, "InvalidNamingInput")]
#[test_case(GenerationError::UnknownRetainKind("test".into()), 3, "UnknownRetainKind")]
#[test_case(GenerationError::UnknownNamingStrategy("test".into()), 4, "UnknownNamingStrategy")]
#[test_case(GenerationError::UnknownType("test".into()), 5, "UnknownType")]
#[test_case(GenerationError::ConfigError("test".into()), 6, "ConfigError")]
#[test_case(GenerationError::SerializationError("test".into()), 7, "SerializationError")]
#[test_case(GenerationError::EmitFailed("test".into()), 8, "EmitFailed")]
fn GenerationError___variant___maps_to_correct_code(
    error: GenerationError,
    expected_code: u32,
    _variant_name: &str,
) {
    assert_eq!(
        error.error_code(),
        expected_code,
        "{} should map to code {}",
        _variant_name,
        expected_code
    );
}

// ============================================================================
// Parameterized error message preservation tests
// ============================================================================

#[test_case(GenerationError::MalformedTypeDescriptor("empty qualified name".into()), "empty qualified name")]
#[test_case(GenerationError::InvalidNamingInput("Widget".into()), "Widget")]
#[test_case(GenerationError::UnknownRetainKind("DEEP_COPY".into()), "DEEP_COPY")]
#[test_case(GenerationError::UnknownNamingStrategy("camel".into()), "camel")]
#[test_case(GenerationError::UnknownType("com.example.Gone".into()), "com.example.Gone")]
#[test_case(GenerationError::ConfigError("bad class name".into()), "bad class name")]
fn GenerationError___message_variants___preserve_details(
    error: GenerationError,
    expected_part: &str,
) {
    let display = error.to_string();

    assert!(
        display.contains(expected_part),
        "Error message '{}' should contain '{}'",
        display,
        expected_part
    );
}
