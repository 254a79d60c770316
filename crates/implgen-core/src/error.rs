//! Error types for implementation generation

use thiserror::Error;

/// Result type alias for generation operations
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Error type for generation operations
///
/// Every variant is fatal for the run of the root type that raised it. The
/// driver decides whether to continue with other root types.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Root type name is empty or otherwise unusable
    #[error("malformed type descriptor: {0}")]
    MalformedTypeDescriptor(String),

    /// Naming strategy precondition violated
    #[error("invalid naming input: {0}")]
    InvalidNamingInput(String),

    /// Attribute references a retain strategy that is not registered
    #[error("unknown retain kind: {0}")]
    UnknownRetainKind(String),

    /// Configuration names a naming strategy outside the known set
    #[error("unknown naming strategy: {0}")]
    UnknownNamingStrategy(String),

    /// Root type is not present in the type catalog
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Writing generated text failed
    #[error("emission failed: {0}")]
    EmitFailed(String),
}

impl GenerationError {
    /// Returns a stable numeric code, used as the process exit status
    pub fn error_code(&self) -> u32 {
        match self {
            GenerationError::MalformedTypeDescriptor(_) => 1,
            GenerationError::InvalidNamingInput(_) => 2,
            GenerationError::UnknownRetainKind(_) => 3,
            GenerationError::UnknownNamingStrategy(_) => 4,
            GenerationError::UnknownType(_) => 5,
            GenerationError::ConfigError(_) => 6,
            GenerationError::SerializationError(_) => 7,
            GenerationError::EmitFailed(_) => 8,
        }
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::SerializationError(err.to_string())
    }
}

impl From<std::fmt::Error> for GenerationError {
    fn from(err: std::fmt::Error) -> Self {
        GenerationError::EmitFailed(err.to_string())
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;

#[cfg(test)]
#[path = "error/error_parameterized_tests.rs"]
mod error_parameterized_tests;
