//! implgen-core - Symbol model, configuration and errors for implgen
//!
//! This crate provides the types the generator consumes and produces:
//! - [`TypeRef`] for references to semantic types
//! - [`TypeCatalog`] for querying declared types, with [`InMemoryCatalog`]
//! - [`ClassModel`], [`Property`] and [`Field`] for the extracted metadata
//! - [`GenerationConfig`] for per-run configuration
//! - [`GenerationError`] for error handling

mod catalog;
mod config;
mod error;
mod model;
mod types;

pub use catalog::{
    ElementKind, FieldAnnotation, FieldDecl, InMemoryCatalog, MethodDecl, Parameter,
    PropertyAnnotation, TypeCatalog, TypeDecl, TypeId, DEFAULT_RETAIN,
};
pub use config::{ConcurrencyModel, GenerationConfig};
pub use error::{GenerationError, GenerationResult};
pub use model::{Attribute, AttributeDescriptor, ClassModel, Field, MethodRef, Property};
pub use types::{
    is_identifier, is_qualified_name, is_reserved_word, PrimitiveKind, TypeParameter, TypeRef,
    Visibility, WildcardBound,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Attribute, ClassModel, ElementKind, Field, GenerationConfig, GenerationError,
        GenerationResult, InMemoryCatalog, PrimitiveKind, Property, TypeCatalog, TypeDecl,
        TypeRef, Visibility,
    };
}

#[cfg(test)]
mod lib_tests;
