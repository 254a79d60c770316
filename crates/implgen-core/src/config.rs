//! Generation configuration types

use crate::types::{is_identifier, is_qualified_name, TypeRef, Visibility};
use crate::{GenerationError, GenerationResult};
use serde::{Deserialize, Serialize};

/// Thread-safety model used when `thread_safe` is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcurrencyModel {
    /// One read/write lock per instance guards every field
    #[default]
    ReadWriteLock,

    /// Every field lives in its own atomic cell; no locks
    Atomic,
}

/// Per-run generation configuration
///
/// Immutable for the duration of one generation run. Values come from the
/// annotation attached to the root type, or from a manifest entry when driven
/// from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Generate an implementation at all
    #[serde(default = "default_true")]
    pub auto_generate: bool,

    /// Force the generated type to be abstract
    #[serde(default)]
    pub generate_abstract: bool,

    /// Guard generated state for concurrent access
    #[serde(default = "default_true")]
    pub thread_safe: bool,

    /// Thread-safety model (only consulted when `thread_safe` is set)
    #[serde(default)]
    pub concurrency: ConcurrencyModel,

    /// Target package; empty means `<root package>.impl`
    #[serde(default)]
    pub package_name: String,

    /// Resolve `package_name` relative to the root type's package
    #[serde(default)]
    pub package_relative: bool,

    /// Explicit simple name of the generated type, bypassing the naming strategy
    #[serde(default)]
    pub class_name: Option<String>,

    /// Superclass of the generated type
    #[serde(default)]
    pub super_type: Option<TypeRef>,

    /// Implement `java.io.Serializable` and emit a `serialVersionUID`
    #[serde(default = "default_true")]
    pub serializable: bool,

    /// Value of the emitted `serialVersionUID`
    #[serde(default = "default_serial_version")]
    pub serial_version: i64,

    /// Implement `java.lang.Cloneable` and emit `clone()`
    #[serde(default = "default_true")]
    pub cloneable: bool,

    /// Visibility of generated backing fields
    #[serde(default = "default_field_visibility")]
    pub field_visibility: Visibility,

    /// Naming strategy identifier (`default` or `remove-prefix`)
    #[serde(default = "default_naming_strategy")]
    pub naming_strategy: String,

    /// Prefix of concrete names under the default naming strategy
    #[serde(default)]
    pub name_prefix: String,

    /// Suffix of concrete names under the default naming strategy
    #[serde(default = "default_name_suffix")]
    pub name_suffix: String,

    /// Do not walk supertypes of the root type
    #[serde(default)]
    pub ignore_super_interfaces: bool,

    /// Qualified name of the capability interface that makes a type observable
    #[serde(default = "default_observable_marker")]
    pub observable_marker: String,
}

fn default_true() -> bool {
    true
}

fn default_serial_version() -> i64 {
    1
}

fn default_field_visibility() -> Visibility {
    Visibility::Private
}

fn default_naming_strategy() -> String {
    "default".to_string()
}

fn default_name_suffix() -> String {
    "Impl".to_string()
}

fn default_observable_marker() -> String {
    "implgen.runtime.PropertyChangeEventAware".to_string()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            auto_generate: true,
            generate_abstract: false,
            thread_safe: true,
            concurrency: ConcurrencyModel::default(),
            package_name: String::new(),
            package_relative: false,
            class_name: None,
            super_type: None,
            serializable: true,
            serial_version: default_serial_version(),
            cloneable: true,
            field_visibility: default_field_visibility(),
            naming_strategy: default_naming_strategy(),
            name_prefix: String::new(),
            name_suffix: default_name_suffix(),
            ignore_super_interfaces: false,
            observable_marker: default_observable_marker(),
        }
    }
}

impl GenerationConfig {
    /// Create a configuration holding the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> GenerationResult<Self> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    /// True if the atomic-cell model is in effect
    pub fn uses_atomics(&self) -> bool {
        self.thread_safe && self.concurrency == ConcurrencyModel::Atomic
    }

    /// True if the lock-guarded model is in effect
    pub fn uses_lock(&self) -> bool {
        self.thread_safe && self.concurrency == ConcurrencyModel::ReadWriteLock
    }

    /// Check values that would otherwise produce uncompilable output
    ///
    /// The naming strategy identifier is not checked here; it is resolved
    /// against the closed set of strategies when the run starts.
    pub fn validate(&self) -> GenerationResult<()> {
        if !self.package_name.is_empty() && !is_qualified_name(&self.package_name) {
            return Err(GenerationError::ConfigError(format!(
                "package_name '{}' is not a valid package name",
                self.package_name
            )));
        }

        if let Some(class_name) = &self.class_name
            && !is_identifier(class_name)
        {
            return Err(GenerationError::ConfigError(format!(
                "class_name '{class_name}' is not a valid identifier"
            )));
        }

        if let Some(super_type) = &self.super_type
            && !matches!(super_type, TypeRef::Declared { .. })
        {
            return Err(GenerationError::ConfigError(format!(
                "super_type '{super_type}' is not a class type"
            )));
        }

        for (label, affix) in [("name_prefix", &self.name_prefix), ("name_suffix", &self.name_suffix)]
        {
            if !affix.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
                return Err(GenerationError::ConfigError(format!(
                    "{label} '{affix}' contains characters not allowed in identifiers"
                )));
            }
        }

        if !is_qualified_name(&self.observable_marker) {
            return Err(GenerationError::ConfigError(format!(
                "observable_marker '{}' is not a qualified type name",
                self.observable_marker
            )));
        }

        Ok(())
    }
}


#[cfg(test)]
#[path = "config/config_parameterized_tests.rs"]
mod config_parameterized_tests;
