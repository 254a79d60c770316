//! Naming of generated types, packages and members.
//!
//! | Strategy | Identifier | `Customer` / `ICustomer` concrete | abstract |
//! |----------|------------|-----------------------------------|----------|
//! | [`DefaultNaming`] | `default` | `CustomerImpl` | `AbstractCustomer` |
//! | [`RemovePrefixNaming`] | `remove-prefix` | `Customer` | `AbstractCustomer` |

use implgen_core::{is_reserved_word, GenerationConfig, GenerationError, GenerationResult};
use std::fmt;
use std::str::FromStr;

/// Capitalize the first letter of a string.
///
/// ```
/// use implgen_codegen::naming::capitalize;
///
/// assert_eq!(capitalize("firstName"), "FirstName");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lower-case the first letter of a string.
///
/// ```
/// use implgen_codegen::naming::uncapitalize;
///
/// assert_eq!(uncapitalize("FirstName"), "firstName");
/// ```
pub fn uncapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Identifier usable in generated source; reserved words get a leading `_`.
pub fn safe_name(name: &str) -> String {
    if is_reserved_word(name) {
        format!("_{name}")
    } else {
        name.to_string()
    }
}

/// Reader name for an attribute without an originating accessor
pub fn reader_name(attribute_name: &str, is_boolean: bool) -> String {
    let prefix = if is_boolean { "is" } else { "get" };
    format!("{prefix}{}", capitalize(attribute_name))
}

/// Writer name for an attribute without an originating accessor
pub fn writer_name(attribute_name: &str) -> String {
    format!("set{}", capitalize(attribute_name))
}

/// Maps the simple name of a root type to the simple names of its implementation
pub trait NamingStrategy: fmt::Debug {
    fn concrete_name_for(&self, source_name: &str) -> GenerationResult<String>;

    fn abstract_name_for(&self, source_name: &str) -> GenerationResult<String>;
}

/// `<prefix><Name><suffix>` for concrete types, `Abstract<Name>` for abstract ones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultNaming {
    prefix: String,
    suffix: String,
}

impl DefaultNaming {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }
}

impl Default for DefaultNaming {
    fn default() -> Self {
        Self::new("", "Impl")
    }
}

impl NamingStrategy for DefaultNaming {
    fn concrete_name_for(&self, source_name: &str) -> GenerationResult<String> {
        Ok(format!(
            "{}{}{}",
            self.prefix,
            capitalize(source_name),
            self.suffix
        ))
    }

    fn abstract_name_for(&self, source_name: &str) -> GenerationResult<String> {
        Ok(format!("Abstract{}", capitalize(source_name)))
    }
}

/// Strips a one-character marker (`I` by convention) from interface names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovePrefixNaming {
    marker: char,
    inner: DefaultNaming,
}

impl RemovePrefixNaming {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            marker: 'I',
            inner: DefaultNaming::new(prefix, ""),
        }
    }

    fn strip<'a>(&self, source_name: &'a str) -> GenerationResult<&'a str> {
        match source_name.strip_prefix(self.marker) {
            Some(rest) if !rest.is_empty() => Ok(rest),
            _ => Err(GenerationError::InvalidNamingInput(format!(
                "'{source_name}' must be at least 2 characters long and start with '{}'",
                self.marker
            ))),
        }
    }
}

impl Default for RemovePrefixNaming {
    fn default() -> Self {
        Self::new("")
    }
}

impl NamingStrategy for RemovePrefixNaming {
    fn concrete_name_for(&self, source_name: &str) -> GenerationResult<String> {
        self.inner.concrete_name_for(self.strip(source_name)?)
    }

    fn abstract_name_for(&self, source_name: &str) -> GenerationResult<String> {
        self.inner.abstract_name_for(self.strip(source_name)?)
    }
}

/// Closed set of naming strategies selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingStrategyKind {
    Default,
    RemovePrefix,
}

impl NamingStrategyKind {
    pub fn identifier(self) -> &'static str {
        match self {
            NamingStrategyKind::Default => "default",
            NamingStrategyKind::RemovePrefix => "remove-prefix",
        }
    }

    /// Instantiate the strategy with the affixes from `config`
    pub fn build(self, config: &GenerationConfig) -> Box<dyn NamingStrategy> {
        match self {
            NamingStrategyKind::Default => Box::new(DefaultNaming::new(
                config.name_prefix.clone(),
                config.name_suffix.clone(),
            )),
            NamingStrategyKind::RemovePrefix => {
                Box::new(RemovePrefixNaming::new(config.name_prefix.clone()))
            }
        }
    }
}

impl FromStr for NamingStrategyKind {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(NamingStrategyKind::Default),
            "remove-prefix" => Ok(NamingStrategyKind::RemovePrefix),
            other => Err(GenerationError::UnknownNamingStrategy(other.to_string())),
        }
    }
}

/// Package of the generated type
///
/// An empty `package_name` selects `<root package>.impl`; a relative one is
/// appended to the root package.
pub fn resolve_package(root_package: &str, config: &GenerationConfig) -> String {
    if config.package_name.is_empty() {
        join_package(root_package, "impl")
    } else if config.package_relative {
        join_package(root_package, &config.package_name)
    } else {
        config.package_name.clone()
    }
}

fn join_package(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{base}.{name}")
    }
}
