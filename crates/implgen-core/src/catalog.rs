//! Type catalog: the read-only symbol service the generator queries
//!
//! The host compiler owns the real symbol table. The generator only needs to
//! ask for a type's declaration (kind, supertypes, fields, methods and the
//! resolved annotation values on them), which is what [`TypeCatalog`] exposes.
//! [`InMemoryCatalog`] is an arena-backed implementation fed from JSON
//! snapshots, used by the command-line driver and by tests.

use crate::types::{TypeParameter, TypeRef, Visibility};
use crate::GenerationResult;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Retain kind used when an attribute carries no explicit one
pub const DEFAULT_RETAIN: &str = "HOLD";

fn default_retain() -> String {
    DEFAULT_RETAIN.to_string()
}

/// Stable handle of a declaration inside a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(usize);

impl TypeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Kind of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    #[default]
    Interface,
    AbstractClass,
    Class,
}

impl ElementKind {
    /// Interfaces and abstract classes can be generation roots
    pub fn is_abstract(self) -> bool {
        matches!(self, ElementKind::Interface | ElementKind::AbstractClass)
    }
}

/// Resolved annotation values attached to an accessor method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAnnotation {
    #[serde(default = "default_retain")]
    pub retain: String,

    #[serde(default)]
    pub real_type: Option<TypeRef>,

    #[serde(default)]
    pub ignore: bool,
}

impl Default for PropertyAnnotation {
    fn default() -> Self {
        Self {
            retain: default_retain(),
            real_type: None,
            ignore: false,
        }
    }
}

/// Resolved annotation values attached to a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAnnotation {
    #[serde(default = "default_retain")]
    pub retain: String,

    #[serde(default)]
    pub real_type: Option<TypeRef>,

    #[serde(default)]
    pub ignore: bool,

    #[serde(default)]
    pub read_only: bool,

    #[serde(default)]
    pub accessor_visibility: Visibility,
}

impl Default for FieldAnnotation {
    fn default() -> Self {
        Self {
            retain: default_retain(),
            real_type: None,
            ignore: false,
            read_only: false,
            accessor_visibility: Visibility::Public,
        }
    }
}

/// A declared field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeRef,

    #[serde(default)]
    pub is_static: bool,

    #[serde(default)]
    pub annotation: Option<FieldAnnotation>,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            is_static: false,
            annotation: None,
        }
    }

    pub fn with_annotation(mut self, annotation: FieldAnnotation) -> Self {
        self.annotation = Some(annotation);
        self
    }
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A declared method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,

    /// `None` for `void`
    #[serde(default)]
    pub return_type: Option<TypeRef>,

    #[serde(default)]
    pub parameters: Vec<Parameter>,

    #[serde(default)]
    pub is_static: bool,

    /// Concrete or default method; needs no implementation
    #[serde(default)]
    pub has_body: bool,

    #[serde(default)]
    pub annotation: Option<PropertyAnnotation>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: None,
            parameters: Vec::new(),
            is_static: false,
            has_body: false,
            annotation: None,
        }
    }

    /// Zero-argument method returning `ty`
    pub fn getter(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(name).returning(ty)
    }

    /// Void method taking a single `ty` argument
    pub fn setter(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(name).with_parameter(Parameter::new("value", ty))
    }

    pub fn returning(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_annotation(mut self, annotation: PropertyAnnotation) -> Self {
        self.annotation = Some(annotation);
        self
    }
}

/// A declared class or interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub qualified_name: String,

    #[serde(default)]
    pub kind: ElementKind,

    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,

    /// Direct supertypes (superclass first, then interfaces)
    #[serde(default)]
    pub supertypes: Vec<TypeRef>,

    #[serde(default)]
    pub fields: Vec<FieldDecl>,

    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

impl TypeDecl {
    pub fn new(qualified_name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            kind,
            type_parameters: Vec::new(),
            supertypes: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn interface(qualified_name: impl Into<String>) -> Self {
        Self::new(qualified_name, ElementKind::Interface)
    }

    /// Package part of the qualified name; empty for the default package
    pub fn package(&self) -> &str {
        self.qualified_name
            .rsplit_once('.')
            .map_or("", |(package, _)| package)
    }

    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit_once('.')
            .map_or(self.qualified_name.as_str(), |(_, simple)| simple)
    }

    pub fn with_type_parameter(mut self, parameter: TypeParameter) -> Self {
        self.type_parameters.push(parameter);
        self
    }

    pub fn with_supertype(mut self, supertype: TypeRef) -> Self {
        self.supertypes.push(supertype);
        self
    }

    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }
}

/// Read-only query service over declared types
pub trait TypeCatalog {
    /// Find a declaration by qualified name
    fn lookup(&self, qualified_name: &str) -> Option<TypeId>;

    /// Declaration behind a handle
    fn declaration(&self, id: TypeId) -> Option<&TypeDecl>;

    /// Direct supertypes of a declaration
    fn supertypes(&self, id: TypeId) -> &[TypeRef] {
        self.declaration(id)
            .map(|decl| decl.supertypes.as_slice())
            .unwrap_or_default()
    }

    /// Declaration a type reference points at, if it is a known declared type
    fn resolve(&self, ty: &TypeRef) -> Option<TypeId> {
        match ty {
            TypeRef::Declared { name, .. } => self.lookup(name),
            _ => None,
        }
    }

    /// True if `ty` is `qualified_name` or inherits from it
    ///
    /// Supertypes unknown to the catalog end the search on that path.
    fn is_subtype(&self, ty: &TypeRef, qualified_name: &str) -> bool {
        let TypeRef::Declared { name, .. } = ty else {
            return false;
        };
        if name == qualified_name {
            return true;
        }

        let mut visited = HashSet::new();
        let mut pending: Vec<TypeId> = self.lookup(name).into_iter().collect();
        while let Some(id) = pending.pop() {
            if !visited.insert(id) {
                continue;
            }
            for supertype in self.supertypes(id) {
                if let TypeRef::Declared { name, .. } = supertype {
                    if name == qualified_name {
                        return true;
                    }
                    pending.extend(self.lookup(name));
                }
            }
        }
        false
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogSnapshot {
    #[serde(default)]
    types: Vec<TypeDecl>,
}

/// Arena-backed catalog
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    types: Vec<TypeDecl>,
    index: HashMap<String, TypeId>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a `{"types": [...]}` snapshot
    pub fn from_json(bytes: &[u8]) -> GenerationResult<Self> {
        let snapshot: CatalogSnapshot = serde_json::from_slice(bytes)?;
        Ok(snapshot.types.into_iter().collect())
    }

    /// Render the catalog as a snapshot
    pub fn to_json(&self) -> GenerationResult<String> {
        let snapshot = CatalogSnapshot {
            types: self.types.clone(),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Add a declaration, replacing any previous one with the same name
    pub fn insert(&mut self, decl: TypeDecl) -> TypeId {
        if let Some(&id) = self.index.get(&decl.qualified_name) {
            self.types[id.0] = decl;
            return id;
        }
        let id = TypeId(self.types.len());
        self.index.insert(decl.qualified_name.clone(), id);
        self.types.push(decl);
        id
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Declarations in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDecl)> {
        self.types
            .iter()
            .enumerate()
            .map(|(index, decl)| (TypeId(index), decl))
    }
}

impl FromIterator<TypeDecl> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = TypeDecl>>(iter: I) -> Self {
        let mut catalog = InMemoryCatalog::new();
        for decl in iter {
            catalog.insert(decl);
        }
        catalog
    }
}

impl TypeCatalog for InMemoryCatalog {
    fn lookup(&self, qualified_name: &str) -> Option<TypeId> {
        self.index.get(qualified_name).copied()
    }

    fn declaration(&self, id: TypeId) -> Option<&TypeDecl> {
        self.types.get(id.0)
    }
}
