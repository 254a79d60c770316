//! Attribute and class model
//!
//! The walker fills a [`ClassModel`] with every [`Property`] (from accessor
//! methods) and [`Field`] (from declared fields) found across the supertype
//! lattice of a root type. Attributes are identified by `(name, declared type)`;
//! the model never holds two properties or two fields with the same identity.

use crate::catalog::{
    ElementKind, FieldAnnotation, MethodDecl, PropertyAnnotation, TypeDecl, DEFAULT_RETAIN,
};
use crate::types::{TypeParameter, TypeRef, Visibility};

/// State shared by properties and fields
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDescriptor {
    pub name: String,
    pub declared_type: TypeRef,
    pub retain: String,
    pub real_type: Option<TypeRef>,
    pub ignored: bool,
}

impl AttributeDescriptor {
    pub fn new(name: impl Into<String>, declared_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            declared_type,
            retain: DEFAULT_RETAIN.to_string(),
            real_type: None,
            ignored: false,
        }
    }

    /// Same name and nominally equal type
    pub fn same_identity(&self, other: &AttributeDescriptor) -> bool {
        self.name == other.name && self.declared_type == other.declared_type
    }
}

/// Read access to the common attribute state
pub trait Attribute {
    fn descriptor(&self) -> &AttributeDescriptor;

    fn name(&self) -> &str {
        &self.descriptor().name
    }

    fn declared_type(&self) -> &TypeRef {
        &self.descriptor().declared_type
    }

    fn retain(&self) -> &str {
        &self.descriptor().retain
    }

    /// Concrete type to instantiate when copying; the declared type if unset
    fn real_type(&self) -> &TypeRef {
        self.descriptor()
            .real_type
            .as_ref()
            .unwrap_or(&self.descriptor().declared_type)
    }

    fn is_ignored(&self) -> bool {
        self.descriptor().ignored
    }

    fn is_boolean(&self) -> bool {
        self.declared_type().is_boolean()
    }

    fn is_primitive(&self) -> bool {
        self.declared_type().is_primitive()
    }
}

/// Reference to the declaration an accessor came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRef {
    /// Qualified name of the declaring type
    pub owner: String,
    pub name: String,
    pub parameter_types: Vec<TypeRef>,
    pub return_type: Option<TypeRef>,
}

impl MethodRef {
    pub fn new(owner: &TypeDecl, method: &MethodDecl) -> Self {
        Self {
            owner: owner.qualified_name.clone(),
            name: method.name.clone(),
            parameter_types: method.parameters.iter().map(|p| p.ty.clone()).collect(),
            return_type: method.return_type.clone(),
        }
    }
}

/// Attribute backed by accessor methods
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub descriptor: AttributeDescriptor,
    /// Declared on the root type itself
    pub defined_locally: bool,
    pub reader: Option<MethodRef>,
    pub writer: Option<MethodRef>,
    pub field_paired: bool,
}

impl Property {
    pub fn new(name: impl Into<String>, declared_type: TypeRef) -> Self {
        Self {
            descriptor: AttributeDescriptor::new(name, declared_type),
            defined_locally: false,
            reader: None,
            writer: None,
            field_paired: false,
        }
    }

    pub fn with_reader(mut self, reader: MethodRef) -> Self {
        self.reader = Some(reader);
        self
    }

    pub fn with_writer(mut self, writer: MethodRef) -> Self {
        self.writer = Some(writer);
        self
    }

    pub fn defined_locally(mut self, defined_locally: bool) -> Self {
        self.defined_locally = defined_locally;
        self
    }

    /// Apply resolved annotation values
    pub fn annotate(&mut self, annotation: &PropertyAnnotation) {
        self.descriptor.retain = annotation.retain.clone();
        self.descriptor.real_type = annotation.real_type.clone();
        self.descriptor.ignored = annotation.ignore;
    }

    pub fn is_readable(&self) -> bool {
        self.reader.is_some()
    }

    pub fn is_writable(&self) -> bool {
        self.writer.is_some()
    }

    /// Fold a same-identity candidate found elsewhere in the lattice
    ///
    /// Accessors are only ever added: a reader captured earlier survives a
    /// candidate that only carries a writer, and the other way round.
    pub fn merge(&mut self, candidate: Property) {
        if candidate.reader.is_some() {
            self.reader = candidate.reader;
        }
        if candidate.writer.is_some() {
            self.writer = candidate.writer;
        }
        self.defined_locally |= candidate.defined_locally;

        let descriptor = candidate.descriptor;
        if descriptor.retain != DEFAULT_RETAIN {
            self.descriptor.retain = descriptor.retain;
        }
        if descriptor.real_type.is_some() {
            self.descriptor.real_type = descriptor.real_type;
        }
        self.descriptor.ignored |= descriptor.ignored;
    }
}

impl Attribute for Property {
    fn descriptor(&self) -> &AttributeDescriptor {
        &self.descriptor
    }
}

/// Attribute backed by a declared field
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub descriptor: AttributeDescriptor,
    pub property_paired: bool,
    pub read_only: bool,
    pub accessor_visibility: Visibility,
}

impl Field {
    pub fn new(name: impl Into<String>, declared_type: TypeRef) -> Self {
        Self {
            descriptor: AttributeDescriptor::new(name, declared_type),
            property_paired: false,
            read_only: false,
            accessor_visibility: Visibility::Public,
        }
    }

    /// Apply resolved annotation values
    pub fn annotate(&mut self, annotation: &FieldAnnotation) {
        self.descriptor.retain = annotation.retain.clone();
        self.descriptor.real_type = annotation.real_type.clone();
        self.descriptor.ignored = annotation.ignore;
        self.read_only = annotation.read_only;
        self.accessor_visibility = annotation.accessor_visibility;
    }

    /// No property shares this field's identity
    pub fn is_inner(&self) -> bool {
        !self.property_paired
    }
}

impl Attribute for Field {
    fn descriptor(&self) -> &AttributeDescriptor {
        &self.descriptor
    }
}

/// Aggregate metadata of one root type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassModel {
    pub package: String,
    pub simple_name: String,
    pub element_kind: ElementKind,
    pub type_parameters: Vec<TypeParameter>,
    properties: Vec<Property>,
    fields: Vec<Field>,
    plain_methods: Vec<MethodRef>,
}

impl ClassModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the root type's identity
    pub fn set_root(&mut self, decl: &TypeDecl) {
        self.package = decl.package().to_string();
        self.simple_name = decl.simple_name().to_string();
        self.element_kind = decl.kind;
        self.type_parameters = decl.type_parameters.clone();
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn plain_methods(&self) -> &[MethodRef] {
        &self.plain_methods
    }

    /// Insert a property, or merge it into the one sharing its identity
    pub fn add_property(&mut self, mut candidate: Property) {
        if let Some(existing) = self
            .properties
            .iter_mut()
            .find(|p| p.descriptor.same_identity(&candidate.descriptor))
        {
            existing.merge(candidate);
            return;
        }

        if let Some(field) = self
            .fields
            .iter_mut()
            .find(|f| f.descriptor.same_identity(&candidate.descriptor))
        {
            field.property_paired = true;
            candidate.field_paired = true;
        }
        self.properties.push(candidate);
    }

    /// Insert a field unless one with the same identity is already present
    ///
    /// Returns `false` for the duplicate reached through a second path of a
    /// diamond.
    pub fn add_field(&mut self, mut field: Field) -> bool {
        if self
            .fields
            .iter()
            .any(|f| f.descriptor.same_identity(&field.descriptor))
        {
            return false;
        }

        if let Some(property) = self
            .properties
            .iter_mut()
            .find(|p| p.descriptor.same_identity(&field.descriptor))
        {
            property.field_paired = true;
            field.property_paired = true;
        }
        self.fields.push(field);
        true
    }

    pub fn add_plain_method(&mut self, method: MethodRef) {
        if !self.plain_methods.contains(&method) {
            self.plain_methods.push(method);
        }
    }

    /// Fields without a matching property, in discovery order
    pub fn inner_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_inner())
    }

    pub fn has_ignored_property(&self) -> bool {
        self.properties.iter().any(|p| p.is_ignored())
    }

    /// The generated type cannot be concrete
    pub fn should_stay_abstract(&self) -> bool {
        !self.plain_methods.is_empty() || self.has_ignored_property()
    }

    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.simple_name.clone()
        } else {
            format!("{}.{}", self.package, self.simple_name)
        }
    }

    /// The root type as a reference, parameterized by its own type variables
    pub fn root_type(&self) -> TypeRef {
        TypeRef::generic(
            self.qualified_name(),
            self.type_parameters
                .iter()
                .map(|p| TypeRef::declared(p.name.clone()))
                .collect(),
        )
    }

    pub fn find_property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name() == name)
    }

    pub fn find_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }
}
