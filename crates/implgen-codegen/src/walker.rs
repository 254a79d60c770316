//! Supertype-lattice walk that builds a [`ClassModel`].
//!
//! The walk is depth-first: supertypes accepted by the [`SupertypeFilter`] are
//! visited before the members of the type itself, so attributes are recorded
//! deepest-first and the root's declarations are merged last. Each type is
//! visited at most once, which keeps diamonds and accidental cycles finite.

use crate::naming::uncapitalize;
use implgen_core::{
    ClassModel, Field, GenerationError, GenerationResult, MethodDecl, MethodRef, Property,
    TypeCatalog, TypeDecl, TypeId, TypeRef,
};
use std::collections::HashSet;
use tracing::{debug, trace, warn};

/// Decides which supertypes contribute members
pub trait SupertypeFilter {
    fn can_handle(&self, catalog: &dyn TypeCatalog, supertype: &TypeRef) -> bool;
}

/// Skips the observable capability interface and everything below it
#[derive(Debug, Clone)]
pub struct ExcludeObservableFilter {
    marker: String,
}

impl ExcludeObservableFilter {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl SupertypeFilter for ExcludeObservableFilter {
    fn can_handle(&self, catalog: &dyn TypeCatalog, supertype: &TypeRef) -> bool {
        !catalog.is_subtype(supertype, &self.marker)
    }
}

/// Walks the root type only
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreSupertypesFilter;

impl SupertypeFilter for IgnoreSupertypesFilter {
    fn can_handle(&self, _catalog: &dyn TypeCatalog, _supertype: &TypeRef) -> bool {
        false
    }
}

/// Accessor shape of a method
#[derive(Debug, Clone, PartialEq)]
enum Accessor {
    Reader { property: String, ty: TypeRef },
    Writer { property: String, ty: TypeRef },
}

/// `getX()`, `isX()` (boolean only) and `setX(x)` are accessors
fn accessor_shape(method: &MethodDecl) -> Option<Accessor> {
    match (method.parameters.as_slice(), &method.return_type) {
        ([], Some(ty)) => {
            let rest = match method.name.strip_prefix("get") {
                Some(rest) => rest,
                None if ty.is_boolean() => method.name.strip_prefix("is")?,
                None => return None,
            };
            (!rest.is_empty()).then(|| Accessor::Reader {
                property: uncapitalize(rest),
                ty: ty.clone(),
            })
        }
        ([parameter], None) => {
            let rest = method.name.strip_prefix("set")?;
            (!rest.is_empty()).then(|| Accessor::Writer {
                property: uncapitalize(rest),
                ty: parameter.ty.clone(),
            })
        }
        _ => None,
    }
}

/// Builds a [`ClassModel`] from a root type and its supertypes
pub struct TypeDescriptorGraphWalker<'a> {
    catalog: &'a dyn TypeCatalog,
    filter: &'a dyn SupertypeFilter,
}

impl<'a> TypeDescriptorGraphWalker<'a> {
    pub fn new(catalog: &'a dyn TypeCatalog, filter: &'a dyn SupertypeFilter) -> Self {
        Self { catalog, filter }
    }

    /// Walk the lattice rooted at `root`
    ///
    /// Fails without a partial model if the name is empty, unknown, or names
    /// something other than an interface or abstract class.
    pub fn walk(&self, root: &str) -> GenerationResult<ClassModel> {
        if root.trim().is_empty() {
            return Err(GenerationError::MalformedTypeDescriptor(
                "root type has an empty qualified name".to_string(),
            ));
        }

        let id = self
            .catalog
            .lookup(root)
            .ok_or_else(|| GenerationError::UnknownType(root.to_string()))?;
        let decl = self
            .catalog
            .declaration(id)
            .ok_or_else(|| GenerationError::UnknownType(root.to_string()))?;
        if !decl.kind.is_abstract() {
            return Err(GenerationError::MalformedTypeDescriptor(format!(
                "'{root}' is neither an interface nor an abstract class"
            )));
        }

        let mut model = ClassModel::new();
        let mut visited = HashSet::new();
        self.visit(id, 0, &mut model, &mut visited);

        debug!(
            root,
            properties = model.properties().len(),
            fields = model.fields().len(),
            plain_methods = model.plain_methods().len(),
            "walk complete"
        );
        Ok(model)
    }

    fn visit(&self, id: TypeId, level: usize, model: &mut ClassModel, visited: &mut HashSet<TypeId>) {
        if !visited.insert(id) {
            return;
        }
        let Some(decl) = self.catalog.declaration(id) else {
            return;
        };
        debug!(type_name = %decl.qualified_name, level, "visiting type");

        if decl.kind.is_abstract() {
            for supertype in &decl.supertypes {
                if !self.filter.can_handle(self.catalog, supertype) {
                    debug!(%supertype, "supertype excluded by filter");
                    continue;
                }
                match self.catalog.resolve(supertype) {
                    Some(super_id) => self.visit(super_id, level + 1, model, visited),
                    None => warn!(%supertype, "supertype not found in catalog, skipping"),
                }
            }
        }

        if level == 0 {
            model.set_root(decl);
        }

        self.collect_fields(decl, model);
        self.collect_methods(decl, level, model);
    }

    fn collect_fields(&self, decl: &TypeDecl, model: &mut ClassModel) {
        for field_decl in decl.fields.iter().filter(|f| !f.is_static) {
            let mut field = Field::new(field_decl.name.clone(), field_decl.ty.clone());
            if let Some(annotation) = &field_decl.annotation {
                field.annotate(annotation);
            }
            if !model.add_field(field) {
                trace!(field = %field_decl.name, "duplicate field skipped");
            }
        }
    }

    fn collect_methods(&self, decl: &TypeDecl, level: usize, model: &mut ClassModel) {
        for method in decl.methods.iter().filter(|m| !m.is_static && !m.has_body) {
            let origin = MethodRef::new(decl, method);
            let mut property = match accessor_shape(method) {
                Some(Accessor::Reader { property, ty }) => {
                    Property::new(property, ty).with_reader(origin)
                }
                Some(Accessor::Writer { property, ty }) => {
                    Property::new(property, ty).with_writer(origin)
                }
                None => {
                    model.add_plain_method(origin);
                    continue;
                }
            };
            property.defined_locally = level == 0;
            if let Some(annotation) = &method.annotation {
                property.annotate(annotation);
            }
            trace!(property = property.descriptor.name.as_str(), method = %method.name, "accessor found");
            model.add_property(property);
        }
    }
}
