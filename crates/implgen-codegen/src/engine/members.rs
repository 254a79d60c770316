//! Member planning: what is stored, accessed and constructed for each attribute.

use super::Variant;
use crate::jvm_types::CellKind;
use crate::naming::{reader_name, safe_name, writer_name};
use crate::retain::{RetainStrategy, RetainTable};
use implgen_core::{Attribute, ClassModel, GenerationResult, MethodRef, TypeRef, Visibility};
use tracing::trace;

/// Locals declared by generated setters
const SETTER_LOCALS: &[&str] = &["oldValue", "newValue", "changed", "oldPacked", "newPacked"];

/// Where a member's state lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// Declared by the generated type
    Generated,
    /// Declared by the abstract root or its superclasses
    Inherited,
}

/// Accessor method emitted for a member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorMethod {
    pub name: String,
    pub visibility: Visibility,
    pub is_override: bool,
}

impl AccessorMethod {
    fn implementing(method: &MethodRef) -> Self {
        Self {
            name: method.name.clone(),
            visibility: Visibility::Public,
            is_override: true,
        }
    }
}

/// One attribute of the generated type, ready for emission
pub struct Member<'m> {
    pub attribute: &'m dyn Attribute,
    pub field_name: String,
    pub storage: Storage,
    /// Atomic cell holding the value; only generated storage in the atomic variant
    pub cell: Option<CellKind>,
    pub reader: Option<AccessorMethod>,
    pub writer: Option<AccessorMethod>,
    pub in_constructor: bool,
    pub in_read_only_constructor: bool,
    retain: Option<&'m dyn RetainStrategy>,
}

impl Member<'_> {
    pub fn name(&self) -> &str {
        self.attribute.name()
    }

    pub fn ty(&self) -> &TypeRef {
        self.attribute.declared_type()
    }

    /// `expression` passed through the retain strategy
    pub fn retained(&self, expression: &str) -> String {
        match self.retain {
            Some(strategy) => strategy.code_for(expression, self.attribute),
            None => expression.to_string(),
        }
    }

    /// Current value of the member on `receiver`
    pub fn read_from(&self, receiver: &str) -> String {
        match &self.cell {
            Some(cell) => cell.unpack(&format!("{receiver}.{}.get()", self.field_name)),
            None => format!("{receiver}.{}", self.field_name),
        }
    }

    /// Statement storing `value` on `receiver`
    pub fn store(&self, receiver: &str, value: &str) -> String {
        match &self.cell {
            Some(cell) => format!("{receiver}.{}.set({});", self.field_name, cell.pack(value)),
            None => format!("{receiver}.{} = {value};", self.field_name),
        }
    }

    /// Setter parameter name, clear of the setter's own locals
    pub fn setter_parameter(&self) -> String {
        if SETTER_LOCALS.contains(&self.field_name.as_str()) {
            "value".to_string()
        } else {
            self.field_name.clone()
        }
    }
}

/// Inner fields first, then non-ignored properties, in model order
///
/// Inner fields named in `runtime_fields` hold the inherited lock or
/// dispatcher and are left out. Retain strategies are resolved here so
/// unknown keys fail before any text is emitted.
pub(super) fn plan_members<'m>(
    model: &'m ClassModel,
    variant: Variant,
    retain: &'m RetainTable,
    runtime_fields: &[&str],
) -> GenerationResult<Vec<Member<'m>>> {
    let mut members = Vec::new();

    for field in model.inner_fields() {
        if runtime_fields.contains(&field.name()) {
            trace!(field = field.name(), "inherited instance state, not a member");
            continue;
        }
        let strategy = retain.strategy_for(field)?;
        let exposed = !field.is_ignored();
        let accessor = |name: String| AccessorMethod {
            name,
            visibility: field.accessor_visibility,
            is_override: false,
        };
        members.push(Member {
            attribute: field,
            field_name: safe_name(field.name()),
            storage: Storage::Inherited,
            cell: None,
            reader: exposed.then(|| accessor(reader_name(field.name(), field.is_boolean()))),
            writer: (exposed && !field.read_only).then(|| accessor(writer_name(field.name()))),
            in_constructor: exposed,
            in_read_only_constructor: exposed,
            retain: strategy,
        });
    }

    for property in model.properties() {
        if property.is_ignored() {
            trace!(property = property.name(), "ignored property left to subclasses");
            continue;
        }
        let strategy = retain.strategy_for(property)?;
        let storage = if property.field_paired {
            Storage::Inherited
        } else {
            Storage::Generated
        };
        let generated = storage == Storage::Generated;
        members.push(Member {
            attribute: property,
            field_name: safe_name(property.name()),
            storage,
            cell: (generated && variant == Variant::Atomic)
                .then(|| CellKind::for_type(property.declared_type())),
            reader: property.reader.as_ref().map(AccessorMethod::implementing),
            writer: property.writer.as_ref().map(AccessorMethod::implementing),
            in_constructor: generated,
            in_read_only_constructor: generated
                && property.is_readable()
                && !property.is_writable(),
            retain: strategy,
        });
    }

    Ok(members)
}
