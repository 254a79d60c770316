//! Retain strategies: how a reference value is held by the generated type.
//!
//! Each attribute names its strategy with a textual key (`HOLD`, `COPY`,
//! `CLONE`, or anything registered on a [`RetainTable`]). The strategy turns
//! an expression into the expression that is actually stored or returned.
//! Primitive attributes never go through a strategy.

use implgen_core::{Attribute, GenerationError, GenerationResult, TypeRef, DEFAULT_RETAIN};
use std::collections::HashMap;
use std::fmt;

/// Produces the expression that retains `expression` for `attribute`
pub trait RetainStrategy: fmt::Debug {
    fn code_for(&self, expression: &str, attribute: &dyn Attribute) -> String;
}

/// Keep the reference as given
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldRetain;

impl RetainStrategy for HoldRetain {
    fn code_for(&self, expression: &str, _attribute: &dyn Attribute) -> String {
        expression.to_string()
    }
}

/// Defensive copy through the real type's copy constructor
///
/// Arrays are copied with `clone()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyRetain;

impl RetainStrategy for CopyRetain {
    fn code_for(&self, expression: &str, attribute: &dyn Attribute) -> String {
        if attribute.declared_type().is_array() {
            return format!("({expression} == null ? null : {expression}.clone())");
        }

        let real_type = attribute.real_type();
        let constructed = match real_type {
            TypeRef::Declared { name, arguments }
                if arguments.is_empty() && !attribute.declared_type().arguments().is_empty() =>
            {
                format!("{name}<>")
            }
            other => other.to_string(),
        };
        format!("({expression} == null ? null : new {constructed}({expression}))")
    }
}

/// Defensive copy through `clone()`, for date-like types
#[derive(Debug, Clone, Copy, Default)]
pub struct CloneRetain;

impl RetainStrategy for CloneRetain {
    fn code_for(&self, expression: &str, attribute: &dyn Attribute) -> String {
        format!(
            "({expression} == null ? null : ({}) {expression}.clone())",
            attribute.declared_type()
        )
    }
}

/// Retain strategies by key
#[derive(Debug)]
pub struct RetainTable {
    strategies: HashMap<String, Box<dyn RetainStrategy>>,
}

impl RetainTable {
    /// Table holding `HOLD`, `COPY` and `CLONE`
    pub fn new() -> Self {
        let mut table = Self::empty();
        table.register(DEFAULT_RETAIN, HoldRetain);
        table.register("COPY", CopyRetain);
        table.register("CLONE", CloneRetain);
        table
    }

    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Add or replace the strategy for `key`
    pub fn register(&mut self, key: impl Into<String>, strategy: impl RetainStrategy + 'static) {
        self.strategies.insert(key.into(), Box::new(strategy));
    }

    pub fn resolve(&self, key: &str) -> GenerationResult<&dyn RetainStrategy> {
        self.strategies
            .get(key)
            .map(|strategy| strategy.as_ref())
            .ok_or_else(|| GenerationError::UnknownRetainKind(key.to_string()))
    }

    /// Strategy for `attribute`; `None` for primitives, which bypass retaining
    pub fn strategy_for(
        &self,
        attribute: &dyn Attribute,
    ) -> GenerationResult<Option<&dyn RetainStrategy>> {
        if attribute.is_primitive() {
            return Ok(None);
        }
        let strategy = self.resolve(attribute.retain()).map_err(|_| {
            GenerationError::UnknownRetainKind(format!(
                "{} (attribute '{}')",
                attribute.retain(),
                attribute.name()
            ))
        })?;
        Ok(Some(strategy))
    }

    /// Retained form of `expression` for `attribute`
    #[cfg(test)]
    fn apply(&self, expression: &str, attribute: &dyn Attribute) -> GenerationResult<String> {
        Ok(match self.strategy_for(attribute)? {
            Some(strategy) => strategy.code_for(expression, attribute),
            None => expression.to_string(),
        })
    }
}

impl Default for RetainTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use implgen_core::{PrimitiveKind, Property, PropertyAnnotation};

    fn property(ty: &str, retain: &str, real_type: Option<&str>) -> Property {
        let mut property = Property::new("value", TypeRef::parse(ty).unwrap());
        property.annotate(&PropertyAnnotation {
            retain: retain.into(),
            real_type: real_type.map(|t| TypeRef::parse(t).unwrap()),
            ignore: false,
        });
        property
    }

    #[test]
    fn RetainTable___hold___returns_expression_unchanged() {
        let table = RetainTable::new();
        let attribute = property("java.util.List<java.lang.String>", "HOLD", None);

        let code = table.apply("names", &attribute).unwrap();

        assert_eq!(code, "names");
    }

    #[test]
    fn RetainTable___copy_with_real_type___uses_diamond_constructor() {
        let table = RetainTable::new();
        let attribute = property(
            "java.util.List<java.lang.String>",
            "COPY",
            Some("java.util.ArrayList"),
        );

        let code = table.apply("names", &attribute).unwrap();

        assert_eq!(
            code,
            "(names == null ? null : new java.util.ArrayList<>(names))"
        );
    }

    #[test]
    fn RetainTable___copy_without_real_type___uses_declared_type() {
        let table = RetainTable::new();
        let attribute = property("java.util.ArrayList<java.lang.String>", "COPY", None);

        let code = table.apply("this.names", &attribute).unwrap();

        assert_eq!(
            code,
            "(this.names == null ? null : new java.util.ArrayList<java.lang.String>(this.names))"
        );
    }

    #[test]
    fn RetainTable___copy_array___clones() {
        let table = RetainTable::new();
        let attribute = property("byte[]", "COPY", None);

        let code = table.apply("data", &attribute).unwrap();

        assert_eq!(code, "(data == null ? null : data.clone())");
    }

    #[test]
    fn RetainTable___clone___casts_clone_result() {
        let table = RetainTable::new();
        let attribute = property("java.util.Date", "CLONE", None);

        let code = table.apply("since", &attribute).unwrap();

        assert_eq!(
            code,
            "(since == null ? null : (java.util.Date) since.clone())"
        );
    }

    #[test]
    fn RetainTable___primitive_with_unknown_key___bypasses_strategy() {
        let table = RetainTable::new();
        let mut attribute = Property::new("count", TypeRef::primitive(PrimitiveKind::Int));
        attribute.descriptor.retain = "DEEP".into();

        let code = table.apply("count", &attribute).unwrap();

        assert_eq!(code, "count");
    }

    #[test]
    fn RetainTable___unknown_key___returns_unknown_retain_kind() {
        let table = RetainTable::new();
        let attribute = property("java.lang.Object", "DEEP", None);

        let result = table.apply("x", &attribute);

        assert!(matches!(result, Err(GenerationError::UnknownRetainKind(_))));
    }

    #[test]
    fn RetainTable___register___extends_known_keys() {
        #[derive(Debug)]
        struct Immutable;

        impl RetainStrategy for Immutable {
            fn code_for(&self, expression: &str, _attribute: &dyn Attribute) -> String {
                format!("java.util.Collections.unmodifiableList({expression})")
            }
        }

        let mut table = RetainTable::new();
        table.register("IMMUTABLE", Immutable);
        let attribute = property("java.util.List<java.lang.String>", "IMMUTABLE", None);

        let code = table.apply("names", &attribute).unwrap();

        assert!(table.resolve("IMMUTABLE").is_ok());
        assert_eq!(code, "java.util.Collections.unmodifiableList(names)");
    }

    #[test]
    fn RetainTable___empty___resolves_nothing() {
        let table = RetainTable::empty();

        assert!(table.resolve("HOLD").is_err());
    }
}
