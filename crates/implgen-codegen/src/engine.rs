//! Generation engine: turns a [`ClassModel`] into Java source.
//!
//! A run is planned once (target names, variant, members, retain strategies)
//! and then emitted phase by phase in a fixed order:
//!
//! ```text
//! Header → Fields → Constructors → Accessors → HashCode → Equals → ToString
//!        → [Clone] → [ListenerAccessors] → Close
//! ```
//!
//! Every configuration error surfaces while planning, so a failed run never
//! produces partial text.
//!
//! # Variants
//!
//! | Variant | Storage | Reads | Writes |
//! |---------|---------|-------|--------|
//! | [`Variant::Plain`] | plain fields | direct | direct |
//! | [`Variant::Locked`] | plain fields + `ReadWriteLock` | read lock | write lock |
//! | [`Variant::Atomic`] | one atomic cell per field | `get()` | `getAndSet()` / `set()` |
//!
//! Change notification is orthogonal to the variant: when the root type is
//! observable, every writer fires a `PropertyChangeEvent` after releasing any
//! lock, and only when the value actually changed.

mod accessors;
mod cloning;
mod constructors;
mod header;
mod listeners;
mod members;
mod object_methods;

pub use members::{AccessorMethod, Member, Storage};

use crate::code_writer::CodeWriter;
use crate::naming::{resolve_package, NamingStrategy, NamingStrategyKind};
use crate::retain::RetainTable;
use implgen_core::{
    ClassModel, ElementKind, GenerationConfig, GenerationError, GenerationResult, TypeCatalog,
    TypeRef,
};
use std::collections::HashSet;
use std::fmt::{self, Write as _};
use std::path::PathBuf;
use tracing::{debug, info};

/// Name of the per-instance lock field
pub const INSTANCE_LOCK: &str = "instanceLock";

/// Name of the notification dispatcher field
pub const PROPERTY_SUPPORT: &str = "propertySupport";

/// Annotation placed on every generated type
pub const GENERATED_MARKER: &str = "@javax.annotation.Generated(\"implgen\")";

const LOCK_TYPE: &str = "java.util.concurrent.locks.ReadWriteLock";
const LOCK_IMPL: &str = "java.util.concurrent.locks.ReentrantReadWriteLock";
const SUPPORT_TYPE: &str = "java.beans.PropertyChangeSupport";
const LISTENER_TYPE: &str = "java.beans.PropertyChangeListener";

/// Strategies resolved once per run
#[derive(Debug)]
pub struct StrategyTable {
    naming: Box<dyn NamingStrategy>,
    retain: RetainTable,
}

impl StrategyTable {
    pub fn new(naming: Box<dyn NamingStrategy>, retain: RetainTable) -> Self {
        Self { naming, retain }
    }

    /// Naming strategy selected by `config`, built-in retain strategies
    pub fn from_config(config: &GenerationConfig) -> GenerationResult<Self> {
        let kind: NamingStrategyKind = config.naming_strategy.parse()?;
        Ok(Self::new(kind.build(config), RetainTable::new()))
    }

    pub fn naming(&self) -> &dyn NamingStrategy {
        self.naming.as_ref()
    }

    pub fn retain(&self) -> &RetainTable {
        &self.retain
    }

    pub fn retain_mut(&mut self) -> &mut RetainTable {
        &mut self.retain
    }
}

/// Thread-safety model of the generated type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Plain,
    Locked,
    Atomic,
}

impl Variant {
    pub fn for_config(config: &GenerationConfig) -> Self {
        if config.uses_atomics() {
            Variant::Atomic
        } else if config.uses_lock() {
            Variant::Locked
        } else {
            Variant::Plain
        }
    }
}

/// Emission phases, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Header,
    Fields,
    Constructors,
    Accessors,
    HashCode,
    Equals,
    ToString,
    Clone,
    ListenerAccessors,
    Close,
}

/// Output of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub package: String,
    pub simple_name: String,
    pub is_abstract: bool,
    pub source: String,
}

impl GeneratedUnit {
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.simple_name.clone()
        } else {
            format!("{}.{}", self.package, self.simple_name)
        }
    }

    /// `<package path>/<Name>.java`
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self
            .package
            .split('.')
            .filter(|segment| !segment.is_empty())
            .collect();
        path.push(format!("{}.java", self.simple_name));
        path
    }
}

#[derive(Debug, Clone, Copy)]
enum LockMode {
    Read,
    Write,
}

impl LockMode {
    fn accessor(self) -> &'static str {
        match self {
            LockMode::Read => "readLock",
            LockMode::Write => "writeLock",
        }
    }
}

/// Everything decided before the first line is written
pub(crate) struct ClassPlan<'m> {
    model: &'m ClassModel,
    config: &'m GenerationConfig,
    package: String,
    simple_name: String,
    is_abstract: bool,
    variant: Variant,
    observable: bool,
    declares_lock: bool,
    declares_support: bool,
    members: Vec<Member<'m>>,
}

impl ClassPlan<'_> {
    fn phases(&self) -> Vec<Phase> {
        let mut phases = vec![
            Phase::Header,
            Phase::Fields,
            Phase::Constructors,
            Phase::Accessors,
            Phase::HashCode,
            Phase::Equals,
            Phase::ToString,
        ];
        if self.config.cloneable {
            phases.push(Phase::Clone);
        }
        if self.declares_support {
            phases.push(Phase::ListenerAccessors);
        }
        phases.push(Phase::Close);
        phases
    }

    fn emit<W: fmt::Write>(&self, phase: Phase, w: &mut CodeWriter<W>) -> fmt::Result {
        match phase {
            Phase::Header => header::emit_header(self, w),
            Phase::Fields => header::emit_fields(self, w),
            Phase::Constructors => constructors::emit(self, w),
            Phase::Accessors => accessors::emit(self, w),
            Phase::HashCode => object_methods::emit_hash_code(self, w),
            Phase::Equals => object_methods::emit_equals(self, w),
            Phase::ToString => object_methods::emit_to_string(self, w),
            Phase::Clone => cloning::emit(self, w),
            Phase::ListenerAccessors => listeners::emit(self, w),
            Phase::Close => w.writeln("}"),
        }
    }

    /// `Name<T, U>`
    fn self_type(&self) -> String {
        self.parameterized(|p| p.name.clone())
    }

    /// `Name<?, ?>`
    fn wildcard_type(&self) -> String {
        self.parameterized(|_| "?".to_string())
    }

    fn parameterized(&self, argument: impl Fn(&implgen_core::TypeParameter) -> String) -> String {
        if self.model.type_parameters.is_empty() {
            return self.simple_name.clone();
        }
        let arguments: Vec<String> = self.model.type_parameters.iter().map(argument).collect();
        format!("{}<{}>", self.simple_name, arguments.join(", "))
    }

    fn is_generic(&self) -> bool {
        !self.model.type_parameters.is_empty()
    }

    /// Object methods and clone delegate to a configured superclass
    fn delegates_to_super(&self) -> bool {
        self.config.super_type.is_some()
    }

    fn uses_lock(&self) -> bool {
        self.variant == Variant::Locked
    }

    /// Final unless clone has to rebind it
    fn instance_state_modifier(&self) -> &'static str {
        if self.config.cloneable { "" } else { "final " }
    }

    /// Run `body` under the read lock in the locked variant
    fn guarded_read<W, F>(&self, w: &mut CodeWriter<W>, body: F) -> fmt::Result
    where
        W: fmt::Write,
        F: FnOnce(&mut CodeWriter<W>) -> fmt::Result,
    {
        if self.uses_lock() {
            with_lock(w, LockMode::Read, body)
        } else {
            body(w)
        }
    }
}

fn with_lock<W, F>(w: &mut CodeWriter<W>, mode: LockMode, body: F) -> fmt::Result
where
    W: fmt::Write,
    F: FnOnce(&mut CodeWriter<W>) -> fmt::Result,
{
    writeln!(w, "this.{INSTANCE_LOCK}.{}().lock();", mode.accessor())?;
    w.try_finally(body, |w| {
        writeln!(w, "this.{INSTANCE_LOCK}.{}().unlock();", mode.accessor())
    })
}

/// Turns class models into generated units
pub struct GenerationEngine<'a> {
    catalog: &'a dyn TypeCatalog,
    config: &'a GenerationConfig,
    strategies: &'a StrategyTable,
}

impl<'a> GenerationEngine<'a> {
    pub fn new(
        catalog: &'a dyn TypeCatalog,
        config: &'a GenerationConfig,
        strategies: &'a StrategyTable,
    ) -> Self {
        Self {
            catalog,
            config,
            strategies,
        }
    }

    pub fn generate(&self, model: &ClassModel) -> GenerationResult<GeneratedUnit> {
        let plan = self.plan(model)?;

        let mut source = String::new();
        let mut w = CodeWriter::new(&mut source);
        let mut body_indent = None;
        for phase in plan.phases() {
            debug!(?phase, class = %plan.simple_name, "emitting phase");
            if phase == Phase::Close {
                drop(body_indent.take());
            }
            plan.emit(phase, &mut w)?;
            if phase == Phase::Header {
                body_indent = Some(w.indent());
            }
        }

        let unit = GeneratedUnit {
            package: plan.package,
            simple_name: plan.simple_name,
            is_abstract: plan.is_abstract,
            source,
        };
        info!(class = %unit.qualified_name(), is_abstract = unit.is_abstract, "generated");
        Ok(unit)
    }

    fn plan<'m>(&'m self, model: &'m ClassModel) -> GenerationResult<ClassPlan<'m>> {
        if model.simple_name.is_empty() {
            return Err(GenerationError::MalformedTypeDescriptor(
                "class model has no root type name".to_string(),
            ));
        }
        if model.element_kind == ElementKind::AbstractClass
            && let Some(super_type) = &self.config.super_type
        {
            return Err(GenerationError::ConfigError(format!(
                "'{}' is an abstract class and is extended directly; super_type '{super_type}' cannot be used",
                model.qualified_name()
            )));
        }

        let is_abstract = model.should_stay_abstract() || self.config.generate_abstract;
        let naming = self.strategies.naming();
        let simple_name = match &self.config.class_name {
            Some(name) => name.clone(),
            None if is_abstract => naming.abstract_name_for(&model.simple_name)?,
            None => naming.concrete_name_for(&model.simple_name)?,
        };
        let package = resolve_package(&model.package, self.config);

        let root_name = model.qualified_name();
        let observable = root_name != self.config.observable_marker
            && self
                .catalog
                .is_subtype(&TypeRef::declared(root_name.as_str()), &self.config.observable_marker);
        let variant = Variant::for_config(self.config);
        let inherits_lock = variant == Variant::Locked && self.inherits_field(model, INSTANCE_LOCK);
        let inherits_support = observable && self.inherits_field(model, PROPERTY_SUPPORT);
        let declares_lock = variant == Variant::Locked && !inherits_lock;
        let declares_support = observable && !inherits_support;

        // Inherited lock and dispatcher are instance state, not attributes
        let mut runtime_fields = Vec::new();
        if inherits_lock {
            runtime_fields.push(INSTANCE_LOCK);
        }
        if inherits_support {
            runtime_fields.push(PROPERTY_SUPPORT);
        }
        let members =
            members::plan_members(model, variant, self.strategies.retain(), &runtime_fields)?;
        debug!(
            class = %simple_name,
            ?variant,
            observable,
            is_abstract,
            members = members.len(),
            "planned generation"
        );

        Ok(ClassPlan {
            model,
            config: self.config,
            package,
            simple_name,
            is_abstract,
            variant,
            observable,
            declares_lock,
            declares_support,
            members,
        })
    }

    /// True if the superclass chain of the generated type declares `field`
    fn inherits_field(&self, model: &ClassModel, field: &str) -> bool {
        let mut pending: Vec<_> = self.config.super_type.iter().cloned().collect();
        if model.element_kind == ElementKind::AbstractClass {
            pending.push(TypeRef::declared(model.qualified_name()));
        }

        let mut visited = HashSet::new();
        while let Some(ty) = pending.pop() {
            let Some(id) = self.catalog.resolve(&ty) else {
                continue;
            };
            if !visited.insert(id) {
                continue;
            }
            let Some(decl) = self.catalog.declaration(id) else {
                continue;
            };
            if decl.fields.iter().any(|f| f.name == field && !f.is_static) {
                return true;
            }
            pending.extend(decl.supertypes.iter().cloned());
        }
        false
    }
}
