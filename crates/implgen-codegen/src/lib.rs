//! implgen-codegen - Java implementation generator
//!
//! This crate turns an abstract Java type into the source of a concrete
//! implementation:
//! - [`walker`] collects properties, fields and plain methods across the
//!   supertype lattice into a [`ClassModel`](implgen_core::ClassModel)
//! - [`naming`] and [`retain`] hold the pluggable naming and retain strategies
//! - [`engine`] emits the class in the plain, lock-guarded or atomic variant,
//!   with optional change notification
//!
//! [`generate`] runs the whole pipeline for one root type:
//!
//! ```
//! use implgen_codegen::generate;
//! use implgen_core::{GenerationConfig, InMemoryCatalog, MethodDecl, TypeDecl, TypeRef};
//!
//! let catalog: InMemoryCatalog = [TypeDecl::interface("com.example.Customer")
//!     .with_method(MethodDecl::getter("getName", TypeRef::declared("java.lang.String")))]
//! .into_iter()
//! .collect();
//!
//! let unit = generate(&catalog, "com.example.Customer", &GenerationConfig::default())
//!     .unwrap()
//!     .unwrap();
//!
//! assert_eq!(unit.qualified_name(), "com.example.impl.CustomerImpl");
//! ```

pub mod code_writer;
pub mod engine;
pub mod jvm_types;
pub mod naming;
pub mod retain;
pub mod walker;

pub use engine::{GeneratedUnit, GenerationEngine, Phase, StrategyTable, Variant};
pub use naming::{DefaultNaming, NamingStrategy, NamingStrategyKind, RemovePrefixNaming};
pub use retain::{CloneRetain, CopyRetain, HoldRetain, RetainStrategy, RetainTable};
pub use walker::{
    ExcludeObservableFilter, IgnoreSupertypesFilter, SupertypeFilter, TypeDescriptorGraphWalker,
};

use implgen_core::{GenerationConfig, GenerationResult, TypeCatalog};
use tracing::debug;

/// Generate the implementation of `root` with the built-in strategies
///
/// Returns `Ok(None)` when `auto_generate` is off.
pub fn generate(
    catalog: &dyn TypeCatalog,
    root: &str,
    config: &GenerationConfig,
) -> GenerationResult<Option<GeneratedUnit>> {
    if !config.auto_generate {
        debug!(root, "auto_generate is off, skipping");
        return Ok(None);
    }
    let strategies = StrategyTable::from_config(config)?;
    generate_with(catalog, root, config, &strategies)
}

/// Generate the implementation of `root` with caller-supplied strategies
pub fn generate_with(
    catalog: &dyn TypeCatalog,
    root: &str,
    config: &GenerationConfig,
    strategies: &StrategyTable,
) -> GenerationResult<Option<GeneratedUnit>> {
    if !config.auto_generate {
        debug!(root, "auto_generate is off, skipping");
        return Ok(None);
    }
    config.validate()?;

    let observable_filter = ExcludeObservableFilter::new(config.observable_marker.clone());
    let filter: &dyn SupertypeFilter = if config.ignore_super_interfaces {
        &IgnoreSupertypesFilter
    } else {
        &observable_filter
    };
    let model = TypeDescriptorGraphWalker::new(catalog, filter).walk(root)?;

    GenerationEngine::new(catalog, config, strategies)
        .generate(&model)
        .map(Some)
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        generate, generate_with, GeneratedUnit, GenerationEngine, NamingStrategy,
        RetainStrategy, RetainTable, StrategyTable, SupertypeFilter, TypeDescriptorGraphWalker,
    };
}
