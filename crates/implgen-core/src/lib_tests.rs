#![allow(non_snake_case)]

use super::prelude::*;

#[test]
fn prelude___exposes_catalog_and_model___for_a_minimal_walk() {
    let catalog: InMemoryCatalog = [TypeDecl::interface("com.example.Point")]
        .into_iter()
        .collect();
    let id = catalog.lookup("com.example.Point").unwrap();
    let mut model = ClassModel::new();

    model.set_root(catalog.declaration(id).unwrap());
    model.add_property(Property::new("x", TypeRef::primitive(PrimitiveKind::Int)));

    assert_eq!(model.qualified_name(), "com.example.Point");
    assert_eq!(model.properties()[0].name(), "x");
}

#[test]
fn prelude___default_config___validates() {
    let config = GenerationConfig::default();

    assert!(config.validate().is_ok());
}
