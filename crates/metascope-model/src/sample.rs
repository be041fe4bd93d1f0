//! The declarative sample hierarchy
//!
//! A fixed fixture set exercising the declared-vs-inclusive distinction:
//! an inheritable `Custom` kind, an interface with an annotated method, a
//! superclass with a class-level annotation and an annotated public field,
//! and a subclass that extends the superclass, implements the interface, and
//! overrides the method without re-annotating it.

use crate::decl::{Annotation, AnnotationKind, FieldDecl, KindId, MethodDecl, TypeDecl, TypeId};
use crate::error::MetaError;
use crate::registry::TypeRegistry;

/// Handles into the sample registry
#[derive(Debug, Clone, Copy)]
pub struct SampleTypes {
    /// The `Custom` annotation kind (inherited)
    pub custom: KindId,
    /// `TestInterface`, declaring the annotated `test_method`
    pub interface: TypeId,
    /// `TestSuperclass`, class-annotated, with the annotated `test_field`
    pub superclass: TypeId,
    /// `TestSubclass`, extends the superclass, implements the interface,
    /// overrides `test_method` without annotations
    pub subclass: TypeId,
}

/// Build the sample registry
pub fn sample_registry() -> Result<(TypeRegistry, SampleTypes), MetaError> {
    let mut registry = TypeRegistry::new();

    let custom = registry.register_kind(AnnotationKind::inherited("Custom"))?;

    let interface = registry.register(
        TypeDecl::interface("TestInterface")
            .method(MethodDecl::new("test_method").annotated(Annotation::new(custom, "Method"))),
    )?;

    let superclass = registry.register(
        TypeDecl::class("TestSuperclass")
            .annotated(Annotation::new(custom, "Class"))
            .field(FieldDecl::new("test_field").annotated(Annotation::new(custom, "Field"))),
    )?;

    let subclass = registry.register(
        TypeDecl::class("TestSubclass")
            .extends(superclass)
            .implements(interface)
            .method(MethodDecl::new("test_method")),
    )?;

    Ok((
        registry,
        SampleTypes {
            custom,
            interface,
            superclass,
            subclass,
        },
    ))
}
