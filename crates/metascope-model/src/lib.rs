//! Metascope Metadata Model
//!
//! Explicit, statically-built annotation metadata for a class/interface
//! hierarchy, with declared-only and inherited-inclusive introspection
//! queries over it.
//!
//! Annotation kinds may carry an `inherited` marker. That marker makes a
//! class-level annotation declared on an ancestor class visible through the
//! inclusive query on its descendant classes; it has no effect on method- or
//! field-level annotations and does not propagate across
//! interface-implements edges. Preserving that asymmetry exactly is the
//! point of this crate.

#![warn(missing_docs)]

pub mod decl;
pub mod error;
pub mod query;
pub mod registry;
pub mod report;
pub mod sample;

pub use decl::{
    Annotation, AnnotationKind, FieldDecl, Instance, KindId, MethodDecl, TypeDecl, TypeId,
    TypeKind,
};
pub use error::MetaError;
pub use query::{
    declared_annotations, inclusive_annotations, is_subtype_of, member_declared_annotations,
    member_inclusive_annotations, public_fields, public_methods, superclass_chain, MemberKind,
    MemberRef,
};
pub use registry::TypeRegistry;
pub use report::report;
pub use sample::{sample_registry, SampleTypes};
