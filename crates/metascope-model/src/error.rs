//! Registry and instantiation errors
//!
//! The fixture set is fixed at startup, so none of these are recoverable:
//! callers propagate them and the program aborts before producing any report.

use thiserror::Error;

/// Errors from building or using a type registry
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MetaError {
    /// An annotation kind with this name is already registered
    #[error("Duplicate annotation kind: {name}")]
    DuplicateKind {
        /// Kind name that was registered twice
        name: String,
    },

    /// A type with this name is already registered
    #[error("Duplicate type: {name}")]
    DuplicateType {
        /// Type name that was registered twice
        name: String,
    },

    /// A superclass or interface handle does not resolve
    #[error("Unknown type referenced by {referrer}")]
    UnknownType {
        /// Name of the declaration holding the dangling handle
        referrer: String,
    },

    /// A class was used where an interface was required, or vice versa
    #[error("Kind mismatch: {name} referenced as {expected} but declared as {actual}")]
    KindMismatch {
        /// Name of the wrongly-referenced type
        name: String,
        /// What the referrer required
        expected: String,
        /// What the type actually is
        actual: String,
    },

    /// Attempt to instantiate an interface
    #[error("Cannot instantiate interface {name}")]
    NotInstantiable {
        /// Interface name
        name: String,
    },
}
