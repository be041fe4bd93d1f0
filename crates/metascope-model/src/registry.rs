//! Type and annotation-kind registry
//!
//! The registry is the stand-in for a reflection facility: every declared
//! type and member is registered up front together with its directly-declared
//! annotations, and all introspection queries resolve against this table.
//! Registration order is the enumeration order, which keeps every downstream
//! traversal deterministic.

use rustc_hash::FxHashMap;

use crate::decl::{AnnotationKind, Instance, KindId, TypeDecl, TypeId, TypeKind};
use crate::error::MetaError;

/// Registry of annotation kinds and type declarations
#[derive(Debug, Default)]
pub struct TypeRegistry {
    kinds: Vec<AnnotationKind>,
    kind_names: FxHashMap<String, KindId>,
    types: Vec<TypeDecl>,
    type_names: FxHashMap<String, TypeId>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an annotation kind
    ///
    /// Kind names are unique within a registry.
    pub fn register_kind(&mut self, kind: AnnotationKind) -> Result<KindId, MetaError> {
        if self.kind_names.contains_key(&kind.name) {
            return Err(MetaError::DuplicateKind { name: kind.name });
        }
        let id = KindId(self.kinds.len() as u32);
        self.kind_names.insert(kind.name.clone(), id);
        self.kinds.push(kind);
        Ok(id)
    }

    /// Register a type declaration
    ///
    /// Validates that the name is unused, that the superclass handle (if any)
    /// resolves to a class on a class declaration, and that every implements
    /// handle resolves to an interface.
    pub fn register(&mut self, decl: TypeDecl) -> Result<TypeId, MetaError> {
        if self.type_names.contains_key(&decl.name) {
            return Err(MetaError::DuplicateType { name: decl.name });
        }

        if let Some(super_id) = decl.superclass {
            if decl.kind == TypeKind::Interface {
                return Err(MetaError::KindMismatch {
                    name: decl.name,
                    expected: "class".to_string(),
                    actual: "interface".to_string(),
                });
            }
            let superclass = self.get(super_id).ok_or_else(|| MetaError::UnknownType {
                referrer: decl.name.clone(),
            })?;
            if superclass.kind != TypeKind::Class {
                return Err(MetaError::KindMismatch {
                    name: superclass.name.clone(),
                    expected: "class".to_string(),
                    actual: superclass.kind.to_string(),
                });
            }
        }

        for &iface_id in &decl.interfaces {
            let iface = self.get(iface_id).ok_or_else(|| MetaError::UnknownType {
                referrer: decl.name.clone(),
            })?;
            if iface.kind != TypeKind::Interface {
                return Err(MetaError::KindMismatch {
                    name: iface.name.clone(),
                    expected: "interface".to_string(),
                    actual: iface.kind.to_string(),
                });
            }
        }

        let id = TypeId(self.types.len() as u32);
        self.type_names.insert(decl.name.clone(), id);
        self.types.push(decl);
        Ok(id)
    }

    /// Get a type declaration by handle
    pub fn get(&self, id: TypeId) -> Option<&TypeDecl> {
        self.types.get(id.0 as usize)
    }

    /// Look up a type handle by name
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.type_names.get(name).copied()
    }

    /// Get an annotation kind by handle
    pub fn kind(&self, id: KindId) -> Option<&AnnotationKind> {
        self.kinds.get(id.0 as usize)
    }

    /// Iterate all types in registration order
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDecl)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, decl)| (TypeId(i as u32), decl))
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no types are registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Create a throwaway instance of a class
    ///
    /// Interfaces cannot be instantiated.
    pub fn instantiate(&self, id: TypeId) -> Result<Instance, MetaError> {
        let decl = self.get(id).ok_or_else(|| MetaError::UnknownType {
            referrer: id.to_string(),
        })?;
        if decl.kind != TypeKind::Class {
            return Err(MetaError::NotInstantiable {
                name: decl.name.clone(),
            });
        }
        Ok(Instance::new(id))
    }
}
