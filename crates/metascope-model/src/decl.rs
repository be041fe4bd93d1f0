//! Core declarations of the metadata model
//!
//! Everything here is an immutable description registered once into a
//! [`TypeRegistry`](crate::registry::TypeRegistry) and never mutated
//! afterwards. Annotation *kinds* (named markers, possibly inheritable) are
//! declared separately from annotation *instances* (a kind applied with a
//! string value) so the inheritance marker lives in exactly one place.

use std::fmt;

use crate::registry::TypeRegistry;

/// Unique identifier for an annotation kind in a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindId(pub(crate) u32);

impl fmt::Display for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KindId({})", self.0)
    }
}

/// Unique identifier for a type declaration in a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub(crate) u32);

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// A named annotation kind
///
/// The `inherited` flag only affects class-level annotation instances: an
/// instance declared on an ancestor class becomes visible on descendant
/// classes through the inclusive query. It never applies to method- or
/// field-level instances, and never crosses an implements edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationKind {
    /// Kind name, unique within a registry
    pub name: String,
    /// Whether class-level instances propagate down the extends chain
    pub inherited: bool,
}

impl AnnotationKind {
    /// Create a non-inherited kind
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            inherited: false,
        }
    }

    /// Create a kind whose class-level instances propagate to subclasses
    pub fn inherited(name: &str) -> Self {
        Self {
            name: name.to_string(),
            inherited: true,
        }
    }
}

/// An annotation instance: a kind applied with a single string value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// The kind this instance belongs to
    pub kind: KindId,
    /// The instance's `value` parameter
    pub value: String,
}

impl Annotation {
    /// Create an instance of `kind` carrying `value`
    pub fn new(kind: KindId, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }

    /// Render as `@Kind("value")` using the kind name from `registry`
    pub fn display<'a>(&'a self, registry: &'a TypeRegistry) -> impl fmt::Display + 'a {
        struct Render<'a> {
            ann: &'a Annotation,
            registry: &'a TypeRegistry,
        }
        impl fmt::Display for Render<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let name = self
                    .registry
                    .kind(self.ann.kind)
                    .map(|k| k.name.as_str())
                    .unwrap_or("<unknown>");
                write!(f, "@{}(\"{}\")", name, self.ann.value)
            }
        }
        Render {
            ann: self,
            registry,
        }
    }
}

/// Whether a declaration is a class or an interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// A concrete class; may extend one class and implement interfaces
    Class,
    /// An interface; declares abstract methods, cannot be instantiated
    Interface,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Class => write!(f, "class"),
            TypeKind::Interface => write!(f, "interface"),
        }
    }
}

/// A method declaration and its directly-attached annotations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    /// Method name
    pub name: String,
    /// Annotations written directly on this declaration
    pub annotations: Vec<Annotation>,
}

impl MethodDecl {
    /// Declare a method with no annotations
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            annotations: Vec::new(),
        }
    }

    /// Attach an annotation to this declaration
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A public field declaration and its directly-attached annotations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field name
    pub name: String,
    /// Annotations written directly on this declaration
    pub annotations: Vec<Annotation>,
}

impl FieldDecl {
    /// Declare a field with no annotations
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            annotations: Vec::new(),
        }
    }

    /// Attach an annotation to this declaration
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A complete type declaration
#[derive(Debug, Clone)]
pub struct TypeDecl {
    /// Type name, unique within a registry
    pub name: String,
    /// Class or interface
    pub kind: TypeKind,
    /// Superclass, classes only
    pub superclass: Option<TypeId>,
    /// Implemented (or extended, for interfaces) interfaces
    pub interfaces: Vec<TypeId>,
    /// Class-level annotations written directly on this declaration
    pub annotations: Vec<Annotation>,
    /// Methods declared by this type, in declaration order
    pub methods: Vec<MethodDecl>,
    /// Public fields declared by this type, in declaration order
    pub fields: Vec<FieldDecl>,
}

impl TypeDecl {
    /// Start a class declaration
    pub fn class(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: TypeKind::Class,
            superclass: None,
            interfaces: Vec::new(),
            annotations: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Start an interface declaration
    pub fn interface(name: &str) -> Self {
        Self {
            kind: TypeKind::Interface,
            ..Self::class(name)
        }
    }

    /// Set the superclass
    pub fn extends(mut self, superclass: TypeId) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Add an implemented interface
    pub fn implements(mut self, interface: TypeId) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Attach a class-level annotation
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Add a method declaration
    pub fn method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    /// Add a public field declaration
    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }
}

/// A throwaway runtime value of some class
///
/// Its only capability is yielding the type it was created from; introspection
/// results depend on type identity, never on instance identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instance {
    class: TypeId,
}

impl Instance {
    pub(crate) fn new(class: TypeId) -> Self {
        Self { class }
    }

    /// The runtime type handle of this instance
    pub fn runtime_type(&self) -> TypeId {
        self.class
    }
}
