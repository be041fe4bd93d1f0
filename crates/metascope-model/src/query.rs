//! Introspection queries over a [`TypeRegistry`]
//!
//! Two visibility modes exist at every granularity:
//!
//! - **declared-only**: metadata physically attached to the exact
//!   declaration being queried.
//! - **inclusive**: declared-only metadata plus whatever the inheritance
//!   rule contributes.
//!
//! The inheritance rule is deliberately narrow: it applies to class-level
//! annotations only, walks the superclass chain only, and requires the
//! annotation kind to carry the `inherited` marker. Member-level annotations
//! never cross from a declaring interface or superclass to an override, so
//! for members the two modes always agree.

use rustc_hash::FxHashSet;

use crate::decl::{Annotation, FieldDecl, MethodDecl, TypeId};
use crate::registry::TypeRegistry;

/// Which member table a [`MemberRef`] points into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// A method declaration
    Method,
    /// A public field declaration
    Field,
}

/// A resolved reference to a member declaration
///
/// Enumeration resolves each publicly accessible member to the declaration
/// that actually provides it: an inherited field resolves into its declaring
/// superclass, and an overridden method resolves into the most-derived
/// override. All annotation queries on a member read that declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberRef {
    /// The type whose declaration provides this member
    pub declaring_type: TypeId,
    /// Method or field
    pub kind: MemberKind,
    /// Index into the declaring type's method or field table
    pub index: usize,
}

impl MemberRef {
    /// The member's name, if the reference still resolves
    pub fn name<'a>(&self, registry: &'a TypeRegistry) -> Option<&'a str> {
        match self.kind {
            MemberKind::Method => self.method(registry).map(|m| m.name.as_str()),
            MemberKind::Field => self.field(registry).map(|f| f.name.as_str()),
        }
    }

    fn method<'a>(&self, registry: &'a TypeRegistry) -> Option<&'a MethodDecl> {
        registry.get(self.declaring_type)?.methods.get(self.index)
    }

    fn field<'a>(&self, registry: &'a TypeRegistry) -> Option<&'a FieldDecl> {
        registry.get(self.declaring_type)?.fields.get(self.index)
    }
}

/// Get the superclass chain for a type
///
/// Returns handles from the type itself up to the root ancestor. Interfaces
/// have no superclass, so their chain is just themselves.
pub fn superclass_chain(registry: &TypeRegistry, id: TypeId) -> Vec<TypeId> {
    let mut chain = Vec::new();
    let mut current = Some(id);
    while let Some(tid) = current {
        let Some(decl) = registry.get(tid) else { break };
        chain.push(tid);
        current = decl.superclass;
    }
    chain
}

/// Check whether `sub` is a subtype of `sup`
///
/// Reflexive; follows both extends and implements edges.
pub fn is_subtype_of(registry: &TypeRegistry, sub: TypeId, sup: TypeId) -> bool {
    if sub == sup {
        return true;
    }
    superclass_chain(registry, sub)
        .into_iter()
        .any(|tid| tid == sup || interface_closure(registry, tid).contains(&sup))
}

/// Class-level annotations physically attached to this exact declaration
pub fn declared_annotations(registry: &TypeRegistry, id: TypeId) -> &[Annotation] {
    registry
        .get(id)
        .map(|decl| decl.annotations.as_slice())
        .unwrap_or(&[])
}

/// Class-level annotations visible through the inclusive query
///
/// Starts from the declared set, then walks ancestor classes: each ancestor
/// contributes its class-level annotations whose kind carries the `inherited`
/// marker and whose kind is not already present (the nearest declaration of a
/// kind wins). Interface edges contribute nothing.
pub fn inclusive_annotations(registry: &TypeRegistry, id: TypeId) -> Vec<Annotation> {
    let mut result: Vec<Annotation> = declared_annotations(registry, id).to_vec();
    let mut seen: FxHashSet<_> = result.iter().map(|a| a.kind).collect();

    for ancestor in superclass_chain(registry, id).into_iter().skip(1) {
        for ann in declared_annotations(registry, ancestor) {
            let inheritable = registry.kind(ann.kind).is_some_and(|k| k.inherited);
            if inheritable && seen.insert(ann.kind) {
                result.push(ann.clone());
            }
        }
    }
    result
}

/// All publicly accessible methods of a type, including inherited ones
///
/// Own declarations come first, then superclass contributions, then interface
/// contributions (transitively). A name already provided by a more-derived
/// declaration shadows later ones, so an override resolves to itself rather
/// than to the interface or superclass method it overrides.
pub fn public_methods(registry: &TypeRegistry, id: TypeId) -> Vec<MemberRef> {
    collect_members(registry, id, MemberKind::Method)
}

/// All publicly accessible fields of a type, including inherited ones
///
/// Symmetric to [`public_methods`]; a field declared in a subclass shadows a
/// same-named field from an ancestor.
pub fn public_fields(registry: &TypeRegistry, id: TypeId) -> Vec<MemberRef> {
    collect_members(registry, id, MemberKind::Field)
}

/// Annotations physically attached to the member's declaration
pub fn member_declared_annotations<'a>(
    registry: &'a TypeRegistry,
    member: &MemberRef,
) -> &'a [Annotation] {
    let decl = match registry.get(member.declaring_type) {
        Some(decl) => decl,
        None => return &[],
    };
    match member.kind {
        MemberKind::Method => decl
            .methods
            .get(member.index)
            .map(|m| m.annotations.as_slice())
            .unwrap_or(&[]),
        MemberKind::Field => decl
            .fields
            .get(member.index)
            .map(|f| f.annotations.as_slice())
            .unwrap_or(&[]),
    }
}

/// Annotations visible on the member through the inclusive query
///
/// Identical to the declared set: the inheritance rule never applies at
/// member level, so an unannotated override reports nothing even when the
/// interface method it overrides is annotated.
pub fn member_inclusive_annotations<'a>(
    registry: &'a TypeRegistry,
    member: &MemberRef,
) -> &'a [Annotation] {
    member_declared_annotations(registry, member)
}

fn collect_members(registry: &TypeRegistry, id: TypeId, kind: MemberKind) -> Vec<MemberRef> {
    let mut result = Vec::new();
    let mut seen_names: FxHashSet<String> = FxHashSet::default();

    let chain = superclass_chain(registry, id);
    for &tid in &chain {
        collect_declared(registry, tid, kind, &mut result, &mut seen_names);
    }
    for tid in interface_closure_for_chain(registry, &chain) {
        collect_declared(registry, tid, kind, &mut result, &mut seen_names);
    }
    result
}

fn collect_declared(
    registry: &TypeRegistry,
    tid: TypeId,
    kind: MemberKind,
    result: &mut Vec<MemberRef>,
    seen_names: &mut FxHashSet<String>,
) {
    let Some(decl) = registry.get(tid) else { return };
    let names: Vec<&str> = match kind {
        MemberKind::Method => decl.methods.iter().map(|m| m.name.as_str()).collect(),
        MemberKind::Field => decl.fields.iter().map(|f| f.name.as_str()).collect(),
    };
    for (index, name) in names.into_iter().enumerate() {
        if seen_names.insert(name.to_string()) {
            result.push(MemberRef {
                declaring_type: tid,
                kind,
                index,
            });
        }
    }
}

/// Interfaces reachable from a single type, transitively, in first-encounter
/// order.
fn interface_closure(registry: &TypeRegistry, id: TypeId) -> Vec<TypeId> {
    let mut closure = Vec::new();
    let mut queue: Vec<TypeId> = registry
        .get(id)
        .map(|decl| decl.interfaces.clone())
        .unwrap_or_default();
    while !queue.is_empty() {
        let mut next = Vec::new();
        for tid in queue {
            if !closure.contains(&tid) {
                closure.push(tid);
                if let Some(decl) = registry.get(tid) {
                    next.extend(decl.interfaces.iter().copied());
                }
            }
        }
        queue = next;
    }
    closure
}

fn interface_closure_for_chain(registry: &TypeRegistry, chain: &[TypeId]) -> Vec<TypeId> {
    let mut closure = Vec::new();
    for &tid in chain {
        for iface in interface_closure(registry, tid) {
            if !closure.contains(&iface) {
                closure.push(iface);
            }
        }
    }
    closure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{Annotation, AnnotationKind, FieldDecl, MethodDecl, TypeDecl};

    #[test]
    fn test_superclass_chain() {
        let mut registry = TypeRegistry::new();
        let animal = registry.register(TypeDecl::class("Animal")).unwrap();
        let dog = registry
            .register(TypeDecl::class("Dog").extends(animal))
            .unwrap();
        let lab = registry
            .register(TypeDecl::class("Labrador").extends(dog))
            .unwrap();

        assert_eq!(superclass_chain(&registry, lab), vec![lab, dog, animal]);
        assert_eq!(superclass_chain(&registry, animal), vec![animal]);
    }

    #[test]
    fn test_is_subtype_of() {
        let mut registry = TypeRegistry::new();
        let walker = registry.register(TypeDecl::interface("Walker")).unwrap();
        let animal = registry.register(TypeDecl::class("Animal")).unwrap();
        let dog = registry
            .register(TypeDecl::class("Dog").extends(animal).implements(walker))
            .unwrap();
        let lab = registry
            .register(TypeDecl::class("Labrador").extends(dog))
            .unwrap();

        assert!(is_subtype_of(&registry, lab, lab));
        assert!(is_subtype_of(&registry, lab, dog));
        assert!(is_subtype_of(&registry, lab, animal));
        // implements edge on an ancestor
        assert!(is_subtype_of(&registry, lab, walker));
        assert!(!is_subtype_of(&registry, animal, dog));
        assert!(!is_subtype_of(&registry, animal, walker));
    }

    #[test]
    fn test_inherited_kind_propagates_down_extends_chain() {
        let mut registry = TypeRegistry::new();
        let custom = registry
            .register_kind(AnnotationKind::inherited("Custom"))
            .unwrap();
        let base = registry
            .register(TypeDecl::class("Base").annotated(Annotation::new(custom, "Class")))
            .unwrap();
        let derived = registry
            .register(TypeDecl::class("Derived").extends(base))
            .unwrap();

        assert!(declared_annotations(&registry, derived).is_empty());
        let inclusive = inclusive_annotations(&registry, derived);
        assert_eq!(inclusive, vec![Annotation::new(custom, "Class")]);
    }

    #[test]
    fn test_non_inherited_kind_does_not_propagate() {
        let mut registry = TypeRegistry::new();
        let plain = registry.register_kind(AnnotationKind::new("Plain")).unwrap();
        let base = registry
            .register(TypeDecl::class("Base").annotated(Annotation::new(plain, "Class")))
            .unwrap();
        let derived = registry
            .register(TypeDecl::class("Derived").extends(base))
            .unwrap();

        assert!(inclusive_annotations(&registry, derived).is_empty());
        // the declaring class still sees it in both modes
        assert_eq!(inclusive_annotations(&registry, base).len(), 1);
    }

    #[test]
    fn test_inherited_kind_does_not_cross_implements_edge() {
        let mut registry = TypeRegistry::new();
        let custom = registry
            .register_kind(AnnotationKind::inherited("Custom"))
            .unwrap();
        let iface = registry
            .register(TypeDecl::interface("Marked").annotated(Annotation::new(custom, "Iface")))
            .unwrap();
        let class = registry
            .register(TypeDecl::class("Impl").implements(iface))
            .unwrap();

        assert!(inclusive_annotations(&registry, class).is_empty());
        // visible on the interface itself
        assert_eq!(inclusive_annotations(&registry, iface).len(), 1);
    }

    #[test]
    fn test_nearest_declaration_of_a_kind_wins() {
        let mut registry = TypeRegistry::new();
        let custom = registry
            .register_kind(AnnotationKind::inherited("Custom"))
            .unwrap();
        let base = registry
            .register(TypeDecl::class("Base").annotated(Annotation::new(custom, "base")))
            .unwrap();
        let derived = registry
            .register(
                TypeDecl::class("Derived")
                    .extends(base)
                    .annotated(Annotation::new(custom, "derived")),
            )
            .unwrap();

        let inclusive = inclusive_annotations(&registry, derived);
        assert_eq!(inclusive, vec![Annotation::new(custom, "derived")]);
    }

    #[test]
    fn test_propagation_spans_multiple_levels() {
        let mut registry = TypeRegistry::new();
        let custom = registry
            .register_kind(AnnotationKind::inherited("Custom"))
            .unwrap();
        let root = registry
            .register(TypeDecl::class("Root").annotated(Annotation::new(custom, "root")))
            .unwrap();
        let mid = registry
            .register(TypeDecl::class("Mid").extends(root))
            .unwrap();
        let leaf = registry
            .register(TypeDecl::class("Leaf").extends(mid))
            .unwrap();

        assert_eq!(
            inclusive_annotations(&registry, leaf),
            vec![Annotation::new(custom, "root")]
        );
    }

    #[test]
    fn test_override_shadows_interface_method() {
        let mut registry = TypeRegistry::new();
        let custom = registry
            .register_kind(AnnotationKind::inherited("Custom"))
            .unwrap();
        let iface = registry
            .register(
                TypeDecl::interface("Iface").method(
                    MethodDecl::new("run").annotated(Annotation::new(custom, "Method")),
                ),
            )
            .unwrap();
        let class = registry
            .register(
                TypeDecl::class("Impl")
                    .implements(iface)
                    .method(MethodDecl::new("run")),
            )
            .unwrap();

        let methods = public_methods(&registry, class);
        assert_eq!(methods.len(), 1);
        // the override resolves to the class's own declaration
        assert_eq!(methods[0].declaring_type, class);

        // member-level annotations never cross the implements edge
        assert!(member_declared_annotations(&registry, &methods[0]).is_empty());
        assert!(member_inclusive_annotations(&registry, &methods[0]).is_empty());

        // the interface's own view still carries the annotation
        let iface_methods = public_methods(&registry, iface);
        assert_eq!(iface_methods.len(), 1);
        assert_eq!(
            member_inclusive_annotations(&registry, &iface_methods[0]),
            member_declared_annotations(&registry, &iface_methods[0]),
        );
        assert_eq!(
            member_declared_annotations(&registry, &iface_methods[0]),
            &[Annotation::new(custom, "Method")]
        );
    }

    #[test]
    fn test_unoverridden_interface_method_resolves_to_interface() {
        let mut registry = TypeRegistry::new();
        let iface = registry
            .register(TypeDecl::interface("Iface").method(MethodDecl::new("run")))
            .unwrap();
        let class = registry
            .register(TypeDecl::class("Impl").implements(iface))
            .unwrap();

        let methods = public_methods(&registry, class);
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].declaring_type, iface);
    }

    #[test]
    fn test_fields_inherited_and_shadowed() {
        let mut registry = TypeRegistry::new();
        let custom = registry
            .register_kind(AnnotationKind::inherited("Custom"))
            .unwrap();
        let base = registry
            .register(
                TypeDecl::class("Base")
                    .field(FieldDecl::new("tag").annotated(Annotation::new(custom, "Field")))
                    .field(FieldDecl::new("count")),
            )
            .unwrap();
        let derived = registry
            .register(
                TypeDecl::class("Derived")
                    .extends(base)
                    .field(FieldDecl::new("count")),
            )
            .unwrap();

        let fields = public_fields(&registry, derived);
        assert_eq!(fields.len(), 2);

        // own declaration first, shadowing the base's `count`
        assert_eq!(fields[0].name(&registry), Some("count"));
        assert_eq!(fields[0].declaring_type, derived);

        // inherited field resolves into its declaring class and keeps its
        // annotations in both modes
        assert_eq!(fields[1].name(&registry), Some("tag"));
        assert_eq!(fields[1].declaring_type, base);
        assert_eq!(
            member_inclusive_annotations(&registry, &fields[1]),
            &[Annotation::new(custom, "Field")]
        );
    }

    #[test]
    fn test_transitive_interface_closure() {
        let mut registry = TypeRegistry::new();
        let base_iface = registry
            .register(TypeDecl::interface("Base").method(MethodDecl::new("base_op")))
            .unwrap();
        let sub_iface = registry
            .register(
                TypeDecl::interface("Sub")
                    .implements(base_iface)
                    .method(MethodDecl::new("sub_op")),
            )
            .unwrap();
        let class = registry
            .register(TypeDecl::class("Impl").implements(sub_iface))
            .unwrap();

        let names: Vec<Option<&str>> = public_methods(&registry, class)
            .iter()
            .map(|m| m.name(&registry))
            .collect();
        assert_eq!(names, vec![Some("sub_op"), Some("base_op")]);
    }
}
