//! The introspection reporter
//!
//! Walks one type and prints every annotation visible on it, on its publicly
//! accessible methods, and on its publicly accessible fields, in both
//! visibility modes. Output order follows registry declaration order, so a
//! report is deterministic for a given registry.

use std::io::{self, Write};

use crate::decl::TypeId;
use crate::query::{
    declared_annotations, inclusive_annotations, member_declared_annotations,
    member_inclusive_annotations, public_fields, public_methods, MemberRef,
};
use crate::registry::TypeRegistry;

/// Print the full introspection report for one type
///
/// Four ordered passes: a header line, class-level annotations (inclusive
/// then declared-only), method-level annotations for every public method
/// including inherited ones (inclusive then declared-only per method), and
/// the same for public fields. Empty annotation sets print nothing. Handles
/// that do not resolve print nothing at all.
pub fn report(registry: &TypeRegistry, id: TypeId, out: &mut impl Write) -> io::Result<()> {
    let Some(decl) = registry.get(id) else {
        return Ok(());
    };

    writeln!(out, "Class under test = {} {}", decl.kind, decl.name)?;

    for ann in inclusive_annotations(registry, id) {
        writeln!(out, "    - Class [inclusive]: {}", ann.display(registry))?;
    }
    for ann in declared_annotations(registry, id) {
        writeln!(out, "    - Class [declared-only]: {}", ann.display(registry))?;
    }

    for method in public_methods(registry, id) {
        report_member(registry, &method, "Method", out)?;
    }
    for field in public_fields(registry, id) {
        report_member(registry, &field, "Field", out)?;
    }

    Ok(())
}

fn report_member(
    registry: &TypeRegistry,
    member: &MemberRef,
    label: &str,
    out: &mut impl Write,
) -> io::Result<()> {
    for ann in member_inclusive_annotations(registry, member) {
        writeln!(out, "    - {} [inclusive]: {}", label, ann.display(registry))?;
    }
    for ann in member_declared_annotations(registry, member) {
        writeln!(
            out,
            "    - {} [declared-only]: {}",
            label,
            ann.display(registry)
        )?;
    }
    Ok(())
}
