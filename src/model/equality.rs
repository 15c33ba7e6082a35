//! Deep structural equality over the graph.
//!
//! Compares two nodes field-by-field across every derived property, then
//! recursively compares sorted member lists and sorted generic argument
//! lists. The two nodes may come from different registries (and different
//! backends); source positions never participate.
//!
//! # Cycle handling
//!
//! A stack of node pairs currently under comparison guards the recursion:
//! a pair already on the stack compares equal (cycle closure). This is a
//! known approximation - structurally different cycles that revisit the
//! same pair are reported equal. Do not strengthen it without revisiting
//! the callers that rely on the current behavior.

use std::rc::Rc;

use tracing::trace;

use crate::model::object::{ObjectId, ObjectRef};
use crate::registry::GraphRegistry;

/// Deep structural equality of two nodes, possibly from different
/// registries. Terminates on cyclic graphs.
pub fn deep_equals(ga: &GraphRegistry, a: &ObjectRef, gb: &GraphRegistry, b: &ObjectRef) -> bool {
    let mut stack = Vec::new();
    eq_nodes(ga, a, gb, b, &mut stack)
}

fn eq_nodes(
    ga: &GraphRegistry,
    a: &ObjectRef,
    gb: &GraphRegistry,
    b: &ObjectRef,
    stack: &mut Vec<(ObjectId, ObjectId)>,
) -> bool {
    if Rc::ptr_eq(a, b) {
        return true;
    }
    let pair = (a.id(), b.id());
    // Cycle closure: a pair already under comparison is assumed equal.
    if stack.contains(&pair) {
        trace!("[DEEP_EQ] cycle closed at {}", a.full_name());
        return true;
    }

    if !scalar_equals(a, b) {
        return false;
    }

    if a.all_attributes(ga) != b.all_attributes(gb) {
        return false;
    }

    stack.push(pair);
    let result = eq_optional(ga, &a.base_object(ga), gb, &b.base_object(gb), stack)
        && eq_optional(ga, &a.type_object(ga), gb, &b.type_object(gb), stack)
        && eq_optional(
            ga,
            &a.enum_underlying_type(ga),
            gb,
            &b.enum_underlying_type(gb),
            stack,
        )
        && eq_sorted(ga, a.all_members(ga), gb, b.all_members(gb), stack)
        && eq_sorted(
            ga,
            a.generics_arguments(ga),
            gb,
            b.generics_arguments(gb),
            stack,
        )
        && a.nullable_generic_arguments(ga) == b.nullable_generic_arguments(gb);
    stack.pop();
    result
}

/// The non-recursive property set.
fn scalar_equals(a: &ObjectRef, b: &ObjectRef) -> bool {
    a.kind() == b.kind()
        && a.full_name() == b.full_name()
        && a.simple_name() == b.simple_name()
        && a.local_name() == b.local_name()
        && a.array_rank() == b.array_rank()
        && a.generics_kind() == b.generics_kind()
        && a.is_primitive() == b.is_primitive()
        && a.is_public() == b.is_public()
        && a.is_readable() == b.is_readable()
        && a.is_read_only() == b.is_read_only()
        && a.is_serializable() == b.is_serializable()
        && a.is_system() == b.is_system()
        && a.is_tuple() == b.is_tuple()
        && a.is_writable() == b.is_writable()
        && a.method_is_constructor() == b.method_is_constructor()
        && a.method_parameters() == b.method_parameters()
        && a.all_interfaces() == b.all_interfaces()
}

fn eq_optional(
    ga: &GraphRegistry,
    a: &Option<ObjectRef>,
    gb: &GraphRegistry,
    b: &Option<ObjectRef>,
    stack: &mut Vec<(ObjectId, ObjectId)>,
) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => eq_nodes(ga, a, gb, b, stack),
        (None, None) => true,
        _ => false,
    }
}

/// Pairwise recursive comparison after sorting both sides by full name.
fn eq_sorted(
    ga: &GraphRegistry,
    mut a: Vec<ObjectRef>,
    gb: &GraphRegistry,
    mut b: Vec<ObjectRef>,
    stack: &mut Vec<(ObjectId, ObjectId)>,
) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.sort_by(|x, y| x.full_name().cmp(y.full_name()));
    b.sort_by(|x, y| x.full_name().cmp(y.full_name()));
    a.iter()
        .zip(b.iter())
        .all(|(x, y)| eq_nodes(ga, x, gb, y, stack))
}
