//! Per-use-site nullability wrappers.
//!
//! The same type node is shared across many annotated and unannotated use
//! sites, so the annotation lives in a wrapper around the node, never on
//! the node itself. Wrappers are not interned: distinct use sites of the
//! same node produce distinct wrapper instances that still compare equal
//! when name and annotation agree.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::model::object::{ObjectId, ObjectRef};
use crate::model::Nullability;
use crate::registry::GraphRegistry;

/// A graph node paired with one use site's nullability annotation.
///
/// Equality and hashing are based on the node's full name plus the
/// annotation-qualified name - never on wrapper identity.
#[derive(Clone, Debug)]
pub struct NullableObject {
    object: ObjectId,
    full_name: Arc<str>,
    annotation: Nullability,
}

impl NullableObject {
    /// Wrap a node with a use-site annotation.
    pub fn new(object: &ObjectRef, annotation: Nullability) -> Self {
        Self {
            object: object.id(),
            full_name: object.full_name().clone(),
            annotation,
        }
    }

    /// The wrapped node.
    pub fn object(&self, g: &GraphRegistry) -> ObjectRef {
        g.get(self.object)
    }

    /// The wrapped node's fully qualified name.
    pub fn full_name(&self) -> &Arc<str> {
        &self.full_name
    }

    /// The use site's annotation.
    pub fn annotation(&self) -> Nullability {
        self.annotation
    }

    /// The annotation-qualified name: `Name?` when annotated, the plain
    /// full name otherwise.
    pub fn annotated_name(&self) -> String {
        match self.annotation {
            Nullability::Annotated => format!("{}?", self.full_name),
            _ => self.full_name.to_string(),
        }
    }

    /// Generic argument positions of the wrapped node, each wrapped with
    /// its own per-argument annotation, recursively.
    pub fn generic_arguments(&self, g: &GraphRegistry) -> Vec<NullableObject> {
        self.object(g).nullable_generic_arguments(g)
    }
}

impl PartialEq for NullableObject {
    fn eq(&self, other: &Self) -> bool {
        self.full_name == other.full_name && self.annotation == other.annotation
    }
}

impl Eq for NullableObject {}

impl Hash for NullableObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.full_name.hash(state);
        self.annotated_name().hash(state);
    }
}
