//! Backend adapters: translating native symbol information into the
//! primitive facts the object model consumes.
//!
//! Two information sources are supported, with identical node-facing
//! semantics:
//! - [`semantic`] - a compile-time semantic model (per-accessor
//!   accessibility, attribute applications with source positions)
//! - [`metadata`] - a runtime metadata catalogue (flag words, no source
//!   positions)
//!
//! A node is constructed from exactly one handle and never mixes sources.
//! The handle is a strategy object: all derived-property logic dispatches
//! through the [`SymbolHandle`] trait, never on a concrete backend.

pub mod metadata;
pub mod semantic;


use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::base::SourcePos;
use crate::model::{Accessibility, AttributeData, Nullability, ObjectKind};

/// A cheap, clonable reference to a backend symbol handle.
pub type HandleRef = Rc<dyn SymbolHandle>;

/// The adapter contract every backend satisfies.
///
/// A handle is an opaque reference to one named program entity in its
/// native representation. The object model asks it questions and never
/// looks behind the trait. Related entities are returned as further
/// handles; the registry interns them into nodes on demand.
///
/// A handle whose cross-references dangle (a name missing from its
/// backing model) is a programmer error at the boundary: adapters fail
/// fast rather than papering over it. Run the model's `verify()` after
/// building fixtures to catch this early.
pub trait SymbolHandle: fmt::Debug {
    /// Classify the entity. Unsupported constructs (events, delegates,
    /// accessor methods, backing fields) classify as [`ObjectKind::None`].
    fn classify(&self) -> ObjectKind;

    /// The canonical fully qualified name: the node identity key.
    fn full_name(&self) -> Arc<str>;

    /// The simple (unqualified, suffix-free) name.
    fn simple_name(&self) -> Arc<str>;

    /// The simple name plus generic argument/parameter suffix.
    fn local_name(&self) -> Arc<str>;

    /// The name qualified by containing type but not namespace.
    fn regional_name(&self) -> Arc<str>;

    /// The declaring namespace, empty if global.
    fn namespace(&self) -> Arc<str>;

    /// Where the entity was declared; unknown for runtime metadata.
    fn source_position(&self) -> SourcePos {
        SourcePos::unknown()
    }

    /// Raw attribute applications, infrastructure decorations included.
    /// The node filters infrastructure prefixes during reification.
    fn attributes(&self) -> Vec<AttributeData> {
        Vec::new()
    }

    /// Members declared directly on this entity (not inherited).
    fn members(&self) -> Vec<HandleRef> {
        Vec::new()
    }

    /// The nearest supertype, `None` for the universal root.
    fn base(&self) -> Option<HandleRef> {
        None
    }

    /// The lexical parent, if nested.
    fn containing(&self) -> Option<HandleRef> {
        None
    }

    /// Interfaces implemented directly at this declaration.
    fn interfaces(&self) -> Vec<HandleRef> {
        Vec::new()
    }

    /// Generic arguments (or unbound parameters) introduced at this
    /// nesting level only - never the containing type's.
    fn generic_arguments(&self) -> Vec<HandleRef> {
        Vec::new()
    }

    /// Use-site nullability per generic argument position, aligned with
    /// [`SymbolHandle::generic_arguments`]. Each position carries its own
    /// annotation, never the containing type's.
    fn generic_argument_annotations(&self) -> Vec<Nullability> {
        Vec::new()
    }

    /// The unbound generic definition, for constructed generics.
    fn original_definition(&self) -> Option<HandleRef> {
        None
    }

    /// For a field or property: the declared type. For a method: the
    /// return type. Types answer through the node instead (themselves).
    fn type_of(&self) -> Option<HandleRef> {
        None
    }

    /// The underlying value type, for enums.
    fn enum_underlying(&self) -> Option<HandleRef> {
        None
    }

    /// The element type, for array entities.
    fn array_element(&self) -> Option<HandleRef> {
        None
    }

    /// The array rank, 0 for non-arrays.
    fn array_rank(&self) -> u32 {
        0
    }

    /// Accessibility of the read side (getter, field read, declared
    /// accessibility for types and methods). `None` means unreadable.
    fn read_access(&self) -> Option<Accessibility>;

    /// Accessibility of the write side (setter, mutable field). `None`
    /// means unwritable.
    fn write_access(&self) -> Option<Accessibility>;

    fn is_static(&self) -> bool {
        false
    }

    fn is_partial(&self) -> bool {
        false
    }

    fn is_tuple(&self) -> bool {
        false
    }

    /// True for compiler-supplied declarations (implicit default
    /// constructors, synthesized enum plumbing).
    fn is_implicitly_declared(&self) -> bool {
        false
    }

    fn is_constructor(&self) -> bool {
        false
    }

    /// Parameter type full names, for methods.
    fn method_parameters(&self) -> Vec<Arc<str>> {
        Vec::new()
    }

    /// The nullability annotation of this use site.
    fn nullability(&self) -> Nullability {
        Nullability::Unknown
    }
}
