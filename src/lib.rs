//! # symgraph-base
//!
//! Core library for backend-agnostic symbol-graph introspection: one
//! deduplicated, lazily-materialized, cycle-safe object model over a
//! program's type system, whether the facts come from a compile-time
//! semantic model or from runtime metadata.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! registry  → node ownership, dedup by full name, filtered queries
//!   ↓
//! model     → GraphObject, attributes, nullability, deep equality
//!   ↓
//! backend   → adapter contract + semantic/metadata backends
//!   ↓
//! base      → Primitives (SourcePos, name formatting, primitive table)
//! ```
//!
//! A caller hands the registry a backend handle; the registry interns one
//! node per fully qualified name; nodes compute derived facts on first
//! access, recursing through the registry for related nodes, so the
//! result is a single shared - potentially cyclic - graph, not a tree.

// ============================================================================
// MODULES (dependency order: base → backend → model → registry)
// ============================================================================

/// Foundation types: SourcePos, name formatting, the primitive table
pub mod base;

/// Backend adapters: the SymbolHandle contract, semantic and metadata
pub mod backend;

/// The object model: nodes, attributes, nullability, deep equality
pub mod model;

/// The graph registry: interning, lookup, filtered member queries
pub mod registry;

mod error;

// Re-export commonly needed items
pub use backend::{HandleRef, SymbolHandle};
pub use error::{GraphError, GraphResult};
pub use model::{
    deep_equals, Accessibility, AttrValue, AttributeData, GenericsKind, GraphObject,
    NullableObject, Nullability, ObjectId, ObjectKind, ObjectRef,
};
pub use registry::{GraphRegistry, MemberFilter, RegistryOptions};

// Re-export foundation types
pub use base::SourcePos;
