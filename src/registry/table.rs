//! The graph registry: arena, dedup table, and interning.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::trace;

use crate::backend::{HandleRef, SymbolHandle};
use crate::base::{self, SourcePos};
use crate::model::{GraphObject, ObjectId, ObjectRef};

use super::options::RegistryOptions;

/// Owner of all graph nodes for one introspection session.
///
/// The registry is the only component permitted to construct a node. It
/// deduplicates by fully qualified name: two handles with equal full
/// names intern to the same node instance (the identity law). All state
/// is discarded with the registry; there is no persistence and no
/// incremental update.
///
/// Interior mutability makes the registry `!Sync` by construction: one
/// registry serves one logical flow of control. A multi-threaded host
/// must serialize all access itself.
pub struct GraphRegistry {
    /// Arena storage for all nodes - single source of truth.
    arena: RefCell<Vec<ObjectRef>>,
    /// Index for O(1) full-name lookups: full name -> ObjectId.
    /// Insertion-ordered, so enumeration is deterministic.
    objects_by_name: RefCell<IndexMap<Arc<str>, ObjectId>>,
    options: RegistryOptions,
}

impl GraphRegistry {
    pub fn new() -> Self {
        Self::with_options(RegistryOptions::default())
    }

    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            arena: RefCell::new(Vec::new()),
            objects_by_name: RefCell::new(IndexMap::new()),
            options,
        }
    }

    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    /// Look up or create the node for a handle.
    ///
    /// Re-entrant: initializing one node may intern related handles (base
    /// type, member types, generic arguments). The table insert happens
    /// *before* any derived-property computation, so a self-referential
    /// type finds itself already present when it recurses back in.
    ///
    /// Unclassifiable handles intern to a node whose kind is
    /// [`crate::model::ObjectKind::None`]; such nodes are returned here
    /// (callers that need them can filter) but never escape member or
    /// lookup queries.
    pub fn intern(&self, handle: HandleRef) -> ObjectRef {
        let full_name = handle.full_name();
        let existing = self
            .objects_by_name
            .borrow()
            .get(full_name.as_ref())
            .copied();
        if let Some(id) = existing {
            return self.get(id);
        }

        let kind = handle.classify();
        let is_primitive = base::is_primitive(&full_name);
        let is_system = is_primitive || self.options.is_system_namespace(&handle.namespace());
        let id = ObjectId::new(self.arena.borrow().len());
        trace!(
            "[INTERN] {} as {} (primitive={}, system={})",
            full_name,
            kind.display(),
            is_primitive,
            is_system
        );

        let node = Rc::new(GraphObject::new(id, handle, kind, is_primitive, is_system));
        self.arena.borrow_mut().push(node.clone());
        self.objects_by_name.borrow_mut().insert(full_name, id);
        node
    }

    /// Find a node by its exact fully qualified name.
    ///
    /// Unclassified nodes are filtered: lookup never returns them.
    pub fn lookup(&self, full_name: &str) -> Option<ObjectRef> {
        let id = self.objects_by_name.borrow().get(full_name).copied()?;
        let node = self.get(id);
        node.kind().is_supported().then_some(node)
    }

    /// Get a node by id (O(1) arena lookup).
    ///
    /// Ids are only meaningful within the registry that issued them.
    pub(crate) fn get(&self, id: ObjectId) -> ObjectRef {
        self.arena.borrow()[id.index()].clone()
    }

    /// All interned nodes, in intern order (deterministic).
    pub fn objects(&self) -> Vec<ObjectRef> {
        self.arena.borrow().clone()
    }

    /// Number of interned nodes.
    pub fn len(&self) -> usize {
        self.arena.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.borrow().is_empty()
    }

    // ============================================================
    // Name-formatting services
    // ============================================================
    // Pure functions of a handle, independent of node state; usable
    // before a node is fully constructed.

    pub fn to_full_name(handle: &dyn SymbolHandle) -> Arc<str> {
        handle.full_name()
    }

    pub fn to_simple_name(handle: &dyn SymbolHandle) -> Arc<str> {
        handle.simple_name()
    }

    pub fn to_local_name(handle: &dyn SymbolHandle) -> Arc<str> {
        handle.local_name()
    }

    pub fn to_regional_name(handle: &dyn SymbolHandle) -> Arc<str> {
        handle.regional_name()
    }

    /// The source position a handle reports (unknown for metadata).
    pub fn to_source_position(handle: &dyn SymbolHandle) -> SourcePos {
        handle.source_position()
    }
}

impl Default for GraphRegistry {
    fn default() -> Self {
        Self::new()
    }
}
