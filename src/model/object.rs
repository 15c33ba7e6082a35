//! The graph node: one canonical object per distinct named entity.
//!
//! A [`GraphObject`] pairs a backend handle with a set of lazily computed,
//! memoized derived properties. Each property follows the same pattern:
//! check cache, query the handle, convert related handles through the
//! registry, store, return. Caches are tri-state (`OnceCell<Option<..>>`):
//! not computed / computed-absent / computed-present, so a legitimately
//! absent result is never recomputed.
//!
//! Nodes reference each other only through the registry by [`ObjectId`],
//! never by owning pointers, so the graph may be cyclic without leaking
//! and teardown is uniform.

use std::cell::OnceCell;
use std::rc::Rc;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::{trace, warn};

use crate::backend::HandleRef;
use crate::base::SourcePos;
use crate::model::nullable::NullableObject;
use crate::model::{AttributeData, GenericsKind, Nullability, ObjectKind};
use crate::registry::GraphRegistry;

/// Unique identifier for a node in the registry arena.
/// Uses u32 for compact storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Create an ObjectId from an arena index.
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Get the index into the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A cheap, clonable reference to an interned node.
pub type ObjectRef = Rc<GraphObject>;

/// Mutability/visibility facts, derived together from the handle's
/// read/write accessibility pair in a single consult.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct AccessFacts {
    is_public: bool,
    is_readable: bool,
    is_writable: bool,
}

/// One node of the symbol graph.
///
/// Constructed only by the registry (intern), one per fully qualified
/// name. All identity-level facts (kind, name forms, primitive/system
/// classification, source position) are fixed at intern time; everything
/// else is computed on first access and cached for the registry lifetime.
pub struct GraphObject {
    id: ObjectId,
    handle: HandleRef,
    kind: ObjectKind,
    full_name: Arc<str>,
    simple_name: Arc<str>,
    local_name: Arc<str>,
    regional_name: Arc<str>,
    namespace: Arc<str>,
    is_primitive: bool,
    is_system: bool,
    position: SourcePos,

    // Lazy caches. Never reset; recomputation is a correctness bug.
    base_object: OnceCell<Option<ObjectId>>,
    containing_object: OnceCell<Option<ObjectId>>,
    type_object: OnceCell<Option<ObjectId>>,
    original_definition: OnceCell<ObjectId>,
    array_element: OnceCell<Option<ObjectId>>,
    array_rank: OnceCell<u32>,
    enum_underlying: OnceCell<Option<ObjectId>>,
    members: OnceCell<Vec<ObjectId>>,
    interfaces: OnceCell<Vec<Arc<str>>>,
    attributes: OnceCell<Vec<AttributeData>>,
    generics_kind: OnceCell<GenericsKind>,
    generics_arguments: OnceCell<Vec<ObjectId>>,
    nullability: OnceCell<Nullability>,
    nullable_generics: OnceCell<Vec<NullableObject>>,
    access: OnceCell<AccessFacts>,
    is_static: OnceCell<bool>,
    is_partial: OnceCell<bool>,
    is_tuple: OnceCell<bool>,
    method_parameters: OnceCell<Vec<Arc<str>>>,
    method_is_constructor: OnceCell<bool>,
}

impl std::fmt::Debug for GraphObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphObject")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("full_name", &self.full_name)
            .finish()
    }
}

impl GraphObject {
    /// Shallow construction: identity facts only, no recursion.
    /// Only the registry calls this, and it inserts the node into its
    /// table before any derived property can run.
    pub(crate) fn new(
        id: ObjectId,
        handle: HandleRef,
        kind: ObjectKind,
        is_primitive: bool,
        is_system: bool,
    ) -> Self {
        Self {
            id,
            kind,
            full_name: handle.full_name(),
            simple_name: handle.simple_name(),
            local_name: handle.local_name(),
            regional_name: handle.regional_name(),
            namespace: handle.namespace(),
            is_primitive,
            is_system,
            position: handle.source_position(),
            handle,
            base_object: OnceCell::new(),
            containing_object: OnceCell::new(),
            type_object: OnceCell::new(),
            original_definition: OnceCell::new(),
            array_element: OnceCell::new(),
            array_rank: OnceCell::new(),
            enum_underlying: OnceCell::new(),
            members: OnceCell::new(),
            interfaces: OnceCell::new(),
            attributes: OnceCell::new(),
            generics_kind: OnceCell::new(),
            generics_arguments: OnceCell::new(),
            nullability: OnceCell::new(),
            nullable_generics: OnceCell::new(),
            access: OnceCell::new(),
            is_static: OnceCell::new(),
            is_partial: OnceCell::new(),
            is_tuple: OnceCell::new(),
            method_parameters: OnceCell::new(),
            method_is_constructor: OnceCell::new(),
        }
    }

    // ============================================================
    // Identity facts (fixed at intern time)
    // ============================================================

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// The identity key: two nodes with equal full names are the same
    /// node (registry-enforced).
    pub fn full_name(&self) -> &Arc<str> {
        &self.full_name
    }

    pub fn simple_name(&self) -> &Arc<str> {
        &self.simple_name
    }

    /// Simple name plus generic argument/parameter suffix.
    pub fn local_name(&self) -> &Arc<str> {
        &self.local_name
    }

    /// Name qualified by containing type but not namespace.
    pub fn regional_name(&self) -> &Arc<str> {
        &self.regional_name
    }

    pub fn namespace(&self) -> &Arc<str> {
        &self.namespace
    }

    pub fn is_primitive(&self) -> bool {
        self.is_primitive
    }

    /// Platform/built-in node: members and attributes are never traversed.
    pub fn is_system(&self) -> bool {
        self.is_system
    }

    pub fn position(&self) -> &SourcePos {
        &self.position
    }

    // ============================================================
    // Mutability / visibility
    // ============================================================

    fn access(&self) -> AccessFacts {
        *self.access.get_or_init(|| {
            let read = self.handle.read_access();
            let write = self.handle.write_access();
            // Effective visibility is the minimum of the present
            // accessors; no accessor at all means not visible.
            let effective = match (read, write) {
                (Some(r), Some(w)) => Some(r.min(w)),
                (Some(r), None) => Some(r),
                (None, Some(w)) => Some(w),
                (None, None) => None,
            };
            AccessFacts {
                is_public: effective == Some(crate::model::Accessibility::Public),
                is_readable: read.is_some(),
                is_writable: write.is_some(),
            }
        })
    }

    pub fn is_public(&self) -> bool {
        self.access().is_public
    }

    pub fn is_readable(&self) -> bool {
        self.access().is_readable
    }

    pub fn is_writable(&self) -> bool {
        self.access().is_writable
    }

    pub fn is_read_only(&self) -> bool {
        let access = self.access();
        access.is_readable && !access.is_writable
    }

    /// Readable and writable: round-trippable by a serializer.
    pub fn is_serializable(&self) -> bool {
        let access = self.access();
        access.is_readable && access.is_writable
    }

    pub fn is_static(&self) -> bool {
        *self.is_static.get_or_init(|| self.handle.is_static())
    }

    pub fn is_partial(&self) -> bool {
        *self.is_partial.get_or_init(|| self.handle.is_partial())
    }

    pub fn is_tuple(&self) -> bool {
        *self.is_tuple.get_or_init(|| self.handle.is_tuple())
    }

    // ============================================================
    // Relationships (registry references)
    // ============================================================

    /// The nearest supertype, `None` for the universal root.
    pub fn base_object(&self, g: &GraphRegistry) -> Option<ObjectRef> {
        let id = *self
            .base_object
            .get_or_init(|| self.handle.base().map(|h| g.intern(h).id()));
        id.map(|id| g.get(id))
    }

    /// The lexical parent, if nested.
    pub fn containing_object(&self, g: &GraphRegistry) -> Option<ObjectRef> {
        let id = *self
            .containing_object
            .get_or_init(|| self.handle.containing().map(|h| g.intern(h).id()));
        id.map(|id| g.get(id))
    }

    /// For a member: the node for its declared/return type. For a type
    /// node: itself.
    pub fn type_object(&self, g: &GraphRegistry) -> Option<ObjectRef> {
        let id = *self.type_object.get_or_init(|| {
            if self.kind.is_type() {
                Some(self.id)
            } else {
                self.handle.type_of().map(|h| g.intern(h).id())
            }
        });
        id.map(|id| g.get(id))
    }

    /// The unbound generic definition; the node itself when not a
    /// constructed generic.
    pub fn original_definition(&self, g: &GraphRegistry) -> ObjectRef {
        let id = *self.original_definition.get_or_init(|| {
            self.handle
                .original_definition()
                .map(|h| g.intern(h).id())
                .unwrap_or(self.id)
        });
        g.get(id)
    }

    /// The element type, for array nodes.
    pub fn array_element(&self, g: &GraphRegistry) -> Option<ObjectRef> {
        let id = *self
            .array_element
            .get_or_init(|| self.handle.array_element().map(|h| g.intern(h).id()));
        id.map(|id| g.get(id))
    }

    pub fn array_rank(&self) -> u32 {
        *self.array_rank.get_or_init(|| self.handle.array_rank())
    }

    /// The underlying value type, for enum nodes.
    pub fn enum_underlying_type(&self, g: &GraphRegistry) -> Option<ObjectRef> {
        let id = *self
            .enum_underlying
            .get_or_init(|| self.handle.enum_underlying().map(|h| g.intern(h).id()));
        id.map(|id| g.get(id))
    }

    // ============================================================
    // Members
    // ============================================================

    /// All members, flattened across the inheritance chain (exclusive of
    /// the universal root), in declaration order. Shadowed members stay
    /// visible: no dedup by simple name. Compiler plumbing and implicit
    /// constructors are excluded; unclassifiable members are dropped.
    pub fn all_members(&self, g: &GraphRegistry) -> Vec<ObjectRef> {
        let ids = self.members.get_or_init(|| self.compute_members(g));
        ids.iter().map(|id| g.get(*id)).collect()
    }

    fn compute_members(&self, g: &GraphRegistry) -> Vec<ObjectId> {
        // System internals are deliberately opaque.
        if self.is_system || self.is_primitive {
            return Vec::new();
        }
        let options = g.options();
        let mut out = Vec::new();
        let mut seen_chain: FxHashSet<Arc<str>> = FxHashSet::default();
        let mut current = Some(self.handle.clone());
        while let Some(handle) = current {
            let type_name = handle.full_name();
            if options.is_root(&type_name) {
                break;
            }
            if !seen_chain.insert(type_name.clone()) {
                warn!("[MEMBERS] inheritance chain revisits '{type_name}', stopping walk");
                break;
            }
            let enum_owner = handle.classify() == ObjectKind::Enum;
            for member in handle.members() {
                if self.skip_member(&member, &handle, enum_owner, g) {
                    continue;
                }
                // Intern through the unbound definition so member identity
                // is stable across instantiations of the declaring type.
                let member = match (member.classify().is_type(), member.original_definition()) {
                    (true, Some(definition)) => definition,
                    _ => member,
                };
                let node = g.intern(member);
                if node.kind().is_supported() {
                    out.push(node.id());
                }
            }
            current = handle.base();
        }
        trace!(
            "[MEMBERS] {} -> {} members across chain",
            self.full_name,
            out.len()
        );
        out
    }

    fn skip_member(
        &self,
        member: &HandleRef,
        declaring: &HandleRef,
        enum_owner: bool,
        g: &GraphRegistry,
    ) -> bool {
        let options = g.options();
        // Constructors of platform types and implicit (compiler-supplied)
        // default constructors are noise for every consumer.
        if member.is_constructor()
            && (member.is_implicitly_declared() || options.is_system_namespace(&declaring.namespace()))
        {
            return true;
        }
        // Members declared in a platform namespace are not for exposure.
        if options.is_system_namespace(&member.namespace()) {
            return true;
        }
        // Enums carry a synthesized constructor and a synthesized
        // underlying-value accessor; neither is a real member.
        if enum_owner
            && (member.is_constructor() || member.simple_name().as_ref() == "value__")
        {
            return true;
        }
        false
    }

    // ============================================================
    // Interfaces / attributes
    // ============================================================

    /// The flattened transitive interface set, as fully qualified names.
    /// Names rather than nodes: the set is only needed for name matching,
    /// and staying on strings avoids a second graph traversal.
    pub fn all_interfaces(&self) -> &[Arc<str>] {
        self.interfaces.get_or_init(|| {
            if self.is_system || self.is_primitive {
                return Vec::new();
            }
            let mut seen: FxHashSet<Arc<str>> = FxHashSet::default();
            let mut out = Vec::new();
            let mut chain_guard: FxHashSet<Arc<str>> = FxHashSet::default();
            let mut current = Some(self.handle.clone());
            while let Some(handle) = current {
                if !chain_guard.insert(handle.full_name()) {
                    break;
                }
                for interface in handle.interfaces() {
                    collect_interfaces(&interface, &mut seen, &mut out);
                }
                current = handle.base();
            }
            out
        })
    }

    /// Reified attribute applications, in application order, with
    /// infrastructure decorations (compiler-synthesized markers) removed.
    pub fn all_attributes(&self, g: &GraphRegistry) -> &[AttributeData] {
        self.attributes.get_or_init(|| {
            if self.is_system || self.is_primitive {
                return Vec::new();
            }
            let options = g.options();
            self.handle
                .attributes()
                .into_iter()
                .filter(|attr| !options.is_infrastructure(attr.full_name()))
                .collect()
        })
    }

    // ============================================================
    // Generics
    // ============================================================

    /// Generic classification; open-ness propagates through containers.
    pub fn generics_kind(&self) -> GenericsKind {
        *self
            .generics_kind
            .get_or_init(|| generics_kind_of(&self.handle))
    }

    /// Argument (or unbound parameter) nodes introduced at this nesting
    /// level only.
    pub fn generics_arguments(&self, g: &GraphRegistry) -> Vec<ObjectRef> {
        let ids = self.generics_arguments.get_or_init(|| {
            self.handle
                .generic_arguments()
                .into_iter()
                .map(|h| g.intern(h).id())
                .collect()
        });
        ids.iter().map(|id| g.get(*id)).collect()
    }

    // ============================================================
    // Nullability
    // ============================================================

    /// The nullability annotation of this node's own use site.
    pub fn nullability(&self) -> Nullability {
        *self.nullability.get_or_init(|| self.handle.nullability())
    }

    /// This node's type, wrapped with the use site's annotation.
    pub fn nullable_type(&self, g: &GraphRegistry) -> Option<NullableObject> {
        let target = self.type_object(g)?;
        Some(NullableObject::new(&target, self.nullability()))
    }

    /// Generic argument positions wrapped with their own per-argument
    /// annotations - never the containing type's. The wrappers themselves
    /// are values: callers get fresh clones, not interned instances.
    pub fn nullable_generic_arguments(&self, g: &GraphRegistry) -> Vec<NullableObject> {
        self.nullable_generics
            .get_or_init(|| {
                let annotations = self.handle.generic_argument_annotations();
                self.generics_arguments(g)
                    .iter()
                    .enumerate()
                    .map(|(position, node)| {
                        let annotation =
                            annotations.get(position).copied().unwrap_or_default();
                        NullableObject::new(node, annotation)
                    })
                    .collect()
            })
            .clone()
    }

    // ============================================================
    // Methods
    // ============================================================

    /// Parameter type full names, for method nodes.
    pub fn method_parameters(&self) -> &[Arc<str>] {
        self.method_parameters
            .get_or_init(|| self.handle.method_parameters())
    }

    pub fn method_is_constructor(&self) -> bool {
        *self
            .method_is_constructor
            .get_or_init(|| self.handle.is_constructor())
    }
}

/// Depth-first flattening of one interface and everything it extends.
fn collect_interfaces(
    handle: &HandleRef,
    seen: &mut FxHashSet<Arc<str>>,
    out: &mut Vec<Arc<str>>,
) {
    let name = handle.full_name();
    if !seen.insert(name.clone()) {
        return;
    }
    out.push(name);
    for extended in handle.interfaces() {
        collect_interfaces(&extended, seen, out);
    }
}

/// Generic classification of a handle, recursing through containers.
fn generics_kind_of(handle: &HandleRef) -> GenericsKind {
    let args = handle.generic_arguments();
    let own = if args.is_empty() {
        None
    } else if args
        .iter()
        .any(|a| a.classify() == ObjectKind::TypeParameter)
    {
        Some(GenericsKind::OpenGeneric)
    } else {
        Some(GenericsKind::ClosedGeneric)
    };
    let outer = handle.containing().map(|c| generics_kind_of(&c));
    match (own, outer) {
        (Some(GenericsKind::OpenGeneric), _) | (_, Some(GenericsKind::OpenGeneric)) => {
            GenericsKind::OpenGeneric
        }
        (Some(GenericsKind::ClosedGeneric), _) | (_, Some(GenericsKind::ClosedGeneric)) => {
            GenericsKind::ClosedGeneric
        }
        _ => GenericsKind::NotGeneric,
    }
}
