//! The runtime metadata backend.
//!
//! Entity records live in a [`MetadataCatalog`] keyed by fully qualified
//! name. Facts come from metadata flags (`is_public`, `can_read`,
//! `is_init_only`, special-name markers, `<…>k__BackingField` naming) the
//! way a runtime type catalogue reports them. No source text exists here:
//! every position is unknown.
//!
//! Nested-type and generic naming is normalized to the engine's unified
//! format at record-construction time, so both backends present identical
//! name forms for the same logical type.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::base::names;
use crate::error::{GraphError, GraphResult};
use crate::model::{Accessibility, AttributeData, Nullability, ObjectKind};

use super::{HandleRef, SymbolHandle};

/// What an entity record describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityShape {
    Type { category: TypeCategory },
    Field,
    Property,
    Method,
}

/// Metadata-level type category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeCategory {
    Class,
    Interface,
    ValueType,
    Enum,
    GenericParameter,
    Delegate,
}

/// One entity record of the metadata catalogue.
///
/// Construct through the shape-specific constructors and `with_*`
/// builders, then insert into a [`MetadataCatalog`].
#[derive(Clone, Debug)]
pub struct EntityRecord {
    full_name: Arc<str>,
    simple_name: Arc<str>,
    namespace: Arc<str>,
    containing: Option<Arc<str>>,
    shape: EntityShape,

    // Metadata flag word, reflection style.
    is_public: bool,
    can_read: bool,
    can_write: bool,
    getter_public: bool,
    setter_public: bool,
    is_init_only: bool,
    is_literal: bool,
    is_static: bool,
    is_special_name: bool,
    is_record_marker: bool,
    is_partial_marker: bool,
    is_tuple_marker: bool,
    is_implicit: bool,

    base: Option<Arc<str>>,
    interfaces: Vec<Arc<str>>,
    members: Vec<Arc<str>>,
    generic_parts: Vec<Arc<str>>,
    generic_args: Vec<(Arc<str>, Nullability)>,
    original_definition: Option<Arc<str>>,
    value_type: Option<Arc<str>>,
    enum_underlying: Option<Arc<str>>,
    array_element: Option<Arc<str>>,
    array_rank: u32,
    method_parameters: Vec<Arc<str>>,
    attributes: Vec<AttributeData>,
    nullability: Nullability,
}

impl EntityRecord {
    fn bare(namespace: &str, simple_name: &str, shape: EntityShape) -> Self {
        Self {
            full_name: names::qualify(namespace, simple_name).into(),
            simple_name: simple_name.into(),
            namespace: namespace.into(),
            containing: None,
            shape,
            is_public: true,
            can_read: true,
            can_write: true,
            getter_public: true,
            setter_public: true,
            is_init_only: false,
            is_literal: false,
            is_static: false,
            is_special_name: false,
            is_record_marker: false,
            is_partial_marker: false,
            is_tuple_marker: false,
            is_implicit: false,
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            generic_parts: Vec::new(),
            generic_args: Vec::new(),
            original_definition: None,
            value_type: None,
            enum_underlying: None,
            array_element: None,
            array_rank: 0,
            method_parameters: Vec::new(),
            attributes: Vec::new(),
            nullability: Nullability::Unknown,
        }
    }

    fn member(containing: &str, simple_name: &str, shape: EntityShape) -> Self {
        let mut record = Self::bare("", simple_name, shape);
        record.containing = Some(containing.into());
        record.full_name = names::qualify(containing, simple_name).into();
        record
    }

    // ------------------------------------------------------------
    // Shape-specific constructors
    // ------------------------------------------------------------

    pub fn class(namespace: &str, name: &str) -> Self {
        Self::bare(
            namespace,
            name,
            EntityShape::Type {
                category: TypeCategory::Class,
            },
        )
    }

    pub fn interface(namespace: &str, name: &str) -> Self {
        Self::bare(
            namespace,
            name,
            EntityShape::Type {
                category: TypeCategory::Interface,
            },
        )
    }

    pub fn value_type(namespace: &str, name: &str) -> Self {
        Self::bare(
            namespace,
            name,
            EntityShape::Type {
                category: TypeCategory::ValueType,
            },
        )
    }

    pub fn record_class(namespace: &str, name: &str) -> Self {
        let mut record = Self::class(namespace, name);
        record.is_record_marker = true;
        record
    }

    pub fn enumeration(namespace: &str, name: &str) -> Self {
        Self::bare(
            namespace,
            name,
            EntityShape::Type {
                category: TypeCategory::Enum,
            },
        )
    }

    pub fn delegate(namespace: &str, name: &str) -> Self {
        Self::bare(
            namespace,
            name,
            EntityShape::Type {
                category: TypeCategory::Delegate,
            },
        )
    }

    /// A generic parameter record; full name is `{owner}.{name}`.
    pub fn generic_parameter(owner: &str, name: &str) -> Self {
        Self::member(
            owner,
            name,
            EntityShape::Type {
                category: TypeCategory::GenericParameter,
            },
        )
    }

    pub fn field(containing: &str, name: &str, value_type: &str) -> Self {
        let mut record = Self::member(containing, name, EntityShape::Field);
        record.value_type = Some(value_type.into());
        record
    }

    /// A compiler-generated property backing field, named the way the
    /// compiler emits it: `<Name>k__BackingField`.
    pub fn backing_field(containing: &str, property: &str, value_type: &str) -> Self {
        let mut record = Self::member(
            containing,
            &format!("<{property}>k__BackingField"),
            EntityShape::Field,
        );
        record.value_type = Some(value_type.into());
        record.is_public = false;
        record
    }

    pub fn property(containing: &str, name: &str, value_type: &str) -> Self {
        let mut record = Self::member(containing, name, EntityShape::Property);
        record.value_type = Some(value_type.into());
        record
    }

    pub fn method(containing: &str, name: &str, return_type: &str) -> Self {
        let mut record = Self::member(containing, name, EntityShape::Method);
        record.value_type = Some(return_type.into());
        record.can_write = false;
        record
    }

    pub fn constructor(containing: &str) -> Self {
        let mut record = Self::member(containing, ".ctor", EntityShape::Method);
        record.can_write = false;
        record
    }

    /// A special-name method (property/event accessor, operator); never
    /// part of the supported surface.
    pub fn special_method(containing: &str, name: &str) -> Self {
        let mut record = Self::member(containing, name, EntityShape::Method);
        record.is_special_name = true;
        record.can_write = false;
        record
    }

    // ------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------

    /// Nest this record inside a containing type (recomputes the full
    /// name; the engine uses `.` for nesting, not the metadata `+`).
    pub fn nested_in(mut self, containing: &str) -> Self {
        self.containing = Some(containing.into());
        self.recompute_full_name();
        self
    }

    pub fn with_base(mut self, base: &str) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn with_interfaces<S: Into<Arc<str>>>(
        mut self,
        interfaces: impl IntoIterator<Item = S>,
    ) -> Self {
        self.interfaces = interfaces.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_members<S: Into<Arc<str>>>(mut self, members: impl IntoIterator<Item = S>) -> Self {
        self.members = members.into_iter().map(Into::into).collect();
        self
    }

    /// Declare unbound generic parameters (see
    /// [`EntityRecord::generic_parameter`] for the parameter records).
    pub fn with_generic_params<S: Into<Arc<str>>>(
        mut self,
        params: impl IntoIterator<Item = S>,
    ) -> Self {
        self.generic_parts = params.into_iter().map(Into::into).collect();
        self.recompute_full_name();
        // Parameter positions are declarations, not use sites; both
        // backends report them unannotated so the surfaces agree.
        self.generic_args = self
            .generic_parts
            .iter()
            .map(|p| {
                (
                    Arc::from(names::qualify(&self.full_name, p)),
                    Nullability::Unannotated,
                )
            })
            .collect();
        self
    }

    /// Supply generic arguments (full names) for a constructed type, each
    /// with its own use-site nullability.
    pub fn with_generic_args<S: Into<Arc<str>>>(
        mut self,
        args: impl IntoIterator<Item = (S, Nullability)>,
    ) -> Self {
        self.generic_args = args
            .into_iter()
            .map(|(name, nullability)| (name.into(), nullability))
            .collect();
        self.generic_parts = self.generic_args.iter().map(|(n, _)| n.clone()).collect();
        self.recompute_full_name();
        self
    }

    pub fn with_original_definition(mut self, definition: &str) -> Self {
        self.original_definition = Some(definition.into());
        self
    }

    pub fn with_enum_underlying(mut self, underlying: &str) -> Self {
        self.enum_underlying = Some(underlying.into());
        self
    }

    pub fn with_array(mut self, element: &str, rank: u32) -> Self {
        self.array_element = Some(element.into());
        self.array_rank = rank;
        self
    }

    /// Clear the public flag (and both accessor visibility bits).
    pub fn with_non_public(mut self) -> Self {
        self.is_public = false;
        self.getter_public = false;
        self.setter_public = false;
        self
    }

    /// Set property accessor presence and visibility bits:
    /// `None` = accessor absent, `Some(true)` = public accessor.
    pub fn with_accessors(mut self, getter: Option<bool>, setter: Option<bool>) -> Self {
        self.can_read = getter.is_some();
        self.getter_public = getter.unwrap_or(false);
        self.can_write = setter.is_some();
        self.setter_public = setter.unwrap_or(false);
        self
    }

    /// Mark a field init-only (`readonly` in metadata).
    pub fn with_init_only(mut self) -> Self {
        self.is_init_only = true;
        self
    }

    /// Mark a field a compile-time literal (`const`).
    pub fn with_literal(mut self) -> Self {
        self.is_literal = true;
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_partial_marker(mut self) -> Self {
        self.is_partial_marker = true;
        self
    }

    pub fn with_tuple_marker(mut self) -> Self {
        self.is_tuple_marker = true;
        self
    }

    /// Mark the record compiler-supplied (implicit default constructors,
    /// synthesized enum plumbing).
    pub fn with_implicit(mut self) -> Self {
        self.is_implicit = true;
        self
    }

    pub fn with_method_parameters<S: Into<Arc<str>>>(
        mut self,
        parameters: impl IntoIterator<Item = S>,
    ) -> Self {
        self.method_parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeData) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_nullability(mut self, nullability: Nullability) -> Self {
        self.nullability = nullability;
        self
    }

    pub fn full_name(&self) -> &Arc<str> {
        &self.full_name
    }

    fn recompute_full_name(&mut self) {
        let scope = self
            .containing
            .as_deref()
            .unwrap_or(self.namespace.as_ref());
        let parts: Vec<&str> = self.generic_parts.iter().map(|p| p.as_ref()).collect();
        let local = format!("{}{}", self.simple_name, names::generic_suffix(&parts));
        self.full_name = names::qualify(scope, &local).into();
    }

    fn classify(&self) -> ObjectKind {
        match self.shape {
            EntityShape::Type { category } => match category {
                TypeCategory::Class if self.is_record_marker => ObjectKind::Record,
                TypeCategory::Class => ObjectKind::Class,
                TypeCategory::Interface => ObjectKind::Interface,
                TypeCategory::ValueType => ObjectKind::Struct,
                TypeCategory::Enum => ObjectKind::Enum,
                TypeCategory::GenericParameter => ObjectKind::TypeParameter,
                TypeCategory::Delegate => ObjectKind::None,
            },
            EntityShape::Field => {
                if self.is_special_name || self.simple_name.contains("k__BackingField") {
                    ObjectKind::None
                } else {
                    ObjectKind::Field
                }
            }
            EntityShape::Property => ObjectKind::Property,
            EntityShape::Method => {
                if self.is_special_name {
                    ObjectKind::None
                } else {
                    ObjectKind::Method
                }
            }
        }
    }

    fn visibility(&self) -> Accessibility {
        if self.is_public {
            Accessibility::Public
        } else {
            Accessibility::Internal
        }
    }
}

/// The runtime type catalogue: records keyed by fully qualified name.
#[derive(Debug, Default)]
pub struct MetadataCatalog {
    entities: RefCell<IndexMap<Arc<str>, Rc<EntityRecord>>>,
}

impl MetadataCatalog {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Insert a record. Duplicate full names are an error.
    pub fn insert(&self, record: EntityRecord) -> GraphResult<()> {
        let mut entities = self.entities.borrow_mut();
        let key = record.full_name.clone();
        if entities.contains_key(&key) {
            return Err(GraphError::duplicate(key));
        }
        entities.insert(key, Rc::new(record));
        Ok(())
    }

    /// Check that every cross-reference resolves to a record. Run after
    /// building a catalogue; a dangling reference at query time is a
    /// programmer error and panics.
    pub fn verify(&self) -> GraphResult<()> {
        let entities = self.entities.borrow();
        for (name, record) in entities.iter() {
            let mut targets: Vec<&Arc<str>> = Vec::new();
            targets.extend(&record.base);
            targets.extend(&record.containing);
            targets.extend(&record.members);
            targets.extend(&record.original_definition);
            targets.extend(&record.value_type);
            targets.extend(&record.enum_underlying);
            targets.extend(&record.array_element);
            targets.extend(record.interfaces.iter());
            targets.extend(record.generic_args.iter().map(|(n, _)| n));
            for target in targets {
                if !entities.contains_key(target) {
                    return Err(GraphError::unresolved(name.clone(), target.clone()));
                }
            }
        }
        Ok(())
    }

    /// Get a handle for a record by full name.
    pub fn handle(self: &Rc<Self>, full_name: &str) -> Option<HandleRef> {
        let record = self.entities.borrow().get(full_name).cloned()?;
        Some(Rc::new(MetadataHandle {
            catalog: self.clone(),
            record,
        }) as HandleRef)
    }

    fn resolve(self: &Rc<Self>, from: &str, target: &str) -> HandleRef {
        let record = self
            .entities
            .borrow()
            .get(target)
            .cloned()
            .unwrap_or_else(|| {
                panic!("metadata catalog: '{from}' references unknown entity '{target}'")
            });
        Rc::new(MetadataHandle {
            catalog: self.clone(),
            record,
        })
    }
}

/// A handle over one metadata record.
#[derive(Debug)]
struct MetadataHandle {
    catalog: Rc<MetadataCatalog>,
    record: Rc<EntityRecord>,
}

impl MetadataHandle {
    fn resolve(&self, target: &str) -> HandleRef {
        self.catalog.resolve(&self.record.full_name, target)
    }
}

impl SymbolHandle for MetadataHandle {
    fn classify(&self) -> ObjectKind {
        self.record.classify()
    }

    fn full_name(&self) -> Arc<str> {
        self.record.full_name.clone()
    }

    fn simple_name(&self) -> Arc<str> {
        self.record.simple_name.clone()
    }

    fn local_name(&self) -> Arc<str> {
        let parts: Vec<&str> = self
            .record
            .generic_parts
            .iter()
            .map(|p| names::short_display(p))
            .collect();
        format!(
            "{}{}",
            self.record.simple_name,
            names::generic_suffix(&parts)
        )
        .into()
    }

    fn regional_name(&self) -> Arc<str> {
        match &self.record.containing {
            Some(containing) => {
                let outer = self.resolve(containing).regional_name();
                names::qualify(&outer, &self.local_name()).into()
            }
            None => self.local_name(),
        }
    }

    fn namespace(&self) -> Arc<str> {
        if !self.record.namespace.is_empty() {
            return self.record.namespace.clone();
        }
        match &self.record.containing {
            Some(containing) => self.resolve(containing).namespace(),
            None => self.record.namespace.clone(),
        }
    }

    // No source text behind runtime metadata: positions stay unknown
    // (the trait default).

    fn attributes(&self) -> Vec<AttributeData> {
        self.record.attributes.clone()
    }

    fn members(&self) -> Vec<HandleRef> {
        self.record
            .members
            .iter()
            .map(|name| self.resolve(name))
            .collect()
    }

    fn base(&self) -> Option<HandleRef> {
        self.record.base.as_deref().map(|name| self.resolve(name))
    }

    fn containing(&self) -> Option<HandleRef> {
        self.record
            .containing
            .as_deref()
            .map(|name| self.resolve(name))
    }

    fn interfaces(&self) -> Vec<HandleRef> {
        self.record
            .interfaces
            .iter()
            .map(|name| self.resolve(name))
            .collect()
    }

    fn generic_arguments(&self) -> Vec<HandleRef> {
        self.record
            .generic_args
            .iter()
            .map(|(name, _)| self.resolve(name))
            .collect()
    }

    fn generic_argument_annotations(&self) -> Vec<Nullability> {
        self.record
            .generic_args
            .iter()
            .map(|(_, nullability)| *nullability)
            .collect()
    }

    fn original_definition(&self) -> Option<HandleRef> {
        self.record
            .original_definition
            .as_deref()
            .map(|name| self.resolve(name))
    }

    fn type_of(&self) -> Option<HandleRef> {
        self.record
            .value_type
            .as_deref()
            .map(|name| self.resolve(name))
    }

    fn enum_underlying(&self) -> Option<HandleRef> {
        self.record
            .enum_underlying
            .as_deref()
            .map(|name| self.resolve(name))
    }

    fn array_element(&self) -> Option<HandleRef> {
        self.record
            .array_element
            .as_deref()
            .map(|name| self.resolve(name))
    }

    fn array_rank(&self) -> u32 {
        self.record.array_rank
    }

    fn read_access(&self) -> Option<Accessibility> {
        let record = &self.record;
        match record.shape {
            EntityShape::Type { .. } => Some(record.visibility()),
            EntityShape::Field => Some(record.visibility()),
            EntityShape::Property => record.can_read.then(|| {
                if record.getter_public {
                    Accessibility::Public
                } else {
                    Accessibility::Private
                }
            }),
            EntityShape::Method => Some(record.visibility()),
        }
    }

    fn write_access(&self) -> Option<Accessibility> {
        let record = &self.record;
        match record.shape {
            EntityShape::Type { .. } => Some(record.visibility()),
            EntityShape::Field => (!record.is_init_only && !record.is_literal)
                .then(|| record.visibility()),
            EntityShape::Property => record.can_write.then(|| {
                if record.setter_public {
                    Accessibility::Public
                } else {
                    Accessibility::Private
                }
            }),
            EntityShape::Method => None,
        }
    }

    fn is_static(&self) -> bool {
        self.record.is_static
    }

    fn is_partial(&self) -> bool {
        self.record.is_partial_marker
    }

    fn is_tuple(&self) -> bool {
        self.record.is_tuple_marker
    }

    fn is_implicitly_declared(&self) -> bool {
        self.record.is_implicit
    }

    fn is_constructor(&self) -> bool {
        matches!(self.record.shape, EntityShape::Method)
            && self.record.simple_name.as_ref() == ".ctor"
    }

    fn method_parameters(&self) -> Vec<Arc<str>> {
        self.record.method_parameters.clone()
    }

    fn nullability(&self) -> Nullability {
        self.record.nullability
    }
}
