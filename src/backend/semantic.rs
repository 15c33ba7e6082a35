//! The compile-time semantic-model backend.
//!
//! Symbol rows live in a [`SemanticModel`] table keyed by fully qualified
//! name; cross-references between rows are names, so self-referential and
//! mutually recursive definitions need no special casing. Rows carry
//! per-accessor accessibility, declaration roles, and source positions -
//! the facts a live compilation exposes.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::base::{names, SourcePos};
use crate::error::{GraphError, GraphResult};
use crate::model::{Accessibility, AttributeData, Nullability, ObjectKind};

use super::{HandleRef, SymbolHandle};

/// What a symbol row declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolDecl {
    Class,
    Interface,
    Struct,
    Record,
    Enum,
    TypeParameter,
    /// Delegates are not part of the supported surface.
    Delegate,
    /// Events are not part of the supported surface.
    Event,
    Field {
        /// Compiler-generated backing storage for a property.
        backing: bool,
    },
    Property,
    Method {
        role: MethodRole,
    },
}

/// The role of a method declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodRole {
    Ordinary,
    Constructor,
    /// Property accessor; classifies as unsupported on its own.
    Getter,
    /// Property accessor; classifies as unsupported on its own.
    Setter,
    Operator,
}

/// One row of the semantic model.
///
/// Construct through the kind-specific constructors and `with_*`
/// builders, then insert into a [`SemanticModel`].
#[derive(Clone, Debug)]
pub struct SymbolData {
    full_name: Arc<str>,
    simple_name: Arc<str>,
    namespace: Arc<str>,
    containing: Option<Arc<str>>,
    decl: SymbolDecl,
    base: Option<Arc<str>>,
    interfaces: Vec<Arc<str>>,
    members: Vec<Arc<str>>,
    /// Suffix parts as rendered into the full name (parameter simple
    /// names for definitions, argument full names for instantiations).
    generic_parts: Vec<Arc<str>>,
    /// Row keys of the arguments/parameters introduced at this level.
    generic_args: Vec<(Arc<str>, Nullability)>,
    original_definition: Option<Arc<str>>,
    value_type: Option<Arc<str>>,
    enum_underlying: Option<Arc<str>>,
    array_element: Option<Arc<str>>,
    array_rank: u32,
    read: Option<Accessibility>,
    write: Option<Accessibility>,
    is_static: bool,
    is_partial: bool,
    is_tuple: bool,
    is_implicit: bool,
    method_parameters: Vec<Arc<str>>,
    attributes: Vec<AttributeData>,
    nullability: Nullability,
    position: SourcePos,
}

impl SymbolData {
    fn bare(namespace: &str, simple_name: &str, decl: SymbolDecl) -> Self {
        Self {
            full_name: names::qualify(namespace, simple_name).into(),
            simple_name: simple_name.into(),
            namespace: namespace.into(),
            containing: None,
            decl,
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
            read: Some(Accessibility::Public),
            write: Some(Accessibility::Public),
            is_static: false,
            is_partial: false,
            is_tuple: false,
            is_implicit: false,
            method_parameters: Vec::new(),
            attributes: Vec::new(),
            nullability: Nullability::Unannotated,
            position: SourcePos::unknown(),
        }
    }

    fn member(containing: &str, simple_name: &str, decl: SymbolDecl) -> Self {
        let mut data = Self::bare("", simple_name, decl);
        data.containing = Some(containing.into());
        data.full_name = names::qualify(containing, simple_name).into();
        data
    }

    // ------------------------------------------------------------
    // Kind-specific constructors
    // ------------------------------------------------------------

    pub fn class(namespace: &str, name: &str) -> Self {
        Self::bare(namespace, name, SymbolDecl::Class)
    }

    pub fn interface(namespace: &str, name: &str) -> Self {
        Self::bare(namespace, name, SymbolDecl::Interface)
    }

    pub fn structure(namespace: &str, name: &str) -> Self {
        Self::bare(namespace, name, SymbolDecl::Struct)
    }

    pub fn record(namespace: &str, name: &str) -> Self {
        Self::bare(namespace, name, SymbolDecl::Record)
    }

    pub fn enumeration(namespace: &str, name: &str) -> Self {
        Self::bare(namespace, name, SymbolDecl::Enum)
    }

    pub fn delegate(namespace: &str, name: &str) -> Self {
        Self::bare(namespace, name, SymbolDecl::Delegate)
    }

    /// A generic type parameter row; its full name is
    /// `{owner_full_name}.{name}` by convention.
    pub fn type_parameter(owner: &str, name: &str) -> Self {
        Self::member(owner, name, SymbolDecl::TypeParameter)
    }

    pub fn field(containing: &str, name: &str, value_type: &str) -> Self {
        let mut data = Self::member(containing, name, SymbolDecl::Field { backing: false });
        data.value_type = Some(value_type.into());
        data
    }

    /// A compiler-generated backing field; classifies as unsupported.
    pub fn backing_field(containing: &str, name: &str, value_type: &str) -> Self {
        let mut data = Self::member(containing, name, SymbolDecl::Field { backing: true });
        data.value_type = Some(value_type.into());
        data
    }

    pub fn property(containing: &str, name: &str, value_type: &str) -> Self {
        let mut data = Self::member(containing, name, SymbolDecl::Property);
        data.value_type = Some(value_type.into());
        data
    }

    pub fn method(containing: &str, name: &str, return_type: &str) -> Self {
        let mut data = Self::member(
            containing,
            name,
            SymbolDecl::Method {
                role: MethodRole::Ordinary,
            },
        );
        data.value_type = Some(return_type.into());
        data.write = None;
        data
    }

    pub fn constructor(containing: &str) -> Self {
        let mut data = Self::member(
            containing,
            ".ctor",
            SymbolDecl::Method {
                role: MethodRole::Constructor,
            },
        );
        data.write = None;
        data
    }

    /// A property accessor method row; classifies as unsupported.
    pub fn accessor(containing: &str, name: &str, role: MethodRole) -> Self {
        let mut data = Self::member(containing, name, SymbolDecl::Method { role });
        data.write = None;
        data
    }

    pub fn event(containing: &str, name: &str) -> Self {
        Self::member(containing, name, SymbolDecl::Event)
    }

    // ------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------

    /// Nest this row inside a containing type (recomputes the full name).
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

    /// Declare unbound generic parameters. Renders a `<T, U>` suffix into
    /// the names and references the parameter rows
    /// (`{self}.{param}`, see [`SymbolData::type_parameter`]).
    pub fn with_generic_params<S: Into<Arc<str>>>(
        mut self,
        params: impl IntoIterator<Item = S>,
    ) -> Self {
        self.generic_parts = params.into_iter().map(Into::into).collect();
        self.recompute_full_name();
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

    /// Supply generic arguments (full names) for an instantiation, each
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

    /// Set read-side and write-side accessibility; `None` marks an absent
    /// accessor (not-readable / not-writable).
    pub fn with_access(
        mut self,
        read: Option<Accessibility>,
        write: Option<Accessibility>,
    ) -> Self {
        self.read = read;
        self.write = write;
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_partial(mut self) -> Self {
        self.is_partial = true;
        self
    }

    pub fn with_tuple(mut self) -> Self {
        self.is_tuple = true;
        self
    }

    /// Mark the row compiler-supplied (implicit default constructors,
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

    pub fn with_position(mut self, position: SourcePos) -> Self {
        self.position = position;
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
        match self.decl {
            SymbolDecl::Class => ObjectKind::Class,
            SymbolDecl::Interface => ObjectKind::Interface,
            SymbolDecl::Struct => ObjectKind::Struct,
            SymbolDecl::Record => ObjectKind::Record,
            SymbolDecl::Enum => ObjectKind::Enum,
            SymbolDecl::TypeParameter => ObjectKind::TypeParameter,
            SymbolDecl::Delegate | SymbolDecl::Event => ObjectKind::None,
            SymbolDecl::Field { backing: true } => ObjectKind::None,
            SymbolDecl::Field { backing: false } => ObjectKind::Field,
            SymbolDecl::Property => ObjectKind::Property,
            SymbolDecl::Method { role } => match role {
                MethodRole::Ordinary | MethodRole::Constructor => ObjectKind::Method,
                MethodRole::Getter | MethodRole::Setter | MethodRole::Operator => ObjectKind::None,
            },
        }
    }
}

/// The compile-time symbol table: rows keyed by fully qualified name.
#[derive(Debug, Default)]
pub struct SemanticModel {
    symbols: RefCell<IndexMap<Arc<str>, Rc<SymbolData>>>,
}

impl SemanticModel {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Insert a row. Duplicate full names are an error.
    pub fn insert(&self, data: SymbolData) -> GraphResult<()> {
        let mut symbols = self.symbols.borrow_mut();
        let key = data.full_name.clone();
        if symbols.contains_key(&key) {
            return Err(GraphError::duplicate(key));
        }
        symbols.insert(key, Rc::new(data));
        Ok(())
    }

    /// Check that every cross-reference resolves to a row. Run after
    /// building a model; a dangling reference at query time is a
    /// programmer error and panics.
    pub fn verify(&self) -> GraphResult<()> {
        let symbols = self.symbols.borrow();
        for (name, data) in symbols.iter() {
            let mut targets: Vec<&Arc<str>> = Vec::new();
            targets.extend(&data.base);
            targets.extend(&data.containing);
            targets.extend(&data.members);
            targets.extend(&data.original_definition);
            targets.extend(&data.value_type);
            targets.extend(&data.enum_underlying);
            targets.extend(&data.array_element);
            targets.extend(data.interfaces.iter());
            targets.extend(data.generic_args.iter().map(|(n, _)| n));
            for target in targets {
                if !symbols.contains_key(target) {
                    return Err(GraphError::unresolved(name.clone(), target.clone()));
                }
            }
        }
        Ok(())
    }

    /// Get a handle for a row by full name.
    pub fn handle(self: &Rc<Self>, full_name: &str) -> Option<HandleRef> {
        let data = self.symbols.borrow().get(full_name).cloned()?;
        Some(Rc::new(SemanticHandle {
            model: self.clone(),
            data,
        }) as HandleRef)
    }

    fn resolve(self: &Rc<Self>, from: &str, target: &str) -> HandleRef {
        let data = self
            .symbols
            .borrow()
            .get(target)
            .cloned()
            .unwrap_or_else(|| {
                panic!("semantic model: '{from}' references unknown symbol '{target}'")
            });
        Rc::new(SemanticHandle {
            model: self.clone(),
            data,
        })
    }
}

/// A handle over one semantic-model row.
#[derive(Debug)]
struct SemanticHandle {
    model: Rc<SemanticModel>,
    data: Rc<SymbolData>,
}

impl SemanticHandle {
    fn resolve(&self, target: &str) -> HandleRef {
        self.model.resolve(&self.data.full_name, target)
    }
}

impl SymbolHandle for SemanticHandle {
    fn classify(&self) -> ObjectKind {
        self.data.classify()
    }

    fn full_name(&self) -> Arc<str> {
        self.data.full_name.clone()
    }

    fn simple_name(&self) -> Arc<str> {
        self.data.simple_name.clone()
    }

    fn local_name(&self) -> Arc<str> {
        let parts: Vec<&str> = self
            .data
            .generic_parts
            .iter()
            .map(|p| names::short_display(p))
            .collect();
        format!("{}{}", self.data.simple_name, names::generic_suffix(&parts)).into()
    }

    fn regional_name(&self) -> Arc<str> {
        match &self.data.containing {
            Some(containing) => {
                let outer = self.resolve(containing).regional_name();
                names::qualify(&outer, &self.local_name()).into()
            }
            None => self.local_name(),
        }
    }

    fn namespace(&self) -> Arc<str> {
        if !self.data.namespace.is_empty() {
            return self.data.namespace.clone();
        }
        match &self.data.containing {
            Some(containing) => self.resolve(containing).namespace(),
            None => self.data.namespace.clone(),
        }
    }

    fn source_position(&self) -> SourcePos {
        self.data.position.clone()
    }

    fn attributes(&self) -> Vec<AttributeData> {
        self.data.attributes.clone()
    }

    fn members(&self) -> Vec<HandleRef> {
        self.data
            .members
            .iter()
            .map(|name| self.resolve(name))
            .collect()
    }

    fn base(&self) -> Option<HandleRef> {
        self.data.base.as_deref().map(|name| self.resolve(name))
    }

    fn containing(&self) -> Option<HandleRef> {
        self.data
            .containing
            .as_deref()
            .map(|name| self.resolve(name))
    }

    fn interfaces(&self) -> Vec<HandleRef> {
        self.data
            .interfaces
            .iter()
            .map(|name| self.resolve(name))
            .collect()
    }

    fn generic_arguments(&self) -> Vec<HandleRef> {
        self.data
            .generic_args
            .iter()
            .map(|(name, _)| self.resolve(name))
            .collect()
    }

    fn generic_argument_annotations(&self) -> Vec<Nullability> {
        self.data
            .generic_args
            .iter()
            .map(|(_, nullability)| *nullability)
            .collect()
    }

    fn original_definition(&self) -> Option<HandleRef> {
        self.data
            .original_definition
            .as_deref()
            .map(|name| self.resolve(name))
    }

    fn type_of(&self) -> Option<HandleRef> {
        self.data
            .value_type
            .as_deref()
            .map(|name| self.resolve(name))
    }

    fn enum_underlying(&self) -> Option<HandleRef> {
        self.data
            .enum_underlying
            .as_deref()
            .map(|name| self.resolve(name))
    }

    fn array_element(&self) -> Option<HandleRef> {
        self.data
            .array_element
            .as_deref()
            .map(|name| self.resolve(name))
    }

    fn array_rank(&self) -> u32 {
        self.data.array_rank
    }

    fn read_access(&self) -> Option<Accessibility> {
        self.data.read
    }

    fn write_access(&self) -> Option<Accessibility> {
        self.data.write
    }

    fn is_static(&self) -> bool {
        self.data.is_static
    }

    fn is_partial(&self) -> bool {
        self.data.is_partial
    }

    fn is_tuple(&self) -> bool {
        self.data.is_tuple
    }

    fn is_implicitly_declared(&self) -> bool {
        self.data.is_implicit
    }

    fn is_constructor(&self) -> bool {
        matches!(
            self.data.decl,
            SymbolDecl::Method {
                role: MethodRole::Constructor
            }
        )
    }

    fn method_parameters(&self) -> Vec<Arc<str>> {
        self.data.method_parameters.clone()
    }

    fn nullability(&self) -> Nullability {
        self.data.nullability
    }
}
