//! Reified attribute applications.
//!
//! An [`AttributeData`] is an immutable value describing one decoration
//! applied to a program entity: the attribute type's fully qualified name
//! plus the positional and named argument values, captured verbatim.
//! No type coercion happens at this layer; consumers interpret the values.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::base::SourcePos;

/// One argument value inside an attribute application.
///
/// Values are carried verbatim from the backend; interpreting them is the
/// consumer's responsibility.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    /// A type reference, by fully qualified name.
    TypeName(Arc<str>),
    List(Vec<AttrValue>),
}

impl AttrValue {
    /// Get a display rendering of this value for diagnostics.
    pub fn display(&self) -> String {
        match self {
            Self::Bool(v) => v.to_string(),
            Self::Int(v) => v.to_string(),
            Self::Float(v) => v.to_string(),
            Self::Str(v) => format!("{v:?}"),
            Self::TypeName(v) => format!("typeof({v})"),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(AttrValue::display).collect();
                format!("[{}]", parts.join(", "))
            }
        }
    }
}

/// One applied decoration, as an immutable value.
///
/// Equality is structural: the fully qualified name plus both argument
/// lists, positionally and by key. The source position is carried along
/// but does not participate in equality (the metadata backend has none).
#[derive(Clone, Debug)]
pub struct AttributeData {
    full_name: Arc<str>,
    /// Positional arguments. A `None` slot is a hole the backend omitted.
    constructor_args: Vec<Option<AttrValue>>,
    named_args: Vec<(Arc<str>, AttrValue)>,
    position: SourcePos,
}

impl AttributeData {
    /// Create an attribute value with no arguments.
    pub fn new(full_name: impl Into<Arc<str>>) -> Self {
        Self {
            full_name: full_name.into(),
            constructor_args: Vec::new(),
            named_args: Vec::new(),
            position: SourcePos::unknown(),
        }
    }

    /// Append a positional argument.
    pub fn with_arg(mut self, value: AttrValue) -> Self {
        self.constructor_args.push(Some(value));
        self
    }

    /// Append a positional hole (a slot the backend omitted).
    pub fn with_hole(mut self) -> Self {
        self.constructor_args.push(None);
        self
    }

    /// Append a named argument.
    pub fn with_named(mut self, name: impl Into<Arc<str>>, value: AttrValue) -> Self {
        self.named_args.push((name.into(), value));
        self
    }

    /// Attach a source position (semantic backend only).
    pub fn with_position(mut self, position: SourcePos) -> Self {
        self.position = position;
        self
    }

    /// The attribute type's fully qualified name.
    pub fn full_name(&self) -> &Arc<str> {
        &self.full_name
    }

    /// The positional argument slots, holes included.
    pub fn constructor_args(&self) -> &[Option<AttrValue>] {
        &self.constructor_args
    }

    /// The named arguments, in application order.
    pub fn named_args(&self) -> &[(Arc<str>, AttrValue)] {
        &self.named_args
    }

    /// The source position of the application, unknown for metadata.
    pub fn position(&self) -> &SourcePos {
        &self.position
    }

    /// Extract one named-or-positional argument value.
    ///
    /// Returns the positional value at `index` if that slot is present,
    /// else the named value under `name` if present, else `None`. Absence
    /// is meaningful, not exceptional: consumers fall back to defaults.
    pub fn argument(&self, index: usize, name: Option<&str>) -> Option<&AttrValue> {
        if let Some(Some(value)) = self.constructor_args.get(index) {
            return Some(value);
        }
        let name = name?;
        self.named_args
            .iter()
            .find(|(key, _)| key.as_ref() == name)
            .map(|(_, value)| value)
    }
}

impl PartialEq for AttributeData {
    fn eq(&self, other: &Self) -> bool {
        // Position deliberately excluded: the two backends must agree.
        self.full_name == other.full_name
            && self.constructor_args == other.constructor_args
            && self.named_args == other.named_args
    }
}

impl PartialOrd for AttributeData {
    /// Deterministic ordering, lexicographic by fully qualified name.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.full_name.cmp(&other.full_name))
    }
}
