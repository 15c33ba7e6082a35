//! Error types for graph and backend-model operations.

use std::sync::Arc;

use thiserror::Error;

/// Errors raised while building or verifying backend models.
///
/// Graph traversal itself does not fail: unclassifiable handles become
/// unclassified nodes and absent facts are `None`. Errors are reserved for
/// the model-building boundary.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A symbol with the same fully qualified name is already in the model.
    #[error("symbol '{0}' is already defined in the model")]
    DuplicateSymbol(Arc<str>),

    /// A cross-reference names a symbol the model does not contain.
    #[error("symbol '{from}' references unknown symbol '{target}'")]
    UnresolvedReference { from: Arc<str>, target: Arc<str> },
}

impl GraphError {
    /// Create a duplicate-symbol error.
    pub fn duplicate(name: impl Into<Arc<str>>) -> Self {
        Self::DuplicateSymbol(name.into())
    }

    /// Create an unresolved-reference error.
    pub fn unresolved(from: impl Into<Arc<str>>, target: impl Into<Arc<str>>) -> Self {
        Self::UnresolvedReference {
            from: from.into(),
            target: target.into(),
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
