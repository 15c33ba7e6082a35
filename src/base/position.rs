//! Opaque source positions carried per node.
//!
//! The engine does not interpret positions; it only carries them so that
//! consumers (diagnostics, generators) can point back at source. The
//! metadata backend has no source text, so its positions are always
//! unknown.

use std::sync::Arc;

use text_size::TextRange;

/// An opaque source position: a file plus a byte range within it.
///
/// `unknown()` is the canonical absent position (runtime-metadata nodes).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SourcePos {
    file: Option<Arc<str>>,
    range: Option<TextRange>,
}

impl SourcePos {
    /// Create a known position from a file path and byte range.
    pub fn new(file: impl Into<Arc<str>>, range: TextRange) -> Self {
        Self {
            file: Some(file.into()),
            range: Some(range),
        }
    }

    /// The canonical unknown position.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Returns true if no source information is available.
    pub fn is_unknown(&self) -> bool {
        self.file.is_none() && self.range.is_none()
    }

    /// The file this position points into, if known.
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// The byte range within the file, if known.
    pub fn range(&self) -> Option<TextRange> {
        self.range
    }
}
