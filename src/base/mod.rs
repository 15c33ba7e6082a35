//! Foundation types for the symgraph engine.
//!
//! This module provides fundamental pieces used throughout the crate:
//! - [`SourcePos`] - Opaque per-node source positions
//! - [`names`] - Name-formatting helpers (generic suffixes, short forms)
//! - The fixed primitive-name table ([`short_form`])
//!
//! This module has NO dependencies on other symgraph modules.

pub mod names;
mod position;
mod primitives;

#[cfg(test)]
mod tests;

pub use position::SourcePos;
pub use primitives::{is_primitive, short_form};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
