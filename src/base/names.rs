//! Name-formatting helpers shared by the backend adapters.
//!
//! All functions here are pure: they take name strings and return name
//! strings, with no graph or backend state involved. The adapters use
//! them to produce the four name forms every node exposes (full, simple,
//! local, regional).
//!
//! Format conventions:
//! - namespace and nesting separator: `.`
//! - generic suffix: `<A, B>`; identity (full) names embed argument
//!   *full* names, display (local) names use short forms

use super::primitives::short_form;

/// Render a generic suffix from already-formatted part names.
///
/// Returns the empty string for an empty part list.
pub fn generic_suffix(parts: &[&str]) -> String {
    if parts.is_empty() {
        return String::new();
    }
    format!("<{}>", parts.join(", "))
}

/// Join a containing scope (namespace or containing type) and a local name.
pub fn qualify(scope: &str, local: &str) -> String {
    if scope.is_empty() {
        local.to_string()
    } else {
        format!("{scope}.{local}")
    }
}

/// The short display form of a fully qualified name: the primitive
/// keyword if the name is a well-known primitive, otherwise the simple
/// (last) segment.
pub fn short_display(full_name: &str) -> &str {
    if let Some(short) = short_form(full_name) {
        return short;
    }
    simple_segment(full_name)
}

/// The simple (last) dotted segment of a name, with any generic suffix
/// left intact on that segment.
pub fn simple_segment(full_name: &str) -> &str {
    // Split on dots outside the generic suffix only.
    let head_len = full_name.find('<').unwrap_or(full_name.len());
    match full_name[..head_len].rfind('.') {
        Some(dot) => &full_name[dot + 1..],
        None => full_name,
    }
}

/// Strip a generic suffix, if present: `List<System.Int32>` -> `List`.
pub fn without_suffix(name: &str) -> &str {
    match name.find('<') {
        Some(open) => &name[..open],
        None => name,
    }
}
