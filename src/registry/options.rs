//! Registry configuration.

use std::sync::Arc;

/// Configuration for a [`crate::registry::GraphRegistry`].
///
/// Defaults describe a CLR-flavored naming universe; hosts introspecting
/// a different platform override the prefixes.
#[derive(Debug, Clone)]
pub struct RegistryOptions {
    /// Namespaces whose types are treated as platform internals: their
    /// members and attributes are never traversed.
    pub system_namespaces: Vec<Arc<str>>,
    /// Attribute-name prefixes dropped during reification
    /// (compiler-synthesized markers).
    pub infrastructure_prefixes: Vec<Arc<str>>,
    /// The universal root type; member enumeration stops below it.
    pub root_name: Arc<str>,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            system_namespaces: vec!["System".into()],
            infrastructure_prefixes: vec!["System.Runtime.CompilerServices".into()],
            root_name: "System.Object".into(),
        }
    }
}

impl RegistryOptions {
    /// Returns true if `namespace` is a platform namespace or nested
    /// inside one.
    pub fn is_system_namespace(&self, namespace: &str) -> bool {
        self.system_namespaces.iter().any(|prefix| {
            namespace
                .strip_prefix(prefix.as_ref())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
        })
    }

    /// Returns true if an attribute full name falls under an
    /// infrastructure prefix.
    pub fn is_infrastructure(&self, attribute_name: &str) -> bool {
        self.infrastructure_prefixes
            .iter()
            .any(|prefix| attribute_name.starts_with(prefix.as_ref()))
    }

    /// Returns true if `full_name` is the universal root type.
    pub fn is_root(&self, full_name: &str) -> bool {
        full_name == self.root_name.as_ref()
    }
}
