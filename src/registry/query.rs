//! The consumer-facing member query.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::model::{ObjectKind, ObjectRef};

use super::table::GraphRegistry;

/// Three independent member filters, ANDed together.
///
/// An unset filter passes everything; the default filter is a plain
/// member enumeration.
#[derive(Clone, Debug, Default)]
pub struct MemberFilter {
    kinds: Option<Vec<ObjectKind>>,
    attribute: Option<Arc<str>>,
    interface: Option<Arc<str>>,
}

impl MemberFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only members of the given kinds.
    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = ObjectKind>) -> Self {
        self.kinds = Some(kinds.into_iter().collect());
        self
    }

    /// Keep only members decorated with the named attribute.
    pub fn with_attribute(mut self, full_name: impl Into<Arc<str>>) -> Self {
        self.attribute = Some(full_name.into());
        self
    }

    /// Keep only members whose type is, or implements, the named
    /// interface.
    pub fn with_interface(mut self, full_name: impl Into<Arc<str>>) -> Self {
        self.interface = Some(full_name.into());
        self
    }
}

impl GraphRegistry {
    /// Enumerate a node's members through a [`MemberFilter`], with
    /// cooperative cancellation checked between member visits.
    ///
    /// Returns `None` if the cancellation token is signalled.
    pub fn members_where(
        &self,
        node: &ObjectRef,
        filter: &MemberFilter,
        cancel: &CancellationToken,
    ) -> Option<Vec<ObjectRef>> {
        let mut out = Vec::new();
        for member in node.all_members(self) {
            if cancel.is_cancelled() {
                return None;
            }
            if let Some(kinds) = &filter.kinds {
                if !kinds.contains(&member.kind()) {
                    continue;
                }
            }
            if let Some(attribute) = &filter.attribute {
                let decorated = member
                    .all_attributes(self)
                    .iter()
                    .any(|a| a.full_name() == attribute);
                if !decorated {
                    continue;
                }
            }
            if let Some(interface) = &filter.interface {
                let Some(member_type) = member.type_object(self) else {
                    continue;
                };
                let implements = member_type.full_name() == interface
                    || member_type.all_interfaces().contains(interface);
                if !implements {
                    continue;
                }
            }
            out.push(member);
        }
        Some(out)
    }
}
