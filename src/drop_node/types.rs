use std::any::Any;
use std::sync::Arc;

use crate::node::{NodeId, NodeModel};

/// Type tag of payloads that are nodes of a tree.
pub const TREE_ITEM_KIND: &str = "tree-item";

/// Type tag of files dragged in from the operating system.
pub const EXTERNAL_FILES_KIND: &str = "files";

/// A payload that did not originate from a tree, such as files dragged in from the OS.
#[derive(Clone)]
pub struct ExternalPayload {
    kind: String,
    data: Arc<dyn Any + Send + Sync>,
}

impl ExternalPayload {
    pub fn new<P: Any + Send + Sync>(kind: impl Into<String>, data: P) -> Self {
        Self {
            kind: kind.into(),
            data: Arc::new(data),
        }
    }

    pub fn from_arc(kind: impl Into<String>, data: Arc<dyn Any + Send + Sync>) -> Self {
        Self {
            kind: kind.into(),
            data,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn downcast_ref<P: Any>(&self) -> Option<&P> {
        self.data.downcast_ref::<P>()
    }
}

impl std::fmt::Debug for ExternalPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalPayload")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Whatever is being dragged.
#[derive(Clone, Debug)]
pub enum DragItem<T> {
    Node(NodeModel<T>),
    External(ExternalPayload),
}

impl<T> DragItem<T> {
    pub fn kind(&self) -> &str {
        match self {
            Self::Node(_) => TREE_ITEM_KIND,
            Self::External(payload) => payload.kind(),
        }
    }

    pub fn as_node(&self) -> Option<&NodeModel<T>> {
        match self {
            Self::Node(node) => Some(node),
            Self::External(_) => None,
        }
    }

    pub fn node_id(&self) -> Option<NodeId> {
        self.as_node().map(|node| node.id)
    }
}

impl<T: Clone + 'static> DragItem<T> {
    /// Classify an opaque payload: a [`NodeModel<T>`] becomes [`DragItem::Node`], anything else
    /// is kept as an [`ExternalPayload`] tagged with `kind`.
    pub fn from_any(kind: impl Into<String>, payload: Arc<dyn Any + Send + Sync>) -> Self {
        match payload.downcast_ref::<NodeModel<T>>() {
            Some(node) => Self::Node(node.clone()),
            None => Self::External(ExternalPayload::from_arc(kind, payload)),
        }
    }
}

/// Where a drop would insert: as child number `index` of `id`.
///
/// `index` counts the target's children as they are now, including the dragged node if it
/// already is one of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DropTarget {
    pub id: NodeId,
    pub index: usize,
}

impl DropTarget {
    pub fn new(id: NodeId, index: usize) -> Self {
        Self { id, index }
    }
}

/// Pointer position relative to a hovered node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum HoverPosition {
    Before,
    Inside,
    After,
}

/// Result of one hover tick. Never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DropDecision {
    pub allowed: bool,
    pub target: Option<DropTarget>,
}

impl DropDecision {
    /// The target, if dropping there is allowed.
    pub fn allowed_target(self) -> Option<DropTarget> {
        self.target.filter(|_| self.allowed)
    }
}
