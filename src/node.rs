use std::fmt;

/// Identifies a node in a tree.
///
/// The tree's root is a node id too (see [`crate::TreeSnapshot::root`]), but it usually has no
/// [`NodeModel`] of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(u64);

impl NodeId {
    /// Conventional root id.
    pub const ROOT: Self = Self(0);

    pub const fn from_u64(id: u64) -> Self {
        Self(id)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One node of a tree, as supplied by the owner of the tree for the current frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct NodeModel<T> {
    pub id: NodeId,
    pub parent: NodeId,

    /// Display order among siblings. Ties keep the order of the node list.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sort_index: i64,

    /// Whether other nodes can be dropped inside this one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub droppable: bool,

    #[cfg_attr(feature = "serde", serde(default))]
    pub text: String,

    pub data: T,
}

impl<T> NodeModel<T> {
    pub fn new(id: NodeId, parent: NodeId, data: T) -> Self {
        Self {
            id,
            parent,
            sort_index: 0,
            droppable: false,
            text: String::new(),
            data,
        }
    }

    #[must_use]
    pub fn with_sort_index(mut self, sort_index: i64) -> Self {
        self.sort_index = sort_index;
        self
    }

    #[must_use]
    pub fn with_droppable(mut self, droppable: bool) -> Self {
        self.droppable = droppable;
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}
