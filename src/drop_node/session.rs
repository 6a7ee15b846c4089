use std::sync::Arc;

use egui::Pos2;

use crate::node::{NodeId, NodeModel};

use super::types::DragItem;

/// What a [`super::DropNode`] sees of the current drag for one tick.
///
/// The drag itself is owned elsewhere (by `egui::DragAndDrop` when using
/// [`super::DropNode::attach`]); this is a snapshot of it.
#[derive(Debug)]
pub struct DragSession<T> {
    item: Option<Arc<DragItem<T>>>,
    pointer: Option<Pos2>,

    /// Nodes under the pointer, outermost first.
    hovered: Vec<NodeId>,
}

impl<T> Default for DragSession<T> {
    fn default() -> Self {
        Self {
            item: None,
            pointer: None,
            hovered: Vec::new(),
        }
    }
}

impl<T> Clone for DragSession<T> {
    fn clone(&self) -> Self {
        Self {
            item: self.item.clone(),
            pointer: self.pointer,
            hovered: self.hovered.clone(),
        }
    }
}

impl<T> DragSession<T> {
    pub fn new(item: impl Into<Arc<DragItem<T>>>) -> Self {
        Self {
            item: Some(item.into()),
            ..Default::default()
        }
    }

    /// A session dragging a tree node.
    pub fn dragging_node(node: NodeModel<T>) -> Self {
        Self::new(DragItem::Node(node))
    }

    #[must_use]
    pub fn with_pointer(mut self, pointer: Pos2) -> Self {
        self.pointer = Some(pointer);
        self
    }

    /// Set the nodes under the pointer, outermost first.
    #[must_use]
    pub fn hovering(mut self, path: impl IntoIterator<Item = NodeId>) -> Self {
        self.hovered = path.into_iter().collect();
        self
    }

    pub fn set_pointer(&mut self, pointer: Option<Pos2>) {
        self.pointer = pointer;
    }

    pub fn set_hovered(&mut self, path: impl IntoIterator<Item = NodeId>) {
        self.hovered.clear();
        self.hovered.extend(path);
    }

    pub fn item(&self) -> Option<&DragItem<T>> {
        self.item.as_deref()
    }

    pub fn item_arc(&self) -> Option<&Arc<DragItem<T>>> {
        self.item.as_ref()
    }

    pub fn pointer(&self) -> Option<Pos2> {
        self.pointer
    }

    /// Is the pointer over `node`?
    ///
    /// With `shallow`, only the innermost hovered node counts.
    pub fn is_over(&self, node: NodeId, shallow: bool) -> bool {
        if shallow {
            self.hovered.last() == Some(&node)
        } else {
            self.hovered.contains(&node)
        }
    }
}
