use crate::node::{NodeId, NodeModel};
use crate::tree::TreeSnapshot;

use super::types::DragItem;

/// Tree-level hooks used by [`super::DropNode`].
pub trait TreeBehavior<T> {
    /// A drop was accepted: insert `dragged` as child number `index` of `target`.
    ///
    /// `dragged` is `None` when the payload is not a tree node (e.g. files from the OS).
    /// See [`crate::apply_drop`] for moving an existing node.
    fn on_drop(&mut self, dragged: Option<&NodeModel<T>>, target: NodeId, index: usize);

    /// Override the default drop rules.
    ///
    /// `Some(verdict)` decides on its own; `None` falls back to the built-in checks (target accepts
    /// children, no drop into the dragged node's own subtree).
    fn can_drop(
        &self,
        _tree: &TreeSnapshot<'_, T>,
        _dragged: &DragItem<T>,
        _target: NodeId,
    ) -> Option<bool> {
        None
    }
}
