//! Drag-and-drop reordering for tree views rendered with [`egui`].
//!
//! Each rendered tree row owns a [`DropNode`]. Every frame the row hands its [`egui::Response`] to
//! [`DropNode::attach`], which decides where a dragged node would land (before, after or inside
//! the row), keeps a [`Placeholder`] in sync at a limited rate, and forwards a validated drop to
//! [`TreeBehavior::on_drop`].
//!
//! The decision logic itself does not depend on an `egui::Context` and can be driven directly
//! with a [`DragSession`], which is how the tests exercise it.

#![forbid(unsafe_code)]

pub mod drop_node;
pub mod node;
pub mod tree;

pub use drop_node::{
    begin_node_drag, hide_placeholder_when_idle, is_droppable, resolve_drop_target, Collected,
    DragItem, DragSession, DropDecision, DropNode, DropNodeOptions, DropTarget, ExternalPayload,
    HoverPosition, Placeholder, PlaceholderState, Throttle, TreeBehavior, EXTERNAL_FILES_KIND,
    TREE_ITEM_KIND,
};
pub use node::{NodeId, NodeModel};
pub use tree::{apply_drop, ReorderError, TreeSnapshot};
