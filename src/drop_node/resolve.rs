use egui::{Pos2, Rect};

use crate::node::NodeId;
use crate::tree::TreeSnapshot;

use super::geometry::hover_position;
use super::types::{DropTarget, HoverPosition};

/// Where would a drop land if released at `pointer` over the row of `node`?
///
/// `rect` is the row as rendered last; `None` before the row was ever laid out. Returns `None`
/// if there is no rect or pointer, `node` isn't in the tree, or the pointer is outside the row.
///
/// - upper band: before `node`, i.e. into `node`'s parent at `node`'s sibling index
/// - lower band: after `node`, i.e. at the sibling index + 1
/// - middle (only if `node` is droppable): inside `node`, after its last child
pub fn resolve_drop_target<T>(
    tree: &TreeSnapshot<'_, T>,
    node: NodeId,
    rect: Option<Rect>,
    pointer: Option<Pos2>,
    edge_fraction: f32,
) -> Option<DropTarget> {
    let (rect, pointer) = (rect?, pointer?);
    let model = tree.get(node)?;

    let target = match hover_position(rect, pointer, model.droppable, edge_fraction)? {
        HoverPosition::Inside => DropTarget::new(node, tree.child_count(node)),
        HoverPosition::Before => DropTarget::new(model.parent, tree.sibling_index(node)?),
        HoverPosition::After => DropTarget::new(model.parent, tree.sibling_index(node)? + 1),
    };

    log::trace!(
        "resolved {node} -> {} index={} (pointer y={:.1} in {:.1}..={:.1})",
        target.id,
        target.index,
        pointer.y,
        rect.top(),
        rect.bottom()
    );
    Some(target)
}
