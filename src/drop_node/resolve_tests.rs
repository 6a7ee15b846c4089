use egui::{pos2, Pos2, Rect};

use crate::node::{NodeId, NodeModel};
use crate::tree::TreeSnapshot;

use super::{
    resolve_drop_target, DragItem, DragSession, DropNode, DropNodeOptions, DropTarget,
    ExternalPayload, TreeBehavior,
};

const THIRD: f32 = 1.0 / 3.0;

struct NoRules;

impl TreeBehavior<()> for NoRules {
    fn on_drop(&mut self, _dragged: Option<&NodeModel<()>>, _target: NodeId, _index: usize) {}
}

fn id(raw: u64) -> NodeId {
    NodeId::from_u64(raw)
}

/// ```text
/// root
/// ├── 1 (folder)
/// │   ├── 2
/// │   └── 3 (empty folder)
/// └── 4
/// ```
fn nodes() -> Vec<NodeModel<()>> {
    vec![
        NodeModel::new(id(1), NodeId::ROOT, ()).with_droppable(true),
        NodeModel::new(id(2), id(1), ()),
        NodeModel::new(id(3), id(1), ()).with_sort_index(1).with_droppable(true),
        NodeModel::new(id(4), NodeId::ROOT, ()).with_sort_index(1),
    ]
}

/// Every row in these tests spans y in [100, 160].
fn row() -> Rect {
    Rect::from_min_max(pos2(0.0, 100.0), pos2(200.0, 160.0))
}

fn at(y: f32) -> Option<Pos2> {
    Some(pos2(50.0, y))
}

#[test]
fn droppable_row_before_inside_after() {
    let nodes = nodes();
    let tree = TreeSnapshot::new(NodeId::ROOT, &nodes);

    assert_eq!(
        resolve_drop_target(&tree, id(1), Some(row()), at(110.0), THIRD),
        Some(DropTarget::new(NodeId::ROOT, 0))
    );
    assert_eq!(
        resolve_drop_target(&tree, id(1), Some(row()), at(130.0), THIRD),
        Some(DropTarget::new(id(1), 2))
    );
    assert_eq!(
        resolve_drop_target(&tree, id(1), Some(row()), at(150.0), THIRD),
        Some(DropTarget::new(NodeId::ROOT, 1))
    );
}

#[test]
fn leaf_row_splits_in_half() {
    let nodes = nodes();
    let tree = TreeSnapshot::new(NodeId::ROOT, &nodes);

    assert_eq!(
        resolve_drop_target(&tree, id(2), Some(row()), at(129.0), THIRD),
        Some(DropTarget::new(id(1), 0))
    );
    assert_eq!(
        resolve_drop_target(&tree, id(2), Some(row()), at(131.0), THIRD),
        Some(DropTarget::new(id(1), 1))
    );
    assert_eq!(
        resolve_drop_target(&tree, id(4), Some(row()), at(150.0), THIRD),
        Some(DropTarget::new(NodeId::ROOT, 2))
    );
}

#[test]
fn empty_folder_inside_is_index_zero() {
    let nodes = nodes();
    let tree = TreeSnapshot::new(NodeId::ROOT, &nodes);
    assert_eq!(
        resolve_drop_target(&tree, id(3), Some(row()), at(130.0), THIRD),
        Some(DropTarget::new(id(3), 0))
    );
}

#[test]
fn nothing_outside_the_row() {
    let nodes = nodes();
    let tree = TreeSnapshot::new(NodeId::ROOT, &nodes);

    for pointer in [
        pos2(50.0, 99.9),
        pos2(50.0, 160.1),
        pos2(-0.1, 130.0),
        pos2(200.1, 130.0),
    ] {
        assert_eq!(
            resolve_drop_target(&tree, id(1), Some(row()), Some(pointer), THIRD),
            None,
            "{pointer:?}"
        );
    }
}

#[test]
fn nothing_without_rect_pointer_or_node() {
    let nodes = nodes();
    let tree = TreeSnapshot::new(NodeId::ROOT, &nodes);

    assert_eq!(resolve_drop_target(&tree, id(1), None, at(130.0), THIRD), None);
    assert_eq!(resolve_drop_target(&tree, id(1), Some(row()), None, THIRD), None);
    assert_eq!(
        resolve_drop_target(&tree, id(42), Some(row()), at(130.0), THIRD),
        None
    );
}

fn drop_node_on(node: NodeId) -> DropNode {
    let mut drop_node = DropNode::new(node, DropNodeOptions::default());
    drop_node.set_rect(row());
    drop_node
}

fn dragging(nodes: &[NodeModel<()>], raw: u64, over: NodeId, y: f32) -> DragSession<()> {
    let node = nodes.iter().find(|n| n.id == id(raw)).cloned().unwrap();
    DragSession::dragging_node(node)
        .with_pointer(pos2(50.0, y))
        .hovering([over])
}

#[test]
fn decision_rejects_own_subtree() {
    let nodes = nodes();
    let tree = TreeSnapshot::new(NodeId::ROOT, &nodes);
    let drop_node = drop_node_on(id(3));

    let decision = drop_node.decide(&tree, &NoRules, &dragging(&nodes, 1, id(3), 130.0));
    assert_eq!(decision.target, Some(DropTarget::new(id(3), 0)));
    assert!(!decision.allowed);
    assert_eq!(decision.allowed_target(), None);

    let decision = drop_node.decide(&tree, &NoRules, &dragging(&nodes, 4, id(3), 130.0));
    assert!(decision.allowed);
}

#[test]
fn dragged_row_is_not_a_target_for_itself() {
    let nodes = nodes();
    let tree = TreeSnapshot::new(NodeId::ROOT, &nodes);
    let drop_node = drop_node_on(id(1));

    let inside = dragging(&nodes, 1, id(1), 130.0);
    assert!(!drop_node.can_drop(&tree, &NoRules, &inside));

    // Before/after itself is a no-op move within its parent, which is allowed.
    let before = dragging(&nodes, 1, id(1), 110.0);
    assert!(drop_node.can_drop(&tree, &NoRules, &before));
}

#[test]
fn can_drop_needs_shallow_hover() {
    let nodes = nodes();
    let tree = TreeSnapshot::new(NodeId::ROOT, &nodes);
    let drop_node = drop_node_on(id(1));

    let session = dragging(&nodes, 4, id(1), 130.0).hovering([id(1), id(2)]);
    assert!(!drop_node.can_drop(&tree, &NoRules, &session));
}

#[test]
fn unknown_payload_is_not_droppable() {
    let nodes = nodes();
    let tree = TreeSnapshot::new(NodeId::ROOT, &nodes);
    let drop_node = drop_node_on(id(1));

    let session = DragSession::new(DragItem::External(ExternalPayload::new("color", [1_u8, 2, 3])))
        .with_pointer(pos2(50.0, 130.0))
        .hovering([id(1)]);
    let decision = drop_node.decide(&tree, &NoRules, &session);
    assert_eq!(decision.target, Some(DropTarget::new(id(1), 2)));
    assert!(!decision.allowed);
}
