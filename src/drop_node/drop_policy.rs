use crate::node::NodeId;
use crate::tree::TreeSnapshot;

use super::behavior::TreeBehavior;
use super::options::DropNodeOptions;
use super::types::DragItem;

/// Is this kind of payload accepted at all?
///
/// Tree nodes always are; external payloads only when their kind is listed in
/// [`DropNodeOptions::extra_accept_types`].
pub(super) fn accepts_item<T>(item: &DragItem<T>, options: &DropNodeOptions) -> bool {
    match item {
        DragItem::Node(_) => true,
        DragItem::External(payload) => options.accepts_kind(payload.kind()),
    }
}

/// May `item` be dropped into `target`?
///
/// Unknown payload kinds are simply not droppable. [`TreeBehavior::can_drop`] gets the final
/// word when it has an opinion; otherwise the target must accept children, and a tree node may
/// not be dropped into itself or anywhere in its own subtree.
pub fn is_droppable<T>(
    tree: &TreeSnapshot<'_, T>,
    behavior: &dyn TreeBehavior<T>,
    item: &DragItem<T>,
    target: NodeId,
    options: &DropNodeOptions,
) -> bool {
    if !accepts_item(item, options) {
        return false;
    }

    if let Some(verdict) = behavior.can_drop(tree, item, target) {
        return verdict;
    }

    if !tree.accepts_children(target) {
        return false;
    }

    match item {
        DragItem::Node(dragged) => dragged.id != target && !tree.is_ancestor(dragged.id, target),
        DragItem::External(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drop_node::types::ExternalPayload;
    use crate::node::NodeModel;

    struct Rules {
        verdict: Option<bool>,
    }

    impl TreeBehavior<()> for Rules {
        fn on_drop(&mut self, _dragged: Option<&NodeModel<()>>, _target: NodeId, _index: usize) {}

        fn can_drop(
            &self,
            _tree: &TreeSnapshot<'_, ()>,
            _dragged: &DragItem<()>,
            _target: NodeId,
        ) -> Option<bool> {
            self.verdict
        }
    }

    fn id(raw: u64) -> NodeId {
        NodeId::from_u64(raw)
    }

    /// A chain of folders 1 > 2 > ... > 8, plus a folder 20 and a file 21 at the root.
    fn deep_nodes() -> Vec<NodeModel<()>> {
        let mut nodes: Vec<NodeModel<()>> = (1..=8)
            .map(|i| {
                let parent = if i == 1 { NodeId::ROOT } else { id(i - 1) };
                NodeModel::new(id(i), parent, ()).with_droppable(true)
            })
            .collect();
        nodes.push(NodeModel::new(id(20), NodeId::ROOT, ()).with_droppable(true));
        nodes.push(NodeModel::new(id(21), NodeId::ROOT, ()));
        nodes
    }

    fn dragging(nodes: &[NodeModel<()>], raw: u64) -> DragItem<()> {
        let node = nodes.iter().find(|n| n.id == id(raw)).cloned().unwrap();
        DragItem::Node(node)
    }

    #[test]
    fn descendants_are_never_droppable() {
        let nodes = deep_nodes();
        let tree = TreeSnapshot::new(NodeId::ROOT, &nodes);
        let options = DropNodeOptions::default();
        let behavior = Rules { verdict: None };

        for dragged in 1..=8 {
            let item = dragging(&nodes, dragged);
            for target in dragged..=8 {
                assert!(
                    !is_droppable(&tree, &behavior, &item, id(target), &options),
                    "{dragged} must not drop into {target}"
                );
            }
            for target in 1..dragged {
                assert!(is_droppable(&tree, &behavior, &item, id(target), &options));
            }
        }
    }

    #[test]
    fn target_must_accept_children() {
        let nodes = deep_nodes();
        let tree = TreeSnapshot::new(NodeId::ROOT, &nodes);
        let options = DropNodeOptions::default();
        let behavior = Rules { verdict: None };
        let item = dragging(&nodes, 8);

        assert!(is_droppable(&tree, &behavior, &item, NodeId::ROOT, &options));
        assert!(is_droppable(&tree, &behavior, &item, id(20), &options));
        assert!(!is_droppable(&tree, &behavior, &item, id(21), &options));
        assert!(!is_droppable(&tree, &behavior, &item, id(99), &options));
    }

    #[test]
    fn external_payload_needs_accepted_kind() {
        let nodes = deep_nodes();
        let tree = TreeSnapshot::new(NodeId::ROOT, &nodes);
        let behavior = Rules { verdict: None };
        let item = DragItem::<()>::External(ExternalPayload::new("files", vec!["a.txt"]));

        let strict = DropNodeOptions::default();
        assert!(!is_droppable(&tree, &behavior, &item, id(20), &strict));

        let lenient = DropNodeOptions::default().accept("files");
        assert!(is_droppable(&tree, &behavior, &item, id(20), &lenient));
        assert!(is_droppable(&tree, &behavior, &item, NodeId::ROOT, &lenient));
        assert!(!is_droppable(&tree, &behavior, &item, id(21), &lenient));
    }

    #[test]
    fn custom_rule_overrides_defaults() {
        let nodes = deep_nodes();
        let tree = TreeSnapshot::new(NodeId::ROOT, &nodes);
        let options = DropNodeOptions::default();
        let item = dragging(&nodes, 1);

        let allow = Rules {
            verdict: Some(true),
        };
        assert!(is_droppable(&tree, &allow, &item, id(21), &options));

        let deny = Rules {
            verdict: Some(false),
        };
        assert!(!is_droppable(&tree, &deny, &item, NodeId::ROOT, &options));
    }

    #[test]
    fn custom_rule_cannot_admit_unaccepted_kind() {
        let nodes = deep_nodes();
        let tree = TreeSnapshot::new(NodeId::ROOT, &nodes);
        let allow = Rules {
            verdict: Some(true),
        };
        let item = DragItem::<()>::External(ExternalPayload::new("url", ()));
        assert!(!is_droppable(
            &tree,
            &allow,
            &item,
            NodeId::ROOT,
            &DropNodeOptions::default()
        ));
    }
}
