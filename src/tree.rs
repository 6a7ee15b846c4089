use ahash::AHashMap;
use itertools::Itertools as _;

use crate::node::{NodeId, NodeModel};

/// A read-only view of a tree for one frame: the root id plus the flat node list.
///
/// Nodes are looked up by id through an index built once in [`TreeSnapshot::new`]. If the list
/// contains the same id twice, the first occurrence wins.
#[derive(Debug)]
pub struct TreeSnapshot<'a, T> {
    root: NodeId,
    nodes: &'a [NodeModel<T>],
    index: AHashMap<NodeId, usize>,
}

impl<'a, T> TreeSnapshot<'a, T> {
    pub fn new(root: NodeId, nodes: &'a [NodeModel<T>]) -> Self {
        let mut index = AHashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            index.entry(node.id).or_insert(i);
        }
        Self { root, nodes, index }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn nodes(&self) -> &'a [NodeModel<T>] {
        self.nodes
    }

    pub fn get(&self, id: NodeId) -> Option<&'a NodeModel<T>> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        id == self.root
    }

    /// The root always accepts children; other nodes only when they are present and `droppable`.
    pub fn accepts_children(&self, id: NodeId) -> bool {
        self.is_root(id) || self.get(id).is_some_and(|node| node.droppable)
    }

    /// Children of `parent` in display order.
    pub fn children(&self, parent: NodeId) -> impl Iterator<Item = &'a NodeModel<T>> + use<'a, T> {
        self.nodes
            .iter()
            .filter(move |node| node.parent == parent && node.id != parent)
            .sorted_by_key(|node| node.sort_index)
    }

    pub fn child_count(&self, parent: NodeId) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.parent == parent && node.id != parent)
            .count()
    }

    /// Position of `id` among its siblings, in display order.
    pub fn sibling_index(&self, id: NodeId) -> Option<usize> {
        let node = self.get(id)?;
        self.children(node.parent).position(|sibling| sibling.id == id)
    }

    /// Is `ancestor` a strict ancestor of `id`?
    ///
    /// Walks the parent chain; a malformed tree with a parent cycle terminates after visiting
    /// every node once.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let Some(mut current) = self.get(id).map(|node| node.parent) else {
            return false;
        };

        for _ in 0..=self.nodes.len() {
            if current == ancestor {
                return true;
            }
            if self.is_root(current) {
                return false;
            }
            match self.get(current) {
                Some(node) => current = node.parent,
                None => return false,
            }
        }

        false
    }
}

/// Why [`apply_drop`] refused a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReorderError {
    UnknownNode(NodeId),
    TargetNotDroppable(NodeId),
    IntoOwnSubtree { dragged: NodeId, target: NodeId },
}

impl std::fmt::Display for ReorderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "unknown node {id}"),
            Self::TargetNotDroppable(id) => write!(f, "node {id} does not accept children"),
            Self::IntoOwnSubtree { dragged, target } => {
                write!(f, "cannot move {dragged} into its own subtree (target {target})")
            }
        }
    }
}

impl std::error::Error for ReorderError {}

/// Move `dragged` so it becomes child number `index` of `target`.
///
/// `index` is interpreted the way drop targets report it: relative to the target's children as
/// they are *before* the move, so dropping a node right after itself is a no-op. The
/// `sort_index` of every child of `target` is renumbered from zero.
pub fn apply_drop<T>(
    nodes: &mut [NodeModel<T>],
    root: NodeId,
    dragged: NodeId,
    target: NodeId,
    index: usize,
) -> Result<(), ReorderError> {
    let (siblings, index) = {
        let tree = TreeSnapshot::new(root, nodes);
        if tree.get(dragged).is_none() {
            return Err(ReorderError::UnknownNode(dragged));
        }
        if !tree.accepts_children(target) {
            return Err(ReorderError::TargetNotDroppable(target));
        }
        if dragged == target || tree.is_ancestor(dragged, target) {
            return Err(ReorderError::IntoOwnSubtree { dragged, target });
        }

        let mut siblings: Vec<NodeId> = tree.children(target).map(|node| node.id).collect();
        let index = match siblings.iter().position(|&id| id == dragged) {
            Some(old) => {
                siblings.remove(old);
                if old < index { index - 1 } else { index }
            }
            None => index,
        };
        let index = index.min(siblings.len());
        siblings.insert(index, dragged);
        (siblings, index)
    };

    let order: AHashMap<NodeId, i64> = siblings
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, i64::try_from(i).unwrap_or(i64::MAX)))
        .collect();

    for node in nodes.iter_mut() {
        if node.id == dragged {
            node.parent = target;
        }
        if node.parent == target {
            if let Some(&sort_index) = order.get(&node.id) {
                node.sort_index = sort_index;
            }
        }
    }

    log::debug!("moved {dragged} into {target} at {index}");
    Ok(())
}
