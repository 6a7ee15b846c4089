use super::types::DropTarget;

/// The insertion indicator shown while dragging over a tree.
///
/// One placeholder is shared by all [`super::DropNode`]s of a tree; the owner of the tree keeps it
/// and paints it.
///
/// It also carries a generation counter. Rows stamp their scheduled updates with it, and an
/// update whose stamp is older than [`Self::generation`] is discarded instead of applied.
pub trait Placeholder {
    fn current(&self) -> Option<DropTarget>;

    fn show(&mut self, target: DropTarget);

    fn hide(&mut self);

    fn generation(&self) -> u64;

    /// Start a new generation and return it.
    fn advance_generation(&mut self) -> u64;

    fn is_shown(&self) -> bool {
        self.current().is_some()
    }
}

/// The plain [`Placeholder`]: just remembers the target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaceholderState {
    target: Option<DropTarget>,
    generation: u64,
}

impl PlaceholderState {
    /// Is the placeholder shown as child number `index` of `parent`?
    pub fn is_at(&self, parent: crate::NodeId, index: usize) -> bool {
        self.target == Some(DropTarget::new(parent, index))
    }
}

impl Placeholder for PlaceholderState {
    fn current(&self) -> Option<DropTarget> {
        self.target
    }

    fn show(&mut self, target: DropTarget) {
        if self.target != Some(target) {
            log::debug!("placeholder SHOW {} index={}", target.id, target.index);
        }
        self.target = Some(target);
    }

    fn hide(&mut self) {
        if let Some(target) = self.target.take() {
            log::debug!("placeholder HIDE (was {} index={})", target.id, target.index);
        }
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn advance_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }
}
