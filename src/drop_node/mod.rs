use std::sync::Arc;

use egui::Rect;

use crate::node::NodeId;
use crate::tree::TreeSnapshot;

mod behavior;
mod drop_policy;
mod egui_binding;
mod geometry;
mod options;
mod placeholder;
mod resolve;
mod session;
mod throttle;
mod types;

#[cfg(test)]
mod resolve_tests;

pub use behavior::TreeBehavior;
pub use drop_policy::is_droppable;
pub use egui_binding::{begin_node_drag, hide_placeholder_when_idle};
pub use options::DropNodeOptions;
pub use placeholder::{Placeholder, PlaceholderState};
pub use resolve::resolve_drop_target;
pub use session::DragSession;
pub use throttle::Throttle;
pub use types::{
    DragItem, DropDecision, DropTarget, ExternalPayload, HoverPosition, EXTERNAL_FILES_KIND,
    TREE_ITEM_KIND,
};

use drop_policy::accepts_item;

/// What a row needs to know to render itself during a drag.
#[derive(Debug)]
pub struct Collected<T> {
    /// The pointer is over this very row (not one nested in it) with a payload that may be
    /// dropped here.
    pub is_over: bool,

    /// Whatever is being dragged, if anything.
    pub drag_source: Option<Arc<DragItem<T>>>,
}

/// Makes one tree row a drop target.
///
/// Create one per rendered node and keep it across frames (it holds the rate limiters for the
/// placeholder). Feed it with [`Self::attach`] each frame, or drive it by hand with
/// [`Self::on_hover`], [`Self::poll`] and [`Self::on_drop`].
#[derive(Clone, Debug)]
pub struct DropNode {
    node: NodeId,
    rect: Option<Rect>,
    options: DropNodeOptions,
    show: Throttle<DropTarget>,
    hide: Throttle<()>,

    /// [`Placeholder::generation`] when the pending updates were scheduled.
    generation: u64,
}

impl DropNode {
    pub fn new(node: NodeId, options: DropNodeOptions) -> Self {
        let wait = options.placeholder_throttle_secs;
        Self {
            node,
            rect: None,
            options,
            show: Throttle::new(wait),
            hide: Throttle::new(wait),
            generation: 0,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn options(&self) -> &DropNodeOptions {
        &self.options
    }

    /// The row as rendered last.
    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = Some(rect);
    }

    /// Point this handler at another node, or change its options.
    ///
    /// Pending placeholder updates and the remembered rect are dropped if anything changed.
    pub fn rebind(&mut self, node: NodeId, options: DropNodeOptions) {
        if node == self.node && options == self.options {
            return;
        }
        log::debug!("drop node {} rebound to {node}", self.node);
        *self = Self::new(node, options);
    }

    pub fn resolve_drop_target<T>(
        &self,
        tree: &TreeSnapshot<'_, T>,
        session: &DragSession<T>,
    ) -> Option<DropTarget> {
        resolve_drop_target(
            tree,
            self.node,
            self.rect,
            session.pointer(),
            self.options.edge_fraction,
        )
    }

    /// Where the current drag would land on this row, and whether that is allowed.
    pub fn decide<T>(
        &self,
        tree: &TreeSnapshot<'_, T>,
        behavior: &dyn TreeBehavior<T>,
        session: &DragSession<T>,
    ) -> DropDecision {
        let Some(item) = session.item() else {
            return DropDecision::default();
        };
        let target = self.resolve_drop_target(tree, session);
        let allowed =
            target.is_some_and(|target| is_droppable(tree, behavior, item, target.id, &self.options));
        DropDecision { allowed, target }
    }

    /// Would releasing now drop onto this row?
    pub fn can_drop<T>(
        &self,
        tree: &TreeSnapshot<'_, T>,
        behavior: &dyn TreeBehavior<T>,
        session: &DragSession<T>,
    ) -> bool {
        session.is_over(self.node, true) && self.decide(tree, behavior, session).allowed
    }

    /// One hover tick: schedule a placeholder update if the decision differs from what is shown.
    ///
    /// Nothing happens unless this row is the innermost one under the pointer. Scheduled updates
    /// are applied by [`Self::poll`]. With `coalesce_placeholder_updates`, the tick also makes
    /// updates still pending on other rows of the tree stale.
    pub fn on_hover<T>(
        &mut self,
        now: f64,
        tree: &TreeSnapshot<'_, T>,
        behavior: &dyn TreeBehavior<T>,
        session: &DragSession<T>,
        placeholder: &mut dyn Placeholder,
    ) {
        self.discard_stale(&*placeholder);
        if !session.is_over(self.node, true) || session.item().is_none() {
            return;
        }

        self.generation = if self.options.coalesce_placeholder_updates {
            placeholder.advance_generation()
        } else {
            placeholder.generation()
        };

        let decision = self.decide(tree, behavior, session);
        let current = placeholder.current();

        match decision.allowed_target() {
            None => {
                log::trace!("hover {}: not droppable ({:?})", self.node, decision.target);
                if self.options.coalesce_placeholder_updates {
                    self.show.cancel();
                }
                if current.is_some() {
                    self.schedule_hide(now);
                }
            }
            Some(target) if Some(target) != current => self.schedule_show(now, target),
            Some(_) => {
                if self.options.coalesce_placeholder_updates {
                    self.show.cancel();
                    self.hide.cancel();
                }
            }
        }
    }

    fn schedule_show(&mut self, now: f64, target: DropTarget) {
        if self.options.coalesce_placeholder_updates {
            self.hide.cancel();
        }
        if self.show.schedule(now, target) {
            log::trace!("hover {}: show scheduled at {now:.3}", self.node);
        }
    }

    fn schedule_hide(&mut self, now: f64) {
        if self.options.coalesce_placeholder_updates {
            self.show.cancel();
        }
        if self.hide.schedule(now, ()) {
            log::trace!("hover {}: hide scheduled at {now:.3}", self.node);
        }
    }

    /// Drop pending updates scheduled before the placeholder's current generation.
    fn discard_stale(&mut self, placeholder: &dyn Placeholder) {
        if self.generation == placeholder.generation() {
            return;
        }
        if self.show.cancel() | self.hide.cancel() {
            log::trace!("drop node {}: stale placeholder updates discarded", self.node);
        }
        self.generation = placeholder.generation();
    }

    /// Apply the placeholder updates whose window has elapsed. Returns `true` if any was applied.
    ///
    /// Updates made stale by a later hover on another row, or by the end of the drag, are
    /// discarded instead.
    pub fn poll(&mut self, now: f64, placeholder: &mut dyn Placeholder) -> bool {
        self.discard_stale(&*placeholder);
        let hide_first = self.hide_due_first();
        let hide = self.hide.poll(now);
        let show = self.show.poll(now);
        apply_placeholder_updates(placeholder, hide, show, hide_first)
    }

    /// Apply all pending placeholder updates now. Returns `true` if any was applied.
    pub fn flush(&mut self, placeholder: &mut dyn Placeholder) -> bool {
        self.discard_stale(&*placeholder);
        let hide_first = self.hide_due_first();
        let hide = self.hide.flush();
        let show = self.show.flush();
        apply_placeholder_updates(placeholder, hide, show, hide_first)
    }

    fn hide_due_first(&self) -> bool {
        match (self.hide.deadline(), self.show.deadline()) {
            (Some(hide), Some(show)) => hide <= show,
            _ => true,
        }
    }

    /// When the next pending placeholder update is due, if any.
    pub fn next_deadline(&self) -> Option<f64> {
        match (self.hide.deadline(), self.show.deadline()) {
            (Some(hide), Some(show)) => Some(hide.min(show)),
            (hide, show) => hide.or(show),
        }
    }

    /// The pointer was released.
    ///
    /// If this row is the innermost one under the pointer, dropping here is allowed, and the
    /// placeholder shows a target, the drop is forwarded to [`TreeBehavior::on_drop`] (with
    /// `None` for payloads that aren't tree nodes). The placeholder is hidden afterwards in any
    /// case, and updates pending on any row are discarded. Returns `true` if the drop was
    /// forwarded.
    pub fn on_drop<T>(
        &mut self,
        tree: &TreeSnapshot<'_, T>,
        behavior: &mut dyn TreeBehavior<T>,
        session: &DragSession<T>,
        placeholder: &mut dyn Placeholder,
    ) -> bool {
        let target = placeholder
            .current()
            .filter(|_| self.can_drop(tree, &*behavior, session));

        let forwarded = match target {
            Some(target) => {
                let dragged = session.item().and_then(DragItem::as_node);
                log::debug!(
                    "drop on {}: {:?} -> {} index={}",
                    self.node,
                    dragged.map(|node| node.id),
                    target.id,
                    target.index
                );
                behavior.on_drop(dragged, target.id, target.index);
                true
            }
            None => {
                log::debug!("drop on {} ignored", self.node);
                false
            }
        };

        self.show.cancel();
        self.hide.cancel();
        placeholder.hide();
        self.generation = placeholder.advance_generation();
        forwarded
    }

    pub fn collect<T>(
        &self,
        tree: &TreeSnapshot<'_, T>,
        behavior: &dyn TreeBehavior<T>,
        session: &DragSession<T>,
    ) -> Collected<T> {
        let accepted = session
            .item()
            .is_some_and(|item| accepts_item(item, &self.options));
        Collected {
            is_over: accepted && self.can_drop(tree, behavior, session),
            drag_source: session.item_arc().cloned(),
        }
    }
}

fn apply_placeholder_updates(
    placeholder: &mut dyn Placeholder,
    hide: Option<()>,
    show: Option<DropTarget>,
    hide_first: bool,
) -> bool {
    let applied = hide.is_some() || show.is_some();
    if hide_first {
        if hide.is_some() {
            placeholder.hide();
        }
        if let Some(target) = show {
            placeholder.show(target);
        }
    } else {
        if let Some(target) = show {
            placeholder.show(target);
        }
        if hide.is_some() {
            placeholder.hide();
        }
    }
    applied
}
