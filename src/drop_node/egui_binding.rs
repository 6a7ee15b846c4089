use std::sync::Arc;
use std::time::Duration;

use egui::{Context, Response};

use crate::node::{NodeId, NodeModel};
use crate::tree::TreeSnapshot;

use super::types::{DragItem, ExternalPayload, EXTERNAL_FILES_KIND};
use super::{Collected, DragSession, DropNode, Placeholder, TreeBehavior};

/// Start dragging `node`.
///
/// Call this from the drag source, e.g. when `response.drag_started()`. Rows bound with
/// [`DropNode::attach`] pick the payload up from `egui::DragAndDrop`.
pub fn begin_node_drag<T: Send + Sync + 'static>(ctx: &Context, node: NodeModel<T>) {
    log::debug!("drag START {}", node.id);
    egui::DragAndDrop::set_payload(ctx, DragItem::Node(node));
}

/// Hide the placeholder once nothing is being dragged anymore.
///
/// Rows only hide the placeholder when the drop happens over one of them; call this once per
/// frame, after the rows, for the whole tree to also cover drags that end elsewhere. Updates
/// still pending on rows are discarded as well.
pub fn hide_placeholder_when_idle(ctx: &Context, placeholder: &mut dyn Placeholder) {
    let dragging = egui::DragAndDrop::has_any_payload(ctx)
        || ctx.input(|i| !i.raw.hovered_files.is_empty() || !i.raw.dropped_files.is_empty());
    if dragging {
        return;
    }
    if placeholder.is_shown() {
        placeholder.hide();
    }
    placeholder.advance_generation();
}

/// Snapshot the drag as seen by the row `node`, plus whether the drag ends this frame.
fn drag_session_for<T: Send + Sync + 'static>(
    ctx: &Context,
    response: &Response,
    node: NodeId,
) -> (DragSession<T>, bool) {
    let dropped_files = ctx.input(|i| {
        (!i.raw.dropped_files.is_empty()).then(|| i.raw.dropped_files.clone())
    });
    let hovered_files = ctx.input(|i| {
        (!i.raw.hovered_files.is_empty()).then(|| i.raw.hovered_files.clone())
    });
    let released = dropped_files.is_some() || ctx.input(|i| i.pointer.any_released());

    let item: Option<Arc<DragItem<T>>> = egui::DragAndDrop::payload::<DragItem<T>>(ctx)
        .or_else(|| {
            dropped_files.map(|files| {
                Arc::new(DragItem::External(ExternalPayload::new(
                    EXTERNAL_FILES_KIND,
                    files,
                )))
            })
        })
        .or_else(|| {
            hovered_files.map(|files| {
                Arc::new(DragItem::External(ExternalPayload::new(
                    EXTERNAL_FILES_KIND,
                    files,
                )))
            })
        });

    let mut session = item.map(DragSession::new).unwrap_or_default();
    session.set_pointer(ctx.input(|i| i.pointer.latest_pos()));
    if response.contains_pointer() {
        session.set_hovered([node]);
    }

    (session, released)
}

impl DropNode {
    /// Bind this handler to the row's `response` for the current frame.
    ///
    /// Remembers the row's rect, runs a hover tick (or the drop, on the frame the pointer is
    /// released or files are dropped), applies due placeholder updates and asks egui to repaint
    /// when the next one is due.
    ///
    /// Rows are hit-tested with [`Response::contains_pointer`], so nested rows must not overlap:
    /// lay children out below their parent, as tree views do.
    pub fn attach<T: Send + Sync + 'static>(
        &mut self,
        response: &Response,
        tree: &TreeSnapshot<'_, T>,
        behavior: &mut dyn TreeBehavior<T>,
        placeholder: &mut dyn Placeholder,
    ) -> Collected<T> {
        let ctx = &response.ctx;
        self.set_rect(response.rect);

        let (session, released) = drag_session_for::<T>(ctx, response, self.node());
        let now = ctx.input(|i| i.time);

        if session.item().is_some() && session.is_over(self.node(), false) {
            if released {
                self.on_drop(tree, behavior, &session, placeholder);
            } else {
                self.on_hover(now, tree, &*behavior, &session, placeholder);
            }
        }

        self.poll(now, placeholder);
        if let Some(deadline) = self.next_deadline() {
            ctx.request_repaint_after(Duration::from_secs_f64((deadline - now).max(0.0)));
        }

        self.collect(tree, &*behavior, &session)
    }
}
