use egui::{Pos2, Rect};

use super::types::HoverPosition;

/// Classify `pointer` against the rendered `rect` of a node.
///
/// Returns `None` if the pointer is outside the rect (the edges count as inside) or the rect is
/// empty. A node that accepts children is split into a top band, a middle band and a bottom band,
/// the outer bands each `edge_fraction` of the height; points exactly on a band boundary belong
/// to the middle band. A node that does not accept children is split in half, the midpoint
/// belonging to the lower half.
pub(super) fn hover_position(
    rect: Rect,
    pointer: Pos2,
    accepts_children: bool,
    edge_fraction: f32,
) -> Option<HoverPosition> {
    if !rect.is_positive() || !rect.contains(pointer) {
        return None;
    }

    let y = pointer.y;
    let position = if accepts_children {
        let edge = rect.height() * edge_fraction.clamp(0.0, 0.5);
        if y < rect.top() + edge {
            HoverPosition::Before
        } else if y > rect.bottom() - edge {
            HoverPosition::After
        } else {
            HoverPosition::Inside
        }
    } else if y < rect.center().y {
        HoverPosition::Before
    } else {
        HoverPosition::After
    };

    Some(position)
}
