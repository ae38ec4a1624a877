use emath::{Pos2, Rect, Vec2};

use crate::tree::{NodeId, VisualTree};

/// Returns true if `pos` lies strictly inside `rect`.
///
/// Points exactly on an edge are not over: a zero-sized rect (such as the
/// bounding box of a detached node) can never be hovered.
pub fn is_over(rect: Rect, pos: Pos2) -> bool {
    pos.x > rect.left() && pos.x < rect.right() && pos.y > rect.top() && pos.y < rect.bottom()
}

/// Per-edge widths reported by the host for padding and border.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct EdgeWidths {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl EdgeWidths {
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    pub fn uniform(width: f32) -> Self {
        Self {
            top: width,
            right: width,
            bottom: width,
            left: width,
        }
    }

    /// Total width consumed on each axis.
    pub fn sum(&self) -> Vec2 {
        Vec2::new(self.left + self.right, self.top + self.bottom)
    }
}

/// Content-box size of `node`: the bounding box minus padding and border on
/// each axis. Used to freeze the dragged item's size and to size a generated
/// placeholder to match it.
pub fn content_size(tree: &dyn VisualTree, node: NodeId) -> Vec2 {
    tree.bounding_rect(node).size() - tree.padding(node).sum() - tree.border(node).sum()
}
