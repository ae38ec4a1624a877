use emath::Vec2;

use crate::tree::NodeId;

/// Mutable state of one drag gesture. Created on a successful press,
/// destroyed on release.
#[derive(Debug)]
pub(crate) struct DragSession {
    /// The item glued to the pointer.
    pub dragged: NodeId,
    /// The container the gesture started in. Never changes; in swap mode it
    /// is the authority for where swapped-out partners land.
    pub origin: NodeId,
    /// The container currently receiving the drop. Starts equal to `origin`
    /// and follows the pointer across linked containers.
    pub target: NodeId,
    /// Stand-in marking the pending drop slot. Detached until first placed.
    pub placeholder: NodeId,
    /// Dragged item's top-left corner relative to the press position, so the
    /// item does not jump under the pointer.
    pub grab_offset: Vec2,
    /// Set on the first pointer move; a press that never moves never drags.
    pub started: bool,
    /// Last item the gesture affected. Move mode: the most recent anchor
    /// (the dragged item itself right after seeding). Swap mode: the current
    /// swap partner, i.e. the single-level undo memory: `Some` only while a
    /// swap is in effect.
    pub last_target: Option<NodeId>,
}

impl DragSession {
    pub fn new(dragged: NodeId, origin: NodeId, placeholder: NodeId, grab_offset: Vec2) -> Self {
        Self {
            dragged,
            origin,
            target: origin,
            placeholder,
            grab_offset,
            started: false,
            last_target: None,
        }
    }
}
