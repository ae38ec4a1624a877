//! Pointer-event collaborator surface.

use emath::Pos2;

use crate::tree::NodeId;

/// Which pointer button a press carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

/// A pointer press delivered by the host. Only [`PointerButton::Primary`]
/// presses open a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPress {
    /// The node the press landed on; the dragged item is resolved by walking
    /// its ancestors.
    pub target: NodeId,
    /// Viewport position of the press.
    pub pos: Pos2,
    pub button: PointerButton,
}
