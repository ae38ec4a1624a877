//! The host visual-tree collaborator.
//!
//! The core never owns nodes; it reorders nodes the host already has. The
//! [`VisualTree`] trait is the full surface the core needs from the host:
//! structure queries, geometry, node relocation, style-class toggling, the
//! presentation hooks for building a placeholder, and the drag-capture hooks
//! that stand in for global move/selection-guard listeners.

use emath::{Pos2, Rect, Vec2};

use crate::geometry::EdgeWidths;

/// Opaque handle to a node owned by the host tree.
///
/// Identity is stable across moves; the meaning of the inner value is up to
/// the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

pub trait VisualTree {
    /// Whether `node` is known to the tree (attached or detached).
    fn contains(&self, node: NodeId) -> bool;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// The next node in `node`'s parent sequence, if any.
    fn next_sibling(&self, node: NodeId) -> Option<NodeId>;

    /// Whether `node` matches `selector`.
    fn matches(&self, node: NodeId, selector: &str) -> bool;

    /// All descendants of `root` matching `selector`, in sequence order.
    fn query(&self, root: NodeId, selector: &str) -> Vec<NodeId>;

    /// Viewport bounding box. Detached nodes report a zero rect.
    fn bounding_rect(&self, node: NodeId) -> Rect;

    fn padding(&self, node: NodeId) -> EdgeWidths;

    fn border(&self, node: NodeId) -> EdgeWidths;

    /// Places `node` immediately before `anchor` in `parent`'s sequence, or
    /// at the end when `anchor` is `None`. A node that currently sits in
    /// another parent (or elsewhere in the same one) is moved, not copied;
    /// this one operation carries both placeholder relocation and
    /// cross-container hand-off. `anchor == Some(node)` leaves the sequence
    /// unchanged.
    fn insert_before(&mut self, parent: NodeId, node: NodeId, anchor: Option<NodeId>);

    /// Detaches `node` and releases it (used for the placeholder and for
    /// discarded builder clones).
    fn remove(&mut self, node: NodeId);

    fn add_class(&mut self, node: NodeId, class: &str);

    fn remove_class(&mut self, node: NodeId, class: &str);

    /// Deep copy of `node`, detached. Fed to a custom placeholder builder.
    fn clone_subtree(&mut self, node: NodeId) -> NodeId;

    /// Host-rendered default placeholder for `node`, detached and sized to
    /// `content_size`. How it looks (the classic dashed outline) is entirely
    /// up to the host.
    fn clone_as_placeholder(&mut self, node: NodeId, content_size: Vec2) -> NodeId;

    /// Switches `node` in or out of floating (absolutely positioned)
    /// presentation. Turning it off also clears any offset set by
    /// [`VisualTree::move_to`].
    fn set_floating(&mut self, node: NodeId, floating: bool);

    /// Moves a floating node so its top-left corner sits at `pos`.
    fn move_to(&mut self, node: NodeId, pos: Pos2);

    /// Freezes `node`'s content-box size so it keeps its shape while floating.
    fn set_fixed_size(&mut self, node: NodeId, size: Vec2);

    /// Called when a drag gesture opens; the host should route pointer moves
    /// to the session and suppress text selection until
    /// [`VisualTree::end_drag_capture`].
    fn begin_drag_capture(&mut self);

    fn end_drag_capture(&mut self);
}

/// Walks ancestors of `from` (inclusive) looking for the first node matching
/// `selector`, stopping before `until`. An explicit loop rather than
/// recursion; depth is bounded by the host tree.
pub fn ancestor_matching(
    tree: &dyn VisualTree,
    from: NodeId,
    selector: &str,
    until: NodeId,
) -> Option<NodeId> {
    let mut node = from;
    loop {
        if node == until {
            return None;
        }
        if tree.matches(node, selector) {
            return Some(node);
        }
        node = tree.parent(node)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTree;

    #[test]
    fn ancestor_walk_finds_enclosing_item() {
        let mut tree = FakeTree::new();
        let list = tree.spawn("ul");
        let item = tree.child(list, "li");
        let grip = tree.child(item, "span");
        assert_eq!(ancestor_matching(&tree, grip, "li", list), Some(item));
        assert_eq!(ancestor_matching(&tree, item, "li", list), Some(item));
    }

    #[test]
    fn ancestor_walk_stops_at_container() {
        let mut tree = FakeTree::new();
        let list = tree.spawn("ul");
        let stray = tree.child(list, "div");
        assert_eq!(ancestor_matching(&tree, stray, "li", list), None);
        assert_eq!(ancestor_matching(&tree, list, "ul", list), None);
    }
}
