//! The reorder engine: resolves each pointer sample to a (container, anchor)
//! pair and applies move-mode or swap-mode placement.
//!
//! Everything here stays reversible until release: only the placeholder (and,
//! in swap mode, the current swap partner) is moved; the dragged item itself
//! never changes slot until the session commits.
//!
//! # Invariants
//!
//! 1. A sample that resolves no container, or a container with items but none
//!    hovered, moves nothing at all.
//! 2. The placeholder is attached to at most one container at any time.
//! 3. In swap mode, `last_target` is `Some` exactly while one swap is in
//!    effect; re-hovering that partner fully undoes the swap and clears it.
//! 4. Un-swapping the previous partner and swapping the new one happen inside
//!    one call, so no caller observes a double-swapped sequence.

use emath::Pos2;

use crate::config::{ContainerHandle, Mode, StyleClasses};
use crate::geometry::is_over;
use crate::session::DragSession;
use crate::tree::{NodeId, VisualTree};

/// Where the placeholder should go relative to the resolved container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Anchor {
    /// A hovered sibling item.
    Item(NodeId),
    /// The container has no eligible items; append at the end.
    End,
}

/// Runs one pointer sample through resolution and placement.
pub(crate) fn apply_sample(
    tree: &mut dyn VisualTree,
    session: &mut DragSession,
    mode: Mode,
    item_selector: &str,
    classes: &StyleClasses,
    linked: &[ContainerHandle],
    pos: Pos2,
) {
    let Some(container) = resolve_target(tree, session, linked, pos) else {
        return;
    };
    session.target = container;

    let Some(anchor) = resolve_anchor(tree, session, container, item_selector, pos) else {
        return;
    };

    match mode {
        Mode::Move => place_move(tree, session, classes, container, anchor),
        Mode::Swap => place_swap(tree, session, classes, container, anchor),
    }
}

/// Picks the container receiving this sample.
///
/// A pointer still inside the attached placeholder's own box has not moved
/// enough to matter; the whole sample is skipped to avoid jitter. Otherwise
/// the current target is preferred, then the origin, then linked containers
/// in registration order. No hit freezes the placeholder where it is.
pub(crate) fn resolve_target(
    tree: &dyn VisualTree,
    session: &DragSession,
    linked: &[ContainerHandle],
    pos: Pos2,
) -> Option<NodeId> {
    if tree.parent(session.placeholder).is_some()
        && is_over(tree.bounding_rect(session.placeholder), pos)
    {
        return None;
    }

    if is_over(tree.bounding_rect(session.target), pos) {
        return Some(session.target);
    }
    if is_over(tree.bounding_rect(session.origin), pos) {
        return Some(session.origin);
    }
    linked
        .iter()
        .map(|peer| peer.container)
        .find(|&container| is_over(tree.bounding_rect(container), pos))
}

/// Picks the hovered sibling inside `container`, skipping the dragged item
/// and the placeholder.
///
/// An empty container anchors at the end. A container that has items but
/// none under the pointer resolves to nothing: the placeholder must not
/// jump to the list end just because the pointer slipped between rows.
pub(crate) fn resolve_anchor(
    tree: &dyn VisualTree,
    session: &DragSession,
    container: NodeId,
    item_selector: &str,
    pos: Pos2,
) -> Option<Anchor> {
    let items = tree.query(container, item_selector);
    if items.is_empty() {
        return Some(Anchor::End);
    }
    items
        .into_iter()
        .filter(|&item| item != session.dragged && item != session.placeholder)
        .find(|&item| is_over(tree.bounding_rect(item), pos))
        .map(Anchor::Item)
}

/// Move-mode placement: reseat the placeholder next to the anchor.
///
/// Direction tie-break: when the anchor's next sibling is already the
/// placeholder the pointer is coming from below, so the placeholder crosses
/// to just before the anchor; otherwise it lands just after.
pub(crate) fn place_move(
    tree: &mut dyn VisualTree,
    session: &mut DragSession,
    classes: &StyleClasses,
    container: NodeId,
    anchor: Anchor,
) {
    let to = match anchor {
        Anchor::End => {
            tree.insert_before(container, session.placeholder, None);
            return;
        }
        Anchor::Item(to) => to,
    };

    if let Some(prev) = session.last_target {
        tree.remove_class(prev, &classes.swap_target);
    }
    if to != session.dragged {
        tree.add_class(to, &classes.swap_target);
    }
    session.last_target = Some(to);

    if tree.next_sibling(to) == Some(session.placeholder) {
        // moving up
        tree.insert_before(container, session.placeholder, Some(to));
    } else {
        let after = tree.next_sibling(to);
        tree.insert_before(container, session.placeholder, after);
    }
}

/// Swap-mode placement: reseat the placeholder at the anchor and pull the
/// anchor into the dragged item's slot, undoing any previous swap first.
pub(crate) fn place_swap(
    tree: &mut dyn VisualTree,
    session: &mut DragSession,
    classes: &StyleClasses,
    container: NodeId,
    anchor: Anchor,
) {
    let to = match anchor {
        Anchor::End => {
            tree.insert_before(container, session.placeholder, None);
            return;
        }
        Anchor::Item(to) => to,
    };

    let is_up = tree.next_sibling(to) == Some(session.placeholder);

    if let Some(prev) = session.last_target {
        tree.remove_class(prev, &classes.swap_target);

        // A recorded partner means that swap seated the placeholder.
        let Some(slot) = tree.parent(session.placeholder) else {
            return;
        };
        let before = if is_up {
            Some(session.placeholder)
        } else {
            tree.next_sibling(session.placeholder)
        };

        if prev == to {
            // Full undo: partner back to the placeholder's remembered slot,
            // placeholder back beside the dragged item and the memory
            // cleared, as if the swap had never happened.
            tree.insert_before(slot, prev, before);
            tree.insert_before(session.origin, session.placeholder, Some(session.dragged));
            session.last_target = None;
            return;
        }

        // Different partner: restore the previous one before swapping anew.
        tree.insert_before(slot, prev, before);
    }

    tree.add_class(to, &classes.swap_target);

    if is_up {
        tree.insert_before(container, session.placeholder, Some(to));
        tree.insert_before(session.origin, to, Some(session.dragged));
    } else {
        let after = tree.next_sibling(to);
        tree.insert_before(container, session.placeholder, after);
        let after_dragged = tree.next_sibling(session.dragged);
        tree.insert_before(session.origin, to, after_dragged);
    }
    session.last_target = Some(to);
}
