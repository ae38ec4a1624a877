use crate::config::{PlaceholderBuilder, MARKER_CLASS};
use crate::geometry::content_size;
use crate::tree::{NodeId, VisualTree};

/// Builds the placeholder for `dragged` and freezes the dragged item's
/// content size so it keeps its shape once it floats.
///
/// A configured custom builder is fed a deep clone of the dragged item. If it
/// fails, or hands back a node the tree does not know, the failure is logged,
/// the orphaned clone is discarded and the default host-rendered placeholder
/// is used; a misbehaving builder never aborts the gesture.
pub(crate) fn build(
    tree: &mut dyn VisualTree,
    builder: &mut Option<PlaceholderBuilder>,
    dragged: NodeId,
) -> NodeId {
    let size = content_size(tree, dragged);

    if let Some(builder) = builder {
        let seed = tree.clone_subtree(dragged);
        match builder(tree, seed) {
            Ok(node) if tree.contains(node) => {
                // A builder that returned its own node leaves the seed clone
                // behind; release it unless it was attached somewhere (e.g.
                // inside the returned node).
                if node != seed && tree.parent(seed).is_none() {
                    discard(tree, seed);
                }
                tree.set_fixed_size(dragged, size);
                return node;
            }
            Ok(node) => {
                tracing::warn!(
                    ?node,
                    "custom placeholder builder returned an unknown node, using default placeholder"
                );
                discard(tree, seed);
            }
            Err(err) => {
                tracing::warn!(
                    err = %err,
                    "custom placeholder builder failed, using default placeholder"
                );
                discard(tree, seed);
            }
        }
    }

    tree.set_fixed_size(dragged, size);
    let marker = tree.clone_as_placeholder(dragged, size);
    tree.add_class(marker, MARKER_CLASS);
    marker
}

fn discard(tree: &mut dyn VisualTree, seed: NodeId) {
    if tree.contains(seed) {
        tree.remove(seed);
    }
}
