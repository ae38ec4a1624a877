//! Configuration surface for a [`Sortable`](crate::Sortable) container.

use std::time::Duration;

use crate::tree::{NodeId, VisualTree};

/// How a drop reorders the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Reinsert the dragged item at the hovered position; nothing else moves.
    #[default]
    Move,
    /// Exchange the dragged item's slot with the hovered item's, with a
    /// single level of undo while the drag is still in progress.
    Swap,
}

/// Identity and mode of a container, used to declare linked peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHandle {
    pub container: NodeId,
    pub mode: Mode,
}

/// Debounce intervals at or below this floor are treated as disabled.
pub const MIN_DEBOUNCE: Duration = Duration::from_millis(20);

/// Class applied to the dragged item for the whole gesture, press included.
pub const RAISED_CLASS: &str = "is-raised";

/// Class applied to a generated default placeholder.
pub const MARKER_CLASS: &str = "marker";

/// Style-class names toggled during a drag. The host decides what they look
/// like; empty `is_over_target` disables container flashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleClasses {
    /// On the dragged item once the pointer actually moves.
    pub dragged: String,
    /// On the originating container once the pointer actually moves.
    pub container_has_dragged: String,
    /// On the item currently anchoring the placeholder (move mode) or the
    /// current swap partner (swap mode).
    pub swap_target: String,
    /// On every linked container for the duration of the gesture.
    pub is_over_target: String,
}

impl Default for StyleClasses {
    fn default() -> Self {
        Self {
            dragged: "is-dragged".into(),
            container_has_dragged: "has-dragged".into(),
            swap_target: "swap-target".into(),
            is_over_target: "is-target".into(),
        }
    }
}

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Builds a replacement placeholder from a deep clone of the dragged item.
/// On error (or when the returned node is unknown to the tree) the default
/// placeholder is used instead and the gesture continues.
pub type PlaceholderBuilder = Box<dyn FnMut(&mut dyn VisualTree, NodeId) -> Result<NodeId, BoxError>>;

/// Runs right before a gesture opens, with the resolved dragged item.
pub type BeforeDragHook = Box<dyn FnMut(NodeId) -> Result<(), BoxError>>;

/// What a finished drag reported to the drop hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropReport {
    pub dragged: NodeId,
    /// The container the drag originated from (not necessarily where the
    /// item landed).
    pub origin: NodeId,
    /// The last item the gesture affected: the final anchor in move mode,
    /// the surviving swap partner in swap mode.
    pub last_target: Option<NodeId>,
}

pub type DropHook = Box<dyn FnMut(DropReport) -> Result<(), BoxError>>;

/// Options for one container. Only the item selector is required.
///
/// ```
/// use dragsort::{Mode, Options};
/// use std::time::Duration;
///
/// let opts = Options::new("li")
///     .handle_selector("li>span")
///     .mode(Mode::Swap)
///     .debounce(Duration::from_millis(40));
/// ```
pub struct Options {
    pub item_selector: String,
    /// Sub-selector that must be hit to start a drag; defaults to the item
    /// selector, meaning any point on an item works.
    pub handle_selector: Option<String>,
    pub mode: Mode,
    pub classes: StyleClasses,
    pub placeholder_builder: Option<PlaceholderBuilder>,
    pub on_before_drag: Option<BeforeDragHook>,
    pub on_drop: Option<DropHook>,
    /// Delay between a pointer sample and the reorder engine seeing it.
    /// Values at or below [`MIN_DEBOUNCE`] disable debouncing; the dragged
    /// item follows the pointer immediately either way.
    pub debounce: Duration,
}

impl Options {
    pub fn new(item_selector: impl Into<String>) -> Self {
        Self {
            item_selector: item_selector.into(),
            handle_selector: None,
            mode: Mode::default(),
            classes: StyleClasses::default(),
            placeholder_builder: None,
            on_before_drag: None,
            on_drop: None,
            debounce: Duration::ZERO,
        }
    }

    pub fn handle_selector(mut self, selector: impl Into<String>) -> Self {
        self.handle_selector = Some(selector.into());
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn classes(mut self, classes: StyleClasses) -> Self {
        self.classes = classes;
        self
    }

    pub fn debounce(mut self, interval: Duration) -> Self {
        self.debounce = interval;
        self
    }

    pub fn placeholder_builder(
        mut self,
        builder: impl FnMut(&mut dyn VisualTree, NodeId) -> Result<NodeId, BoxError> + 'static,
    ) -> Self {
        self.placeholder_builder = Some(Box::new(builder));
        self
    }

    pub fn on_before_drag(
        mut self,
        hook: impl FnMut(NodeId) -> Result<(), BoxError> + 'static,
    ) -> Self {
        self.on_before_drag = Some(Box::new(hook));
        self
    }

    pub fn on_drop(
        mut self,
        hook: impl FnMut(DropReport) -> Result<(), BoxError> + 'static,
    ) -> Self {
        self.on_drop = Some(Box::new(hook));
        self
    }

    /// The effective debounce interval, with the floor applied.
    pub(crate) fn effective_debounce(&self) -> Option<Duration> {
        (self.debounce > MIN_DEBOUNCE).then_some(self.debounce)
    }

    /// Whether a press must land on a dedicated handle. A handle selector
    /// equal to the item selector is the same as not restricting at all.
    pub(crate) fn handle_restricted(&self) -> bool {
        self.handle_selector
            .as_deref()
            .is_some_and(|handle| handle != self.item_selector)
    }
}
