//! Session lifecycle orchestration: one [`Sortable`] per container.

use std::time::{Duration, Instant};

use emath::Pos2;

use crate::config::{ContainerHandle, DropReport, Mode, Options, RAISED_CLASS};
use crate::engine::{self, Anchor};
use crate::error::{ConfigError, DragError};
use crate::input::{PointerButton, PointerPress};
use crate::placeholder;
use crate::session::DragSession;
use crate::tree::{ancestor_matching, NodeId, VisualTree};

/// The engine sample parked by an active debounce interval. Replaced by every
/// newer sample, so at most one deferred call is ever pending and it always
/// carries the latest coordinates.
#[derive(Debug, Clone, Copy)]
struct PendingSample {
    pos: Pos2,
    fire_at: Instant,
}

/// Drag-and-drop controller for one container.
///
/// The host feeds it pointer events; it opens a [`DragSession`] on a matching
/// press, runs the reorder engine on every move (directly or through the
/// debounce slot) and commits the placeholder's final slot on release.
pub struct Sortable {
    container: NodeId,
    opts: Options,
    debounce: Option<Duration>,
    linked: Vec<ContainerHandle>,
    session: Option<DragSession>,
    pending: Option<PendingSample>,
}

impl Sortable {
    /// Validates the configuration against the tree. Fatal errors here leave
    /// no partial state behind.
    pub fn new(
        tree: &dyn VisualTree,
        container: NodeId,
        opts: Options,
    ) -> Result<Self, ConfigError> {
        if !tree.contains(container) {
            return Err(ConfigError::ContainerNotFound);
        }
        if opts.item_selector.is_empty() {
            return Err(ConfigError::EmptyItemSelector);
        }
        if opts.handle_selector.as_deref() == Some("") {
            return Err(ConfigError::EmptyHandleSelector);
        }
        let debounce = opts.effective_debounce();
        Ok(Self {
            container,
            opts,
            debounce,
            linked: Vec::new(),
            session: None,
            pending: None,
        })
    }

    /// This container's identity for linking into other containers.
    pub fn handle(&self) -> ContainerHandle {
        ContainerHandle {
            container: self.container,
            mode: self.opts.mode,
        }
    }

    /// Declares the peer group eligible to receive drags from this container.
    ///
    /// Self references and peers of a different mode are dropped. Links are
    /// one-directional by construction; making them mutual is the caller's
    /// responsibility (and the usual setup for swap mode).
    pub fn set_linked(&mut self, peers: &[ContainerHandle]) {
        self.linked = peers
            .iter()
            .filter(|peer| peer.container != self.container && peer.mode == self.opts.mode)
            .copied()
            .collect();
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Handles a pointer press. Returns `Ok(true)` when a session opened.
    ///
    /// Non-primary buttons and presses outside any item are ignored. Under a
    /// handle-restricted configuration a press that hits the handle but no
    /// enclosing item is a configuration fault and fails the gesture.
    pub fn on_pointer_down(
        &mut self,
        tree: &mut dyn VisualTree,
        press: &PointerPress,
    ) -> Result<bool, DragError> {
        if self.session.is_some() || press.button != PointerButton::Primary {
            return Ok(false);
        }

        let dragged = if self.opts.handle_restricted() {
            let handle = self.opts.handle_selector.as_deref().unwrap_or_default();
            if !tree.matches(press.target, handle) {
                return Ok(false);
            }
            ancestor_matching(tree, press.target, &self.opts.item_selector, self.container)
                .ok_or(DragError::HandleOutsideItem)?
        } else {
            match ancestor_matching(tree, press.target, &self.opts.item_selector, self.container) {
                Some(item) => item,
                None => return Ok(false),
            }
        };

        if let Some(hook) = &mut self.opts.on_before_drag {
            if let Err(err) = hook(dragged) {
                tracing::error!(err = %err, "on_before_drag hook failed");
            }
        }

        tree.begin_drag_capture();
        let grab_offset = tree.bounding_rect(dragged).min - press.pos;
        let marker = placeholder::build(tree, &mut self.opts.placeholder_builder, dragged);
        tree.add_class(dragged, RAISED_CLASS);
        self.mark_linked_targets(tree, true);

        self.session = Some(DragSession::new(dragged, self.container, marker, grab_offset));
        Ok(true)
    }

    /// Handles a pointer-move sample.
    ///
    /// The first sample actually starts the drag: the item begins floating,
    /// the dragging flags go on and (move mode only) the placeholder is
    /// seeded beside the dragged item. The item follows the pointer on every
    /// sample; the engine runs immediately or through the debounce slot.
    pub fn on_pointer_move(&mut self, tree: &mut dyn VisualTree, pos: Pos2, now: Instant) {
        let Some(session) = &mut self.session else {
            return;
        };

        if !session.started {
            session.started = true;
            let dragged = session.dragged;
            tree.set_floating(dragged, true);
            tree.add_class(dragged, &self.opts.classes.dragged);
            tree.add_class(self.container, &self.opts.classes.container_has_dragged);
            if self.opts.mode == Mode::Move {
                engine::place_move(
                    tree,
                    session,
                    &self.opts.classes,
                    self.container,
                    Anchor::Item(dragged),
                );
            }
        }

        tree.move_to(session.dragged, pos + session.grab_offset);

        match self.debounce {
            None => engine::apply_sample(
                tree,
                session,
                self.opts.mode,
                &self.opts.item_selector,
                &self.opts.classes,
                &self.linked,
                pos,
            ),
            Some(interval) => {
                self.pending = Some(PendingSample {
                    pos,
                    fire_at: now + interval,
                });
            }
        }
    }

    /// When the parked sample should fire, if one is pending.
    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.pending.map(|pending| pending.fire_at)
    }

    /// Fires the parked engine sample once its deadline has passed. A pending
    /// sample that outlived its session is discarded unrun; the timer racing
    /// the release must never touch stale references.
    pub fn pump_debounce(&mut self, tree: &mut dyn VisualTree, now: Instant) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        if now < pending.fire_at {
            return false;
        }
        self.pending = None;

        let Some(session) = &mut self.session else {
            return false;
        };
        engine::apply_sample(
            tree,
            session,
            self.opts.mode,
            &self.opts.item_selector,
            &self.opts.classes,
            &self.linked,
            pending.pos,
        );
        true
    }

    /// Handles the pointer release: commits the placeholder's slot as the
    /// dragged item's new slot, tears the session down and fires the drop
    /// hook.
    ///
    /// A press that never moved commits nothing. A placeholder parked in its
    /// last valid slot (pointer released outside every container) still
    /// commits there; the item is never dropped from all containers.
    pub fn on_pointer_up(&mut self, tree: &mut dyn VisualTree) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.pending = None;

        if session.started {
            if let Some(slot) = tree.parent(session.placeholder) {
                tree.insert_before(slot, session.dragged, Some(session.placeholder));
            }
            tree.set_floating(session.dragged, false);
        }
        tree.remove(session.placeholder);

        tree.remove_class(session.dragged, RAISED_CLASS);
        tree.remove_class(session.dragged, &self.opts.classes.dragged);
        tree.remove_class(self.container, &self.opts.classes.container_has_dragged);
        if let Some(target) = session.last_target {
            tree.remove_class(target, &self.opts.classes.swap_target);
        }
        self.mark_linked_targets(tree, false);
        tree.end_drag_capture();

        if session.started {
            if let Some(hook) = &mut self.opts.on_drop {
                let report = DropReport {
                    dragged: session.dragged,
                    origin: session.origin,
                    last_target: session.last_target,
                };
                if let Err(err) = hook(report) {
                    tracing::error!(err = %err, "on_drop hook failed");
                }
            }
        }
    }

    fn mark_linked_targets(&self, tree: &mut dyn VisualTree, on: bool) {
        let class = &self.opts.classes.is_over_target;
        if class.is_empty() {
            return;
        }
        for peer in &self.linked {
            if on {
                tree.add_class(peer.container, class);
            } else {
                tree.remove_class(peer.container, class);
            }
        }
    }
}
