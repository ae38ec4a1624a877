//! Drag an item within an ordered list (or between linked lists) and either
//! reinsert it at the hovered position (move mode) or exchange it with the
//! item it is dropped onto (swap mode, with single-level undo while the drag
//! is live).
//!
//! The crate is the decision core only: the host supplies the visual tree and
//! the pointer events through [`VisualTree`], and keeps full control of
//! presentation. All state is transient and scoped to one drag gesture.
//!
//! ```
//! use dragsort::testing::FakeTree;
//! use dragsort::{pos2, vec2, Options, PointerButton, PointerPress, Rect, Sortable};
//! use std::time::Instant;
//!
//! let mut tree = FakeTree::new();
//! let list = tree.spawn("ul");
//! tree.set_rect(list, Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 90.0)));
//! let a = tree.child(list, "li");
//! let b = tree.child(list, "li");
//! let c = tree.child(list, "li");
//! tree.layout_vertical(list, 30.0);
//!
//! let mut sortable = Sortable::new(&tree, list, Options::new("li")).unwrap();
//!
//! // press on A, drag down over C, release
//! let press = PointerPress {
//!     target: a,
//!     pos: pos2(50.0, 15.0),
//!     button: PointerButton::Primary,
//! };
//! assert!(sortable.on_pointer_down(&mut tree, &press).unwrap());
//!
//! let now = Instant::now();
//! sortable.on_pointer_move(&mut tree, pos2(50.0, 16.0), now);
//! tree.layout_vertical(list, 30.0); // host reflow after each change
//! sortable.on_pointer_move(&mut tree, pos2(50.0, 75.0), now);
//! sortable.on_pointer_up(&mut tree);
//!
//! assert_eq!(tree.children_of(list), vec![b, c, a]);
//! ```

pub use config::{
    BeforeDragHook, BoxError, ContainerHandle, DropHook, DropReport, Mode, Options,
    PlaceholderBuilder, StyleClasses, MARKER_CLASS, MIN_DEBOUNCE, RAISED_CLASS,
};
pub use controller::Sortable;
pub use error::{ConfigError, DragError};
pub use geometry::{content_size, is_over, EdgeWidths};
pub use input::{PointerButton, PointerPress};
pub use tree::{ancestor_matching, NodeId, VisualTree};

pub use emath::{pos2, vec2, Pos2, Rect, Vec2};

mod config;
mod controller;
mod engine;
mod error;
mod geometry;
mod input;
mod placeholder;
mod session;
pub mod testing;
mod tree;
