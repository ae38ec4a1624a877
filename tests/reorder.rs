//! End-to-end drag gestures driven over the in-memory host tree.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use dragsort::testing::FakeTree;
use dragsort::{
    pos2, vec2, ContainerHandle, DropReport, Mode, NodeId, Options, PointerButton, PointerPress,
    Rect, Sortable,
};
use pretty_assertions::assert_eq;

const ROW: f32 = 30.0;

struct List {
    tree: FakeTree,
    container: NodeId,
    items: Vec<NodeId>,
}

/// A container at `origin` with `n` rows laid out vertically.
fn list_at(origin: (f32, f32), n: usize) -> List {
    let mut tree = FakeTree::new();
    let container = tree.spawn("ul");
    tree.set_rect(
        container,
        Rect::from_min_size(pos2(origin.0, origin.1), vec2(100.0, ROW * n.max(1) as f32)),
    );
    let items = (0..n).map(|_| tree.child(container, "li")).collect();
    tree.layout_vertical(container, ROW);
    List {
        tree,
        container,
        items,
    }
}

fn press(target: NodeId, x: f32, y: f32) -> PointerPress {
    PointerPress {
        target,
        pos: pos2(x, y),
        button: PointerButton::Primary,
    }
}

/// Pointer position at the center of row `index` of a container at `origin`.
fn row_center(origin: (f32, f32), index: usize) -> dragsort::Pos2 {
    pos2(origin.0 + 50.0, origin.1 + ROW * index as f32 + ROW / 2.0)
}

/// Drives one move sample and reflows afterwards, like a host would.
fn sample(sortable: &mut Sortable, list: &mut List, pos: dragsort::Pos2) {
    sortable.on_pointer_move(&mut list.tree, pos, Instant::now());
    list.tree.layout_vertical(list.container, ROW);
}

#[test]
fn move_mode_drag_to_last_row_commits_permuted_order() {
    let mut list = list_at((0.0, 0.0), 3);
    let (a, b, c) = (list.items[0], list.items[1], list.items[2]);

    let report: Rc<RefCell<Option<DropReport>>> = Rc::default();
    let seen = report.clone();
    let opts = Options::new("li").on_drop(move |r| {
        *seen.borrow_mut() = Some(r);
        Ok(())
    });
    let mut sortable = Sortable::new(&list.tree, list.container, opts).unwrap();

    assert!(sortable
        .on_pointer_down(&mut list.tree, &press(a, 50.0, 15.0))
        .unwrap());
    sample(&mut sortable, &mut list, pos2(50.0, 16.0));
    // dragged item floats out of flow and follows the pointer
    assert!(list.tree.is_floating(a));
    assert!(list.tree.has_class(a, "is-dragged"));
    assert!(list.tree.has_class(list.container, "has-dragged"));

    sample(&mut sortable, &mut list, row_center((0.0, 0.0), 2));
    sortable.on_pointer_up(&mut list.tree);

    assert_eq!(list.tree.children_of(list.container), vec![b, c, a]);
    assert!(!list.tree.is_floating(a));
    assert!(!list.tree.has_class(a, "is-dragged"));
    assert!(!list.tree.has_class(list.container, "has-dragged"));
    assert_eq!(list.tree.capture_depth(), 0);

    let report = report.borrow().unwrap();
    assert_eq!(report.dragged, a);
    assert_eq!(report.origin, list.container);
    assert_eq!(report.last_target, Some(c));
}

#[test]
fn sample_inside_placeholder_box_changes_nothing() {
    let mut list = list_at((0.0, 0.0), 3);
    let a = list.items[0];
    let mut sortable = Sortable::new(&list.tree, list.container, Options::new("li")).unwrap();

    sortable
        .on_pointer_down(&mut list.tree, &press(a, 50.0, 15.0))
        .unwrap();
    sample(&mut sortable, &mut list, pos2(50.0, 16.0));
    let order = list.tree.children_of(list.container);

    // the placeholder occupies the first row now; hovering inside it is the
    // defined no-op
    sample(&mut sortable, &mut list, pos2(50.0, 10.0));
    assert_eq!(list.tree.children_of(list.container), order);
}

#[test]
fn release_outside_all_containers_keeps_last_valid_slot() {
    let mut list = list_at((0.0, 0.0), 3);
    let (a, b, c) = (list.items[0], list.items[1], list.items[2]);
    let mut sortable = Sortable::new(&list.tree, list.container, Options::new("li")).unwrap();

    sortable
        .on_pointer_down(&mut list.tree, &press(a, 50.0, 15.0))
        .unwrap();
    sample(&mut sortable, &mut list, pos2(50.0, 16.0));
    sample(&mut sortable, &mut list, row_center((0.0, 0.0), 2));
    // wander far outside; resolution fails, the placeholder is frozen
    sample(&mut sortable, &mut list, pos2(500.0, 500.0));
    sortable.on_pointer_up(&mut list.tree);

    // the item is committed at the placeholder's last valid slot, never lost
    assert_eq!(list.tree.children_of(list.container), vec![b, c, a]);
}

#[test]
fn press_without_move_commits_nothing_and_fires_no_drop() {
    let mut list = list_at((0.0, 0.0), 3);
    let a = list.items[0];
    let dropped = Rc::new(RefCell::new(0));
    let count = dropped.clone();
    let opts = Options::new("li").on_drop(move |_| {
        *count.borrow_mut() += 1;
        Ok(())
    });
    let mut sortable = Sortable::new(&list.tree, list.container, opts).unwrap();

    let order = list.tree.children_of(list.container);
    sortable
        .on_pointer_down(&mut list.tree, &press(a, 50.0, 15.0))
        .unwrap();
    assert!(list.tree.has_class(a, "is-raised"));
    sortable.on_pointer_up(&mut list.tree);

    assert_eq!(list.tree.children_of(list.container), order);
    assert!(!list.tree.has_class(a, "is-raised"));
    assert_eq!(*dropped.borrow(), 0);
    assert_eq!(list.tree.capture_depth(), 0);
}

#[test]
fn swap_with_same_anchor_twice_restores_order_and_clears_memory() {
    let mut list = list_at((0.0, 0.0), 3);
    let (a, b, c) = (list.items[0], list.items[1], list.items[2]);

    let report: Rc<RefCell<Option<DropReport>>> = Rc::default();
    let seen = report.clone();
    let opts = Options::new("li").mode(Mode::Swap).on_drop(move |r| {
        *seen.borrow_mut() = Some(r);
        Ok(())
    });
    let mut sortable = Sortable::new(&list.tree, list.container, opts).unwrap();

    sortable
        .on_pointer_down(&mut list.tree, &press(a, 50.0, 15.0))
        .unwrap();
    sample(&mut sortable, &mut list, pos2(50.0, 16.0));

    // a floats out of flow, so b now occupies the first row
    sample(&mut sortable, &mut list, row_center((0.0, 0.0), 0));
    assert!(list.tree.has_class(b, "swap-target"));

    // same partner again: full undo
    sample(&mut sortable, &mut list, row_center((0.0, 0.0), 0));
    assert!(!list.tree.has_class(b, "swap-target"));

    sortable.on_pointer_up(&mut list.tree);
    assert_eq!(list.tree.children_of(list.container), vec![a, b, c]);
    assert_eq!(report.borrow().unwrap().last_target, None);
}

#[test]
fn single_swap_commits_exchanged_order() {
    let mut list = list_at((0.0, 0.0), 3);
    let (a, b, c) = (list.items[0], list.items[1], list.items[2]);

    let report: Rc<RefCell<Option<DropReport>>> = Rc::default();
    let seen = report.clone();
    let opts = Options::new("li").mode(Mode::Swap).on_drop(move |r| {
        *seen.borrow_mut() = Some(r);
        Ok(())
    });
    let mut sortable = Sortable::new(&list.tree, list.container, opts).unwrap();

    sortable
        .on_pointer_down(&mut list.tree, &press(a, 50.0, 15.0))
        .unwrap();
    sample(&mut sortable, &mut list, pos2(50.0, 16.0));

    // a floats out of flow, so b occupies the first row; release right after
    // the one swap
    sample(&mut sortable, &mut list, row_center((0.0, 0.0), 0));
    sortable.on_pointer_up(&mut list.tree);

    assert_eq!(list.tree.children_of(list.container), vec![b, a, c]);
    assert_eq!(report.borrow().unwrap().last_target, Some(b));
}

#[test]
fn swap_chain_restores_first_partner_and_swaps_second() {
    let mut list = list_at((0.0, 0.0), 4);
    let (a, b, c, d) = (
        list.items[0],
        list.items[1],
        list.items[2],
        list.items[3],
    );

    let report: Rc<RefCell<Option<DropReport>>> = Rc::default();
    let seen = report.clone();
    let opts = Options::new("li").mode(Mode::Swap).on_drop(move |r| {
        *seen.borrow_mut() = Some(r);
        Ok(())
    });
    let mut sortable = Sortable::new(&list.tree, list.container, opts).unwrap();

    sortable
        .on_pointer_down(&mut list.tree, &press(a, 50.0, 15.0))
        .unwrap();
    sample(&mut sortable, &mut list, pos2(50.0, 16.0));

    // rows after a floats: b, c, d
    sample(&mut sortable, &mut list, row_center((0.0, 0.0), 0)); // swap with b
    sample(&mut sortable, &mut list, row_center((0.0, 0.0), 3)); // then with d
    assert!(!list.tree.has_class(b, "swap-target"));
    assert!(list.tree.has_class(d, "swap-target"));

    sortable.on_pointer_up(&mut list.tree);
    assert_eq!(list.tree.children_of(list.container), vec![d, b, c, a]);
    assert_eq!(report.borrow().unwrap().last_target, Some(d));
    assert!(!list.tree.has_class(d, "swap-target"));
}

#[test]
fn drag_into_empty_linked_container_hands_item_over() {
    // X at the origin with two items, Y empty at x=200
    let mut list = list_at((0.0, 0.0), 2);
    let (a, b) = (list.items[0], list.items[1]);
    let y = list.tree.spawn("ul");
    list.tree
        .set_rect(y, Rect::from_min_size(pos2(200.0, 0.0), vec2(100.0, 90.0)));

    let mut sortable = Sortable::new(&list.tree, list.container, Options::new("li")).unwrap();
    let y_sortable = Sortable::new(&list.tree, y, Options::new("li")).unwrap();
    sortable.set_linked(&[y_sortable.handle()]);

    sortable
        .on_pointer_down(&mut list.tree, &press(a, 50.0, 15.0))
        .unwrap();
    assert!(list.tree.has_class(y, "is-target"));
    sample(&mut sortable, &mut list, pos2(50.0, 16.0));

    sortable.on_pointer_move(&mut list.tree, pos2(250.0, 45.0), Instant::now());
    sortable.on_pointer_up(&mut list.tree);

    assert_eq!(list.tree.children_of(list.container), vec![b]);
    assert_eq!(list.tree.children_of(y), vec![a]);
    assert!(!list.tree.has_class(y, "is-target"));
}

#[test]
fn linked_set_drops_self_and_mode_mismatches() {
    let mut list = list_at((0.0, 0.0), 2);
    let swap_peer = list.tree.spawn("ul");
    list.tree
        .set_rect(swap_peer, Rect::from_min_size(pos2(200.0, 0.0), vec2(100.0, 60.0)));

    let mut sortable = Sortable::new(&list.tree, list.container, Options::new("li")).unwrap();
    sortable.set_linked(&[
        ContainerHandle {
            container: list.container,
            mode: Mode::Move,
        },
        ContainerHandle {
            container: swap_peer,
            mode: Mode::Swap,
        },
    ]);

    let a = list.items[0];
    sortable
        .on_pointer_down(&mut list.tree, &press(a, 50.0, 15.0))
        .unwrap();
    // neither the container itself nor the mode-mismatched peer is flagged
    assert!(!list.tree.has_class(list.container, "is-target"));
    assert!(!list.tree.has_class(swap_peer, "is-target"));
    sample(&mut sortable, &mut list, pos2(50.0, 16.0));

    // the mismatched peer never receives the placeholder
    let order = list.tree.children_of(list.container).len();
    sortable.on_pointer_move(&mut list.tree, pos2(250.0, 30.0), Instant::now());
    assert_eq!(list.tree.children_of(swap_peer), Vec::<NodeId>::new());
    assert_eq!(list.tree.children_of(list.container).len(), order);
    sortable.on_pointer_up(&mut list.tree);
}

#[test]
fn debounce_collapses_samples_to_the_latest() {
    let mut list = list_at((0.0, 0.0), 3);
    let (a, b, c) = (list.items[0], list.items[1], list.items[2]);
    let opts = Options::new("li").debounce(Duration::from_millis(40));
    let mut sortable = Sortable::new(&list.tree, list.container, opts).unwrap();

    let t0 = Instant::now();
    sortable
        .on_pointer_down(&mut list.tree, &press(a, 50.0, 15.0))
        .unwrap();
    sortable.on_pointer_move(&mut list.tree, pos2(50.0, 16.0), t0);
    list.tree.layout_vertical(list.container, ROW);

    // the item follows the pointer immediately even while debounced
    assert!(list.tree.position_of(a).is_some());
    assert_eq!(sortable.debounce_deadline(), Some(t0 + Duration::from_millis(40)));

    // a newer sample replaces the pending one and pushes the deadline
    let t1 = t0 + Duration::from_millis(10);
    sortable.on_pointer_move(&mut list.tree, row_center((0.0, 0.0), 2), t1);
    assert_eq!(sortable.debounce_deadline(), Some(t1 + Duration::from_millis(40)));

    // too early: nothing fires
    assert!(!sortable.pump_debounce(&mut list.tree, t0 + Duration::from_millis(30)));
    let seeded = vec![a, sortable_placeholder(&list, a), b, c];
    assert_eq!(list.tree.children_of(list.container), seeded);

    // past the deadline the latest coordinates are applied
    assert!(sortable.pump_debounce(&mut list.tree, t1 + Duration::from_millis(40)));
    assert_eq!(sortable.debounce_deadline(), None);
    list.tree.layout_vertical(list.container, ROW);

    sortable.on_pointer_up(&mut list.tree);
    assert_eq!(list.tree.children_of(list.container), vec![b, c, a]);
}

/// The placeholder seeded right after the first move sample sits directly
/// after the dragged item.
fn sortable_placeholder(list: &List, dragged: NodeId) -> NodeId {
    let children = list.tree.children_of(list.container);
    let index = children.iter().position(|&n| n == dragged).unwrap();
    children[index + 1]
}

#[test]
fn debounce_pending_after_teardown_is_a_noop() {
    let mut list = list_at((0.0, 0.0), 3);
    let a = list.items[0];
    let opts = Options::new("li").debounce(Duration::from_millis(40));
    let mut sortable = Sortable::new(&list.tree, list.container, opts).unwrap();

    let t0 = Instant::now();
    sortable
        .on_pointer_down(&mut list.tree, &press(a, 50.0, 15.0))
        .unwrap();
    sortable.on_pointer_move(&mut list.tree, pos2(50.0, 16.0), t0);
    sortable.on_pointer_up(&mut list.tree);

    // the release cancelled the pending sample; a late timer does nothing
    assert_eq!(sortable.debounce_deadline(), None);
    assert!(!sortable.pump_debounce(&mut list.tree, t0 + Duration::from_secs(1)));
}

#[test]
fn failing_hooks_never_abort_the_gesture() {
    let mut list = list_at((0.0, 0.0), 3);
    let (a, b, c) = (list.items[0], list.items[1], list.items[2]);
    let opts = Options::new("li")
        .on_before_drag(|_| Err("before-drag exploded".into()))
        .on_drop(|_| Err("drop exploded".into()));
    let mut sortable = Sortable::new(&list.tree, list.container, opts).unwrap();

    assert!(sortable
        .on_pointer_down(&mut list.tree, &press(a, 50.0, 15.0))
        .unwrap());
    sample(&mut sortable, &mut list, pos2(50.0, 16.0));
    sample(&mut sortable, &mut list, row_center((0.0, 0.0), 2));
    sortable.on_pointer_up(&mut list.tree);

    assert_eq!(list.tree.children_of(list.container), vec![b, c, a]);
    assert_eq!(list.tree.capture_depth(), 0);
}

#[test]
fn handle_restricted_press_requires_the_handle() {
    let mut list = list_at((0.0, 0.0), 2);
    let a = list.items[0];
    let grip = list.tree.child(a, "span");
    let opts = Options::new("li").handle_selector("li>span");
    let mut sortable = Sortable::new(&list.tree, list.container, opts).unwrap();

    // pressing the item body does nothing
    assert!(!sortable
        .on_pointer_down(&mut list.tree, &press(a, 50.0, 15.0))
        .unwrap());
    assert!(!sortable.is_dragging());

    // pressing the grip opens the session
    assert!(sortable
        .on_pointer_down(&mut list.tree, &press(grip, 50.0, 15.0))
        .unwrap());
    assert!(sortable.is_dragging());
    sortable.on_pointer_up(&mut list.tree);
}

#[test]
fn handle_outside_any_item_is_a_configuration_fault() {
    let mut list = list_at((0.0, 0.0), 1);
    // a grip directly under the container, outside every item
    let stray = list.tree.child(list.container, "span");
    let opts = Options::new("li").handle_selector("span");
    let mut sortable = Sortable::new(&list.tree, list.container, opts).unwrap();

    assert_eq!(
        sortable.on_pointer_down(&mut list.tree, &press(stray, 50.0, 15.0)),
        Err(dragsort::DragError::HandleOutsideItem)
    );
    assert!(!sortable.is_dragging());
}

#[test]
fn non_primary_press_is_ignored() {
    let mut list = list_at((0.0, 0.0), 2);
    let a = list.items[0];
    let mut sortable = Sortable::new(&list.tree, list.container, Options::new("li")).unwrap();
    let press = PointerPress {
        target: a,
        pos: pos2(50.0, 15.0),
        button: PointerButton::Secondary,
    };
    assert!(!sortable.on_pointer_down(&mut list.tree, &press).unwrap());
    assert!(!sortable.is_dragging());
}

#[test]
fn construction_rejects_bad_configuration() {
    let list = list_at((0.0, 0.0), 1);
    assert_eq!(
        Sortable::new(&list.tree, NodeId(999), Options::new("li")).err(),
        Some(dragsort::ConfigError::ContainerNotFound)
    );
    assert_eq!(
        Sortable::new(&list.tree, list.container, Options::new("")).err(),
        Some(dragsort::ConfigError::EmptyItemSelector)
    );
    assert_eq!(
        Sortable::new(&list.tree, list.container, Options::new("li").handle_selector("")).err(),
        Some(dragsort::ConfigError::EmptyHandleSelector)
    );
}

#[test]
fn custom_placeholder_builder_failure_recovers_with_default() {
    let mut list = list_at((0.0, 0.0), 3);
    let (a, b, c) = (list.items[0], list.items[1], list.items[2]);
    let opts = Options::new("li").placeholder_builder(|_, _| Err("builder exploded".into()));
    let mut sortable = Sortable::new(&list.tree, list.container, opts).unwrap();

    assert!(sortable
        .on_pointer_down(&mut list.tree, &press(a, 50.0, 15.0))
        .unwrap());
    sample(&mut sortable, &mut list, pos2(50.0, 16.0));
    let marker = sortable_placeholder(&list, a);
    assert!(list.tree.has_class(marker, "marker"));

    sample(&mut sortable, &mut list, row_center((0.0, 0.0), 2));
    sortable.on_pointer_up(&mut list.tree);
    assert_eq!(list.tree.children_of(list.container), vec![b, c, a]);
}
