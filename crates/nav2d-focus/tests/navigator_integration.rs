#![forbid(unsafe_code)]

//! Integration tests for the spatial navigator.
//!
//! These tests drive the navigator the way an embedding UI would: regions
//! are registered as they mount, geometry and focus changes are forwarded
//! as notifications, and key presses go through `handle_key`.
//!
//! # Invariants tested
//!
//! 1. A direction key moves focus to the nearest candidate on that side.
//! 2. Unregistered elements are never focus targets, recomputed or not.
//! 3. Per-direction overrides beat the primary-child fallback, which beats
//!    default focus.
//! 4. Keys outside the binding table change nothing.
//! 5. Geometry changes are picked up lazily on the next key press.
//! 6. The final pick re-measures cached candidates against the key target's
//!    current box, which may overrule the cached order.

use std::cell::RefCell;
use std::rc::Rc;

use nav2d_core::direction::Direction;
use nav2d_core::event::{KeyCode, KeyEvent, Modifiers};
use nav2d_core::geometry::Rect;
use nav2d_focus::{
    DirectionalKeyEvent, ElementOptions, FocusTarget, MemoryHost, NavId, SpatialNavigator,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn rect(l: f64, t: f64, w: f64, h: f64) -> Rect {
    Rect::new(l, t, w, h)
}

struct Scene {
    nav: SpatialNavigator,
    host: MemoryHost,
}

impl Scene {
    fn new() -> Self {
        Self {
            nav: SpatialNavigator::new(),
            host: MemoryHost::new(),
        }
    }

    fn add(&mut self, id: NavId, bounds: Rect) {
        self.add_with(id, bounds, ElementOptions::new());
    }

    fn add_with(&mut self, id: NavId, bounds: Rect, options: ElementOptions) {
        self.host.insert(id, bounds);
        let _ = self
            .nav
            .register(id, options.with_bounds(bounds))
            .expect("register");
    }

    fn focus(&mut self, id: NavId) {
        self.nav.focus_in(id);
    }

    /// Press `code` with focus on `target`; returns whether the event was consumed.
    fn press(&mut self, code: KeyCode, target: NavId) -> bool {
        let mut event = DirectionalKeyEvent::new(KeyEvent::new(code), target);
        let moved = self.nav.handle_key(&mut event, &mut self.host);
        assert_eq!(moved, event.is_consumed());
        moved
    }

    /// Press and, if focus moved to a registered element via default
    /// focus, transfer the focused set the way a DOM would.
    fn step(&mut self, code: KeyCode, from: NavId) -> Option<NavId> {
        self.host.clear_focus_log();
        if !self.press(code, from) {
            return None;
        }
        let to = self.host.last_focused()?;
        self.nav.focus_out(from);
        self.nav.focus_in(to);
        Some(to)
    }
}

/// A(0,0,10,10)  B(30,0,10,10)  C(60,5,10,10)
fn abc() -> Scene {
    let mut s = Scene::new();
    s.add(1, rect(0.0, 0.0, 10.0, 10.0));
    s.add(2, rect(30.0, 0.0, 10.0, 10.0));
    s.add(3, rect(60.0, 5.0, 10.0, 10.0));
    s
}

/// ```text
///   [1]  [2]  [3]
///   [4]  [5]  [6]
///   [7]  [8]  [9]
/// ```
fn grid_3x3() -> Scene {
    let mut s = Scene::new();
    for row in 0..3u64 {
        for col in 0..3u64 {
            let id = row * 3 + col + 1;
            s.add(id, rect(col as f64 * 12.0, row as f64 * 4.0, 10.0, 3.0));
        }
    }
    s
}

// ===========================================================================
// Nearest-neighbor resolution
// ===========================================================================

#[test]
fn right_from_a_goes_to_b_not_c() {
    let mut s = abc();
    s.focus(1);
    assert!(s.press(KeyCode::Right, 1));
    assert_eq!(s.host.focus_log(), &[2]);
}

#[test]
fn walk_the_grid_perimeter() {
    let mut s = grid_3x3();
    s.focus(1);
    let mut at = 1;
    for (code, expected) in [
        (KeyCode::Right, 2),
        (KeyCode::Right, 3),
        (KeyCode::Down, 6),
        (KeyCode::Down, 9),
        (KeyCode::Left, 8),
        (KeyCode::Left, 7),
        (KeyCode::Up, 4),
        (KeyCode::Up, 1),
    ] {
        at = s.step(code, at).expect("moved");
        assert_eq!(at, expected, "pressing {code:?}");
    }
}

#[test]
fn edges_of_grid_do_not_move() {
    let mut s = grid_3x3();
    s.focus(1);
    assert_eq!(s.step(KeyCode::Left, 1), None);
    assert_eq!(s.step(KeyCode::Up, 1), None);
    s.nav.focus_in(9);
    assert_eq!(s.step(KeyCode::Right, 9), None);
    assert_eq!(s.step(KeyCode::Down, 9), None);
}

#[test]
fn center_prefers_aligned_neighbor() {
    let mut s = grid_3x3();
    s.focus(5);
    assert_eq!(s.step(KeyCode::Right, 5), Some(6));
}

#[test]
fn form_layout_moves_between_rows() {
    // [field_a: 20]  [field_b: 21]  [field_c: 22]
    // [submit: 30]   [cancel: 31]
    let mut s = Scene::new();
    s.add(20, rect(18.0, 0.0, 12.0, 3.0));
    s.add(21, rect(32.0, 0.0, 12.0, 3.0));
    s.add(22, rect(46.0, 0.0, 12.0, 3.0));
    s.add(30, rect(18.0, 6.0, 10.0, 3.0));
    s.add(31, rect(30.0, 6.0, 10.0, 3.0));
    s.focus(21);
    // 31 overlaps 21 horizontally, 30 does not.
    assert_eq!(s.step(KeyCode::Down, 21), Some(31));
    assert_eq!(s.step(KeyCode::Left, 31), Some(30));
    assert_eq!(s.step(KeyCode::Up, 30), Some(20));
}

// ===========================================================================
// Lifecycle
// ===========================================================================

#[test]
fn unregister_purges_before_lazy_recompute() {
    let mut s = abc();
    s.focus(1);
    s.nav.recompute_layout();
    assert_eq!(s.nav.neighbors(1, Direction::Right), &[2, 3]);

    assert!(s.nav.unregister(2));
    assert!(s.nav.is_dirty());
    assert!(s.press(KeyCode::Right, 1));
    assert_eq!(s.host.last_focused(), Some(3));
    assert_eq!(s.nav.neighbors(1, Direction::Right), &[3]);
}

#[test]
fn geometry_change_is_applied_on_next_key() {
    let mut s = abc();
    s.focus(1);
    s.nav.recompute_layout();

    // C jumps between A and B.
    let moved = rect(15.0, 0.0, 10.0, 10.0);
    s.host.set_bounds(3, moved);
    s.nav.notify_resized(3, moved);
    assert!(s.nav.is_dirty());
    assert_eq!(s.nav.neighbors(1, Direction::Right), &[2, 3]);

    assert!(s.press(KeyCode::Right, 1));
    assert_eq!(s.host.last_focused(), Some(3));
    assert!(!s.nav.is_dirty());
}

#[test]
fn hidden_element_becomes_navigable_once_laid_out() {
    let mut s = Scene::new();
    s.add(1, rect(0.0, 0.0, 10.0, 10.0));
    // Registered before first layout: empty box.
    s.host.insert(2, rect(20.0, 0.0, 10.0, 10.0));
    let _ = s.nav.register(2, ElementOptions::new()).expect("register");
    s.focus(1);
    assert!(!s.press(KeyCode::Right, 1));

    s.nav.notify_resized(2, rect(20.0, 0.0, 10.0, 10.0));
    assert!(s.press(KeyCode::Right, 1));
    assert_eq!(s.host.last_focused(), Some(2));
}

#[test]
fn independent_navigators_share_nothing() {
    let mut a = abc();
    let mut b = Scene::new();
    b.add(1, rect(0.0, 0.0, 10.0, 10.0));
    a.focus(1);
    b.focus(1);
    assert!(a.press(KeyCode::Right, 1));
    assert!(!b.press(KeyCode::Right, 1));
    assert!(b.host.focus_log().is_empty());
}

// ===========================================================================
// Live geometry
// ===========================================================================

/// A tall region with a small focused child near its top edge.
///
/// ```text
///   [1 [10]]      [2]
///   [1     ]
///   [1     ]   [3]
/// ```
fn tall_with_child() -> Scene {
    let mut s = Scene::new();
    s.add(1, rect(0.0, 0.0, 10.0, 100.0));
    s.host.insert_child(10, 1, rect(2.0, 2.0, 5.0, 5.0));
    s.add(2, rect(30.0, 0.0, 10.0, 10.0));
    s.add(3, rect(20.0, 60.0, 10.0, 10.0));
    s.focus(1);
    s.nav.recompute_layout();
    s
}

#[test]
fn focused_descendant_box_overrules_cached_order() {
    let mut s = tall_with_child();
    // Measured from the tall parent, 3 is nearer.
    assert_eq!(s.nav.neighbors(1, Direction::Right), &[3, 2]);

    // The child sits level with 2, so 2 wins on the cross axis.
    assert!(s.press(KeyCode::Right, 10));
    assert_eq!(s.host.focus_log(), &[2]);
}

#[test]
fn unnotified_drift_is_measured_at_key_time() {
    let mut s = tall_with_child();
    assert!(s.press(KeyCode::Right, 10));
    assert_eq!(s.host.last_focused(), Some(2));

    // 3 slides up beside the child without a notification.
    s.host.set_bounds(3, rect(20.0, 0.0, 10.0, 10.0));
    s.host.clear_focus_log();
    assert!(s.press(KeyCode::Right, 10));
    assert_eq!(s.host.focus_log(), &[3]);
    assert!(!s.nav.is_dirty());
    assert_eq!(s.nav.neighbors(1, Direction::Right), &[3, 2]);
}

#[test]
fn candidate_with_invalid_live_box_is_passed_over() {
    let mut s = abc();
    s.focus(1);
    s.nav.recompute_layout();
    assert_eq!(s.nav.neighbors(1, Direction::Right), &[2, 3]);

    s.host.set_bounds(2, rect(f64::NAN, 0.0, 10.0, 10.0));
    assert!(s.press(KeyCode::Right, 1));
    assert_eq!(s.host.focus_log(), &[3]);
}

// ===========================================================================
// Overrides
// ===========================================================================

fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn Fn()>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let l = Rc::clone(&log);
    let make = move |name: &'static str| -> Box<dyn Fn()> {
        let l = Rc::clone(&l);
        Box::new(move || l.borrow_mut().push(name))
    };
    (log, make)
}

#[test]
fn override_precedence() {
    //        [top: 1]
    // [b: 2]          [right: 3]
    let (log, make) = recorder();
    let mut s = Scene::new();
    s.add(1, rect(0.0, 0.0, 10.0, 10.0));
    let (left, primary) = (make("left-override"), make("primary-child"));
    s.add_with(
        2,
        rect(0.0, 20.0, 10.0, 10.0),
        ElementOptions::new()
            .focus_when_pressed(Direction::Left, move || left())
            .focus_primary_child(move || primary()),
    );
    s.add(3, rect(20.0, 20.0, 10.0, 10.0));

    // Entering B from the right (pressing Left) uses the per-direction override.
    s.focus(3);
    assert!(s.press(KeyCode::Left, 3));
    assert_eq!(*log.borrow(), vec!["left-override"]);

    // Entering B from the top (pressing Down) falls back to the primary child.
    s.nav.focus_out(3);
    s.focus(1);
    assert!(s.press(KeyCode::Down, 1));
    assert_eq!(*log.borrow(), vec!["left-override", "primary-child"]);
    assert!(s.host.focus_log().is_empty());
}

#[test]
fn no_override_restores_default_focus() {
    let (log, make) = recorder();
    let mut s = Scene::new();
    s.add(1, rect(0.0, 0.0, 10.0, 10.0));
    let primary = make("primary-child");
    s.add_with(
        2,
        rect(20.0, 0.0, 10.0, 10.0),
        ElementOptions::new()
            .focus_primary_child(move || primary())
            .no_override(Direction::Right),
    );
    s.focus(1);
    assert!(s.press(KeyCode::Right, 1));
    assert!(log.borrow().is_empty());
    assert_eq!(s.host.last_focused(), Some(2));
}

#[test]
fn resolution_exposes_chosen_action() {
    let mut s = Scene::new();
    s.add(1, rect(0.0, 0.0, 10.0, 10.0));
    s.add_with(
        2,
        rect(20.0, 0.0, 10.0, 10.0),
        ElementOptions::new().focus_when_pressed(Direction::Right, || {}),
    );
    s.focus(1);
    let event = DirectionalKeyEvent::new(KeyEvent::new(KeyCode::Right), 1);
    let resolution = s.nav.resolve_key(&event, &s.host).expect("resolution");
    assert_eq!((resolution.from, resolution.to), (1, 2));
    assert_eq!(resolution.direction, Direction::Right);
    assert!(matches!(resolution.action, FocusTarget::Override(_)));
    // Resolving alone does not focus anything or consume the event.
    assert!(s.host.focus_log().is_empty());
    assert!(!event.is_consumed());
}

// ===========================================================================
// Ignored input
// ===========================================================================

#[test]
fn unmapped_key_changes_nothing() {
    let mut s = abc();
    s.focus(1);
    let dirty = s.nav.is_dirty();
    for code in [KeyCode::Enter, KeyCode::Tab, KeyCode::Char('x'), KeyCode::PageDown] {
        assert!(!s.press(code, 1));
    }
    assert_eq!(s.nav.is_dirty(), dirty);
    assert!(s.nav.is_focused(1));
    assert_eq!(s.nav.len(), 3);
    assert!(s.host.focus_log().is_empty());
}

#[test]
fn modifiers_do_not_affect_matching() {
    let mut s = abc();
    s.focus(1);
    let key = KeyEvent::new(KeyCode::Right).with_modifiers(Modifiers::SHIFT | Modifiers::ALT);
    let mut event = DirectionalKeyEvent::new(key, 1);
    assert!(s.nav.handle_key(&mut event, &mut s.host));
    assert!(event.is_consumed());
    assert_eq!(s.host.focus_log(), &[2]);
}

#[test]
fn key_on_unregistered_target_without_focused_ancestor() {
    let mut s = abc();
    s.host.insert(50, rect(100.0, 100.0, 5.0, 5.0));
    assert!(!s.press(KeyCode::Left, 50));
    assert!(s.host.focus_log().is_empty());
}
