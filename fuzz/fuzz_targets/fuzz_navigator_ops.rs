#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nav2d_core::direction::Direction;
use nav2d_core::event::{KeyCode, KeyEvent};
use nav2d_core::geometry::Rect;
use nav2d_focus::{DirectionalKeyEvent, ElementOptions, MemoryHost, NavId, SpatialNavigator};

#[derive(Debug, Arbitrary)]
enum Op {
    Register { id: u8, rect: [i16; 4], child_of: Option<u8> },
    Unregister { id: u8 },
    Resize { id: u8, rect: [i16; 4] },
    Attributes { id: u8, rect: [i16; 4] },
    LayoutChanged,
    FocusIn { id: u8 },
    FocusOut { id: u8 },
    Key { target: u8, key: u8 },
    Recompute,
}

fn to_rect(r: [i16; 4]) -> Rect {
    // Negative extents are allowed through to exercise validation.
    Rect::new(
        f64::from(r[0]),
        f64::from(r[1]),
        f64::from(r[2]) / 4.0,
        f64::from(r[3]) / 4.0,
    )
}

fn to_key(k: u8) -> KeyCode {
    match k % 6 {
        0 => KeyCode::Up,
        1 => KeyCode::Down,
        2 => KeyCode::Left,
        3 => KeyCode::Right,
        4 => KeyCode::Enter,
        _ => KeyCode::Char(char::from(k)),
    }
}

fuzz_target!(|ops: Vec<Op>| {
    let mut nav = SpatialNavigator::new();
    let mut host = MemoryHost::new();

    for op in ops.into_iter().take(256) {
        match op {
            Op::Register { id, rect, child_of } => {
                let id = NavId::from(id);
                let bounds = to_rect(rect);
                match child_of {
                    Some(parent) => host.insert_child(id, NavId::from(parent), bounds),
                    None => host.insert(id, bounds),
                }
                let _ = nav.register(id, ElementOptions::new().with_bounds(bounds));
            }
            Op::Unregister { id } => {
                nav.unregister(NavId::from(id));
            }
            Op::Resize { id, rect } => {
                host.set_bounds(NavId::from(id), to_rect(rect));
                nav.notify_resized(NavId::from(id), to_rect(rect));
            }
            Op::Attributes { id, rect } => {
                host.set_bounds(NavId::from(id), to_rect(rect));
                nav.notify_attributes_changed(NavId::from(id), to_rect(rect));
            }
            Op::LayoutChanged => nav.notify_layout_changed(),
            Op::FocusIn { id } => {
                nav.focus_in(NavId::from(id));
            }
            Op::FocusOut { id } => {
                nav.focus_out(NavId::from(id));
            }
            Op::Key { target, key } => {
                let mut event =
                    DirectionalKeyEvent::new(KeyEvent::new(to_key(key)), NavId::from(target));
                host.clear_focus_log();
                let moved = nav.handle_key(&mut event, &mut host);
                assert_eq!(moved, event.is_consumed());
                if let Some(to) = host.last_focused() {
                    assert!(nav.contains(to), "focused unregistered element {to}");
                }
            }
            Op::Recompute => nav.recompute_layout(),
        }

        // Focus never refers to an unregistered element.
        for id in 0..=u8::MAX {
            let id = NavId::from(id);
            if nav.is_focused(id) {
                assert!(nav.contains(id));
            }
        }
        // Cached lists never reference the element itself.
        if !nav.is_dirty() {
            let ids: Vec<NavId> = nav.ids().collect();
            for id in ids {
                for direction in Direction::ALL {
                    assert!(!nav.neighbors(id, direction).contains(&id));
                }
            }
        }
    }
});
