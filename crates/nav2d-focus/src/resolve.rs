#![forbid(unsafe_code)]

//! Picking one neighbor against live geometry.
//!
//! Cached neighbor lists are ordered from the registered element's box at
//! the last recompute. The element that actually holds focus may be a
//! descendant with a different rectangle, and boxes may have drifted without
//! a notification, so the final choice re-measures every candidate against
//! the key target's current box:
//!
//! 1. Smaller gap on the cross axis wins (horizontal gap when moving up or
//!    down, vertical gap when moving left or right). Overlap is a negative
//!    gap and beats any separation.
//! 2. Ties go to the smaller gap along the travel axis.
//! 3. Remaining ties go to the earlier candidate in the cached list.

use nav2d_core::direction::Direction;
use nav2d_core::geometry::Rect;

use crate::NavId;

/// Choose the best candidate for travel in `direction`.
///
/// `candidates` yields `(id, live_box)` in cached order; entries whose box
/// could not be measured or is not [`Rect::is_valid`] are skipped. When
/// `origin` is unknown or invalid the first usable candidate is returned.
pub fn pick_candidate(
    origin: Option<Rect>,
    direction: Direction,
    candidates: impl IntoIterator<Item = (NavId, Option<Rect>)>,
) -> Option<NavId> {
    let origin = origin.filter(Rect::is_valid);
    let mut best: Option<(NavId, f64, f64)> = None;

    for (id, bounds) in candidates {
        let Some(bounds) = bounds.filter(Rect::is_valid) else {
            continue;
        };
        let Some(origin) = origin else {
            return Some(id);
        };
        let horizontal = origin.horizontal_gap(&bounds);
        let vertical = origin.vertical_gap(&bounds);
        let (cross, travel) = if direction.is_vertical() {
            (horizontal, vertical)
        } else {
            (vertical, horizontal)
        };
        let better = match best {
            None => true,
            Some((_, best_cross, best_travel)) => {
                cross < best_cross || (cross == best_cross && travel < best_travel)
            }
        };
        if better {
            best = Some((id, cross, travel));
        }
    }

    best.map(|(id, _, _)| id)
}
