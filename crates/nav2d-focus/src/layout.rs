#![forbid(unsafe_code)]

//! Directional adjacency from geometry.
//!
//! For every laid-out element and every direction, collects the other
//! elements that lie strictly on that side, ordered nearest first.
//!
//! # Algorithm
//!
//! For a pair `(a, b)` on the horizontal axis:
//!
//! 1. `gap = max(a.left − b.right, b.left − a.right)`; the pair is a
//!    candidate only if `gap ≥ 0` (horizontal spans do not overlap).
//! 2. `distance = gap + |a.cy − b.cy|`.
//! 3. `b` goes to `a`'s left list if `b.cx < a.cx`, its right list if
//!    `b.cx > a.cx`, and nowhere if the centers coincide.
//!
//! The vertical axis is the same with the roles swapped. Each list is then
//! stably sorted by distance.
//!
//! # Invariants
//!
//! - Output is a pure function of the input slice: same boxes in the same
//!   order give identical lists.
//! - Equal distances keep input order (registration order).
//! - Elements with neither width nor height get four empty lists and never
//!   appear in anyone else's list.
//! - O(n²) in the number of laid-out elements.

use nav2d_core::direction::{Direction, DirectionMap};
use nav2d_core::geometry::Rect;

use crate::NavId;

/// Neighbor lists for one element, nearest first.
pub type Neighbors = DirectionMap<Vec<NavId>>;

#[derive(Debug, Clone, Copy)]
struct Snapshot {
    index: usize,
    id: NavId,
    bounds: Rect,
    cx: f64,
    cy: f64,
}

/// Compute neighbor lists for `elements`.
///
/// The result is parallel to the input: entry `i` belongs to `elements[i]`.
#[must_use]
pub fn compute_neighbors(elements: &[(NavId, Rect)]) -> Vec<Neighbors> {
    let mut out: Vec<Neighbors> = elements.iter().map(|_| Neighbors::default()).collect();

    let visible: Vec<Snapshot> = elements
        .iter()
        .enumerate()
        .filter(|(_, (_, bounds))| bounds.is_laid_out())
        .map(|(index, (id, bounds))| {
            let (cx, cy) = bounds.center();
            Snapshot {
                index,
                id: *id,
                bounds: *bounds,
                cx,
                cy,
            }
        })
        .collect();

    let mut before: Vec<(NavId, f64)> = Vec::new();
    let mut after: Vec<(NavId, f64)> = Vec::new();

    for a in &visible {
        // Horizontal: left / right.
        before.clear();
        after.clear();
        for b in &visible {
            if a.index == b.index {
                continue;
            }
            let gap = a.bounds.horizontal_gap(&b.bounds);
            // The horizontal spans MUST NOT overlap.
            if !(gap >= 0.0) {
                continue;
            }
            let distance = gap + (a.cy - b.cy).abs();
            if b.cx < a.cx {
                before.push((b.id, distance));
            } else if b.cx > a.cx {
                after.push((b.id, distance));
            }
        }
        out[a.index][Direction::Left] = sorted_ids(&mut before);
        out[a.index][Direction::Right] = sorted_ids(&mut after);

        // Vertical: up / down.
        before.clear();
        after.clear();
        for b in &visible {
            if a.index == b.index {
                continue;
            }
            let gap = a.bounds.vertical_gap(&b.bounds);
            // The vertical spans MUST NOT overlap.
            if !(gap >= 0.0) {
                continue;
            }
            let distance = (a.cx - b.cx).abs() + gap;
            if b.cy < a.cy {
                before.push((b.id, distance));
            } else if b.cy > a.cy {
                after.push((b.id, distance));
            }
        }
        out[a.index][Direction::Up] = sorted_ids(&mut before);
        out[a.index][Direction::Down] = sorted_ids(&mut after);
    }

    out
}

fn sorted_ids(candidates: &mut [(NavId, f64)]) -> Vec<NavId> {
    // `sort_by` is stable, so ties keep registration order.
    candidates.sort_by(|(_, a), (_, b)| a.total_cmp(b));
    candidates.iter().map(|(id, _)| *id).collect()
}
