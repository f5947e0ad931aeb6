#![forbid(unsafe_code)]

//! The environment the navigator runs inside.
//!
//! A [`Host`] answers the questions a DOM would: where is this region right
//! now, what contains it, can it take focus, and gives it focus when asked.
//! The navigator never measures anything itself outside of key resolution.

use ahash::AHashMap;
use nav2d_core::geometry::Rect;

use crate::NavId;

/// Environment queries and the default focus action.
pub trait Host {
    /// Live bounding box of `id`, or `None` if it no longer exists.
    fn bounding_box(&self, id: NavId) -> Option<Rect>;

    /// The region directly containing `id`, if any.
    fn parent(&self, id: NavId) -> Option<NavId>;

    /// Whether the default focus action applies to `id`.
    fn is_focusable(&self, id: NavId) -> bool {
        let _ = id;
        true
    }

    /// Give `id` input focus.
    fn focus(&mut self, id: NavId);
}

#[derive(Debug, Clone, Copy)]
struct MemoryNode {
    bounds: Rect,
    parent: Option<NavId>,
    focusable: bool,
}

/// In-memory [`Host`]: a flat table of regions with optional parents.
///
/// Records every default focus call, which makes it the natural host for
/// tests, benchmarks, and headless embeddings.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    nodes: AHashMap<NavId, MemoryNode>,
    focus_log: Vec<NavId>,
}

impl MemoryHost {
    /// Create an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a top-level region.
    pub fn insert(&mut self, id: NavId, bounds: Rect) {
        self.insert_node(id, bounds, None);
    }

    /// Add or replace a region contained in `parent`.
    pub fn insert_child(&mut self, id: NavId, parent: NavId, bounds: Rect) {
        self.insert_node(id, bounds, Some(parent));
    }

    fn insert_node(&mut self, id: NavId, bounds: Rect, parent: Option<NavId>) {
        self.nodes.insert(
            id,
            MemoryNode {
                bounds,
                parent,
                focusable: true,
            },
        );
    }

    /// Move or resize a region. Returns `false` if it does not exist.
    pub fn set_bounds(&mut self, id: NavId, bounds: Rect) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.bounds = bounds;
                true
            }
            None => false,
        }
    }

    /// Mark a region as accepting or refusing default focus.
    pub fn set_focusable(&mut self, id: NavId, focusable: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.focusable = focusable;
        }
    }

    /// Remove a region.
    pub fn remove(&mut self, id: NavId) {
        self.nodes.remove(&id);
    }

    /// Every id that received default focus, oldest first.
    #[must_use]
    pub fn focus_log(&self) -> &[NavId] {
        &self.focus_log
    }

    /// The most recent default focus target.
    #[must_use]
    pub fn last_focused(&self) -> Option<NavId> {
        self.focus_log.last().copied()
    }

    /// Forget recorded focus calls.
    pub fn clear_focus_log(&mut self) {
        self.focus_log.clear();
    }
}

impl Host for MemoryHost {
    fn bounding_box(&self, id: NavId) -> Option<Rect> {
        self.nodes.get(&id).map(|node| node.bounds)
    }

    fn parent(&self, id: NavId) -> Option<NavId> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    fn is_focusable(&self, id: NavId) -> bool {
        self.nodes.get(&id).is_some_and(|node| node.focusable)
    }

    fn focus(&mut self, id: NavId) {
        self.focus_log.push(id);
    }
}
