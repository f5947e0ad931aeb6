#![forbid(unsafe_code)]

//! The spatial navigator: registry, lazy adjacency, and key resolution.
//!
//! # Lifecycle
//!
//! ```text
//!   register ──▶ notify_* (geometry) ──▶ dirty ──┐
//!      │                                         │ next directional key
//!      ▼                                         ▼
//!   focus_in / focus_out            recompute_layout (clears dirty first)
//!      │                                         │
//!      └──────────────▶ resolve_key ◀────────────┘
//!                           │
//!                           ▼
//!                   Resolution::invoke (override or host focus)
//! ```
//!
//! Geometry notifications never recompute eagerly; a burst of resizes in
//! one frame costs one recompute on the next key press.
//!
//! # Invariants
//!
//! - At most one entry per [`NavId`]; registering a live id is an error.
//! - The focused set only ever holds registered ids.
//! - Resolution never returns an id that is not registered, even when the
//!   cached lists are stale.
//! - Resolution is read-only apart from the lazy recompute; actions run
//!   after the target and action have been chosen.

use ahash::AHashSet;
use indexmap::IndexMap;
use nav2d_core::direction::Direction;
use nav2d_core::event::KeyEvent;
use nav2d_core::geometry::Rect;
use nav2d_core::keybinding::DirectionKeys;

use crate::NavId;
use crate::error::NavError;
use crate::host::Host;
use crate::layout::{Neighbors, compute_neighbors};
use crate::options::{ElementConfig, ElementOptions, FocusAction};
use crate::resolve::pick_candidate;

/// Upper bound on containment-chain steps when locating the focus context.
const MAX_ANCESTOR_DEPTH: usize = 4096;

/// Navigator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavConfig {
    /// Key bound to each direction.
    pub keys: DirectionKeys,
}

impl NavConfig {
    /// Use a custom key table.
    #[must_use]
    pub fn with_keys(mut self, keys: DirectionKeys) -> Self {
        self.keys = keys;
        self
    }

    /// Load config from environment variables.
    ///
    /// See [`DirectionKeys::from_env`] for the variables read.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            keys: DirectionKeys::from_env(),
        }
    }
}

/// A key press together with the element it was delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionalKeyEvent {
    /// The key.
    pub key: KeyEvent,
    /// The element holding input focus when the key was pressed.
    pub target: NavId,
    consumed: bool,
}

impl DirectionalKeyEvent {
    /// Wrap a key event delivered to `target`.
    #[must_use]
    pub const fn new(key: KeyEvent, target: NavId) -> Self {
        Self {
            key,
            target,
            consumed: false,
        }
    }

    /// Suppress any further handling of this event by the environment.
    pub fn consume(&mut self) {
        self.consumed = true;
    }

    /// Whether a handler consumed the event.
    #[must_use]
    pub const fn is_consumed(&self) -> bool {
        self.consumed
    }
}

/// What happens to the chosen neighbor.
#[derive(Clone)]
pub enum FocusTarget {
    /// A caller-registered override for the pressed direction.
    Override(FocusAction),
    /// The host's default focus action.
    Default,
}

impl std::fmt::Debug for FocusTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Override(_) => f.write_str("Override(..)"),
            Self::Default => f.write_str("Default"),
        }
    }
}

/// A resolved focus transition, not yet applied.
///
/// Holding a `Resolution` borrows nothing from the navigator, so an
/// override may freely register or unregister elements when invoked.
#[derive(Debug, Clone)]
#[must_use = "a resolution does nothing until invoked"]
pub struct Resolution {
    /// Element focus is leaving.
    pub from: NavId,
    /// Element focus is moving to.
    pub to: NavId,
    /// Direction that was pressed.
    pub direction: Direction,
    /// Action that will run.
    pub action: FocusTarget,
}

impl Resolution {
    /// Run the chosen action.
    pub fn invoke<H: Host + ?Sized>(self, host: &mut H) {
        match self.action {
            FocusTarget::Override(action) => action(),
            FocusTarget::Default => host.focus(self.to),
        }
    }
}

/// Disposer returned by [`SpatialNavigator::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "dropping a Registration leaves the element registered; call unregister or keep the id"]
pub struct Registration {
    id: NavId,
}

impl Registration {
    /// The registered id.
    #[must_use]
    pub const fn id(&self) -> NavId {
        self.id
    }

    /// Same as `navigator.unregister(self.id())`.
    pub fn unregister(self, navigator: &mut SpatialNavigator) -> bool {
        navigator.unregister(self.id)
    }
}

struct ElementData {
    bounds: Rect,
    neighbors: Neighbors,
    config: ElementConfig,
}

/// Arrow-key focus navigation between registered rectangular regions.
///
/// Use one navigator per independent navigation scope (for example one per
/// modal layer) and route every directional key for that scope through
/// [`SpatialNavigator::handle_key`]. Instances share no state.
pub struct SpatialNavigator {
    keys: DirectionKeys,
    elements: IndexMap<NavId, ElementData, ahash::RandomState>,
    focused: AHashSet<NavId>,
    layout_dirty: bool,
}

impl Default for SpatialNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SpatialNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialNavigator")
            .field("keys", &self.keys)
            .field("elements", &self.elements.len())
            .field("focused", &self.focused.len())
            .field("layout_dirty", &self.layout_dirty)
            .finish()
    }
}

impl SpatialNavigator {
    /// Create a navigator bound to the arrow keys.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(NavConfig::default())
    }

    /// Create a navigator with explicit configuration.
    #[must_use]
    pub fn with_config(config: NavConfig) -> Self {
        Self {
            keys: config.keys,
            elements: IndexMap::default(),
            focused: AHashSet::new(),
            layout_dirty: true,
        }
    }

    /// The active key table.
    #[must_use]
    pub fn keys(&self) -> &DirectionKeys {
        &self.keys
    }

    // --- Registry ---

    /// Start tracking `id`.
    ///
    /// The element gets empty neighbor lists until the next recompute, and
    /// the layout is marked dirty.
    pub fn register(&mut self, id: NavId, options: ElementOptions) -> Result<Registration, NavError> {
        if self.elements.contains_key(&id) {
            return Err(NavError::DuplicateRegistration { id });
        }
        let (bounds, config) = options.resolve(id)?;
        self.elements.insert(
            id,
            ElementData {
                bounds,
                neighbors: Neighbors::default(),
                config,
            },
        );
        self.layout_dirty = true;
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "nav2d.register", id, elements = self.elements.len());
        Ok(Registration { id })
    }

    /// Stop tracking `id`. Returns `false` if it was not registered.
    ///
    /// Other elements' cached lists may still mention `id` until the next
    /// recompute; resolution skips it regardless.
    pub fn unregister(&mut self, id: NavId) -> bool {
        if self.elements.shift_remove(&id).is_none() {
            return false;
        }
        self.focused.remove(&id);
        self.layout_dirty = true;
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "nav2d.unregister", id, elements = self.elements.len());
        true
    }

    /// Number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: NavId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = NavId> + '_ {
        self.elements.keys().copied()
    }

    /// Last known bounds of `id`.
    #[must_use]
    pub fn bounds(&self, id: NavId) -> Option<Rect> {
        self.elements.get(&id).map(|data| data.bounds)
    }

    /// Cached neighbor list of `id` for `direction`, nearest first.
    ///
    /// Reflects the last recompute; call [`SpatialNavigator::recompute_layout`]
    /// first if [`SpatialNavigator::is_dirty`] is set and fresh lists are needed.
    #[must_use]
    pub fn neighbors(&self, id: NavId, direction: Direction) -> &[NavId] {
        self.elements
            .get(&id)
            .map(|data| data.neighbors[direction].as_slice())
            .unwrap_or(&[])
    }

    // --- Geometry notifications ---

    /// A registered element was resized or moved.
    ///
    /// Stores the new box and marks the layout dirty. Ignored for
    /// unregistered ids and invalid boxes.
    pub fn notify_resized(&mut self, id: NavId, bounds: Rect) -> bool {
        if !bounds.is_valid() {
            Self::log_invalid_bounds(id, bounds);
            return false;
        }
        let Some(data) = self.elements.get_mut(&id) else {
            return false;
        };
        data.bounds = bounds;
        self.layout_dirty = true;
        true
    }

    /// A registered element's style or class changed.
    ///
    /// The box is stored only if it differs; the layout is marked dirty
    /// either way, since the change may have moved other elements.
    pub fn notify_attributes_changed(&mut self, id: NavId, bounds: Rect) -> bool {
        let Some(data) = self.elements.get_mut(&id) else {
            return false;
        };
        if !bounds.is_valid() {
            Self::log_invalid_bounds(id, bounds);
        } else if data.bounds != bounds {
            data.bounds = bounds;
        }
        self.layout_dirty = true;
        true
    }

    /// Something changed layout globally (window resize, scroll, reflow).
    pub fn notify_layout_changed(&mut self) {
        self.layout_dirty = true;
    }

    /// Pull the current box of every registered element from `host`.
    ///
    /// The poll-based counterpart of the `notify_*` methods. Marks the
    /// layout dirty only if some box changed; returns how many did. Invalid
    /// boxes are logged and leave the stored box untouched.
    pub fn refresh_geometry<H: Host + ?Sized>(&mut self, host: &H) -> usize {
        let mut changed = 0;
        for (id, data) in &mut self.elements {
            let Some(bounds) = host.bounding_box(*id) else {
                continue;
            };
            if !bounds.is_valid() {
                Self::log_invalid_bounds(*id, bounds);
                continue;
            }
            if bounds != data.bounds {
                data.bounds = bounds;
                changed += 1;
            }
        }
        if changed > 0 {
            self.layout_dirty = true;
        }
        changed
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn log_invalid_bounds(id: NavId, bounds: Rect) {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            message = "nav2d.invalid_bounds",
            id,
            left = bounds.left,
            top = bounds.top,
            width = bounds.width,
            height = bounds.height
        );
    }

    // --- Focus notifications ---

    /// Focus entered `id` or one of its descendants.
    pub fn focus_in(&mut self, id: NavId) -> bool {
        if !self.elements.contains_key(&id) {
            return false;
        }
        self.focused.insert(id)
    }

    /// Focus left `id` and all of its descendants.
    pub fn focus_out(&mut self, id: NavId) -> bool {
        self.focused.remove(&id)
    }

    /// Whether `id` currently contains input focus.
    #[must_use]
    pub fn is_focused(&self, id: NavId) -> bool {
        self.focused.contains(&id)
    }

    // --- Layout ---

    /// Whether cached neighbor lists are stale.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.layout_dirty
    }

    /// Rebuild every element's neighbor lists from the stored boxes.
    pub fn recompute_layout(&mut self) {
        self.layout_dirty = false;
        let snapshot: Vec<(NavId, Rect)> = self
            .elements
            .iter()
            .map(|(id, data)| (*id, data.bounds))
            .collect();

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "nav2d.recompute_layout",
            elements = snapshot.len(),
            visible = snapshot.iter().filter(|(_, b)| b.is_laid_out()).count()
        )
        .entered();

        let lists = compute_neighbors(&snapshot);
        for (data, neighbors) in self.elements.values_mut().zip(lists) {
            data.neighbors = neighbors;
        }
    }

    // --- Key resolution ---

    /// Decide what a key press should do, without doing it.
    ///
    /// Returns `None` when the key is not a direction key, no registered
    /// focused ancestor of the target exists, the direction is disallowed
    /// for that ancestor, or there is no neighbor to move to. Recomputes
    /// the layout first if it is dirty and a move is being considered.
    pub fn resolve_key<H: Host + ?Sized>(
        &mut self,
        event: &DirectionalKeyEvent,
        host: &H,
    ) -> Option<Resolution> {
        if !event.key.is_down() {
            return None;
        }
        let direction = self.keys.direction_for(event.key.code)?;
        let context = self.focus_context(event.target, host)?;
        if !self.elements.get(&context)?.config.allowed[direction] {
            return None;
        }

        if self.layout_dirty {
            self.recompute_layout();
        }

        let data = self.elements.get(&context)?;
        let origin = host.bounding_box(event.target);
        let candidates = data.neighbors[direction]
            .iter()
            .filter(|id| self.elements.contains_key(*id))
            .map(|id| (*id, host.bounding_box(*id)));
        let to = pick_candidate(origin, direction, candidates)?;

        let action = match &self.elements.get(&to)?.config.focus_when_pressed[direction] {
            Some(action) => FocusTarget::Override(action.clone()),
            None if host.is_focusable(to) => FocusTarget::Default,
            None => return None,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "nav2d.navigate",
            from = context,
            to,
            direction = direction.as_str(),
            overridden = matches!(action, FocusTarget::Override(_))
        );

        Some(Resolution {
            from: context,
            to,
            direction,
            action,
        })
    }

    /// Resolve a key press, run the resulting action, and consume the event.
    ///
    /// Returns `true` if focus moved. Override callbacks run while the
    /// navigator is borrowed; callbacks that need to mutate the navigator
    /// should go through [`SpatialNavigator::resolve_key`] and
    /// [`Resolution::invoke`] instead.
    pub fn handle_key<H: Host + ?Sized>(
        &mut self,
        event: &mut DirectionalKeyEvent,
        host: &mut H,
    ) -> bool {
        let Some(resolution) = self.resolve_key(event, &*host) else {
            return false;
        };
        event.consume();
        resolution.invoke(host);
        true
    }

    /// Nearest registered, focused element on the containment chain of `target`.
    fn focus_context<H: Host + ?Sized>(&self, target: NavId, host: &H) -> Option<NavId> {
        let mut current = target;
        for _ in 0..MAX_ANCESTOR_DEPTH {
            if self.focused.contains(&current) && self.elements.contains_key(&current) {
                return Some(current);
            }
            current = host.parent(current)?;
        }
        None
    }
}
