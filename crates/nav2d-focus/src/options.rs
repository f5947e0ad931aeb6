#![forbid(unsafe_code)]

//! Per-element registration options.
//!
//! # Allowed directions
//!
//! With no direction configured, all four are allowed. As soon as one is
//! configured, the others default to *not* allowed, so
//! `ElementOptions::new().allow(Direction::Down, true)` means "down only".
//!
//! # Focus overrides
//!
//! When an element is chosen as the destination of a key press, the action
//! for the pressed direction is picked as follows:
//!
//! | Configured for the direction | Action |
//! |------------------------------|--------|
//! | `focus_when_pressed(dir, f)` | `f` |
//! | `no_override(dir)` | default focus |
//! | nothing | `focus_primary_child` if set, else default focus |

use std::fmt;
use std::rc::Rc;

use nav2d_core::direction::{Direction, DirectionMap};
use nav2d_core::geometry::Rect;

use crate::NavId;
use crate::error::NavError;

/// Callback replacing the default focus action.
pub type FocusAction = Rc<dyn Fn()>;

#[derive(Clone)]
enum OverrideSpec {
    Action(FocusAction),
    Suppressed,
}

/// Options for [`SpatialNavigator::register`](crate::SpatialNavigator::register).
#[derive(Clone, Default)]
pub struct ElementOptions {
    bounds: Rect,
    allowed: DirectionMap<Option<bool>>,
    overrides: DirectionMap<Option<OverrideSpec>>,
    primary_child: Option<FocusAction>,
    conflict: Option<Direction>,
}

impl ElementOptions {
    /// Options with every default: all directions allowed, no overrides,
    /// empty initial bounds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial geometry.
    ///
    /// Without this the element starts with an empty box and stays out of
    /// neighbor search until its first geometry notification.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Allow or forbid leaving this element in `direction`.
    #[must_use]
    pub fn allow(mut self, direction: Direction, allowed: bool) -> Self {
        self.allowed[direction] = Some(allowed);
        self
    }

    /// Run `action` instead of default focus when this element is entered
    /// by pressing `direction`.
    #[must_use]
    pub fn focus_when_pressed(mut self, direction: Direction, action: impl Fn() + 'static) -> Self {
        self.set_override(direction, OverrideSpec::Action(Rc::new(action)));
        self
    }

    /// Same as [`ElementOptions::focus_when_pressed`] with a shared action.
    #[must_use]
    pub fn focus_when_pressed_shared(mut self, direction: Direction, action: FocusAction) -> Self {
        self.set_override(direction, OverrideSpec::Action(action));
        self
    }

    /// Use default focus for `direction` even if a primary child is set.
    #[must_use]
    pub fn no_override(mut self, direction: Direction) -> Self {
        self.set_override(direction, OverrideSpec::Suppressed);
        self
    }

    /// Fallback action for every direction without its own override.
    #[must_use]
    pub fn focus_primary_child(mut self, action: impl Fn() + 'static) -> Self {
        self.primary_child = Some(Rc::new(action));
        self
    }

    fn set_override(&mut self, direction: Direction, spec: OverrideSpec) {
        if self.overrides[direction].is_some() && self.conflict.is_none() {
            self.conflict = Some(direction);
        }
        self.overrides[direction] = Some(spec);
    }

    /// Validate and flatten into the stored per-element configuration.
    pub(crate) fn resolve(self, id: NavId) -> Result<(Rect, ElementConfig), NavError> {
        if let Some(direction) = self.conflict {
            return Err(NavError::ConflictingOverride { id, direction });
        }
        if !self.bounds.is_valid() {
            return Err(NavError::InvalidBounds {
                id,
                bounds: self.bounds,
            });
        }
        let any_allowed_configured = self.allowed.iter().any(|(_, a)| a.is_some());
        let allowed = self
            .allowed
            .map(|_, a| a.unwrap_or(!any_allowed_configured));
        let primary_child = self.primary_child;
        let focus_when_pressed = self.overrides.map(|_, spec| match spec {
            Some(OverrideSpec::Action(action)) => Some(action),
            Some(OverrideSpec::Suppressed) => None,
            None => primary_child.clone(),
        });
        Ok((
            self.bounds,
            ElementConfig {
                allowed,
                focus_when_pressed,
            },
        ))
    }
}

impl fmt::Debug for ElementOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let overrides: Vec<_> = self
            .overrides
            .iter()
            .filter_map(|(d, spec)| {
                spec.as_ref().map(|spec| match spec {
                    OverrideSpec::Action(_) => (d, "action"),
                    OverrideSpec::Suppressed => (d, "none"),
                })
            })
            .collect();
        f.debug_struct("ElementOptions")
            .field("bounds", &self.bounds)
            .field("allowed", &self.allowed)
            .field("overrides", &overrides)
            .field("primary_child", &self.primary_child.is_some())
            .finish()
    }
}

/// Flattened options stored with a registered element.
#[derive(Clone)]
pub(crate) struct ElementConfig {
    pub(crate) allowed: DirectionMap<bool>,
    pub(crate) focus_when_pressed: DirectionMap<Option<FocusAction>>,
}
