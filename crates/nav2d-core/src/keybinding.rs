#![forbid(unsafe_code)]

//! Direction key bindings.
//!
//! A [`DirectionKeys`] table maps one key per cardinal direction. The
//! defaults are the four arrow keys; each entry can be overridden in code or
//! through the environment.
//!
//! # Example
//!
//! ```
//! use nav2d_core::direction::Direction;
//! use nav2d_core::event::KeyCode;
//! use nav2d_core::keybinding::DirectionKeys;
//!
//! // vi-style horizontal movement, arrows for vertical
//! let keys = DirectionKeys::default()
//!     .with_key(Direction::Left, KeyCode::Char('h'))
//!     .with_key(Direction::Right, KeyCode::Char('l'));
//!
//! assert_eq!(keys.direction_for(KeyCode::Char('h')), Some(Direction::Left));
//! assert_eq!(keys.direction_for(KeyCode::Up), Some(Direction::Up));
//! assert_eq!(keys.direction_for(KeyCode::Left), None);
//! ```

use crate::direction::{Direction, DirectionMap};
use crate::event::KeyCode;

/// Environment variable overriding the Up key.
pub const ENV_KEY_UP: &str = "NAV2D_KEY_UP";
/// Environment variable overriding the Down key.
pub const ENV_KEY_DOWN: &str = "NAV2D_KEY_DOWN";
/// Environment variable overriding the Left key.
pub const ENV_KEY_LEFT: &str = "NAV2D_KEY_LEFT";
/// Environment variable overriding the Right key.
pub const ENV_KEY_RIGHT: &str = "NAV2D_KEY_RIGHT";

/// Key bound to each travel direction.
///
/// # Environment Variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `NAV2D_KEY_UP` | `ArrowUp` | Key moving focus up |
/// | `NAV2D_KEY_DOWN` | `ArrowDown` | Key moving focus down |
/// | `NAV2D_KEY_LEFT` | `ArrowLeft` | Key moving focus left |
/// | `NAV2D_KEY_RIGHT` | `ArrowRight` | Key moving focus right |
///
/// Values are parsed with [`KeyCode::from_name`]; unparseable values keep
/// the default binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionKeys {
    keys: DirectionMap<KeyCode>,
}

impl Default for DirectionKeys {
    fn default() -> Self {
        Self {
            keys: DirectionMap::from_fn(|direction| match direction {
                Direction::Up => KeyCode::Up,
                Direction::Down => KeyCode::Down,
                Direction::Left => KeyCode::Left,
                Direction::Right => KeyCode::Right,
            }),
        }
    }
}

impl DirectionKeys {
    /// Rebind a single direction.
    #[must_use]
    pub fn with_key(mut self, direction: Direction, code: KeyCode) -> Self {
        self.keys[direction] = code;
        self
    }

    /// Key currently bound to `direction`.
    #[must_use]
    pub fn key(&self, direction: Direction) -> KeyCode {
        self.keys[direction]
    }

    /// Resolve a key to a direction.
    ///
    /// Directions are checked in [`Direction::ALL`] order, so if one key is
    /// bound to several directions the first of them wins.
    #[must_use]
    pub fn direction_for(&self, code: KeyCode) -> Option<Direction> {
        self.keys
            .iter()
            .find(|(_, bound)| **bound == code)
            .map(|(direction, _)| direction)
    }

    /// Load bindings from environment variables.
    ///
    /// Reads `NAV2D_KEY_UP`, `NAV2D_KEY_DOWN`, `NAV2D_KEY_LEFT`, and
    /// `NAV2D_KEY_RIGHT`. Missing or unparseable values keep the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load bindings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        for (direction, var) in [
            (Direction::Up, ENV_KEY_UP),
            (Direction::Down, ENV_KEY_DOWN),
            (Direction::Left, ENV_KEY_LEFT),
            (Direction::Right, ENV_KEY_RIGHT),
        ] {
            let Some(value) = lookup(var) else {
                continue;
            };
            match KeyCode::from_name(&value) {
                Some(code) => config.keys[direction] = code,
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        message = "nav2d.keybinding.unparseable",
                        var,
                        value = value.as_str()
                    );
                }
            }
        }
        config
    }
}
