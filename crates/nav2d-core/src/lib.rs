#![forbid(unsafe_code)]

//! Core: geometry, directions, key events, and direction key bindings.
//!
//! # Role in nav2d
//! `nav2d-core` holds the value types shared by the navigator and the code
//! that drives it. It owns no navigation state.
//!
//! # Primary responsibilities
//! - **Rect**: axis-aligned boxes with the gap measurements navigation uses.
//! - **Direction**: the four travel directions and per-direction storage.
//! - **KeyEvent**: canonical key presses fed to the navigator.
//! - **DirectionKeys**: the key-to-direction table, overridable from code or
//!   the environment.

pub mod direction;
pub mod event;
pub mod geometry;
pub mod keybinding;

pub use direction::{Direction, DirectionMap};
pub use event::{KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use geometry::Rect;
pub use keybinding::DirectionKeys;
