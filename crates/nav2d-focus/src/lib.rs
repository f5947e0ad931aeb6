#![forbid(unsafe_code)]

//! Spatial focus navigation: arrow keys move focus between registered
//! rectangular regions based on their on-screen geometry.
//!
//! # Overview
//!
//! Callers [`register`](SpatialNavigator::register) regions as they appear
//! and [`unregister`](SpatialNavigator::unregister) them as they go away,
//! forward geometry and focus changes, and route directional key presses
//! through [`SpatialNavigator::handle_key`]. The navigator keeps a cached
//! adjacency graph, rebuilt lazily on the first key press after any
//! geometry change, and moves focus to the best neighbor in the pressed
//! direction.
//!
//! # Example
//!
//! ```
//! use nav2d_core::event::{KeyCode, KeyEvent};
//! use nav2d_core::geometry::Rect;
//! use nav2d_focus::{DirectionalKeyEvent, ElementOptions, MemoryHost, SpatialNavigator};
//!
//! let mut host = MemoryHost::new();
//! let mut nav = SpatialNavigator::new();
//! for (id, left) in [(1, 0.0), (2, 30.0), (3, 60.0)] {
//!     let bounds = Rect::new(left, 0.0, 10.0, 10.0);
//!     host.insert(id, bounds);
//!     let _ = nav.register(id, ElementOptions::new().with_bounds(bounds)).unwrap();
//! }
//! nav.focus_in(1);
//!
//! let mut event = DirectionalKeyEvent::new(KeyEvent::new(KeyCode::Right), 1);
//! assert!(nav.handle_key(&mut event, &mut host));
//! assert!(event.is_consumed());
//! assert_eq!(host.last_focused(), Some(2));
//! ```

pub mod error;
pub mod host;
pub mod layout;
pub mod navigator;
pub mod options;
pub mod resolve;

/// Caller-assigned identity of a navigable region.
pub type NavId = u64;

pub use error::NavError;
pub use host::{Host, MemoryHost};
pub use navigator::{
    DirectionalKeyEvent, FocusTarget, NavConfig, Registration, Resolution, SpatialNavigator,
};
pub use options::{ElementOptions, FocusAction};
