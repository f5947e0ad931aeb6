#![forbid(unsafe_code)]

//! Registration errors.
//!
//! Only programmer errors surface here. Races against unregistration,
//! unmapped keys, and missing neighbors are absorbed by the navigator.

use std::fmt;

use nav2d_core::direction::Direction;
use nav2d_core::geometry::Rect;

use crate::NavId;

/// Errors returned by [`SpatialNavigator::register`](crate::SpatialNavigator::register).
#[derive(Debug, Clone, PartialEq)]
pub enum NavError {
    /// The handle is already registered with this navigator.
    DuplicateRegistration { id: NavId },
    /// The options define more than one focus override for one direction.
    ConflictingOverride { id: NavId, direction: Direction },
    /// The initial bounds are non-finite or have a negative extent.
    InvalidBounds { id: NavId, bounds: Rect },
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateRegistration { id } => {
                write!(f, "element {id} is already registered")
            }
            Self::ConflictingOverride { id, direction } => write!(
                f,
                "element {id} defines conflicting focus overrides for direction {direction}"
            ),
            Self::InvalidBounds { id, bounds } => write!(
                f,
                "element {id} has invalid bounds (left={}, top={}, width={}, height={})",
                bounds.left, bounds.top, bounds.width, bounds.height
            ),
        }
    }
}

impl std::error::Error for NavError {}
