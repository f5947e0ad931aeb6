#![forbid(unsafe_code)]

//! Cardinal travel directions and per-direction storage.

use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the four cardinal directions focus can travel in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in key-matching order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Whether travel in this direction is along the vertical axis.
    #[inline]
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// The direction pointing the other way.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Horizontal mirror image: left and right swap, up and down stay.
    #[inline]
    #[must_use]
    pub const fn mirrored_x(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            other => other,
        }
    }

    /// Lowercase name, used in log fields and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    #[inline]
    const fn slot(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exactly one value per [`Direction`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectionMap<T> {
    slots: [T; 4],
}

impl<T> DirectionMap<T> {
    /// Build a map by evaluating `f` once per direction.
    pub fn from_fn(mut f: impl FnMut(Direction) -> T) -> Self {
        Self {
            slots: Direction::ALL.map(&mut f),
        }
    }

    /// Value stored for `direction`.
    #[inline]
    pub fn get(&self, direction: Direction) -> &T {
        &self.slots[direction.slot()]
    }

    /// Mutable value stored for `direction`.
    #[inline]
    pub fn get_mut(&mut self, direction: Direction) -> &mut T {
        &mut self.slots[direction.slot()]
    }

    /// Replace the value for `direction`, returning the previous one.
    pub fn set(&mut self, direction: Direction, value: T) -> T {
        std::mem::replace(self.get_mut(direction), value)
    }

    /// Iterate `(direction, value)` pairs in [`Direction::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &T)> {
        Direction::ALL.into_iter().zip(self.slots.iter())
    }

    /// Transform every value, keeping the direction association.
    pub fn map<U>(self, mut f: impl FnMut(Direction, T) -> U) -> DirectionMap<U> {
        let [up, down, left, right] = self.slots;
        DirectionMap {
            slots: [
                f(Direction::Up, up),
                f(Direction::Down, down),
                f(Direction::Left, left),
                f(Direction::Right, right),
            ],
        }
    }
}

impl<T> Index<Direction> for DirectionMap<T> {
    type Output = T;

    fn index(&self, direction: Direction) -> &T {
        self.get(direction)
    }
}

impl<T> IndexMut<Direction> for DirectionMap<T> {
    fn index_mut(&mut self, direction: Direction) -> &mut T {
        self.get_mut(direction)
    }
}
