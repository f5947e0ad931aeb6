#![forbid(unsafe_code)]

//! Geometric primitives.

/// An axis-aligned rectangle in a shared 2D coordinate space.
///
/// Coordinates grow rightward and downward (origin at top-left, like client
/// coordinates in a browser). Values may be negative or fractional.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge (`left + width`).
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (`top + height`).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Center point `(x, y)`.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
        )
    }

    /// Whether the rectangle currently occupies any space.
    ///
    /// Only a rectangle with zero width *and* zero height counts as not laid
    /// out; a zero-width rule or zero-height separator is still navigable.
    #[inline]
    pub fn is_laid_out(&self) -> bool {
        self.width > 0.0 || self.height > 0.0
    }

    /// Whether every coordinate is finite and neither extent is negative.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }

    /// Signed horizontal gap to `other`.
    ///
    /// Non-negative when the horizontal spans do not overlap (the value is
    /// the empty space between them); negative when they overlap.
    #[inline]
    pub fn horizontal_gap(&self, other: &Rect) -> f64 {
        let from_left = self.left - other.right();
        let from_right = other.left - self.right();
        from_left.max(from_right)
    }

    /// Signed vertical gap to `other`. See [`Rect::horizontal_gap`].
    #[inline]
    pub fn vertical_gap(&self, other: &Rect) -> f64 {
        let from_top = self.top - other.bottom();
        let from_bottom = other.top - self.bottom();
        from_top.max(from_bottom)
    }

    /// Reflect the rectangle about the vertical line `x = 0`.
    #[inline]
    pub fn mirror_x(&self) -> Rect {
        Rect::new(-self.right(), self.top, self.width, self.height)
    }

    /// Translate the rectangle by `(dx, dy)`.
    #[inline]
    pub fn offset(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.left + dx, self.top + dy, self.width, self.height)
    }
}
