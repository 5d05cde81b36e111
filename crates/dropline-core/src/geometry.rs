#![forbid(unsafe_code)]

//! Geometric primitives for hit testing drop zones.

/// A pointer position in cell coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// A rectangle for drop zones, panel bounds, and marker areas.
///
/// Edges follow the half-open convention: `x..x + width`, `y..y + height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if a position is inside the rectangle.
    #[inline]
    pub const fn contains_pos(&self, pos: Position) -> bool {
        self.contains(pos.x, pos.y)
    }

    /// Whether row `y` starts above the vertical midline (`y + height / 2`).
    ///
    /// Computed in doubled coordinates so odd heights are not truncated: in a
    /// 3-row rect the midline sits at 1.5, so rows 0 and 1 are in the upper half.
    #[inline]
    pub const fn in_upper_half(&self, y: u16) -> bool {
        (y as u32) * 2 < (self.y as u32) * 2 + self.height as u32
    }

    /// Return a copy moved down by `dy` rows (saturating).
    #[inline]
    #[must_use]
    pub const fn offset_y(self, dy: u16) -> Self {
        Self::new(self.x, self.y.saturating_add(dy), self.width, self.height)
    }
}
