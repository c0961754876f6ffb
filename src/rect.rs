// src/rect.rs

//! Axis-aligned integer rectangle used for clipping on the preview canvas.

/// Half-open rectangle `[x1, x2) × [y1, y2)`.
///
/// A rectangle may be empty (`x2 <= x1 || y2 <= y1`) and is never normalized,
/// so an empty intersection keeps whatever coordinates the clamp produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rectangle {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rectangle {
    /// Creates a rectangle from an origin and a size. Far edges saturate at
    /// the `i32` range.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x.saturating_add(width),
            y2: y.saturating_add(height),
        }
    }

    pub fn empty(&self) -> bool {
        self.x2 <= self.x1 || self.y2 <= self.y1
    }

    pub fn width(&self) -> i32 {
        self.x2.saturating_sub(self.x1)
    }

    pub fn height(&self) -> i32 {
        self.y2.saturating_sub(self.y1)
    }

    /// Number of pixels covered; zero for empty rectangles.
    pub fn area(&self) -> usize {
        if self.empty() {
            0
        } else {
            self.width() as usize * self.height() as usize
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }

    /// Strict intersection test: rectangles that merely share an edge do not overlap.
    pub fn overlaps(&self, other: &Rectangle) -> bool {
        self.x1 < other.x2 && other.x1 < self.x2 && self.y1 < other.y2 && other.y1 < self.y2
    }

    /// Shrinks `self` to its intersection with `other`.
    ///
    /// The far edges are clamped to `other`'s near edges, so a disjoint pair
    /// collapses onto `other.x1`/`other.y1` with zero or negative extent.
    /// Check the result with [`Rectangle::empty`].
    pub fn intersect(&mut self, other: &Rectangle) {
        self.x1 = self.x1.max(other.x1);
        self.y1 = self.y1.max(other.y1);
        self.x2 = other.x1.max(self.x2.min(other.x2));
        self.y2 = other.y1.max(self.y2.min(other.y2));
    }
}
