// src/glyph.rs

//! Defines the `Glyph` type: one rasterized codepoint as delivered by a
//! [`GlyphRasterizer`](crate::rasterizer::GlyphRasterizer).

use std::fmt;

/// A single glyph bitmap with its placement metrics.
///
/// Pixels are 8-bit coverage values stored row-major with a stride of `width`.
/// Bearings follow the usual convention: `x_bearing` is the offset from the
/// pen position to the bitmap's left edge, `y_bearing` the offset (growing
/// upward) from the baseline to the bitmap's top row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub codepoint: char,
    pub x_bearing: i32,
    pub y_bearing: i32,
    pub x_advance: i32,
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Glyph {
    /// Creates a glyph from its metrics and a `width * height` coverage buffer.
    ///
    /// # Panics
    /// Panics if `pixels.len() != width * height`.
    pub fn new(
        codepoint: char,
        width: usize,
        height: usize,
        pixels: Vec<u8>,
        x_bearing: i32,
        y_bearing: i32,
        x_advance: i32,
    ) -> Self {
        assert_eq!(
            pixels.len(),
            width * height,
            "glyph buffer for U+{:04X} does not match its {}x{} size",
            codepoint as u32,
            width,
            height
        );
        Self {
            codepoint,
            x_bearing,
            y_bearing,
            x_advance,
            width,
            height,
            pixels,
        }
    }

    /// A glyph with metrics but no ink (e.g. a space).
    pub fn blank(codepoint: char, x_advance: i32) -> Self {
        Self::new(codepoint, 0, 0, Vec::new(), 0, 0, x_advance)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Coverage at `(x, y)`; coordinates outside the bitmap read as transparent.
    pub fn sample(&self, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return 0;
        }
        self.pixels[y as usize * self.width + x as usize]
    }

    /// Forces every pixel to fully on or fully off.
    pub fn threshold(&mut self, cutoff: u8) {
        for p in &mut self.pixels {
            *p = if *p >= cutoff { 0xFF } else { 0x00 };
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "U+{:04X} {}x{} @({}, {}) adv {}",
            self.codepoint as u32,
            self.width,
            self.height,
            self.x_bearing,
            self.y_bearing,
            self.x_advance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> Glyph {
        Glyph::new('A', 2, 2, vec![10, 255, 0, 128], 1, 5, 3)
    }

    #[test]
    fn sample_reads_row_major() {
        let g = two_by_two();
        assert_eq!(g.sample(0, 0), 10);
        assert_eq!(g.sample(1, 0), 255);
        assert_eq!(g.sample(0, 1), 0);
        assert_eq!(g.sample(1, 1), 128);
    }

    #[test]
    fn sample_out_of_bounds_is_transparent() {
        let g = two_by_two();
        assert_eq!(g.sample(-1, 0), 0);
        assert_eq!(g.sample(0, -1), 0);
        assert_eq!(g.sample(2, 0), 0);
        assert_eq!(g.sample(0, 2), 0);
        assert_eq!(Glyph::blank(' ', 4).sample(0, 0), 0);
    }

    #[test]
    fn threshold_is_binary() {
        let mut g = two_by_two();
        g.threshold(128);
        assert_eq!(g.pixels(), &[0, 255, 0, 255]);
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn new_rejects_mismatched_buffer() {
        let _ = Glyph::new('x', 3, 3, vec![0; 4], 0, 0, 0);
    }

    #[test]
    fn display_names_codepoint() {
        assert_eq!(two_by_two().to_string(), "U+0041 2x2 @(1, 5) adv 3");
    }
}
