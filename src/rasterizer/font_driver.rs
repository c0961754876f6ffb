// src/rasterizer/font_driver.rs

//! Glyph rasterization primitives.
//!
//! This module defines the `FontDriver` trait, the seam between the packing
//! pipeline and whatever library turns a font file into glyph bitmaps.

use std::fmt;

use crate::glyph::Glyph;

/// Why a single codepoint could not be rasterized.
///
/// These failures are recoverable: the driver skips the codepoint and keeps
/// going. Anything that should stop the run is an `anyhow::Error` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlyphError {
    /// The value is not a Unicode scalar (e.g. a surrogate from a hex file).
    InvalidCodepoint(u32),
    /// The font's character map has no entry for the codepoint.
    MissingGlyph(u32),
    /// The glyph exists but could not be rendered as a coverage mask.
    RenderFailed(u32),
}

impl GlyphError {
    pub fn codepoint(&self) -> u32 {
        match *self {
            GlyphError::InvalidCodepoint(cp)
            | GlyphError::MissingGlyph(cp)
            | GlyphError::RenderFailed(cp) => cp,
        }
    }
}

impl fmt::Display for GlyphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cause = match self {
            GlyphError::InvalidCodepoint(_) => "Not a valid Unicode scalar value",
            GlyphError::MissingGlyph(_) => "Font does not contain glyph for this codepoint",
            GlyphError::RenderFailed(_) => "Unable to render glyph for this codepoint",
        };
        write!(f, "Codepoint U+{:04X}: {}", self.codepoint(), cause)
    }
}

impl std::error::Error for GlyphError {}

/// Produces one glyph bitmap per codepoint.
///
/// Implementors return 8-bit coverage bitmaps (row-major, stride = width)
/// with bearings in pixels, `y_bearing` measured upward from the baseline to
/// the top row.
pub trait FontDriver {
    /// Rasterize the glyph for `codepoint`.
    fn rasterize(&mut self, codepoint: u32) -> Result<Glyph, GlyphError>;
}

impl<D: FontDriver + ?Sized> FontDriver for &mut D {
    fn rasterize(&mut self, codepoint: u32) -> Result<Glyph, GlyphError> {
        (**self).rasterize(codepoint)
    }
}
