// src/rasterizer/headless_font_driver.rs

//! Headless font driver serving pre-built glyphs, for tests.

use std::collections::BTreeMap;

use crate::glyph::Glyph;
use crate::rasterizer::font_driver::{FontDriver, GlyphError};

#[derive(Debug, Clone, Default)]
pub struct HeadlessFontDriver {
    glyphs: BTreeMap<u32, Glyph>,
    calls: usize,
}

impl HeadlessFontDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_glyph(mut self, glyph: Glyph) -> Self {
        self.glyphs.insert(glyph.codepoint as u32, glyph);
        self
    }

    /// Number of `rasterize` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl FontDriver for HeadlessFontDriver {
    fn rasterize(&mut self, codepoint: u32) -> Result<Glyph, GlyphError> {
        self.calls += 1;
        if char::from_u32(codepoint).is_none() {
            return Err(GlyphError::InvalidCodepoint(codepoint));
        }
        self.glyphs
            .get(&codepoint)
            .cloned()
            .ok_or(GlyphError::MissingGlyph(codepoint))
    }
}
