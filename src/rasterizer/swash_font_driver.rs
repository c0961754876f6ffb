// src/rasterizer/swash_font_driver.rs

//! Font driver backed by `swash`: parses TrueType/OpenType files and renders
//! glyph outlines (or embedded bitmap strikes) to 8-bit coverage masks.

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use std::path::Path;
use swash::scale::image::Content;
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;
use swash::{CacheKey, FontRef};

use crate::glyph::Glyph;
use crate::rasterizer::font_driver::{FontDriver, GlyphError};

/// Coverage at or above this value becomes fully on when antialiasing is off.
const MONO_THRESHOLD: u8 = 128;

/// Rendering switches handed through to the scaler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub size_px: u32,
    pub antialiased: bool,
    pub hinting: bool,
}

/// An owned font file plus the scaler state needed to render from it.
pub struct SwashFontDriver {
    data: Vec<u8>,
    offset: u32,
    key: CacheKey,
    context: ScaleContext,
    options: RenderOptions,
}

impl std::fmt::Debug for SwashFontDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwashFontDriver")
            .field("bytes", &self.data.len())
            .field("offset", &self.offset)
            .field("options", &self.options)
            .finish()
    }
}

impl SwashFontDriver {
    /// Loads the first face of the font file at `path`.
    pub fn load(path: &Path, options: RenderOptions) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Unable to load font '{}'", path.display()))?;
        let driver = Self::from_bytes(data, options)
            .with_context(|| format!("Unable to load font '{}'", path.display()))?;
        info!(
            "Loaded font '{}' at {} px (antialiasing {}, hinting {})",
            path.display(),
            options.size_px,
            if options.antialiased { "on" } else { "off" },
            if options.hinting { "on" } else { "off" }
        );
        Ok(driver)
    }

    pub fn from_bytes(data: Vec<u8>, options: RenderOptions) -> Result<Self> {
        if options.size_px == 0 {
            return Err(anyhow!("Unable to set font size to {}", options.size_px));
        }
        let font = FontRef::from_index(&data, 0)
            .ok_or_else(|| anyhow!("File is not a supported font"))?;
        let (offset, key) = (font.offset, font.key);
        Ok(Self {
            data,
            offset,
            key,
            context: ScaleContext::new(),
            options,
        })
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }
}

impl FontDriver for SwashFontDriver {
    fn rasterize(&mut self, codepoint: u32) -> Result<Glyph, GlyphError> {
        let ch = char::from_u32(codepoint).ok_or(GlyphError::InvalidCodepoint(codepoint))?;

        let font = FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        };
        let size = self.options.size_px as f32;

        let glyph_id = font.charmap().map(ch);
        if glyph_id == 0 {
            return Err(GlyphError::MissingGlyph(codepoint));
        }

        let x_advance = font
            .glyph_metrics(&[])
            .scale(size)
            .advance_width(glyph_id)
            .round() as i32;

        let mut scaler = self
            .context
            .builder(font)
            .size(size)
            .hint(self.options.hinting)
            .build();

        let Some(image) = Render::new(&[
            Source::Outline,
            Source::Bitmap(StrikeWith::BestFit),
        ])
        .format(Format::Alpha)
        .render(&mut scaler, glyph_id) else {
            // Mapped but nothing to draw (e.g. a space): keep the advance.
            debug!("U+{:04X} has no outline, keeping it as a blank glyph", codepoint);
            return Ok(Glyph::blank(ch, x_advance));
        };

        if !matches!(image.content, Content::Mask) {
            return Err(GlyphError::RenderFailed(codepoint));
        }

        let width = image.placement.width as usize;
        let height = image.placement.height as usize;
        if image.data.len() != width * height {
            return Err(GlyphError::RenderFailed(codepoint));
        }

        let mut glyph = Glyph::new(
            ch,
            width,
            height,
            image.data,
            image.placement.left,
            image.placement.top - 1,
            x_advance,
        );
        if !self.options.antialiased {
            glyph.threshold(MONO_THRESHOLD);
        }
        Ok(glyph)
    }
}
