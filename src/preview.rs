// src/preview.rs

//! Visual proof of the converted font.
//!
//! The preview keeps its own 8-bit, row-major atlas (the canvas blits straight
//! from it) whose samples are reduced to the export depth, so the image shows
//! exactly the intensity levels the embedded target will get. Glyphs are laid
//! out left to right on a single line.

use anyhow::Result;
use log::{debug, info};
use std::path::Path;

use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::depth::Depth;
use crate::glyph::Glyph;
use crate::packer::OutputModel;

/// Horizontal gap between glyphs, also used as the left margin.
pub const GLYPH_SPACING: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewStyle {
    pub background: Rgb,
    pub foreground: Rgb,
    /// Color of the marker drawn at each glyph's pen position.
    pub origin: Rgb,
}

impl Default for PreviewStyle {
    fn default() -> Self {
        Self {
            background: Rgb::DARK_TEAL,
            foreground: Rgb::WHITE,
            origin: Rgb::RED,
        }
    }
}

/// Accumulates glyphs for the preview image.
#[derive(Debug, Clone)]
pub struct PreviewBuilder {
    model: OutputModel,
    total_width: i32,
    style: PreviewStyle,
}

impl PreviewBuilder {
    pub fn new(depth: Depth, line_gap: i32) -> Self {
        Self {
            model: OutputModel::for_preview(depth, line_gap),
            total_width: 0,
            style: PreviewStyle::default(),
        }
    }

    pub fn with_style(mut self, style: PreviewStyle) -> Self {
        self.style = style;
        self
    }

    /// Glyphs must arrive in ascending codepoint order.
    pub fn add_glyph(&mut self, glyph: &Glyph) {
        self.total_width += glyph.x_bearing + glyph.width() as i32 + GLYPH_SPACING;
        self.model.add_glyph(glyph);
    }

    /// Lays out every added glyph on a fresh canvas.
    pub fn render(self) -> Canvas {
        let atlas = self.model.into_atlas();
        let mut canvas = Canvas::new(self.total_width, atlas.line_height());
        let mut cursor_x = GLYPH_SPACING;
        let cursor_y = atlas.line_ascent();

        canvas.set_color(self.style.background);
        canvas.draw_fill();

        for entry in atlas.glyphs() {
            canvas.set_color(self.style.foreground);
            if let Some(glyph) = canvas.draw_glyph(cursor_x, cursor_y, &atlas, entry.codepoint) {
                canvas.set_color(self.style.origin);
                canvas.draw_pixel(cursor_x, cursor_y);
                cursor_x += glyph.x_bearing as i32 + glyph.width as i32 + GLYPH_SPACING;
            }
        }

        debug!(
            "Preview canvas {}x{} with {} glyphs",
            canvas.width(),
            canvas.height(),
            atlas.len()
        );
        canvas
    }

    /// Renders and writes the preview as a PNG file.
    pub fn write(self, path: &Path) -> Result<()> {
        let canvas = self.render();
        canvas.write_png(path)?;
        info!("Wrote preview to '{}'", path.display());
        Ok(())
    }
}
