// src/canvas.rs

//! RGB24 compositing surface used to render the atlas preview.
//!
//! All drawing is clipped to the active clip region and to the canvas bounds,
//! so callers may pass any coordinates without checking them first.

use anyhow::{Context, Result};
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::atlas::{GlyphAtlas, GlyphEntry};
use crate::color::Rgb;
use crate::rect::Rectangle;

const BYTES_PER_PIXEL: usize = 3;

#[derive(Debug, Clone)]
pub struct Canvas {
    width: i32,
    height: i32,
    pitch: usize,
    bitmap: Vec<u8>,
    color: Rgb,
    clip_region: Rectangle,
}

impl Canvas {
    /// Creates a black canvas. Dimensions are clamped to at least 1×1.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let pitch = BYTES_PER_PIXEL * width as usize;
        Self {
            width,
            height,
            pitch,
            bitmap: vec![0; pitch * height as usize],
            color: Rgb::BLACK,
            clip_region: Rectangle::new(0, 0, width, height),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Raw RGB24 pixels, row-major.
    pub fn data(&self) -> &[u8] {
        &self.bitmap
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(0, 0, self.width, self.height)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        if !self.bounds().contains(x, y) {
            return None;
        }
        let i = self.index(x, y);
        Some(Rgb::new(self.bitmap[i], self.bitmap[i + 1], self.bitmap[i + 2]))
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    pub fn clip_region(&self) -> Rectangle {
        self.clip_region
    }

    pub fn reset_clip_region(&mut self) {
        self.clip_region = self.bounds();
    }

    /// Replaces the clip region, returning the previous one.
    pub fn set_clip_region(&mut self, region: Rectangle) -> Rectangle {
        std::mem::replace(&mut self.clip_region, region)
    }

    /// Narrows the clip region to its intersection with `region`, returning
    /// the previous one.
    pub fn modify_clip_region(&mut self, region: Rectangle) -> Rectangle {
        let previous = self.clip_region;
        self.clip_region.intersect(&region);
        previous
    }

    pub fn draw_pixel(&mut self, x: i32, y: i32) {
        if self.clip_region.contains(x, y) && self.bounds().contains(x, y) {
            let i = self.index(x, y);
            self.bitmap[i..i + BYTES_PER_PIXEL].copy_from_slice(&self.color.to_bytes());
        }
    }

    /// Fills the whole clip region.
    pub fn draw_fill(&mut self) {
        self.draw_fill_rect(0, 0, self.width, self.height);
    }

    pub fn draw_fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let r = self.clipped(Rectangle::new(x, y, width, height));
        if r.empty() {
            return;
        }
        let color = self.color.to_bytes();
        for row in r.y1..r.y2 {
            let start = self.index(r.x1, row);
            let end = self.index(r.x2, row);
            for pixel in self.bitmap[start..end].chunks_exact_mut(BYTES_PER_PIXEL) {
                pixel.copy_from_slice(&color);
            }
        }
    }

    /// Blends the glyph for `codepoint` with its origin at `(x, y)`.
    ///
    /// The atlas must hold 8-bit, row-major pixel data. Each destination
    /// pixel becomes the current color scaled by the glyph's coverage.
    /// Returns the glyph's entry, or `None` (drawing nothing) when the atlas
    /// does not contain it.
    pub fn draw_glyph(
        &mut self,
        x: i32,
        y: i32,
        atlas: &GlyphAtlas,
        codepoint: u32,
    ) -> Option<GlyphEntry> {
        let glyph = atlas.find_glyph(codepoint)?;

        // Bearings grow upward, canvas rows grow downward.
        let dest = Rectangle::new(
            x.saturating_add(glyph.x_bearing as i32),
            y.saturating_sub(glyph.y_bearing as i32),
            glyph.width as i32,
            glyph.height as i32,
        );
        let r = self.clipped(dest);
        if r.empty() {
            return Some(glyph);
        }

        // Shift the source read position by however much the clip trimmed.
        let src_x = (r.x1 - dest.x1) as usize;
        let src_y = (r.y1 - dest.y1) as usize;
        let stride = glyph.width as usize;
        let src = &atlas.pixel_data()[glyph.offset as usize..];

        for (row_offset, row) in (r.y1..r.y2).enumerate() {
            let src_row = (src_y + row_offset) * stride + src_x;
            for (col_offset, col) in (r.x1..r.x2).enumerate() {
                let coverage = src.get(src_row + col_offset).copied().unwrap_or(0);
                let i = self.index(col, row);
                self.bitmap[i..i + BYTES_PER_PIXEL]
                    .copy_from_slice(&self.color.scaled(coverage).to_bytes());
            }
        }

        Some(glyph)
    }

    /// Encodes the canvas as an 8-bit RGB, non-interlaced PNG.
    pub fn encode_png<W: Write>(&self, writer: W) -> Result<(), png::EncodingError> {
        let mut encoder = png::Encoder::new(writer, self.width as u32, self.height as u32);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.bitmap)?;
        writer.finish()
    }

    pub fn write_png(&self, path: &Path) -> Result<()> {
        let write = || -> Result<()> {
            let file = File::create(path)?;
            let mut out = BufWriter::new(file);
            self.encode_png(&mut out)?;
            out.flush()?;
            Ok(())
        };
        write().with_context(|| format!("Unable to create preview file '{}'", path.display()))?;
        debug!(
            "Wrote {}x{} preview to '{}'",
            self.width,
            self.height,
            path.display()
        );
        Ok(())
    }

    fn clipped(&self, mut r: Rectangle) -> Rectangle {
        r.intersect(&self.clip_region);
        r.intersect(&self.bounds());
        r
    }

    fn index(&self, x: i32, y: i32) -> usize {
        self.pitch * y as usize + BYTES_PER_PIXEL * x as usize
    }
}
