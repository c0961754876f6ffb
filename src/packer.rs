// src/packer.rs

//! Bit-packing encoder.
//!
//! `OutputModel` quantizes 8-bit intensities to the configured [`Depth`],
//! packs them into bytes in the configured bit order, and records one
//! [`GlyphEntry`] per glyph in its [`GlyphAtlas`]. Every scanline starts on a
//! fresh byte: the traversal flushes after each line, and a flush pads the
//! partial byte with zero bits.

use log::trace;

use crate::atlas::{GlyphAtlas, GlyphEntry};
use crate::depth::Depth;
use crate::glyph::Glyph;
use crate::traversal::{PixelSink, TraversalOrder};

#[derive(Debug, Clone)]
pub struct OutputModel {
    depth: Depth,
    msb_first: bool,
    order: TraversalOrder,
    /// When set, samples are reduced to this depth and scaled back to 0..=255
    /// before packing, so an 8-bit model can show another depth's levels.
    simulated_depth: Option<Depth>,
    bit_pos: u8,
    current_byte: u8,
    atlas: GlyphAtlas,
}

impl OutputModel {
    pub fn new(depth: Depth, msb_first: bool, order: TraversalOrder, line_gap: i32) -> Self {
        Self {
            depth,
            msb_first,
            order,
            simulated_depth: None,
            bit_pos: 0,
            current_byte: 0,
            atlas: GlyphAtlas::new(line_gap),
        }
    }

    /// 8-bit, row-major model whose samples carry only `depth`'s levels.
    /// This is the layout the preview canvas reads.
    pub fn for_preview(depth: Depth, line_gap: i32) -> Self {
        Self {
            simulated_depth: Some(depth),
            ..Self::new(Depth::Eight, false, TraversalOrder::Lrtb, line_gap)
        }
    }

    pub fn depth(&self) -> Depth {
        self.depth
    }

    pub fn msb_first(&self) -> bool {
        self.msb_first
    }

    pub fn order(&self) -> TraversalOrder {
        self.order
    }

    pub fn atlas(&self) -> &GlyphAtlas {
        &self.atlas
    }

    pub fn into_atlas(mut self) -> GlyphAtlas {
        self.flush_pixels();
        self.atlas
    }

    pub fn pixel_data(&self) -> &[u8] {
        self.atlas.pixel_data()
    }

    pub fn find_glyph(&self, codepoint: u32) -> Option<GlyphEntry> {
        self.atlas.find_glyph(codepoint)
    }

    pub fn line_ascent(&self) -> i32 {
        self.atlas.line_ascent()
    }

    pub fn line_descent(&self) -> i32 {
        self.atlas.line_descent()
    }

    pub fn line_height(&self) -> i32 {
        self.atlas.line_height()
    }

    /// Quantizes `intensity` and appends it at the next bit position.
    pub fn add_pixel(&mut self, intensity: u8) {
        let bits = self.depth.bits();
        let sample = self.depth.quantize(intensity);

        let shift = if self.msb_first {
            8 - bits - self.bit_pos
        } else {
            self.bit_pos
        };
        self.current_byte |= sample << shift;
        self.bit_pos += bits;

        if self.bit_pos == 8 {
            self.commit_byte();
        }
    }

    /// Commits a partially filled byte, zero-padded. No-op on a byte boundary.
    pub fn flush_pixels(&mut self) {
        if self.bit_pos > 0 {
            self.commit_byte();
        }
    }

    fn commit_byte(&mut self) {
        let byte = self.current_byte;
        self.atlas.pixels_mut().push(byte);
        self.current_byte = 0;
        self.bit_pos = 0;
    }

    /// Packs `glyph`'s bitmap and records its atlas entry.
    pub fn add_glyph(&mut self, glyph: &Glyph) -> GlyphEntry {
        self.flush_pixels();
        let start = self.atlas.pixel_data().len();

        let order = self.order;
        order.traverse(glyph, self);

        let entry = GlyphEntry {
            codepoint: glyph.codepoint as u32,
            offset: start as u32,
            x_bearing: saturate_i16(glyph.x_bearing),
            y_bearing: saturate_i16(glyph.y_bearing),
            width: saturate_u16(glyph.width()),
            height: saturate_u16(glyph.height()),
            x_advance: saturate_i16(glyph.x_advance),
        };
        self.atlas.push(entry);

        trace!(
            "Packed {} into {} bytes at offset {}",
            glyph,
            self.atlas.pixel_data().len() - start,
            start
        );
        entry
    }
}

impl PixelSink for OutputModel {
    fn add_pixel(&mut self, intensity: u8) {
        let intensity = match self.simulated_depth {
            Some(depth) => depth.expand(depth.quantize(intensity)),
            None => intensity,
        };
        OutputModel::add_pixel(self, intensity);
    }

    fn flush_pixels(&mut self) {
        OutputModel::flush_pixels(self);
    }
}

fn saturate_i16(v: i32) -> i16 {
    v.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

fn saturate_u16(v: usize) -> u16 {
    v.min(u16::MAX as usize) as u16
}
