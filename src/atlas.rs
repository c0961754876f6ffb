// src/atlas.rs

//! The glyph atlas: per-codepoint metadata plus the shared packed pixel buffer.
//!
//! Glyph offsets are byte indices into [`GlyphAtlas::pixel_data`], never
//! pointers, so the atlas can be moved and serialized freely.

use serde::Serialize;

/// One atlas record. Field order and widths match the C `glyph_t` layout the
/// writer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GlyphEntry {
    pub codepoint: u32,
    /// Byte offset of the glyph's first packed sample.
    pub offset: u32,
    pub x_bearing: i16,
    pub y_bearing: i16,
    pub width: u16,
    pub height: u16,
    pub x_advance: i16,
}

/// Font-wide line metrics, derived as running maxima over added glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LineMetrics {
    pub ascent: i32,
    pub descent: i32,
    pub line_height: i32,
}

/// Ordered glyph table, line metrics and packed pixel buffer.
///
/// Entries must be pushed in ascending codepoint order; lookups rely on it.
#[derive(Debug, Clone, Default)]
pub struct GlyphAtlas {
    glyphs: Vec<GlyphEntry>,
    pixels: Vec<u8>,
    metrics: LineMetrics,
    line_gap: i32,
}

impl GlyphAtlas {
    pub fn new(line_gap: i32) -> Self {
        Self {
            line_gap,
            metrics: LineMetrics {
                line_height: line_gap,
                ..LineMetrics::default()
            },
            ..Self::default()
        }
    }

    pub fn glyphs(&self) -> &[GlyphEntry] {
        &self.glyphs
    }

    pub fn pixel_data(&self) -> &[u8] {
        &self.pixels
    }

    pub fn metrics(&self) -> LineMetrics {
        self.metrics
    }

    pub fn line_ascent(&self) -> i32 {
        self.metrics.ascent
    }

    pub fn line_descent(&self) -> i32 {
        self.metrics.descent
    }

    pub fn line_height(&self) -> i32 {
        self.metrics.line_height
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Exact-match lookup by codepoint.
    pub fn find_glyph(&self, codepoint: u32) -> Option<GlyphEntry> {
        self.glyphs
            .binary_search_by_key(&codepoint, |g| g.codepoint)
            .ok()
            .map(|i| self.glyphs[i])
    }

    /// Mutable access to the packed buffer for the encoder.
    pub(crate) fn pixels_mut(&mut self) -> &mut Vec<u8> {
        &mut self.pixels
    }

    /// Appends `entry` and folds its extents into the line metrics.
    pub(crate) fn push(&mut self, entry: GlyphEntry) {
        debug_assert!(
            self.glyphs.last().map_or(true, |g| g.codepoint < entry.codepoint),
            "glyphs must be added in ascending codepoint order"
        );

        let top = entry.y_bearing as i32 + 1;
        self.metrics.ascent = self.metrics.ascent.max(top);
        self.metrics.descent = self.metrics.descent.max(entry.height as i32 - top);
        self.metrics.line_height = self.metrics.ascent + self.metrics.descent + self.line_gap;

        self.glyphs.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(codepoint: u32, y_bearing: i16, height: u16) -> GlyphEntry {
        GlyphEntry {
            codepoint,
            offset: 0,
            x_bearing: 0,
            y_bearing,
            width: 1,
            height,
            x_advance: 1,
        }
    }

    #[test]
    fn find_glyph_exact_matches_only() {
        let mut atlas = GlyphAtlas::new(0);
        for cp in [0x20, 0x41, 0x42, 0x7A, 0x263A] {
            atlas.push(entry(cp, 0, 1));
        }
        for cp in [0x20, 0x41, 0x42, 0x7A, 0x263A] {
            assert_eq!(atlas.find_glyph(cp).map(|g| g.codepoint), Some(cp));
        }
        for cp in [0, 0x1F, 0x21, 0x43, 0x7B, 0x263B, u32::MAX] {
            assert_eq!(atlas.find_glyph(cp), None, "U+{:04X}", cp);
        }
    }

    #[test]
    fn empty_atlas_finds_nothing() {
        let atlas = GlyphAtlas::new(2);
        assert!(atlas.is_empty());
        assert_eq!(atlas.find_glyph(0x41), None);
        assert_eq!(atlas.line_height(), 2);
    }

    #[test]
    fn metrics_are_running_maxima() {
        let mut atlas = GlyphAtlas::new(1);
        // Cap letter: top at 10, no descent.
        atlas.push(entry(0x41, 9, 10));
        assert_eq!(atlas.metrics(), LineMetrics { ascent: 10, descent: 0, line_height: 11 });
        // Descender: top at 7, 3 rows below the baseline.
        atlas.push(entry(0x67, 6, 10));
        assert_eq!(atlas.metrics(), LineMetrics { ascent: 10, descent: 3, line_height: 14 });
        // Smaller glyph changes nothing.
        atlas.push(entry(0x78, 4, 5));
        assert_eq!(atlas.metrics(), LineMetrics { ascent: 10, descent: 3, line_height: 14 });
    }

    #[test]
    fn metrics_do_not_depend_on_insertion_order() {
        let shapes = [(9, 10), (6, 10), (4, 5), (12, 2), (-2, 3)];
        let build = |order: &[usize]| {
            let mut atlas = GlyphAtlas::new(3);
            for (cp, &i) in order.iter().enumerate() {
                let (yb, h) = shapes[i];
                atlas.push(entry(cp as u32, yb, h));
            }
            atlas.metrics()
        };
        let forward = build(&[0, 1, 2, 3, 4]);
        assert_eq!(forward, build(&[4, 3, 2, 1, 0]));
        assert_eq!(forward, build(&[2, 0, 4, 1, 3]));
        assert_eq!(forward, LineMetrics { ascent: 13, descent: 4, line_height: 20 });
    }
}
