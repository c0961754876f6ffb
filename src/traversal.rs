// src/traversal.rs

//! Scan orders that linearize a glyph bitmap into a sample stream.
//!
//! Each order is named by two direction pairs. The first pair is the
//! fast-varying axis (`lr`/`rl` for horizontal scanlines, `tb`/`bt` for
//! vertical ones), the second pair the slow-varying axis. After every complete
//! line along the fast axis the sink is flushed, so each line starts on a
//! fresh byte of the packed output.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::glyph::Glyph;

/// Receiver of the sample stream produced by a [`TraversalOrder`].
pub trait PixelSink {
    /// Appends one 8-bit intensity sample.
    fn add_pixel(&mut self, intensity: u8);

    /// Marks the end of a scanline.
    fn flush_pixels(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalOrder {
    /// Left-to-right, top-to-bottom.
    #[default]
    Lrtb,
    /// Right-to-left, top-to-bottom.
    Rltb,
    /// Left-to-right, bottom-to-top.
    Lrbt,
    /// Right-to-left, bottom-to-top.
    Rlbt,
    /// Top-to-bottom, left-to-right.
    Tblr,
    /// Top-to-bottom, right-to-left.
    Tbrl,
    /// Bottom-to-top, left-to-right.
    Btlr,
    /// Bottom-to-top, right-to-left.
    Btrl,
}

impl TraversalOrder {
    pub const ALL: [TraversalOrder; 8] = [
        TraversalOrder::Lrtb,
        TraversalOrder::Rltb,
        TraversalOrder::Lrbt,
        TraversalOrder::Rlbt,
        TraversalOrder::Tblr,
        TraversalOrder::Tbrl,
        TraversalOrder::Btlr,
        TraversalOrder::Btrl,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            TraversalOrder::Lrtb => "lrtb",
            TraversalOrder::Rltb => "rltb",
            TraversalOrder::Lrbt => "lrbt",
            TraversalOrder::Rlbt => "rlbt",
            TraversalOrder::Tblr => "tblr",
            TraversalOrder::Tbrl => "tbrl",
            TraversalOrder::Btlr => "btlr",
            TraversalOrder::Btrl => "btrl",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            TraversalOrder::Lrtb => "Scans left-to-right, top-to-bottom",
            TraversalOrder::Rltb => "Scans right-to-left, top-to-bottom",
            TraversalOrder::Lrbt => "Scans left-to-right, bottom-to-top",
            TraversalOrder::Rlbt => "Scans right-to-left, bottom-to-top",
            TraversalOrder::Tblr => "Scans top-to-bottom, left-to-right",
            TraversalOrder::Tbrl => "Scans top-to-bottom, right-to-left",
            TraversalOrder::Btlr => "Scans bottom-to-top, left-to-right",
            TraversalOrder::Btrl => "Scans bottom-to-top, right-to-left",
        }
    }

    /// Scanlines run vertically (one flush per column).
    pub const fn is_column_major(self) -> bool {
        matches!(
            self,
            TraversalOrder::Tblr | TraversalOrder::Tbrl | TraversalOrder::Btlr | TraversalOrder::Btrl
        )
    }

    // Direction along a scanline.
    const fn fast_reversed(self) -> bool {
        matches!(
            self,
            TraversalOrder::Rltb | TraversalOrder::Rlbt | TraversalOrder::Btlr | TraversalOrder::Btrl
        )
    }

    // Direction in which successive scanlines advance.
    const fn slow_reversed(self) -> bool {
        matches!(
            self,
            TraversalOrder::Lrbt | TraversalOrder::Rlbt | TraversalOrder::Tbrl | TraversalOrder::Btrl
        )
    }

    /// Number of scanlines (flushes) a `width × height` bitmap produces.
    pub const fn line_count(self, width: usize, height: usize) -> usize {
        if self.is_column_major() {
            width
        } else {
            height
        }
    }

    /// Number of samples in each scanline of a `width × height` bitmap.
    pub const fn line_length(self, width: usize, height: usize) -> usize {
        if self.is_column_major() {
            height
        } else {
            width
        }
    }

    /// Streams every pixel of `glyph` exactly once into `sink`, flushing after
    /// each scanline.
    pub fn traverse<S: PixelSink + ?Sized>(self, glyph: &Glyph, sink: &mut S) {
        let (w, h) = (glyph.width(), glyph.height());
        let lines = self.line_count(w, h) as i64;
        let length = self.line_length(w, h) as i64;

        for slow in 0..lines {
            let slow = if self.slow_reversed() { lines - 1 - slow } else { slow };
            for fast in 0..length {
                let fast = if self.fast_reversed() { length - 1 - fast } else { fast };
                let (x, y) = if self.is_column_major() { (slow, fast) } else { (fast, slow) };
                sink.add_pixel(glyph.sample(x, y));
            }
            sink.flush_pixels();
        }
    }
}

impl FromStr for TraversalOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        TraversalOrder::ALL
            .into_iter()
            .find(|order| order.name() == s)
            .ok_or_else(|| anyhow::anyhow!("Unrecognized raster type: {}", s))
    }
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Debug, PartialEq, Eq)]
    enum Event {
        Pixel(u8),
        Flush,
    }

    #[derive(Default)]
    struct Recorder(Vec<Event>);

    impl PixelSink for Recorder {
        fn add_pixel(&mut self, intensity: u8) {
            self.0.push(Event::Pixel(intensity));
        }

        fn flush_pixels(&mut self) {
            self.0.push(Event::Flush);
        }
    }

    /// 3x2 glyph whose pixel values encode their coordinates: 10*y + x + 1.
    fn numbered() -> Glyph {
        Glyph::new('n', 3, 2, vec![1, 2, 3, 11, 12, 13], 0, 0, 3)
    }

    fn lines(order: TraversalOrder, glyph: &Glyph) -> Vec<Vec<u8>> {
        let mut rec = Recorder::default();
        order.traverse(glyph, &mut rec);
        let mut out = vec![Vec::new()];
        for ev in rec.0 {
            match ev {
                Event::Pixel(v) => out.last_mut().unwrap().push(v),
                Event::Flush => out.push(Vec::new()),
            }
        }
        assert!(out.pop().unwrap().is_empty(), "stream must end with a flush");
        out
    }

    #[test]
    fn row_major_orders() {
        let g = numbered();
        assert_eq!(lines(TraversalOrder::Lrtb, &g), vec![vec![1, 2, 3], vec![11, 12, 13]]);
        assert_eq!(lines(TraversalOrder::Rltb, &g), vec![vec![3, 2, 1], vec![13, 12, 11]]);
        assert_eq!(lines(TraversalOrder::Lrbt, &g), vec![vec![11, 12, 13], vec![1, 2, 3]]);
        assert_eq!(lines(TraversalOrder::Rlbt, &g), vec![vec![13, 12, 11], vec![3, 2, 1]]);
    }

    #[test]
    fn column_major_orders() {
        let g = numbered();
        assert_eq!(
            lines(TraversalOrder::Tblr, &g),
            vec![vec![1, 11], vec![2, 12], vec![3, 13]]
        );
        assert_eq!(
            lines(TraversalOrder::Tbrl, &g),
            vec![vec![3, 13], vec![2, 12], vec![1, 11]]
        );
        assert_eq!(
            lines(TraversalOrder::Btlr, &g),
            vec![vec![11, 1], vec![12, 2], vec![13, 3]]
        );
        assert_eq!(
            lines(TraversalOrder::Btrl, &g),
            vec![vec![13, 3], vec![12, 2], vec![11, 1]]
        );
    }

    #[test]
    fn every_order_visits_each_pixel_once() {
        let g = numbered();
        let expected: HashSet<u8> = g.pixels().iter().copied().collect();
        for order in TraversalOrder::ALL {
            let seen: Vec<u8> = lines(order, &g).into_iter().flatten().collect();
            assert_eq!(seen.len(), 6, "{}", order);
            assert_eq!(seen.into_iter().collect::<HashSet<_>>(), expected, "{}", order);
            assert_eq!(lines(order, &g).len(), order.line_count(3, 2));
        }
    }

    #[test]
    fn empty_glyph_produces_nothing() {
        let g = Glyph::blank(' ', 4);
        for order in TraversalOrder::ALL {
            let mut rec = Recorder::default();
            order.traverse(&g, &mut rec);
            assert!(rec.0.is_empty(), "{}", order);
        }
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for order in TraversalOrder::ALL {
            assert_eq!(order.name().parse::<TraversalOrder>().unwrap(), order);
            assert_eq!(order.to_string(), order.name());
        }
        let err = "zigzag".parse::<TraversalOrder>().unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized raster type: zigzag");
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let order: TraversalOrder = serde_json::from_str("\"btrl\"").unwrap();
        assert_eq!(order, TraversalOrder::Btrl);
        assert_eq!(serde_json::to_string(&TraversalOrder::Tblr).unwrap(), "\"tblr\"");
    }
}
