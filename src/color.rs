// src/color.rs

//! RGB24 color used by the preview canvas.

use serde::{Deserialize, Serialize};

/// An opaque 8-bit-per-channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const DARK_TEAL: Rgb = Rgb::new(0, 64, 64);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Scales each channel by `coverage / 255` (truncating).
    pub fn scaled(self, coverage: u8) -> Rgb {
        let scale = |c: u8| ((coverage as u16 * c as u16) / 255) as u8;
        Rgb::new(scale(self.r), scale(self.g), scale(self.b))
    }
}
