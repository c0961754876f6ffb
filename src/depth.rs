// src/depth.rs

//! Pixel depth of the packed output and the intensity transforms tied to it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of bits used to store one pixel's intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Depth {
    One,
    Two,
    Four,
    Eight,
}

impl Depth {
    pub const fn bits(self) -> u8 {
        match self {
            Depth::One => 1,
            Depth::Two => 2,
            Depth::Four => 4,
            Depth::Eight => 8,
        }
    }

    /// Largest value a sample can hold at this depth.
    pub const fn max_value(self) -> u8 {
        ((1u16 << self.bits()) - 1) as u8
    }

    /// Keeps the top `bits()` bits of an 8-bit intensity.
    ///
    /// This truncates rather than rounds; embedded consumers of the packed
    /// data depend on the exact values.
    pub const fn quantize(self, intensity: u8) -> u8 {
        intensity >> (8 - self.bits())
    }

    /// Maps a quantized sample back onto 0..=255 (`0` → 0, `max_value()` → 255).
    pub const fn expand(self, sample: u8) -> u8 {
        let scale = 255 / self.max_value() as u16;
        (scale * sample as u16) as u8
    }

    /// Number of bytes one scanline of `width` samples occupies once byte-aligned.
    pub const fn row_bytes(self, width: usize) -> usize {
        (width * self.bits() as usize + 7) / 8
    }
}

impl TryFrom<u8> for Depth {
    type Error = anyhow::Error;

    fn try_from(bits: u8) -> anyhow::Result<Self> {
        match bits {
            1 => Ok(Depth::One),
            2 => Ok(Depth::Two),
            4 => Ok(Depth::Four),
            8 => Ok(Depth::Eight),
            _ => anyhow::bail!("Pixel depth must be 1, 2, 4 or 8 bits-per-pixel (got {})", bits),
        }
    }
}

impl From<Depth> for u8 {
    fn from(depth: Depth) -> u8 {
        depth.bits()
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}
