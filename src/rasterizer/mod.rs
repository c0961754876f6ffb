// src/rasterizer/mod.rs

//! Glyph rasterization.
//!
//! The packing pipeline only sees the [`FontDriver`] trait. The production
//! driver parses font files and renders glyphs with `swash`; tests use the
//! headless driver, which serves pre-built bitmaps.

pub mod font_driver;
pub mod swash_font_driver;

#[cfg(test)]
pub mod headless_font_driver;

pub use font_driver::{FontDriver, GlyphError};
pub use swash_font_driver::{RenderOptions, SwashFontDriver};

#[cfg(test)]
pub use headless_font_driver::HeadlessFontDriver;
