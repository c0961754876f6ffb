// src/config.rs

//! Conversion options and their validation.
//!
//! `Options` is the loosely typed form: it can be deserialized from a JSON
//! file (every field optional, missing fields take their defaults) and is
//! then overlaid with command-line flags. [`Options::resolve`] checks it and
//! produces the strongly typed [`Settings`] the pipeline runs on. All
//! configuration errors surface there, before any glyph is processed.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::depth::Depth;
use crate::rasterizer::RenderOptions;
use crate::traversal::TraversalOrder;

/// Default font size in pixels.
pub const DEFAULT_SIZE_PX: u32 = 16;

/// Default pixel depth in bits.
pub const DEFAULT_DEPTH: u8 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Font size in pixels.
    pub size: u32,
    /// Traversal order name (see [`TraversalOrder`]).
    pub raster_type: String,
    /// Character set file; `None` selects printable ASCII.
    pub char_set: Option<PathBuf>,
    /// C symbol name for the font object; derived from the output path when `None`.
    pub symbol: Option<String>,
    /// Bits per pixel: 1, 2, 4 or 8.
    pub depth: u8,
    /// Pack samples starting at the most significant bit.
    pub msb_first: bool,
    pub antialiasing: bool,
    pub no_hinting: bool,
    /// Extra pixels added to the line height.
    pub line_gap: i32,
    /// Write a PNG preview here.
    pub preview: Option<PathBuf>,
    /// Write the C types header here.
    pub types_header: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            size: DEFAULT_SIZE_PX,
            raster_type: TraversalOrder::default().name().to_string(),
            char_set: None,
            symbol: None,
            depth: DEFAULT_DEPTH,
            msb_first: false,
            antialiasing: false,
            no_hinting: false,
            line_gap: 0,
            preview: None,
            types_header: None,
        }
    }
}

/// Validated settings for one conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub font_path: PathBuf,
    pub output_path: PathBuf,
    pub symbol: String,
    pub depth: Depth,
    pub msb_first: bool,
    pub order: TraversalOrder,
    pub render: RenderOptions,
    pub line_gap: i32,
    pub char_set: Option<PathBuf>,
    pub preview: Option<PathBuf>,
    pub types_header: Option<PathBuf>,
}

impl Options {
    /// Reads options from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to load config '{}'", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid config '{}'", path.display()))
    }

    /// Validates the options for converting `font_path` into `output_path`.
    pub fn resolve(self, font_path: PathBuf, output_path: PathBuf) -> Result<Settings> {
        let depth = Depth::try_from(self.depth)?;
        let order: TraversalOrder = self.raster_type.parse()?;

        if self.size == 0 {
            anyhow::bail!("Font size must be at least 1 pixel");
        }

        let symbol = match self.symbol {
            Some(symbol) => {
                if !is_c_identifier(&symbol) {
                    anyhow::bail!("Symbol name '{}' is not a valid C identifier", symbol);
                }
                symbol
            }
            None => symbol_from_path(&output_path),
        };

        Ok(Settings {
            font_path,
            output_path,
            symbol,
            depth,
            msb_first: self.msb_first,
            order,
            render: RenderOptions {
                size_px: self.size,
                // One bit per pixel has no room for coverage levels.
                antialiased: self.antialiasing && depth != Depth::One,
                hinting: !self.no_hinting,
            },
            line_gap: self.line_gap,
            char_set: self.char_set,
            preview: self.preview,
            types_header: self.types_header,
        })
    }
}

fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Turns a file name like `fonts/dejavu-12.c` into `dejavu_12`.
pub fn symbol_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut symbol: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if symbol.is_empty() || symbol.starts_with(|c: char| c.is_ascii_digit()) {
        symbol.insert(0, '_');
    }
    symbol
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn resolve(options: Options) -> Result<Settings> {
        options.resolve(PathBuf::from("font.ttf"), PathBuf::from("out/my-font.c"))
    }

    #[test]
    fn defaults_resolve() {
        let settings = resolve(Options::default()).unwrap();
        assert_eq!(settings.depth, Depth::One);
        assert_eq!(settings.order, TraversalOrder::Lrtb);
        assert_eq!(settings.symbol, "my_font");
        assert_eq!(settings.render.size_px, DEFAULT_SIZE_PX);
        assert!(settings.render.hinting);
        assert!(!settings.render.antialiased);
    }

    #[test]
    fn invalid_depth_is_rejected() {
        let err = resolve(Options {
            depth: 3,
            ..Options::default()
        })
        .unwrap_err();
        assert!(err.to_string().starts_with("Pixel depth must be 1, 2, 4 or 8"));
    }

    #[test]
    fn unknown_raster_type_is_rejected() {
        let err = resolve(Options {
            raster_type: "spiral".into(),
            ..Options::default()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized raster type: spiral");
    }

    #[test]
    fn depth_one_disables_antialiasing() {
        let base = Options {
            antialiasing: true,
            ..Options::default()
        };
        let one = resolve(Options { depth: 1, ..base.clone() }).unwrap();
        let four = resolve(Options { depth: 4, ..base }).unwrap();
        assert!(!one.render.antialiased);
        assert!(four.render.antialiased);
    }

    #[test]
    fn explicit_symbol_must_be_identifier() {
        let ok = resolve(Options {
            symbol: Some("font_8x16".into()),
            ..Options::default()
        })
        .unwrap();
        assert_eq!(ok.symbol, "font_8x16");

        for bad in ["8x16", "my-font", ""] {
            assert!(
                resolve(Options {
                    symbol: Some(bad.into()),
                    ..Options::default()
                })
                .is_err(),
                "{:?}",
                bad
            );
        }
    }

    #[test]
    fn symbol_from_path_sanitizes() {
        assert_eq!(symbol_from_path(Path::new("a/b/dejavu-12.c")), "dejavu_12");
        assert_eq!(symbol_from_path(Path::new("12px.h")), "_12px");
        assert_eq!(symbol_from_path(Path::new("")), "_");
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(resolve(Options {
            size: 0,
            ..Options::default()
        })
        .is_err());
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "depth": 4, "raster_type": "tblr", "msb_first": true }}"#).unwrap();
        let options = Options::load(file.path()).unwrap();
        assert_eq!(options.depth, 4);
        assert_eq!(options.raster_type, "tblr");
        assert!(options.msb_first);
        assert_eq!(options.size, DEFAULT_SIZE_PX);
        assert_eq!(options.char_set, None);
    }

    #[test]
    fn json_unknown_field_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "dpeth": 4 }}"#).unwrap();
        let err = Options::load(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Invalid config"));
    }
}
