// src/cli.rs

//! Command-line interface.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::Options;
use crate::traversal::TraversalOrder;

#[derive(Debug, Parser)]
#[command(
    name = "bitfont",
    version,
    about = "Convert a font into packed glyph bitmaps for embedding as C source",
    after_help = raster_type_help()
)]
pub struct Cli {
    /// Font file to convert
    pub font: PathBuf,

    /// C source file to write
    pub output: PathBuf,

    /// Font size in pixels [default: 16]
    #[arg(short, long)]
    pub size: Option<u32>,

    /// Pixel traversal order [default: lrtb]
    #[arg(short, long, value_name = "TYPE")]
    pub raster_type: Option<String>,

    /// Character set file: `.hex` lists one hex codepoint per line, anything
    /// else is read as UTF-8 text [default: printable ASCII]
    #[arg(short, long, value_name = "FILE")]
    pub char_set: Option<PathBuf>,

    /// C symbol name of the font object [default: derived from OUTPUT]
    #[arg(short = 'y', long)]
    pub symbol: Option<String>,

    /// Bits per pixel: 1, 2, 4 or 8 [default: 1]
    #[arg(short, long)]
    pub depth: Option<u8>,

    /// Pack pixels starting at the most significant bit
    #[arg(short, long)]
    pub msb_first: bool,

    /// Render with antialiasing (ignored at depth 1)
    #[arg(short, long)]
    pub antialiasing: bool,

    /// Disable hinting
    #[arg(short = 'i', long)]
    pub no_hinting: bool,

    /// Extra pixels between lines [default: 0]
    #[arg(long, value_name = "PX", allow_negative_numbers = true)]
    pub line_gap: Option<i32>,

    /// Write a PNG preview of the converted glyphs
    #[arg(short, long, value_name = "FILE")]
    pub preview: Option<PathBuf>,

    /// Write the C header declaring the font and glyph records
    #[arg(long, value_name = "FILE")]
    pub types_header: Option<PathBuf>,

    /// Read options from a JSON file; flags given here take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Loads the config file, if any, and overlays the flags.
    pub fn options(&self) -> Result<Options> {
        let base = match &self.config {
            Some(path) => Options::load(path)?,
            None => Options::default(),
        };
        Ok(self.apply(base))
    }

    fn apply(&self, mut options: Options) -> Options {
        if let Some(size) = self.size {
            options.size = size;
        }
        if let Some(raster_type) = &self.raster_type {
            options.raster_type = raster_type.clone();
        }
        if self.char_set.is_some() {
            options.char_set = self.char_set.clone();
        }
        if self.symbol.is_some() {
            options.symbol = self.symbol.clone();
        }
        if let Some(depth) = self.depth {
            options.depth = depth;
        }
        if let Some(line_gap) = self.line_gap {
            options.line_gap = line_gap;
        }
        if self.preview.is_some() {
            options.preview = self.preview.clone();
        }
        if self.types_header.is_some() {
            options.types_header = self.types_header.clone();
        }
        // Switches can only be turned on from the command line.
        options.msb_first |= self.msb_first;
        options.antialiasing |= self.antialiasing;
        options.no_hinting |= self.no_hinting;
        options
    }
}

fn raster_type_help() -> String {
    let mut help = String::from("Raster types:\n");
    for order in TraversalOrder::ALL {
        help.push_str(&format!("  {}  {}\n", order.name(), order.description()));
    }
    help
}
