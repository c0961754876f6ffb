// src/writer.rs

//! C source emitter.
//!
//! Produces a source fragment holding the packed pixel buffer and the glyph
//! table as literal data, plus a font record referencing both under the
//! configured symbol name. The record types live in [`TYPES_HEADER`]; their
//! field order and widths match [`GlyphEntry`] and are the compatibility
//! contract with embedded consumers.

use anyhow::{Context, Result};
use log::info;
use std::fmt::Write as _;
use std::path::Path;

use crate::atlas::GlyphEntry;
use crate::config::Settings;
use crate::packer::OutputModel;

pub const TYPES_HEADER_NAME: &str = "bitfont-types.h";

/// C declarations of the glyph and font records.
pub const TYPES_HEADER: &str = r#"#ifndef BITFONT_TYPES_H
#define BITFONT_TYPES_H

#include <stdint.h>

#ifdef __cplusplus
extern "C" {
#endif

typedef enum {
    BITFONT_COMPRESSION_NONE
} bitfont_compression_t;

typedef struct {
    uint32_t codepoint;                 /* unicode codepoint */
    uint32_t offset;                    /* first byte of the glyph in the pixel table */
    int16_t x_bearing;                  /* bitmap left edge relative to the pen position */
    int16_t y_bearing;                  /* bitmap top row relative to the baseline, up is positive */
    uint16_t width;                     /* bitmap width in pixels */
    uint16_t height;                    /* bitmap height in pixels */
    int16_t x_advance;                  /* pen advance after drawing the glyph */
} bitfont_glyph_t;

typedef struct {
    const uint8_t* pixels;              /* packed pixel data, every scanline byte-aligned */
    const bitfont_glyph_t* glyphs;      /* glyph table sorted by codepoint */
    uint32_t n_glyphs;                  /* number of entries in the glyph table */
    int16_t ascent;                     /* tallest ascender */
    int16_t descent;                    /* deepest descender */
    int16_t line_height;                /* distance between baselines */
    bitfont_compression_t compression;  /* pixel data compression scheme */
} bitfont_font_t;

#ifdef __cplusplus
}
#endif

#endif /* BITFONT_TYPES_H */
"#;

const BYTES_PER_LINE: usize = 16;

impl OutputModel {
    /// Renders the atlas as C source.
    pub fn render_source(&self, settings: &Settings) -> String {
        let atlas = self.atlas();
        let symbol = &settings.symbol;
        let metrics = atlas.metrics();
        let mut out = String::new();

        // Writing to a String cannot fail.
        let _ = writeln!(out, "/*");
        let _ = writeln!(
            out,
            " * Generated by {} {} from '{}'",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            settings.font_path.display()
        );
        let _ = writeln!(
            out,
            " * size {} px, depth {} bpp, {}, traversal {}, antialiasing {}, hinting {}",
            settings.render.size_px,
            self.depth(),
            if self.msb_first() { "msb-first" } else { "lsb-first" },
            self.order(),
            on_off(settings.render.antialiased),
            on_off(settings.render.hinting)
        );
        let _ = writeln!(out, " */");
        let _ = writeln!(out);
        let _ = writeln!(out, "#include \"{}\"", TYPES_HEADER_NAME);
        let _ = writeln!(out);

        // C forbids empty initializers, so empty tables get one zero element.
        let pixels = atlas.pixel_data();
        let _ = writeln!(out, "static const uint8_t {}_pixels[] = {{", symbol);
        if pixels.is_empty() {
            let _ = writeln!(out, "    0x00");
        }
        for line in pixels.chunks(BYTES_PER_LINE) {
            let bytes: Vec<String> = line.iter().map(|b| format!("0x{:02X}", b)).collect();
            let _ = writeln!(out, "    {},", bytes.join(", "));
        }
        let _ = writeln!(out, "}};");
        let _ = writeln!(out);

        let _ = writeln!(out, "static const bitfont_glyph_t {}_glyphs[] = {{", symbol);
        if atlas.is_empty() {
            let _ = writeln!(out, "    {{0, 0, 0, 0, 0, 0, 0}}");
        }
        for glyph in atlas.glyphs() {
            let _ = writeln!(out, "    {}", glyph_initializer(glyph));
        }
        let _ = writeln!(out, "}};");
        let _ = writeln!(out);

        let _ = writeln!(out, "const bitfont_font_t {} = {{", symbol);
        let _ = writeln!(out, "    {}_pixels,", symbol);
        let _ = writeln!(out, "    {}_glyphs,", symbol);
        let _ = writeln!(out, "    {},", atlas.len());
        let _ = writeln!(out, "    {},", metrics.ascent);
        let _ = writeln!(out, "    {},", metrics.descent);
        let _ = writeln!(out, "    {},", metrics.line_height);
        let _ = writeln!(out, "    BITFONT_COMPRESSION_NONE");
        let _ = writeln!(out, "}};");

        out
    }

    /// Writes the C source to `settings.output_path`.
    pub fn write(&self, settings: &Settings) -> Result<()> {
        let path = &settings.output_path;
        std::fs::write(path, self.render_source(settings))
            .with_context(|| format!("Unable to write output file '{}'", path.display()))?;
        info!(
            "Wrote {} glyphs ({} pixel bytes) to '{}' as '{}'",
            self.atlas().len(),
            self.pixel_data().len(),
            path.display(),
            settings.symbol
        );
        Ok(())
    }
}

pub fn write_types_header(path: &Path) -> Result<()> {
    std::fs::write(path, TYPES_HEADER)
        .with_context(|| format!("Unable to write types header '{}'", path.display()))?;
    info!("Wrote types header to '{}'", path.display());
    Ok(())
}

fn glyph_initializer(g: &GlyphEntry) -> String {
    format!(
        "{{0x{:08X}, {}, {}, {}, {}, {}, {}}}, /* {} */",
        g.codepoint,
        g.offset,
        g.x_bearing,
        g.y_bearing,
        g.width,
        g.height,
        g.x_advance,
        describe_codepoint(g.codepoint)
    )
}

fn describe_codepoint(codepoint: u32) -> String {
    match char::from_u32(codepoint) {
        Some(c) if c.is_ascii_graphic() && c != '\\' => format!("'{}'", c),
        _ => format!("U+{:04X}", codepoint),
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
