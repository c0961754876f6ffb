// src/main.rs

//! `bitfont`: converts an outline or bitmap font into packed glyph bitmaps
//! and a glyph table, emitted as C source for embedded targets.

pub mod atlas;
pub mod canvas;
pub mod charset;
pub mod cli;
pub mod color;
pub mod config;
pub mod depth;
pub mod glyph;
pub mod packer;
pub mod preview;
pub mod rasterizer;
pub mod rect;
pub mod traversal;
pub mod writer;

use anyhow::Result;
use clap::Parser;
use log::{error, info, warn};
use std::process::ExitCode;

use crate::charset::CharSet;
use crate::cli::Cli;
use crate::config::Settings;
use crate::packer::OutputModel;
use crate::preview::PreviewBuilder;
use crate::rasterizer::{FontDriver, SwashFontDriver};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli
        .options()?
        .resolve(cli.font.clone(), cli.output.clone())?;

    let char_set = match &settings.char_set {
        Some(path) => charset::load_char_set(path)?,
        None => charset::default_char_set(),
    };

    let mut driver = SwashFontDriver::load(&settings.font_path, settings.render)?;
    let (model, preview) = convert(&mut driver, &char_set, &settings);

    model.write(&settings)?;
    if let Some(path) = &settings.types_header {
        writer::write_types_header(path)?;
    }
    if let (Some(builder), Some(path)) = (preview, &settings.preview) {
        builder.write(path)?;
    }
    Ok(())
}

/// Rasterizes every codepoint of `char_set` into the export model, and into a
/// preview when one was requested. Codepoints the font cannot render are
/// reported and left out.
fn convert<D: FontDriver>(
    driver: &mut D,
    char_set: &CharSet,
    settings: &Settings,
) -> (OutputModel, Option<PreviewBuilder>) {
    let mut model = OutputModel::new(
        settings.depth,
        settings.msb_first,
        settings.order,
        settings.line_gap,
    );
    let mut preview = settings
        .preview
        .as_ref()
        .map(|_| PreviewBuilder::new(settings.depth, settings.line_gap));

    let mut skipped = 0;
    for &codepoint in char_set {
        match driver.rasterize(codepoint) {
            Ok(glyph) => {
                model.add_glyph(&glyph);
                if let Some(preview) = preview.as_mut() {
                    preview.add_glyph(&glyph);
                }
            }
            Err(e) => {
                warn!("{}", e);
                skipped += 1;
            }
        }
    }

    info!(
        "Converted {} of {} codepoints (ascent {}, descent {}, line height {})",
        model.atlas().len(),
        char_set.len(),
        model.line_ascent(),
        model.line_descent(),
        model.line_height()
    );
    if skipped > 0 {
        warn!("Skipped {} codepoints", skipped);
    }
    (model, preview)
}
