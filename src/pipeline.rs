// One-shot generation of every logo asset
use crate::assemble::banner::render_banner;
use crate::assemble::icon::{render_icon_set, render_png, write_ico, write_png};
use crate::config::Config;
use crate::error::Result;
use crate::font::{resolve_font, Font};
use crate::vector::VectorDocument;
use std::path::PathBuf;
use tracing::info;

/// Files written by a run, in write order
#[derive(Debug, Default)]
pub struct Outputs {
    pub written: Vec<PathBuf>,
}

/// Loads the glyph and regenerates the icon container, the standalone PNGs
/// and the banner. Existing files are overwritten.
pub fn run(config: &Config) -> Result<Outputs> {
    let doc = VectorDocument::load(&config.svg_path())?;

    let mut outputs = Outputs {
        written: write_icons(&doc, config)?,
    };
    // Icons are already on disk if the font lookup fails here
    outputs.written.push(write_banner(&doc, config)?);

    Ok(outputs)
}

pub fn write_icons(doc: &VectorDocument, config: &Config) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    let frames = render_icon_set(doc, config)?;
    let ico_path = config.ico_path();
    write_ico(&frames, &ico_path)?;
    info!("Written {} ({:?})", ico_path.display(), config.icon.sizes);
    written.push(ico_path);

    for &size in &config.icon.png_sizes {
        let png = render_png(doc, size, config)?;
        let path = config.png_path(size);
        write_png(&png, &path)?;
        info!("Written {}", path.display());
        written.push(path);
    }

    Ok(written)
}

pub fn write_banner(doc: &VectorDocument, config: &Config) -> Result<PathBuf> {
    let font_path = resolve_font(&config.banner.font_candidates)?;
    let font = Font::load(&font_path)?;
    info!("Using font {}", font.path().display());

    let banner = render_banner(doc, &font, config)?;
    let path = config.banner_path();
    write_png(&banner, &path)?;
    info!("Written {}", path.display());
    Ok(path)
}
