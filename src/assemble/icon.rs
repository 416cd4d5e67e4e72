// Icon frames, the multi-resolution .ico container and standalone PNGs
use crate::config::Config;
use crate::error::{Error, Result};
use crate::render::background::rounded_rect;
use crate::render::downsample;
use crate::render::glyph::render_glyph_supersampled;
use crate::vector::VectorDocument;
use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::imageops;
use image::RgbaImage;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

/// Glyph edge length for an icon of `size` pixels
pub fn glyph_size(size: u32, ratio: f32) -> u32 {
    (size as f32 * ratio).round() as u32
}

/// Offset that centers a glyph of `glyph` pixels in an icon of `size` pixels
pub fn glyph_offset(size: u32, glyph: u32) -> u32 {
    size.saturating_sub(glyph) / 2
}

/// Background with the glyph centered on top
pub fn render_icon(doc: &VectorDocument, size: u32, config: &Config) -> Result<RgbaImage> {
    let mut icon = rounded_rect(
        size,
        size,
        config.background.color,
        config.background.corner_radius_ratio,
    )?;

    let glyph_px = glyph_size(size, config.icon.glyph_ratio);
    if glyph_px > 0 {
        let glyph = render_glyph_supersampled(doc, glyph_px, config.icon.supersample)?;
        let offset = glyph_offset(size, glyph_px) as i64;
        imageops::overlay(&mut icon, &glyph, offset, offset);
    }

    debug!("rendered {}px icon (glyph {}px)", size, glyph_px);
    Ok(icon)
}

/// One frame per configured size, in configuration order
pub fn render_icon_set(doc: &VectorDocument, config: &Config) -> Result<Vec<RgbaImage>> {
    config
        .icon
        .sizes
        .iter()
        .map(|&size| render_icon(doc, size, config))
        .collect()
}

/// Standalone PNG: the icon rendered at the supersampling multiple, then shrunk
pub fn render_png(doc: &VectorDocument, size: u32, config: &Config) -> Result<RgbaImage> {
    let large = render_icon(doc, size * config.icon.supersample, config)?;
    Ok(downsample(&large, size, size))
}

/// Writes every image as one frame of an .ico file, preserving order
pub fn write_ico(images: &[RgbaImage], path: &Path) -> Result<()> {
    let mut dir = IconDir::new(ResourceType::Icon);
    for image in images {
        let frame = IconImage::from_rgba_data(image.width(), image.height(), image.as_raw().clone());
        let entry = IconDirEntry::encode(&frame).map_err(|e| Error::io(path, e))?;
        dir.add_entry(entry);
    }

    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    dir.write(BufWriter::new(file)).map_err(|e| Error::io(path, e))
}

/// PNG with maximum compression
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let encoder =
        PngEncoder::new_with_quality(BufWriter::new(file), CompressionType::Best, FilterType::Adaptive);
    image.write_with_encoder(encoder)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{Color, FillRule, Point, Segment, Shape};
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    /// Red fill over the whole document
    fn full_doc() -> VectorDocument {
        VectorDocument {
            width: 10.0,
            height: 10.0,
            shapes: vec![Shape {
                segments: vec![
                    Segment::MoveTo(Point::new(0.0, 0.0)),
                    Segment::LineTo(Point::new(10.0, 0.0)),
                    Segment::LineTo(Point::new(10.0, 10.0)),
                    Segment::LineTo(Point::new(0.0, 10.0)),
                    Segment::Close,
                ],
                fill: Some(Color::rgb(255, 0, 0)),
                fill_rule: FillRule::NonZero,
            }],
        }
    }

    #[test]
    fn test_glyph_geometry() {
        assert_eq!(glyph_size(256, 0.78), 200);
        assert_eq!(glyph_size(16, 0.78), 12);
        assert_eq!(glyph_size(48, 0.78), 37);
        assert_eq!(glyph_offset(256, 200), 28);
        assert_eq!(glyph_offset(48, 37), 5);
        assert_eq!(glyph_offset(16, 12), 2);
    }

    #[test]
    fn test_icon_size_and_centering() {
        let config = Config::default();
        let doc = full_doc();
        for size in [256, 64, 48] {
            let icon = render_icon(&doc, size, &config).unwrap();
            assert_eq!(icon.dimensions(), (size, size));

            let glyph = glyph_size(size, config.icon.glyph_ratio);
            let offset = glyph_offset(size, glyph);
            let last = offset + glyph - 1;
            // Glyph occupies exactly [offset, offset + glyph) on both axes
            assert_eq!(icon.get_pixel(offset + 1, offset + 1), &RED);
            assert_eq!(icon.get_pixel(last - 1, last - 1), &RED);
            assert_eq!(icon.get_pixel(offset - 1, size / 2), &Rgba([0, 132, 190, 255]));
            assert_eq!(icon.get_pixel(size / 2, last + 1), &Rgba([0, 132, 190, 255]));
        }
    }

    #[test]
    fn test_icon_set_follows_configured_order() {
        let config = Config::default();
        let icons = render_icon_set(&full_doc(), &config).unwrap();
        let sizes: Vec<u32> = icons.iter().map(|i| i.width()).collect();
        assert_eq!(sizes, vec![256, 128, 64, 48, 32, 16]);
    }

    #[test]
    fn test_png_is_downsampled_icon() {
        let config = Config::default();
        let png = render_png(&full_doc(), 32, &config).unwrap();
        assert_eq!(png.dimensions(), (32, 32));
        assert_eq!(png.get_pixel(16, 16), &RED);
        assert!(png.get_pixel(0, 0)[3] < 255);
    }

    #[test]
    fn test_write_ico_and_png() {
        let dir = tempfile::tempdir().unwrap();
        let images = vec![
            RgbaImage::from_pixel(32, 32, RED),
            RgbaImage::from_pixel(16, 16, RED),
        ];
        let ico_path = dir.path().join("test.ico");
        write_ico(&images, &ico_path).unwrap();

        let icon_dir = IconDir::read(File::open(&ico_path).unwrap()).unwrap();
        let sizes: Vec<u32> = icon_dir.entries().iter().map(|e| e.width()).collect();
        assert_eq!(sizes, vec![32, 16]);

        let png_path = dir.path().join("test.png");
        write_png(&images[0], &png_path).unwrap();
        let decoded = image::open(&png_path).unwrap().into_rgba8();
        assert_eq!(decoded, images[0]);
    }

    #[test]
    fn test_write_ico_to_missing_dir_names_path() {
        let err = write_ico(&[], Path::new("/nonexistent/dir/x.ico")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/dir/x.ico"));
    }
}
