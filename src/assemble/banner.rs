// Banner: glyph on the left, text on the right, on a rounded background
use crate::config::{BannerConfig, Config};
use crate::error::Result;
use crate::font::{Font, TextBounds};
use crate::render::background::rounded_rect;
use crate::render::glyph::render_glyph_supersampled;
use crate::render::{downsample, new_pixmap, pixmap_to_image};
use crate::vector::VectorDocument;
use image::imageops;
use image::RgbaImage;
use tracing::debug;

/// Placement of every banner element, in final pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BannerLayout {
    pub width: u32,
    pub height: u32,
    pub glyph_x: u32,
    pub glyph_y: u32,
    /// Left end of the text's ascender line
    pub text_x: i32,
    pub text_y: i32,
}

impl BannerLayout {
    /// Canvas wide enough for glyph and text side by side; the text ink's
    /// bottom edge rests on the bottom padding line.
    pub fn compute(banner: &BannerConfig, text: TextBounds) -> Self {
        let logo = banner.logo_height;
        let pad = banner.padding;

        let width = logo + text.width() + pad * 2;
        let height = logo.max(text.height()) + pad * 2;

        Self {
            width,
            height,
            glyph_x: pad,
            glyph_y: (height - logo) / 2,
            text_x: (pad + logo) as i32,
            text_y: (height - pad) as i32 - text.height() as i32 - text.top,
        }
    }
}

pub fn render_banner(doc: &VectorDocument, font: &Font, config: &Config) -> Result<RgbaImage> {
    let banner = &config.banner;
    let glyph = render_glyph_supersampled(doc, banner.logo_height, banner.supersample)?;

    let bounds = font.measure(&banner.text, banner.font_size)?;
    let layout = BannerLayout::compute(banner, bounds);
    debug!("banner layout {:?}, text bounds {:?}", layout, bounds);

    let large = rounded_rect(
        layout.width * banner.supersample,
        layout.height * banner.supersample,
        config.background.color,
        config.background.corner_radius_ratio,
    )?;
    let mut image = downsample(&large, layout.width, layout.height);

    imageops::overlay(
        &mut image,
        &glyph,
        layout.glyph_x as i64,
        layout.glyph_y as i64,
    );

    let mut text_layer = new_pixmap(layout.width, layout.height)?;
    font.draw(
        &mut text_layer,
        &banner.text,
        banner.font_size,
        (layout.text_x as f32, layout.text_y as f32),
        banner.text_color,
    )?;
    imageops::overlay(&mut image, &pixmap_to_image(&text_layer), 0, 0);

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::resolve_font;
    use crate::vector::{Color, FillRule, Point, Segment, Shape};
    use image::Rgba;

    fn bounds(left: i32, top: i32, right: i32, bottom: i32) -> TextBounds {
        TextBounds {
            left,
            top,
            right,
            bottom,
        }
    }

    #[test]
    fn test_layout_short_text() {
        let config = Config::default();
        let layout = BannerLayout::compute(&config.banner, bounds(4, 14, 154, 70));
        // 72 + 150 + 2 * 16
        assert_eq!(layout.width, 254);
        // max(72, 56) + 2 * 16
        assert_eq!(layout.height, 104);
        assert_eq!((layout.glyph_x, layout.glyph_y), (16, 16));
        assert_eq!(layout.text_x, 88);
        // Ink bottom = text_y + top + height = height - padding
        assert_eq!(layout.text_y, 104 - 16 - 56 - 14);
        assert_eq!(layout.text_y + 14 + 56, 88);
    }

    #[test]
    fn test_layout_tall_text() {
        let config = Config::default();
        let layout = BannerLayout::compute(&config.banner, bounds(0, 5, 100, 95));
        assert_eq!(layout.height, 90 + 32);
        assert_eq!(layout.glyph_y, (122 - 72) / 2);
        assert_eq!(layout.text_y + 5 + 90, 122 - 16);
    }

    #[test]
    fn test_render_banner_with_system_font() {
        let config = Config::default();
        let Ok(path) = resolve_font(&config.banner.font_candidates) else {
            eprintln!("no system font available, skipping");
            return;
        };
        let font = Font::load(&path).unwrap();
        let doc = VectorDocument {
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
        };

        let bounds = font.measure("loom", 72.0).unwrap();
        let layout = BannerLayout::compute(&config.banner, bounds);
        let image = render_banner(&doc, &font, &config).unwrap();
        assert_eq!(image.dimensions(), (layout.width, layout.height));

        // Glyph block on the left
        let mid = layout.glyph_y + 36;
        assert_eq!(image.get_pixel(layout.glyph_x + 36, mid), &Rgba([255, 0, 0, 255]));
        // Background between the padding and the glyph
        assert_eq!(image.get_pixel(8, layout.height / 2), &Rgba([0, 132, 190, 255]));
        // Some white text pixels to the right of the glyph
        let white = (layout.text_x as u32..layout.width)
            .flat_map(|x| (0..layout.height).map(move |y| (x, y)))
            .filter(|&(x, y)| image.get_pixel(x, y) == &Rgba([255, 255, 255, 255]))
            .count();
        assert!(white > 100);
    }
}
