// Raster helpers shared by the glyph, background and text renderers
pub mod background;
pub mod glyph;

use crate::error::{Error, Result};
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba, Rgba32FImage, RgbaImage};
use tiny_skia::Pixmap;

pub fn new_pixmap(width: u32, height: u32) -> Result<Pixmap> {
    Pixmap::new(width, height).ok_or(Error::Canvas { width, height })
}

/// Converts tiny-skia's premultiplied pixels to straight RGBA
pub fn pixmap_to_image(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    image
}

/// Lanczos3 resize. Filtering runs on premultiplied floats so fully
/// transparent pixels do not darken the edges of what they surround.
pub fn downsample(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let premultiplied: Rgba32FImage =
        ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
            let [r, g, b, a] = image.get_pixel(x, y).0.map(|c| c as f32 / 255.0);
            Rgba([r * a, g * a, b * a, a])
        });

    let resized = imageops::resize(&premultiplied, width, height, FilterType::Lanczos3);

    ImageBuffer::from_fn(width, height, |x, y| {
        let [r, g, b, a] = resized.get_pixel(x, y).0;
        let a = a.clamp(0.0, 1.0);
        if a <= 0.0 {
            return Rgba([0, 0, 0, 0]);
        }
        let straight = |c: f32| ((c / a).clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([straight(r), straight(g), straight(b), (a * 255.0).round() as u8])
    })
}
