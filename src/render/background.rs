// Solid rounded-rectangle backgrounds
use super::{new_pixmap, pixmap_to_image};
use crate::error::Result;
use crate::vector::Color;
use image::RgbaImage;
use tiny_skia::{FillRule, Paint, Path, PathBuilder, Transform};

/// Cubic control-point distance for a quarter circle of radius 1
const KAPPA: f32 = 0.552_284_8;

/// `round(min(width, height) * ratio)`, never below one pixel
pub fn corner_radius(width: u32, height: u32, ratio: f32) -> u32 {
    let radius = (width.min(height) as f32 * ratio).round() as u32;
    radius.max(1)
}

/// Fills the whole canvas with a rounded rectangle of `color`.
///
/// Edges are hard (no anti-aliasing); callers wanting smooth corners render
/// at a multiple of the final size and downsample.
pub fn rounded_rect(width: u32, height: u32, color: Color, radius_ratio: f32) -> Result<RgbaImage> {
    let mut pixmap = new_pixmap(width, height)?;
    let radius = corner_radius(width, height, radius_ratio) as f32;

    // Covers the inclusive pixel box (0, 0)..=(width - 1, height - 1)
    if let Some(path) = rounded_rect_path(width as f32, height as f32, radius) {
        let mut paint = Paint::default();
        paint.set_color(color.to_skia());
        paint.anti_alias = false;
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    Ok(pixmap_to_image(&pixmap))
}

fn rounded_rect_path(w: f32, h: f32, radius: f32) -> Option<Path> {
    let r = radius.min(w / 2.0).min(h / 2.0);
    let k = r * KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(r, 0.0);
    pb.line_to(w - r, 0.0);
    pb.cubic_to(w - r + k, 0.0, w, r - k, w, r);
    pb.line_to(w, h - r);
    pb.cubic_to(w, h - r + k, w - r + k, h, w - r, h);
    pb.line_to(r, h);
    pb.cubic_to(r - k, h, 0.0, h - r + k, 0.0, h - r);
    pb.line_to(0.0, r);
    pb.cubic_to(0.0, r - k, r - k, 0.0, r, 0.0);
    pb.close();
    pb.finish()
}
