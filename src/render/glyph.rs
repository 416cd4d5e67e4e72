// Shape rasterizer: fills every shape of a vector document onto a transparent canvas
use super::{downsample, new_pixmap, pixmap_to_image};
use crate::error::Result;
use crate::vector::{Point, Segment, Shape, VectorDocument};
use image::RgbaImage;
use tiny_skia::{Paint, Path, PathBuilder, Transform};
use tracing::debug;

/// Control points of the cubic equivalent to the quadratic `start, control, end`
pub fn promote_quadratic(start: Point, control: Point, end: Point) -> (Point, Point) {
    let c1 = Point::new(
        start.x + 2.0 / 3.0 * (control.x - start.x),
        start.y + 2.0 / 3.0 * (control.y - start.y),
    );
    let c2 = Point::new(
        end.x + 2.0 / 3.0 * (control.x - end.x),
        end.y + 2.0 / 3.0 * (control.y - end.y),
    );
    (c1, c2)
}

/// Builds the outline of `shape` scaled uniformly by `scale`.
/// Returns `None` when the outline draws nothing.
pub fn shape_path(shape: &Shape, scale: f32) -> Option<Path> {
    let mut pb = PathBuilder::new();
    let mut current = Point::new(0.0, 0.0);
    let mut subpath_start = current;

    for segment in &shape.segments {
        match *segment {
            Segment::MoveTo(p) => {
                let p = p.scale(scale);
                pb.move_to(p.x, p.y);
                current = p;
                subpath_start = p;
            }
            // Arcs are approximated by their chord
            Segment::LineTo(p) | Segment::ArcTo(p) => {
                let p = p.scale(scale);
                pb.line_to(p.x, p.y);
                current = p;
            }
            Segment::CubicTo(c1, c2, p) => {
                let (c1, c2, p) = (c1.scale(scale), c2.scale(scale), p.scale(scale));
                pb.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y);
                current = p;
            }
            Segment::QuadTo(c, p) => {
                let p = p.scale(scale);
                let (c1, c2) = promote_quadratic(current, c.scale(scale), p);
                pb.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y);
                current = p;
            }
            Segment::Close => {
                pb.close();
                current = subpath_start;
            }
        }
    }

    pb.finish()
}

/// Renders the document onto a transparent `size`×`size` canvas, scaled so the
/// document width spans the canvas. Shapes without a fill are skipped.
pub fn render_glyph(doc: &VectorDocument, size: u32) -> Result<RgbaImage> {
    let mut pixmap = new_pixmap(size, size)?;
    let scale = size as f32 / doc.width;

    for shape in &doc.shapes {
        let Some(color) = shape.fill else {
            continue;
        };
        let Some(path) = shape_path(shape, scale) else {
            continue;
        };

        let mut paint = Paint::default();
        paint.set_color(color.to_skia());
        paint.anti_alias = true;
        pixmap.fill_path(
            &path,
            &paint,
            shape.fill_rule.into(),
            Transform::identity(),
            None,
        );
    }

    Ok(pixmap_to_image(&pixmap))
}

/// Renders at `size * factor` and downsamples to `size`
pub fn render_glyph_supersampled(doc: &VectorDocument, size: u32, factor: u32) -> Result<RgbaImage> {
    debug!("rendering glyph at {}px ({}x)", size, factor);
    let large = render_glyph(doc, size * factor)?;
    Ok(downsample(&large, size, size))
}
