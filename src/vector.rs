// Vector glyph model and SVG loading
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use usvg::tiny_skia_path::PathSegment;

/// Flat RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 255)
    }

    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.red, self.green, self.blue, self.alpha)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl From<tiny_skia::Point> for Point {
    fn from(p: tiny_skia::Point) -> Self {
        Self::new(p.x, p.y)
    }
}

/// One drawing instruction of a shape outline, in document coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
    /// Control point, end point
    QuadTo(Point, Point),
    /// Elliptical arc, drawn as a straight chord to its end point.
    /// The SVG loader never emits it: arcs arrive already lowered to cubics.
    ArcTo(Point),
    Close,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl From<FillRule> for tiny_skia::FillRule {
    fn from(rule: FillRule) -> Self {
        match rule {
            FillRule::NonZero => tiny_skia::FillRule::Winding,
            FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
        }
    }
}

/// Outline with a single flat fill. `fill: None` means the shape is not painted.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub segments: Vec<Segment>,
    pub fill: Option<Color>,
    pub fill_rule: FillRule,
}

/// Ordered list of shapes, painted first to last
#[derive(Clone, Debug, PartialEq)]
pub struct VectorDocument {
    pub width: f32,
    pub height: f32,
    pub shapes: Vec<Shape>,
}

impl VectorDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let doc = Self::parse(&text)?;
        debug!(
            "loaded {} shape(s) from {}",
            doc.shapes.len(),
            path.display()
        );
        Ok(doc)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let opt = usvg::Options::default();
        let tree = usvg::Tree::from_str(text, &opt)?;

        let mut shapes = Vec::new();
        collect_shapes(tree.root(), &mut shapes);

        Ok(Self {
            width: tree.size().width(),
            height: tree.size().height(),
            shapes,
        })
    }
}

fn collect_shapes(group: &usvg::Group, shapes: &mut Vec<Shape>) {
    for node in group.children() {
        match node {
            usvg::Node::Group(child) => collect_shapes(child, shapes),
            usvg::Node::Path(path) => {
                if let Some(shape) = convert_path(path) {
                    shapes.push(shape);
                }
            }
            _ => debug!("skipping non-path node {}", node.id()),
        }
    }
}

fn convert_path(path: &usvg::Path) -> Option<Shape> {
    let data = path.data().clone().transform(path.abs_transform())?;

    let segments = data
        .segments()
        .map(|seg| match seg {
            PathSegment::MoveTo(p) => Segment::MoveTo(p.into()),
            PathSegment::LineTo(p) => Segment::LineTo(p.into()),
            PathSegment::QuadTo(c, p) => Segment::QuadTo(c.into(), p.into()),
            PathSegment::CubicTo(c1, c2, p) => Segment::CubicTo(c1.into(), c2.into(), p.into()),
            PathSegment::Close => Segment::Close,
        })
        .collect();

    let (fill, fill_rule) = match path.fill() {
        Some(fill) => (fill_color(path, fill), fill.rule().into()),
        None => (None, FillRule::default()),
    };

    Some(Shape {
        segments,
        fill,
        fill_rule,
    })
}

fn fill_color(path: &usvg::Path, fill: &usvg::Fill) -> Option<Color> {
    match fill.paint() {
        usvg::Paint::Color(c) => {
            let alpha = (fill.opacity().get() * 255.0) as u8;
            Some(Color::rgba(c.red, c.green, c.blue, alpha))
        }
        _ => {
            warn!("path {} uses a non-solid paint, leaving it unfilled", path.id());
            None
        }
    }
}

impl From<usvg::FillRule> for FillRule {
    fn from(rule: usvg::FillRule) -> Self {
        match rule {
            usvg::FillRule::NonZero => FillRule::NonZero,
            usvg::FillRule::EvenOdd => FillRule::EvenOdd,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
        <path d="M 10 10 L 90 10 L 90 90 L 10 90 Z" fill="#ff0000" fill-opacity="0.5"/>
        <path d="M 0 0 L 5 0 L 5 5 Z" fill="none"/>
    </svg>"##;

    #[test]
    fn test_parse_fills_and_size() {
        let doc = VectorDocument::parse(SQUARE).unwrap();
        assert_eq!(doc.width, 100.0);
        assert_eq!(doc.height, 100.0);
        assert_eq!(doc.shapes[0].fill, Some(Color::rgba(255, 0, 0, 127)));
        assert!(doc.shapes[1..].iter().all(|s| s.fill.is_none()));
    }

    #[test]
    fn test_parse_segments_in_order() {
        let doc = VectorDocument::parse(SQUARE).unwrap();
        let segs = &doc.shapes[0].segments;
        assert_eq!(segs.first(), Some(&Segment::MoveTo(Point::new(10.0, 10.0))));
        assert_eq!(segs[1], Segment::LineTo(Point::new(90.0, 10.0)));
        assert_eq!(segs.last(), Some(&Segment::Close));
    }

    #[test]
    fn test_parse_applies_group_transform() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
            <g transform="translate(2 3)">
                <path d="M 0 0 L 4 0 L 4 4 Z" fill="white"/>
            </g>
        </svg>"##;
        let doc = VectorDocument::parse(svg).unwrap();
        assert_eq!(
            doc.shapes[0].segments[0],
            Segment::MoveTo(Point::new(2.0, 3.0))
        );
        assert_eq!(doc.shapes[0].fill, Some(Color::rgb(255, 255, 255)));
    }

    #[test]
    fn test_parse_keeps_quadratics() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
            <path d="M 0 0 Q 5 10 10 0 Z" fill="black" fill-rule="evenodd"/>
        </svg>"##;
        let doc = VectorDocument::parse(svg).unwrap();
        let shape = &doc.shapes[0];
        assert_eq!(shape.fill_rule, FillRule::EvenOdd);
        assert!(matches!(shape.segments[1], Segment::QuadTo(_, _)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            VectorDocument::parse("not an svg"),
            Err(Error::Svg(_))
        ));
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = VectorDocument::load(Path::new("/nonexistent/bloom.svg")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bloom.svg"));
    }
}
