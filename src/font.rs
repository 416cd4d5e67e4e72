// Font lookup, text measurement and text drawing for the banner
use crate::error::{Error, Result};
use crate::vector::Color;
use std::fs;
use std::path::{Path, PathBuf};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};
use ttf_parser::{Face, GlyphId, OutlineBuilder};

/// Returns the first candidate that exists on this machine
pub fn resolve_font<P: AsRef<Path>>(candidates: &[P]) -> Result<PathBuf> {
    candidates
        .iter()
        .map(AsRef::<Path>::as_ref)
        .find(|p| p.exists())
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::FontNotFound {
            tried: candidates
                .iter()
                .map(|p| AsRef::<Path>::as_ref(p).to_path_buf())
                .collect(),
        })
}

/// Ink bounds of a laid-out string, in pixels.
///
/// The origin is the left end of the ascender line; y grows downward, so a
/// glyph touching the ascender has `top == 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextBounds {
    pub fn width(&self) -> u32 {
        (self.right - self.left).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top).max(0) as u32
    }
}

/// Font file held in memory. Collections (`.ttc`) use their first face.
pub struct Font {
    path: PathBuf,
    data: Vec<u8>,
}

impl Font {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path).map_err(|e| Error::io(path, e))?;
        let font = Self {
            path: path.to_path_buf(),
            data,
        };
        font.face()?;
        Ok(font)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn face(&self) -> Result<Face<'_>> {
        Face::parse(&self.data, 0).map_err(|source| Error::Font {
            path: self.path.clone(),
            source,
        })
    }

    pub fn measure(&self, text: &str, px: f32) -> Result<TextBounds> {
        let face = self.face()?;
        let scale = px / face.units_per_em() as f32;
        let ascender = face.ascender() as f32;

        let mut ink: Option<(f32, f32, f32, f32)> = None;
        for glyph in layout(&face, text) {
            // Blank glyphs such as spaces have no box
            let Some(bb) = face.glyph_bounding_box(glyph.id) else {
                continue;
            };
            let left = (glyph.x + bb.x_min as f32) * scale;
            let right = (glyph.x + bb.x_max as f32) * scale;
            let top = (ascender - bb.y_max as f32) * scale;
            let bottom = (ascender - bb.y_min as f32) * scale;

            ink = Some(match ink {
                None => (left, top, right, bottom),
                Some((l, t, r, b)) => (l.min(left), t.min(top), r.max(right), b.max(bottom)),
            });
        }

        Ok(ink
            .map(|(l, t, r, b)| TextBounds {
                left: l.floor() as i32,
                top: t.floor() as i32,
                right: r.ceil() as i32,
                bottom: b.ceil() as i32,
            })
            .unwrap_or_default())
    }

    /// Fills `text` onto `canvas` with its ascender line's left end at `origin`
    pub fn draw(
        &self,
        canvas: &mut Pixmap,
        text: &str,
        px: f32,
        origin: (f32, f32),
        color: Color,
    ) -> Result<()> {
        let face = self.face()?;
        let scale = px / face.units_per_em() as f32;

        let mut sink = OutlineSink {
            builder: PathBuilder::new(),
            scale,
            origin_x: origin.0,
            baseline: origin.1 + face.ascender() as f32 * scale,
            pen: 0.0,
        };
        for glyph in layout(&face, text) {
            sink.pen = glyph.x;
            face.outline_glyph(glyph.id, &mut sink);
        }

        if let Some(path) = sink.builder.finish() {
            let mut paint = Paint::default();
            paint.set_color(color.to_skia());
            paint.anti_alias = true;
            canvas.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
        Ok(())
    }
}

struct PlacedGlyph {
    id: GlyphId,
    /// Pen position in font units
    x: f32,
}

/// Single-line layout: horizontal advances plus `kern` table pair adjustments.
/// Characters missing from the font fall back to glyph 0.
fn layout(face: &Face<'_>, text: &str) -> Vec<PlacedGlyph> {
    let mut glyphs = Vec::new();
    let mut pen = 0.0;
    let mut previous: Option<GlyphId> = None;

    for ch in text.chars() {
        let id = face.glyph_index(ch).unwrap_or(GlyphId(0));
        if let Some(prev) = previous {
            pen += kerning(face, prev, id) as f32;
        }
        glyphs.push(PlacedGlyph { id, x: pen });
        pen += face.glyph_hor_advance(id).unwrap_or(0) as f32;
        previous = Some(id);
    }

    glyphs
}

fn kerning(face: &Face<'_>, left: GlyphId, right: GlyphId) -> i16 {
    let Some(kern) = face.tables().kern else {
        return 0;
    };
    kern.subtables
        .into_iter()
        .filter(|st| st.horizontal && !st.variable)
        .find_map(|st| st.glyphs_kerning(left, right))
        .unwrap_or(0)
}

/// Maps font-unit outlines (y up) into canvas pixels (y down)
struct OutlineSink {
    builder: PathBuilder,
    scale: f32,
    origin_x: f32,
    baseline: f32,
    pen: f32,
}

impl OutlineSink {
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.origin_x + (self.pen + x) * self.scale,
            self.baseline - y * self.scale,
        )
    }
}

impl OutlineBuilder for OutlineSink {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
