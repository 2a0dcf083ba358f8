//! Label rendering with ab_glyph
//!
//! Text is rasterized into a coverage [`Mask`] covering just the label, then
//! painted into a tile pixmap and blended onto the canvas, so labels blend
//! like every other canvas primitive. Outlined labels fill a dilated copy of
//! the mask first.

use std::path::Path;

use ab_glyph::{Font, FontArc, Glyph, OutlinedGlyph, PxScale, ScaleFont, point};
use anyhow::Context;
use tiny_skia::{Mask, Paint, Pixmap, PixmapPaint, Rect, Transform};

use crate::domain::Point2D;

/// DejaVu Sans, bundled so labels render without a system font
const DEFAULT_FONT_BYTES: &[u8] = include_bytes!("fonts/DejaVuSans.ttf");

/// A font used for room names and distance labels
#[derive(Clone)]
pub struct LabelFont {
    font: FontArc,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont").finish_non_exhaustive()
    }
}

impl LabelFont {
    /// The bundled font
    pub fn default_font() -> anyhow::Result<Self> {
        let font = FontArc::try_from_slice(DEFAULT_FONT_BYTES).context("Invalid bundled font")?;
        Ok(Self { font })
    }

    /// Load a TTF/OTF font from disk
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read font {}", path.display()))?;
        Self::from_bytes(data)
    }

    pub fn from_bytes(data: Vec<u8>) -> anyhow::Result<Self> {
        let font = FontArc::try_from_vec(data).context("Invalid font data")?;
        Ok(Self { font })
    }
}

/// How a label is painted
#[derive(Clone, Copy, Debug)]
pub struct LabelStyle {
    pub size: f32,
    pub fill: [u8; 3],
    /// Outline color and stroke width
    pub outline: Option<([u8; 3], f32)>,
}

/// Lay glyphs out on one line so the text is centered on `center`
fn layout_centered<SF: ScaleFont<F>, F: Font>(scaled: &SF, text: &str, center: Point2D) -> Vec<Glyph> {
    let mut glyphs = Vec::new();
    let mut cursor_x = 0.0f32;
    let mut previous = None;

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            cursor_x += scaled.kern(prev, id);
        }
        glyphs.push(id.with_scale_and_position(scaled.scale(), point(cursor_x, 0.0)));
        cursor_x += scaled.h_advance(id);
        previous = Some(id);
    }

    // middle baseline: ascent is positive, descent negative
    let baseline = center.y + (scaled.ascent() + scaled.descent()) / 2.0;
    let start_x = center.x - cursor_x / 2.0;
    for glyph in &mut glyphs {
        glyph.position = point(glyph.position.x + start_x, baseline);
    }
    glyphs
}

/// Coverage of a rasterized label; `left`/`top` place it on the canvas
struct LabelMask {
    mask: Mask,
    left: i32,
    top: i32,
}

/// Rasterize `text` into a mask spanning the glyph bounds plus `pad` pixels
fn text_mask(font: &LabelFont, text: &str, size: f32, center: Point2D, pad: i32) -> Option<LabelMask> {
    let scaled = font.font.as_scaled(PxScale::from(size));
    let outlined: Vec<OutlinedGlyph> = layout_centered(&scaled, text, center)
        .into_iter()
        .filter_map(|glyph| scaled.outline_glyph(glyph))
        .collect();

    if outlined.is_empty() {
        return None;
    }
    let (min_x, min_y, max_x, max_y) = outlined.iter().map(OutlinedGlyph::px_bounds).fold(
        (f32::MAX, f32::MAX, f32::MIN, f32::MIN),
        |(x0, y0, x1, y1), b| (x0.min(b.min.x), y0.min(b.min.y), x1.max(b.max.x), y1.max(b.max.y)),
    );

    let left = min_x.floor() as i32 - pad;
    let top = min_y.floor() as i32 - pad;
    let width = (max_x.ceil() as i32 + pad - left).max(1);
    let height = (max_y.ceil() as i32 + pad - top).max(1);

    let mut mask = Mask::new(width as u32, height as u32)?;
    let data = mask.data_mut();
    for glyph in &outlined {
        let bounds = glyph.px_bounds();
        glyph.draw(|gx, gy, coverage| {
            let x = bounds.min.x as i32 + gx as i32 - left;
            let y = bounds.min.y as i32 + gy as i32 - top;
            if x < 0 || y < 0 || x >= width || y >= height {
                return;
            }
            let idx = (y * width + x) as usize;
            let value = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
            data[idx] = data[idx].max(value);
        });
    }

    Some(LabelMask { mask, left, top })
}

/// Grow a coverage mask by `radius` pixels (disc structuring element)
fn dilate(mask: &Mask, radius: i32) -> Option<Mask> {
    let (width, height) = (mask.width() as i32, mask.height() as i32);
    let mut out = Mask::new(mask.width(), mask.height())?;
    let src = mask.data();
    let dst = out.data_mut();

    for y in 0..height {
        for x in 0..width {
            let mut best = 0u8;
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if dx * dx + dy * dy > radius * radius {
                        continue;
                    }
                    let (sx, sy) = (x + dx, y + dy);
                    if sx < 0 || sy < 0 || sx >= width || sy >= height {
                        continue;
                    }
                    best = best.max(src[(sy * width + sx) as usize]);
                }
            }
            dst[(y * width + x) as usize] = best;
        }
    }
    Some(out)
}

fn fill_mask(pixmap: &mut Pixmap, mask: &Mask, color: [u8; 3]) {
    let Some(rect) = Rect::from_xywh(0.0, 0.0, pixmap.width() as f32, pixmap.height() as f32) else {
        return;
    };
    let mut paint = Paint::default();
    paint.set_color_rgba8(color[0], color[1], color[2], 255);
    paint.anti_alias = true;
    pixmap.fill_rect(rect, &paint, Transform::identity(), Some(mask));
}

fn outline_radius(width: f32) -> i32 {
    (width / 2.0).round().max(1.0) as i32
}

/// Draw a single-line label centered on `center`
pub fn draw_label(pixmap: &mut Pixmap, font: &LabelFont, text: &str, center: Point2D, style: &LabelStyle) {
    let pad = style.outline.map_or(0, |(_, width)| outline_radius(width));
    let Some(label) = text_mask(font, text, style.size, center, pad) else {
        return;
    };
    let Some(mut tile) = Pixmap::new(label.mask.width(), label.mask.height()) else {
        return;
    };

    if let Some((outline_color, _)) = style.outline {
        if let Some(outline) = dilate(&label.mask, pad) {
            fill_mask(&mut tile, &outline, outline_color);
        }
    }
    fill_mask(&mut tile, &label.mask, style.fill);

    pixmap.draw_pixmap(
        label.left,
        label.top,
        tile.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
}
