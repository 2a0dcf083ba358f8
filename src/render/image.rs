//! Canvas drawing using tiny-skia
//!
//! Each function paints one layer. A full repaint is background (image or
//! schematic), then coverage, then measurement marks, so measurement marks
//! stay fully opaque on top of the overlay.

use image::RgbaImage;
use tiny_skia::{
    Color, ColorU8, FillRule, FilterQuality, Paint, Path, PathBuilder, Pixmap, PixmapPaint,
    Stroke, StrokeDash, Transform,
};

use super::geometry::{self, coverage, fallback, measure, shape};
use super::text::{self, LabelFont, LabelStyle};
use crate::domain::{
    CoverageKind, CoverageRegion, DrawRect, FallbackLayout, FurnitureShape, MeasurementSession,
    Point2D, RegionShape, format_distance,
};

/// Convert a decoded image into a premultiplied pixmap
pub fn pixmap_from_image(img: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(img.width(), img.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(img.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

fn solid_paint(color: [u8; 3], alpha: u8) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color[0], color[1], color[2], alpha);
    paint.anti_alias = true;
    paint
}

fn fill_circle(pixmap: &mut Pixmap, center: Point2D, radius: f32, paint: &Paint) {
    if let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) {
        pixmap.fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
    }
}

fn fill_rect(pixmap: &mut Pixmap, x: f32, y: f32, width: f32, height: f32, paint: &Paint) {
    if let Some(rect) = tiny_skia::Rect::from_xywh(x, y, width, height) {
        pixmap.fill_rect(rect, paint, Transform::identity(), None);
    }
}

fn stroke_path(pixmap: &mut Pixmap, path: &Path, paint: &Paint, width: f32, dash: Option<StrokeDash>) {
    let stroke = Stroke {
        width,
        dash,
        ..Default::default()
    };
    pixmap.stroke_path(path, paint, &stroke, Transform::identity(), None);
}

fn line_path(a: Point2D, b: Point2D) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(a.x, a.y);
    pb.line_to(b.x, b.y);
    pb.finish()
}

/// Build an ellipse path using cubic bezier curves
fn build_ellipse_path(cx: f32, cy: f32, rx: f32, ry: f32) -> Option<Path> {
    let kx = rx * shape::BEZIER_K;
    let ky = ry * shape::BEZIER_K;

    let mut pb = PathBuilder::new();
    pb.move_to(cx, cy - ry);
    pb.cubic_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy);
    pb.cubic_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry);
    pb.cubic_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy);
    pb.cubic_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry);
    pb.close();
    pb.finish()
}

/// Draw a floorplan image scaled into its letterboxed rectangle
pub fn draw_letterboxed(canvas: &mut Pixmap, image: &Pixmap, rect: DrawRect) {
    let sx = rect.width / image.width() as f32;
    let sy = rect.height / image.height() as f32;
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..Default::default()
    };
    canvas.draw_pixmap(
        0,
        0,
        image.as_ref(),
        &paint,
        Transform::from_row(sx, 0.0, 0.0, sy, rect.offset_x, rect.offset_y),
        None,
    );
}

/// Draw the demo schematic used when no floorplan image is available
pub fn draw_fallback(canvas: &mut Pixmap, layout: &FallbackLayout, font: &LabelFont) {
    let [r, g, b] = fallback::BACKGROUND;
    canvas.fill(Color::from_rgba8(r, g, b, 255));

    let grid = solid_paint(fallback::GRID, 255);
    let (width, height) = (canvas.width(), canvas.height());
    for x in (0..width).step_by(fallback::GRID_SIZE as usize) {
        let top = Point2D::new(x as f32, 0.0);
        if let Some(path) = line_path(top, Point2D::new(x as f32, height as f32)) {
            stroke_path(canvas, &path, &grid, fallback::GRID_WIDTH, None);
        }
    }
    for y in (0..height).step_by(fallback::GRID_SIZE as usize) {
        let left = Point2D::new(0.0, y as f32);
        if let Some(path) = line_path(left, Point2D::new(width as f32, y as f32)) {
            stroke_path(canvas, &path, &grid, fallback::GRID_WIDTH, None);
        }
    }

    let wall = solid_paint(fallback::WALL, 255);
    let room = layout.room;
    if let Some(rect) = tiny_skia::Rect::from_xywh(room.offset_x, room.offset_y, room.width, room.height) {
        let path = PathBuilder::from_rect(rect);
        stroke_path(canvas, &path, &wall, fallback::WALL_WIDTH, None);
    }
    for &(a, b) in &layout.dividers {
        if let Some(path) = line_path(a, b) {
            stroke_path(canvas, &path, &wall, fallback::WALL_WIDTH, None);
        }
    }

    let style = LabelStyle {
        size: fallback::LABEL_SIZE,
        fill: fallback::LABEL,
        outline: None,
    };
    for label in &layout.labels {
        text::draw_label(canvas, font, label.text, label.center, &style);
    }

    let furniture = solid_paint(fallback::FURNITURE, 255);
    for item in &layout.furniture {
        let (w, h) = item.size;
        match item.shape {
            FurnitureShape::Rect => fill_rect(canvas, item.origin.x, item.origin.y, w, h, &furniture),
            FurnitureShape::Ellipse => {
                if let Some(path) = build_ellipse_path(item.origin.x, item.origin.y, w, h) {
                    canvas.fill_path(&path, &furniture, FillRule::Winding, Transform::identity(), None);
                }
            }
        }
    }

    let camera = solid_paint(fallback::CAMERA, 255);
    for &marker in &layout.cameras {
        fill_circle(canvas, marker, fallback::CAMERA_RADIUS, &camera);
    }
}

/// Composite coverage regions over `area` at the given overlay opacity
///
/// An opacity of zero (or NaN) leaves the canvas untouched.
pub fn draw_coverage(canvas: &mut Pixmap, regions: &[CoverageRegion], area: DrawRect, opacity: f32) {
    if !(opacity > 0.0) {
        return;
    }
    let alpha = geometry::alpha_u8(coverage::BASE_ALPHA * opacity.min(1.0));

    for region in regions {
        let color = match region.kind {
            CoverageKind::Covered => coverage::COVERED,
            CoverageKind::Blindspot => coverage::BLINDSPOT,
        };
        let paint = solid_paint(color, alpha);

        match region.shape {
            RegionShape::Circle { cx, cy, radius } => {
                fill_circle(canvas, area.at(cx, cy), area.width * radius, &paint);
            }
            RegionShape::Rect {
                x,
                y,
                width,
                height,
            } => {
                let origin = area.at(x, y);
                fill_rect(canvas, origin.x, origin.y, area.width * width, area.height * height, &paint);
            }
        }
    }
}

/// Draw measurement points, and for a complete session the dashed line and
/// its distance label
pub fn draw_measurement(
    canvas: &mut Pixmap,
    session: &MeasurementSession,
    distance: Option<f32>,
    font: &LabelFont,
) {
    let paint = solid_paint(measure::COLOR, 255);
    for point in session.points() {
        fill_circle(canvas, point, measure::POINT_RADIUS, &paint);
    }

    let Some((a, b)) = session.pair() else {
        return;
    };
    if let Some(path) = line_path(a, b) {
        let dash = StrokeDash::new(measure::DASH.to_vec(), 0.0);
        stroke_path(canvas, &path, &paint, measure::LINE_WIDTH, dash);
    }

    if let Some(distance) = distance {
        let style = LabelStyle {
            size: measure::LABEL_SIZE,
            fill: measure::LABEL_FILL,
            outline: Some((measure::LABEL_OUTLINE, measure::LABEL_OUTLINE_WIDTH)),
        };
        let anchor = a.midpoint(b).offset(0.0, -measure::LABEL_LIFT);
        text::draw_label(canvas, font, &format_distance(distance), anchor, &style);
    }
}
