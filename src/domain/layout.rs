//! Fixed demo geometry: coverage regions and the fallback schematic
//!
//! Everything here is a constant table. Coverage shapes are fractions of the
//! drawable area; schematic features are fractions of the room size measured
//! from the room center, plus fixed pixel sizes for furniture.

use super::geometry::{DrawRect, Point2D};

/// What a coverage region represents
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoverageKind {
    /// Area seen by a camera
    Covered,
    /// Area no camera sees
    Blindspot,
}

/// Shape in fractions of a drawable area
///
/// Circle radii are fractions of the drawable width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RegionShape {
    Circle { cx: f32, cy: f32, radius: f32 },
    Rect { x: f32, y: f32, width: f32, height: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverageRegion {
    pub kind: CoverageKind,
    pub shape: RegionShape,
}

const fn covered(cx: f32, cy: f32, radius: f32) -> CoverageRegion {
    CoverageRegion {
        kind: CoverageKind::Covered,
        shape: RegionShape::Circle { cx, cy, radius },
    }
}

const fn blind_circle(cx: f32, cy: f32, radius: f32) -> CoverageRegion {
    CoverageRegion {
        kind: CoverageKind::Blindspot,
        shape: RegionShape::Circle { cx, cy, radius },
    }
}

const fn blind_rect(x: f32, y: f32, width: f32, height: f32) -> CoverageRegion {
    CoverageRegion {
        kind: CoverageKind::Blindspot,
        shape: RegionShape::Rect {
            x,
            y,
            width,
            height,
        },
    }
}

/// Coverage drawn over a loaded floorplan image, relative to the image rect
pub const IMAGE_COVERAGE: &[CoverageRegion] = &[
    covered(0.25, 0.25, 0.15),
    covered(0.75, 0.25, 0.15),
    covered(0.25, 0.75, 0.15),
    covered(0.75, 0.75, 0.15),
    blind_circle(0.5, 0.5, 0.05),
    blind_rect(0.05, 0.05, 0.1, 0.1),
    blind_rect(0.85, 0.85, 0.1, 0.1),
];

const NEAR: f32 = 0.5 - 1.0 / 3.0;
const FAR: f32 = 0.5 + 1.0 / 3.0;

/// Coverage drawn over the fallback schematic, relative to the outer walls.
/// The covered circles sit on the camera markers.
pub const FALLBACK_COVERAGE: &[CoverageRegion] = &[
    covered(NEAR, NEAR, 0.15),
    covered(FAR, NEAR, 0.15),
    covered(NEAR, FAR, 0.15),
    covered(FAR, FAR, 0.15),
    blind_circle(0.5, 0.5, 0.05),
];

/// Outer walls span this fraction of the canvas on both axes
pub const ROOM_FRACTION: f32 = 0.8;

/// Wall segments inside the room: ((x1, y1), (x2, y2)) from the room center
pub const ROOM_DIVIDERS: [((f32, f32), (f32, f32)); 3] = [
    ((-0.5, 0.0), (0.5, 0.0)),
    ((0.0, -0.5), (0.0, 0.0)),
    ((-0.25, 0.0), (-0.25, 0.5)),
];

/// Zone names and their label anchors from the room center
pub const ROOM_LABELS: [(&str, (f32, f32)); 4] = [
    ("Office A", (-0.25, -0.25)),
    ("Office B", (0.25, -0.25)),
    ("Conference Room", (-0.375, 0.25)),
    ("Reception", (0.25, 0.25)),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FurnitureShape {
    /// Rectangle whose top-left corner is the anchor plus offset
    Rect,
    /// Ellipse centered on the anchor plus offset, size holds the radii
    Ellipse,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FurnitureSpec {
    pub shape: FurnitureShape,
    /// Anchor from the room center, in fractions of the room size
    pub anchor: (f32, f32),
    /// Pixel offset from the anchor
    pub offset: (f32, f32),
    /// Pixel size (or radii for ellipses)
    pub size: (f32, f32),
}

pub const FURNITURE: [FurnitureSpec; 4] = [
    // Office A desk
    FurnitureSpec {
        shape: FurnitureShape::Rect,
        anchor: (-1.0 / 3.0, -0.25),
        offset: (0.0, -30.0),
        size: (80.0, 40.0),
    },
    // Office B desk
    FurnitureSpec {
        shape: FurnitureShape::Rect,
        anchor: (0.25, -0.25),
        offset: (-40.0, -30.0),
        size: (80.0, 40.0),
    },
    // Conference table
    FurnitureSpec {
        shape: FurnitureShape::Ellipse,
        anchor: (-0.375, 0.25),
        offset: (0.0, 0.0),
        size: (60.0, 30.0),
    },
    // Reception desk
    FurnitureSpec {
        shape: FurnitureShape::Rect,
        anchor: (0.25, 0.25),
        offset: (-30.0, -20.0),
        size: (60.0, 30.0),
    },
];

/// Camera marker anchors from the room center
pub const CAMERA_MARKERS: [(f32, f32); 4] = [
    (-1.0 / 3.0, -1.0 / 3.0),
    (1.0 / 3.0, -1.0 / 3.0),
    (-1.0 / 3.0, 1.0 / 3.0),
    (1.0 / 3.0, 1.0 / 3.0),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Furniture {
    pub shape: FurnitureShape,
    pub origin: Point2D,
    pub size: (f32, f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoomLabel {
    pub text: &'static str,
    pub center: Point2D,
}

/// Fallback schematic resolved to pixel coordinates for one canvas size
#[derive(Clone, Debug, PartialEq)]
pub struct FallbackLayout {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Outer walls
    pub room: DrawRect,
    pub dividers: Vec<(Point2D, Point2D)>,
    pub labels: Vec<RoomLabel>,
    pub furniture: Vec<Furniture>,
    pub cameras: Vec<Point2D>,
}

impl FallbackLayout {
    /// Resolve the schematic for a canvas; depends on nothing but the size
    pub fn for_canvas(width: u32, height: u32) -> Self {
        let (w, h) = (width as f32, height as f32);
        let room_width = w * ROOM_FRACTION;
        let room_height = h * ROOM_FRACTION;
        let center = Point2D::new(w / 2.0, h / 2.0);
        let room = DrawRect::new(
            center.x - room_width / 2.0,
            center.y - room_height / 2.0,
            room_width,
            room_height,
        );

        let anchor = |(fx, fy): (f32, f32)| center.offset(room_width * fx, room_height * fy);

        Self {
            canvas_width: w,
            canvas_height: h,
            room,
            dividers: ROOM_DIVIDERS
                .iter()
                .map(|&(a, b)| (anchor(a), anchor(b)))
                .collect(),
            labels: ROOM_LABELS
                .iter()
                .map(|&(text, at)| RoomLabel {
                    text,
                    center: anchor(at),
                })
                .collect(),
            furniture: FURNITURE
                .iter()
                .map(|spec| Furniture {
                    shape: spec.shape,
                    origin: anchor(spec.anchor).offset(spec.offset.0, spec.offset.1),
                    size: spec.size,
                })
                .collect(),
            cameras: CAMERA_MARKERS.iter().map(|&at| anchor(at)).collect(),
        }
    }
}
