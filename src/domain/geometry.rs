//! Geometric types for canvas coordinates and image placement

/// A point in canvas pixel coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in pixels
    pub fn distance_to(self, other: Point2D) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(self, other: Point2D) -> Point2D {
        Point2D {
            x: (self.x + other.x) * 0.5,
            y: (self.y + other.y) * 0.5,
        }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Point2D {
        Point2D {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Area of the canvas a floorplan (image or schematic) is drawn into
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DrawRect {
    pub offset_x: f32,
    pub offset_y: f32,
    pub width: f32,
    pub height: f32,
}

impl DrawRect {
    pub fn new(offset_x: f32, offset_y: f32, width: f32, height: f32) -> Self {
        Self {
            offset_x,
            offset_y,
            width,
            height,
        }
    }

    /// Fit an image into the canvas preserving its aspect ratio, centered
    ///
    /// When the canvas is wider than the image the height is filled and the
    /// image is centered horizontally, otherwise the width is filled and the
    /// image is centered vertically. Returns `None` for empty dimensions.
    pub fn letterbox(canvas_width: u32, canvas_height: u32, image_width: u32, image_height: u32) -> Option<Self> {
        if canvas_width == 0 || canvas_height == 0 || image_width == 0 || image_height == 0 {
            return None;
        }

        let (cw, ch) = (canvas_width as f32, canvas_height as f32);
        let (iw, ih) = (image_width as f32, image_height as f32);

        let canvas_ratio = cw / ch;
        let image_ratio = iw / ih;

        if canvas_ratio > image_ratio {
            let draw_width = iw * (ch / ih);
            Some(Self::new(((cw - draw_width) / 2.0).max(0.0), 0.0, draw_width, ch))
        } else {
            let draw_height = ih * (cw / iw);
            Some(Self::new(0.0, ((ch - draw_height) / 2.0).max(0.0), cw, draw_height))
        }
    }

    /// Point at fractional coordinates inside the rectangle
    pub fn at(&self, fx: f32, fy: f32) -> Point2D {
        Point2D {
            x: self.offset_x + self.width * fx,
            y: self.offset_y + self.height * fy,
        }
    }
}

/// Where the canvas is shown on screen, in client coordinates
///
/// The display size may differ from the canvas pixel size (CSS scaling), so
/// pointer positions go through [`DisplayRect::to_canvas`] before use.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DisplayRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl DisplayRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, client_x: f32, client_y: f32) -> bool {
        client_x >= self.left
            && client_x <= self.left + self.width
            && client_y >= self.top
            && client_y <= self.top + self.height
    }

    /// Map a client position to canvas pixels, `None` outside the display area
    pub fn to_canvas(&self, client_x: f32, client_y: f32, canvas_width: u32, canvas_height: u32) -> Option<Point2D> {
        if self.width <= 0.0 || self.height <= 0.0 || !self.contains(client_x, client_y) {
            return None;
        }
        let scale_x = canvas_width as f32 / self.width;
        let scale_y = canvas_height as f32 / self.height;
        Some(Point2D {
            x: (client_x - self.left) * scale_x,
            y: (client_y - self.top) * scale_y,
        })
    }

    /// Fractional position in percent (0-100 on both axes, clamped)
    pub fn to_percent(&self, client_x: f32, client_y: f32) -> Option<(f32, f32)> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let x = ((client_x - self.left) / self.width * 100.0).clamp(0.0, 100.0);
        let y = ((client_y - self.top) / self.height * 100.0).clamp(0.0, 100.0);
        Some((x, y))
    }
}
