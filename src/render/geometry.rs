//! Drawing constants for the floorplan canvas
//!
//! Colors are RGB triples; alpha is applied by the caller.

/// Fallback schematic style
pub mod fallback {
    pub const BACKGROUND: [u8; 3] = [0xf8, 0xf9, 0xfa];
    pub const GRID: [u8; 3] = [0xe9, 0xec, 0xef];
    /// Grid spacing in canvas pixels
    pub const GRID_SIZE: u32 = 50;
    pub const GRID_WIDTH: f32 = 1.0;
    pub const WALL: [u8; 3] = [0x6c, 0x75, 0x7d];
    pub const WALL_WIDTH: f32 = 2.0;
    pub const LABEL: [u8; 3] = [0x49, 0x50, 0x57];
    pub const LABEL_SIZE: f32 = 16.0;
    pub const FURNITURE: [u8; 3] = [0xce, 0xd4, 0xda];
    pub const CAMERA: [u8; 3] = [0x00, 0x7b, 0xff];
    pub const CAMERA_RADIUS: f32 = 8.0;
}

/// Coverage overlay style
pub mod coverage {
    pub const COVERED: [u8; 3] = [0, 255, 0];
    pub const BLINDSPOT: [u8; 3] = [255, 0, 0];
    /// Region alpha at full overlay opacity
    pub const BASE_ALPHA: f32 = 0.5;
}

/// Measurement annotation style
pub mod measure {
    pub const COLOR: [u8; 3] = [0x63, 0x66, 0xf1];
    pub const POINT_RADIUS: f32 = 5.0;
    pub const LINE_WIDTH: f32 = 2.0;
    /// Dash on/off lengths for the measurement line
    pub const DASH: [f32; 2] = [5.0, 5.0];
    pub const LABEL_SIZE: f32 = 14.0;
    pub const LABEL_FILL: [u8; 3] = [255, 255, 255];
    pub const LABEL_OUTLINE: [u8; 3] = [0, 0, 0];
    /// Outline stroke width; half of it extends past the glyph edge
    pub const LABEL_OUTLINE_WIDTH: f32 = 4.0;
    /// Label sits this far above the segment midpoint
    pub const LABEL_LIFT: f32 = 15.0;
}

/// Shape helpers
pub mod shape {
    /// Ellipse bezier approximation constant: 4/3 * (sqrt(2) - 1)
    pub const BEZIER_K: f32 = 0.552_284_8;
}

/// Convert an opacity in [0, 1] to an 8-bit alpha
#[inline]
pub fn alpha_u8(opacity: f32) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}
