//! Floorplan to 3D view handoff
//!
//! The 3D viewer gets plain data only: a camera pose derived from the hover
//! position, and the last completed measurement.

use crate::domain::Point2D;
use crate::session::CanvasEvent;

/// Side length of the square floor area the 3D scene spans, centered on the origin
pub const FLOOR_EXTENT: f32 = 10.0;

/// Camera position relative to its target when following the pointer
pub const CAMERA_OFFSET: [f32; 3] = [3.0, 3.0, 3.0];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: [5.0, 5.0, 5.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

impl CameraPose {
    /// Pose looking at the floor point under a hover position (percent)
    pub fn from_hover(x_percent: f32, y_percent: f32) -> Self {
        let x = x_percent / 100.0 * FLOOR_EXTENT - FLOOR_EXTENT / 2.0;
        let z = y_percent / 100.0 * FLOOR_EXTENT - FLOOR_EXTENT / 2.0;
        Self {
            position: [x + CAMERA_OFFSET[0], CAMERA_OFFSET[1], z + CAMERA_OFFSET[2]],
            target: [x, 0.0, z],
        }
    }
}

/// A completed measurement as handed to the 3D view
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeasurementHandoff {
    pub points: [Point2D; 2],
    pub distance_m: f32,
}

#[derive(Clone, Debug, Default)]
pub struct ViewSync {
    enabled: bool,
    pose: CameraPose,
    measurement: Option<MeasurementHandoff>,
}

impl ViewSync {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Fold a canvas event into the handoff state
    pub fn apply(&mut self, event: &CanvasEvent) {
        match *event {
            CanvasEvent::Hover {
                x_percent,
                y_percent,
            } => {
                self.hover(x_percent, y_percent);
            }
            CanvasEvent::Measured { points, distance_m } => {
                self.measurement = Some(MeasurementHandoff { points, distance_m });
            }
            CanvasEvent::MeasurementCleared => self.measurement = None,
        }
    }

    /// Move the camera to follow a hover position; no-op when disabled
    pub fn hover(&mut self, x_percent: f32, y_percent: f32) -> Option<CameraPose> {
        if !self.enabled {
            return None;
        }
        self.pose = CameraPose::from_hover(x_percent, y_percent);
        Some(self.pose)
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn measurement(&self) -> Option<&MeasurementHandoff> {
        self.measurement.as_ref()
    }
}
