//! Message types for a floorplan canvas session
//!
//! This module contains:
//! - CanvasMsg, everything the canvas reacts to
//! - CanvasEvent, what the canvas reports back to its caller

use crate::asset::AssetMsg;
use crate::config::RenderConfiguration;
use crate::domain::{DisplayRect, Point2D};

// ============================================================================
// Input
// ============================================================================

/// Pointer position in client coordinates, with the on-screen canvas area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub client_x: f32,
    pub client_y: f32,
    pub display: DisplayRect,
}

impl PointerInput {
    pub fn new(client_x: f32, client_y: f32, display: DisplayRect) -> Self {
        Self {
            client_x,
            client_y,
            display,
        }
    }
}

#[derive(Debug, Clone)]
pub enum CanvasMsg {
    /// Replace the render configuration
    Configure(RenderConfiguration),
    /// Pointer click, places a measurement point while measuring
    Click(PointerInput),
    /// Pointer move, relayed as a hover when views are synced
    PointerMove(PointerInput),
    /// Progress of an asset request
    Asset(AssetMsg),
}

// ============================================================================
// Output
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// A two-point measurement completed
    Measured {
        points: [Point2D; 2],
        /// Meters, rounded to one decimal
        distance_m: f32,
    },
    /// Measuring was switched off; any shown distance is gone
    MeasurementCleared,
    /// Pointer position in percent of the canvas (0-100 on both axes)
    Hover { x_percent: f32, y_percent: f32 },
}
