//! Floorplan asset resolution
//!
//! An asset request is resolved in two awaited steps: an existence probe,
//! then a fetch and decode. Every failure is reported as an [`AssetFailure`]
//! and the canvas degrades to its fallback schematic.

pub mod loader;
pub mod probe;
pub mod task;

pub use loader::{AssetLoader, ImageLoader};
pub use probe::{AnyProbe, AssetProbe, FileProbe, HttpProbe};
pub use task::AssetTask;

use image::RgbaImage;

/// A request for the floorplan at `path`, tagged with the canvas generation
/// that issued it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetRequest {
    pub generation: u64,
    pub path: String,
}

/// Why a floorplan asset could not be shown
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AssetFailure {
    #[error("floorplan image not found: {0}")]
    NotFound(String),
    #[error("failed to load floorplan image {path}: {reason}")]
    LoadFailed { path: String, reason: String },
    #[error("could not check floorplan image {path}: {reason}")]
    Probe { path: String, reason: String },
}

/// Progress of an asset request, delivered back to the canvas
#[derive(Clone, Debug)]
pub enum AssetMsg {
    Probed {
        generation: u64,
        outcome: Result<(), AssetFailure>,
    },
    Loaded {
        generation: u64,
        outcome: Result<RgbaImage, AssetFailure>,
    },
}

impl AssetMsg {
    pub fn generation(&self) -> u64 {
        match self {
            AssetMsg::Probed { generation, .. } | AssetMsg::Loaded { generation, .. } => *generation,
        }
    }
}

/// Whether a path should be fetched over HTTP rather than read from disk
pub fn is_remote(path: &str) -> bool {
    let lower = path.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.com/plan.png"));
        assert!(is_remote("HTTP://example.com/plan.png"));
        assert!(!is_remote("/models/plan.png"));
        assert!(!is_remote("plan.png"));
    }
}
