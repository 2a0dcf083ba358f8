//! Floorplan canvas with camera coverage overlays and click-to-measure
//!
//! [`canvas::FloorplanCanvas`] is the core: it paints a floorplan image (or a
//! demo schematic when none is available) into a tiny-skia pixmap, overlays
//! camera coverage, and turns pointer input into measurement and hover
//! events. Floorplan assets are resolved off the canvas by
//! [`asset::AssetTask`].

pub mod asset;
pub mod canvas;
pub mod config;
pub mod domain;
pub mod render;
pub mod session;
pub mod sync;
