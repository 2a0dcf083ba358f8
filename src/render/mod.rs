//! Floorplan canvas rendering
//!
//! This module contains:
//! - Drawing constants (colors, sizes, dash patterns)
//! - Layer painting using tiny-skia
//! - Label text rasterization using ab_glyph

pub mod geometry;
pub mod image;
pub mod text;
