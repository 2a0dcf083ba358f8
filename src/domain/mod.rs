//! Pure domain types with minimal dependencies
//!
//! Geometry, the measurement session and the fixed demo layouts. Nothing here
//! touches the raster backend or the async runtime.

pub mod geometry;
pub mod layout;
pub mod measurement;

pub use geometry::*;
pub use layout::*;
pub use measurement::*;
