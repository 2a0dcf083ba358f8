//! Canvas session messages
//!
//! Input messages and output events exchanged between a
//! [`crate::canvas::FloorplanCanvas`] and whoever drives it.

pub mod messages;

pub use messages::{CanvasEvent, CanvasMsg, PointerInput};
