//! The floorplan canvas
//!
//! A [`FloorplanCanvas`] owns its pixmap, its render configuration, the state
//! of the current floorplan asset and the measurement session. It reacts to
//! [`CanvasMsg`]s (see [`handlers`]) and repaints the whole pixmap after every
//! change that affects the picture.

pub mod handlers;

use std::path::Path;

use anyhow::Context;
use tiny_skia::{Color, Pixmap};

use crate::asset::AssetRequest;
use crate::config::RenderConfiguration;
use crate::domain::{
    DEFAULT_METERS_PER_PIXEL, DrawRect, FALLBACK_COVERAGE, FallbackLayout, IMAGE_COVERAGE,
    MeasurementSession,
};
use crate::render::image as paint;
use crate::render::text::LabelFont;
use crate::session::{CanvasEvent, CanvasMsg};

pub const LOADING_TEXT: &str = "Loading floorplan...";
pub const FALLBACK_BADGE: &str = "Using demo floorplan (image file not found)";

/// Where the current floorplan asset is in its lifecycle
#[derive(Debug)]
pub enum AssetState {
    /// Existence check in flight; the canvas shows only the loading indicator
    Probing,
    /// Asset exists, fetch and decode in flight
    Decoding,
    /// Image loaded
    Ready(Pixmap),
    /// No usable image; the demo schematic is shown
    Fallback,
}

pub struct FloorplanCanvas {
    pixmap: Pixmap,
    config: RenderConfiguration,
    asset: AssetState,
    generation: u64,
    pending: Option<AssetRequest>,
    session: MeasurementSession,
    meters_per_pixel: f32,
    font: LabelFont,
}

impl FloorplanCanvas {
    /// Create a canvas and queue the first asset request
    pub fn new(width: u32, height: u32, config: RenderConfiguration) -> anyhow::Result<Self> {
        let pixmap = Pixmap::new(width, height)
            .with_context(|| format!("Invalid canvas size {width}x{height}"))?;
        let font = LabelFont::default_font()?;
        let mut canvas = Self {
            pixmap,
            config,
            asset: AssetState::Probing,
            generation: 0,
            pending: None,
            session: MeasurementSession::default(),
            meters_per_pixel: DEFAULT_METERS_PER_PIXEL,
            font,
        };
        canvas.request_asset();
        canvas.redraw();
        Ok(canvas)
    }

    /// Use `font` instead of the bundled one for room names and distance labels
    pub fn with_font(mut self, font: LabelFont) -> Self {
        self.font = font;
        self.redraw();
        self
    }

    /// Apply a message, returning the event it produced, if any
    pub fn handle(&mut self, msg: CanvasMsg) -> Option<CanvasEvent> {
        handlers::handle_canvas_msg(self, msg)
    }

    /// Take the asset request queued by construction or a path change
    pub fn take_request(&mut self) -> Option<AssetRequest> {
        self.pending.take()
    }

    fn request_asset(&mut self) {
        self.generation += 1;
        self.asset = AssetState::Probing;
        self.pending = Some(AssetRequest {
            generation: self.generation,
            path: self.config.image_path.clone(),
        });
        log::debug!(
            "Floorplan request {} for {}",
            self.generation,
            self.config.image_path
        );
    }

    /// Full repaint from the current state
    pub fn redraw(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let opacity = if self.config.show_coverage {
            self.config.opacity()
        } else {
            0.0
        };

        match &self.asset {
            AssetState::Probing | AssetState::Decoding => return,
            AssetState::Ready(image) => {
                let Some(rect) = DrawRect::letterbox(width, height, image.width(), image.height()) else {
                    return;
                };
                paint::draw_letterboxed(&mut self.pixmap, image, rect);
                paint::draw_coverage(&mut self.pixmap, IMAGE_COVERAGE, rect, opacity);
            }
            AssetState::Fallback => {
                let layout = FallbackLayout::for_canvas(width, height);
                paint::draw_fallback(&mut self.pixmap, &layout, &self.font);
                paint::draw_coverage(&mut self.pixmap, FALLBACK_COVERAGE, layout.room, opacity);
            }
        }

        let distance = self.session.distance(self.meters_per_pixel);
        paint::draw_measurement(&mut self.pixmap, &self.session, distance, &self.font);
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn config(&self) -> &RenderConfiguration {
        &self.config
    }

    pub fn asset_state(&self) -> &AssetState {
        &self.asset
    }

    pub fn session(&self) -> &MeasurementSession {
        &self.session
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn meters_per_pixel(&self) -> f32 {
        self.meters_per_pixel
    }

    /// True while the existence check is outstanding
    pub fn is_loading(&self) -> bool {
        matches!(self.asset, AssetState::Probing)
    }

    /// True until the current request has settled on an image or the fallback
    pub fn is_pending(&self) -> bool {
        matches!(self.asset, AssetState::Probing | AssetState::Decoding)
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.asset, AssetState::Fallback)
    }

    /// Text shown over the canvas: the loading indicator or the demo badge
    pub fn status_text(&self) -> Option<&'static str> {
        match self.asset {
            AssetState::Probing => Some(LOADING_TEXT),
            AssetState::Fallback => Some(FALLBACK_BADGE),
            AssetState::Decoding | AssetState::Ready(_) => None,
        }
    }

    pub fn encode_png(&self) -> anyhow::Result<Vec<u8>> {
        self.pixmap.encode_png().context("Failed to encode canvas")
    }

    pub fn save_png(&self, path: &Path) -> anyhow::Result<()> {
        self.pixmap
            .save_png(path)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}
