//! Render configuration and persisted application settings

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Per-render inputs supplied by the caller
///
/// The canvas never changes these itself; a new configuration is applied
/// with [`crate::session::CanvasMsg::Configure`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfiguration {
    /// Floorplan image to probe and load (file path or HTTP(S) URL)
    pub image_path: String,
    /// Whether clicks place measurement points
    pub is_measuring: bool,
    /// Whether the coverage overlay is drawn
    pub show_coverage: bool,
    /// Overlay opacity (0.0-1.0)
    pub coverage_opacity: f32,
    /// Whether pointer moves are relayed as hover events
    pub sync_views: bool,
}

impl RenderConfiguration {
    pub fn new(image_path: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            ..Self::default()
        }
    }

    /// Overlay opacity clamped to [0, 1]; NaN counts as transparent
    pub fn opacity(&self) -> f32 {
        if self.coverage_opacity.is_nan() {
            0.0
        } else {
            self.coverage_opacity.clamp(0.0, 1.0)
        }
    }
}

impl Default for RenderConfiguration {
    fn default() -> Self {
        Self {
            image_path: default_image_path(),
            is_measuring: false,
            show_coverage: false,
            coverage_opacity: default_coverage_opacity(),
            sync_views: false,
        }
    }
}

fn default_image_path() -> String {
    "floorplan.png".to_string()
}

fn default_coverage_opacity() -> f32 {
    0.5
}

fn default_canvas_width() -> u32 {
    800
}

fn default_canvas_height() -> u32 {
    600
}

/// Application settings persisted between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Canvas width in pixels
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,
    /// Canvas height in pixels
    #[serde(default = "default_canvas_height")]
    pub canvas_height: u32,
    /// Font overriding the bundled one for room names and distance labels
    #[serde(default)]
    pub font_path: Option<PathBuf>,
    /// Initial render configuration
    #[serde(default)]
    pub render: RenderConfiguration,
}

impl AppConfig {
    /// Directory name under the user config dir
    pub const ID: &'static str = "floorplan-canvas";

    /// Default config file location
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&data).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Save configuration to the default location
    pub fn save(&self) {
        let Some(path) = Self::path() else {
            log::error!("No config directory available for saving");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            // Matches the canvas element of the web viewer
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            font_path: None,
            render: RenderConfiguration::default(),
        }
    }
}
