use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use tokio::sync::mpsc;

use floorplan_canvas::asset::{AnyProbe, AssetTask, ImageLoader};
use floorplan_canvas::canvas::FloorplanCanvas;
use floorplan_canvas::config::AppConfig;
use floorplan_canvas::domain::DisplayRect;
use floorplan_canvas::render::text::LabelFont;
use floorplan_canvas::session::{CanvasEvent, CanvasMsg, PointerInput};
use floorplan_canvas::sync::ViewSync;

#[derive(Parser, Debug)]
#[command(
    name = "floorplan-canvas",
    about = "Render a floorplan with camera coverage and measurements to PNG"
)]
struct Cli {
    /// Floorplan image path or URL
    #[arg(long)]
    image: Option<String>,
    /// Output PNG
    #[arg(long, default_value = "floorplan.out.png")]
    out: PathBuf,
    /// Config file (defaults to the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    /// Enable click-to-measure
    #[arg(long, default_value_t = false)]
    measure: bool,
    /// Draw the coverage overlay
    #[arg(long, default_value_t = false)]
    coverage: bool,
    /// Coverage overlay opacity (0.0-1.0)
    #[arg(long)]
    opacity: Option<f32>,
    /// Relay pointer moves to the 3D view
    #[arg(long, default_value_t = false)]
    sync: bool,
    /// Click at x,y (canvas pixels); repeatable
    #[arg(long = "click")]
    clicks: Vec<PointArg>,
    /// Pointer move to x,y (canvas pixels); repeatable
    #[arg(long = "hover")]
    hovers: Vec<PointArg>,
    /// Write the effective configuration back to the config file
    #[arg(long, default_value_t = false)]
    save_config: bool,
}

#[derive(Clone, Copy, Debug)]
struct PointArg {
    x: f32,
    y: f32,
}

impl FromStr for PointArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected x,y but got {s:?}"))?;
        let parse = |v: &str| v.trim().parse::<f32>().map_err(|e| format!("{v:?}: {e}"));
        Ok(Self {
            x: parse(x)?,
            y: parse(y)?,
        })
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };

    if let Some(image) = &cli.image {
        config.render.image_path = image.clone();
    }
    if let Some(width) = cli.width {
        config.canvas_width = width;
    }
    if let Some(height) = cli.height {
        config.canvas_height = height;
    }
    if let Some(opacity) = cli.opacity {
        config.render.coverage_opacity = opacity;
    }
    config.render.is_measuring |= cli.measure;
    config.render.show_coverage |= cli.coverage;
    config.render.sync_views |= cli.sync;
    Ok(config)
}

/// The configured label font, if one is set and readable
fn load_font(config: &AppConfig) -> Option<LabelFont> {
    let path = config.font_path.as_ref()?;
    match LabelFont::load(path) {
        Ok(font) => Some(font),
        Err(err) => {
            log::warn!("Using bundled label font: {:#}", err);
            None
        }
    }
}

fn report(event: &CanvasEvent, sync: &mut ViewSync) {
    match event {
        CanvasEvent::Measured { points, distance_m } => {
            log::info!(
                "Measured {:.1}m from ({:.0}, {:.0}) to ({:.0}, {:.0})",
                distance_m,
                points[0].x,
                points[0].y,
                points[1].x,
                points[1].y
            );
        }
        CanvasEvent::MeasurementCleared => log::info!("Measurement cleared"),
        CanvasEvent::Hover {
            x_percent,
            y_percent,
        } => log::info!("Hover at {:.1}% x {:.1}%", x_percent, y_percent),
    }
    sync.apply(event);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    if cli.save_config {
        match &cli.config {
            Some(path) => config.save_to(path)?,
            None => config.save(),
        }
    }

    let mut canvas = FloorplanCanvas::new(config.canvas_width, config.canvas_height, config.render.clone())?;
    if let Some(font) = load_font(&config) {
        canvas = canvas.with_font(font);
    }
    let mut sync = ViewSync::new(config.render.sync_views);

    let client = reqwest::Client::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut assets = AssetTask::new(AnyProbe::new(client.clone()), ImageLoader::new(client), tx);

    if let Some(request) = canvas.take_request() {
        assets.start(request);
    }
    while canvas.is_pending() {
        let msg = rx.recv().await.context("Asset task ended without a result")?;
        canvas.handle(CanvasMsg::Asset(msg));
    }
    if let Some(status) = canvas.status_text() {
        log::info!("{status}");
    }

    let display = DisplayRect::new(0.0, 0.0, canvas.width() as f32, canvas.height() as f32);
    for point in &cli.hovers {
        if let Some(event) = canvas.handle(CanvasMsg::PointerMove(PointerInput::new(point.x, point.y, display))) {
            report(&event, &mut sync);
        }
    }
    for point in &cli.clicks {
        if let Some(event) = canvas.handle(CanvasMsg::Click(PointerInput::new(point.x, point.y, display))) {
            report(&event, &mut sync);
        }
    }

    let pose = sync.pose();
    log::info!("3D camera at {:?} looking at {:?}", pose.position, pose.target);

    canvas.save_png(&cli.out)?;
    log::info!("Wrote {}", cli.out.display());
    Ok(())
}
