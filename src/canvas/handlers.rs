//! Canvas message handlers
//!
//! Handles CanvasMsg: configuration changes, pointer input and asset progress.

use super::{AssetState, FloorplanCanvas};
use crate::asset::AssetMsg;
use crate::config::RenderConfiguration;
use crate::domain::IMAGE_METERS_PER_PIXEL;
use crate::render::image::pixmap_from_image;
use crate::session::{CanvasEvent, CanvasMsg, PointerInput};

/// Handle a CanvasMsg, returning the event to report to the caller
pub fn handle_canvas_msg(canvas: &mut FloorplanCanvas, msg: CanvasMsg) -> Option<CanvasEvent> {
    match msg {
        CanvasMsg::Configure(config) => handle_configure(canvas, config),
        CanvasMsg::Click(input) => handle_click(canvas, input),
        CanvasMsg::PointerMove(input) => handle_pointer_move(canvas, input),
        CanvasMsg::Asset(msg) => {
            handle_asset(canvas, msg);
            None
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

fn handle_configure(canvas: &mut FloorplanCanvas, config: RenderConfiguration) -> Option<CanvasEvent> {
    let path_changed = config.image_path != canvas.config.image_path;
    let measuring_stopped = canvas.config.is_measuring && !config.is_measuring;
    canvas.config = config;

    if path_changed {
        canvas.request_asset();
    }

    let event = if measuring_stopped {
        log::debug!("Measuring disabled, clearing session");
        canvas.session.reset();
        Some(CanvasEvent::MeasurementCleared)
    } else {
        None
    };

    canvas.redraw();
    event
}

// ============================================================================
// Pointer input
// ============================================================================

fn handle_click(canvas: &mut FloorplanCanvas, input: PointerInput) -> Option<CanvasEvent> {
    if !canvas.config.is_measuring {
        return None;
    }
    let point = input.display.to_canvas(
        input.client_x,
        input.client_y,
        canvas.pixmap.width(),
        canvas.pixmap.height(),
    )?;

    let completed = canvas.session.click(point);
    canvas.redraw();

    let (a, b) = completed?;
    let distance_m = canvas.session.distance(canvas.meters_per_pixel)?;
    log::debug!("Measured {:.1}m between {:?} and {:?}", distance_m, a, b);
    Some(CanvasEvent::Measured {
        points: [a, b],
        distance_m,
    })
}

fn handle_pointer_move(canvas: &mut FloorplanCanvas, input: PointerInput) -> Option<CanvasEvent> {
    if !canvas.config.sync_views {
        return None;
    }
    let (x_percent, y_percent) = input.display.to_percent(input.client_x, input.client_y)?;
    Some(CanvasEvent::Hover {
        x_percent,
        y_percent,
    })
}

// ============================================================================
// Asset progress
// ============================================================================

fn handle_asset(canvas: &mut FloorplanCanvas, msg: AssetMsg) {
    if msg.generation() != canvas.generation {
        log::debug!(
            "Ignoring stale floorplan result (generation {}, current {})",
            msg.generation(),
            canvas.generation
        );
        return;
    }

    match msg {
        AssetMsg::Probed { outcome, .. } => {
            if !matches!(canvas.asset, AssetState::Probing) {
                return;
            }
            canvas.asset = match outcome {
                Ok(()) => AssetState::Decoding,
                Err(failure) => {
                    log::warn!("{failure}, using demo floorplan");
                    AssetState::Fallback
                }
            };
        }
        AssetMsg::Loaded { outcome, .. } => {
            if !matches!(canvas.asset, AssetState::Decoding) {
                return;
            }
            canvas.asset = match outcome.map(|img| pixmap_from_image(&img)) {
                Ok(Some(image)) => {
                    canvas.meters_per_pixel = IMAGE_METERS_PER_PIXEL;
                    AssetState::Ready(image)
                }
                Ok(None) => {
                    log::warn!("Floorplan image is empty, using demo floorplan");
                    AssetState::Fallback
                }
                Err(failure) => {
                    log::warn!("{failure}, using demo floorplan");
                    AssetState::Fallback
                }
            };
        }
    }

    canvas.redraw();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetFailure;
    use crate::canvas::{FALLBACK_BADGE, LOADING_TEXT};
    use crate::domain::{DisplayRect, MeasureState, Point2D};
    use image::RgbaImage;

    const W: u32 = 800;
    const H: u32 = 600;

    fn display() -> DisplayRect {
        DisplayRect::new(0.0, 0.0, W as f32, H as f32)
    }

    fn click(x: f32, y: f32) -> CanvasMsg {
        CanvasMsg::Click(PointerInput::new(x, y, display()))
    }

    fn moved(x: f32, y: f32) -> CanvasMsg {
        CanvasMsg::PointerMove(PointerInput::new(x, y, display()))
    }

    fn measuring_config() -> RenderConfiguration {
        RenderConfiguration {
            is_measuring: true,
            ..RenderConfiguration::new("plan.png")
        }
    }

    fn fallback_canvas(config: RenderConfiguration) -> FloorplanCanvas {
        let mut canvas = FloorplanCanvas::new(W, H, config).unwrap();
        let request = canvas.take_request().unwrap();
        canvas.handle(CanvasMsg::Asset(AssetMsg::Probed {
            generation: request.generation,
            outcome: Err(AssetFailure::NotFound(request.path)),
        }));
        canvas
    }

    fn loaded_canvas(config: RenderConfiguration) -> FloorplanCanvas {
        let mut canvas = FloorplanCanvas::new(W, H, config).unwrap();
        let generation = canvas.take_request().unwrap().generation;
        canvas.handle(CanvasMsg::Asset(AssetMsg::Probed {
            generation,
            outcome: Ok(()),
        }));
        canvas.handle(CanvasMsg::Asset(AssetMsg::Loaded {
            generation,
            outcome: Ok(RgbaImage::from_pixel(400, 400, image::Rgba([200, 200, 200, 255]))),
        }));
        canvas
    }

    #[test]
    fn test_new_canvas_is_loading_and_blank() {
        let mut canvas = FloorplanCanvas::new(W, H, RenderConfiguration::default()).unwrap();
        assert!(canvas.is_loading());
        assert_eq!(canvas.status_text(), Some(LOADING_TEXT));
        assert!(canvas.pixmap().data().iter().all(|&b| b == 0));

        let request = canvas.take_request().unwrap();
        assert_eq!(request.path, "floorplan.png");
        assert!(canvas.take_request().is_none());
    }

    #[test]
    fn test_missing_asset_shows_fallback() {
        let canvas = fallback_canvas(RenderConfiguration::default());
        assert!(canvas.is_fallback());
        assert_eq!(canvas.status_text(), Some(FALLBACK_BADGE));
        // background is opaque everywhere
        assert_eq!(canvas.pixmap().pixel(5, 5).unwrap().alpha(), 255);
    }

    #[test]
    fn test_fallback_render_is_repeatable() {
        let first = fallback_canvas(RenderConfiguration::default());
        let mut second = fallback_canvas(RenderConfiguration::default());
        second.redraw();
        assert_eq!(first.pixmap().data(), second.pixmap().data());
    }

    #[test]
    fn test_load_failure_falls_back() {
        let mut canvas = FloorplanCanvas::new(W, H, RenderConfiguration::default()).unwrap();
        let generation = canvas.take_request().unwrap().generation;
        canvas.handle(CanvasMsg::Asset(AssetMsg::Probed {
            generation,
            outcome: Ok(()),
        }));
        assert!(!canvas.is_loading());
        assert!(canvas.is_pending());

        canvas.handle(CanvasMsg::Asset(AssetMsg::Loaded {
            generation,
            outcome: Err(AssetFailure::LoadFailed {
                path: "floorplan.png".into(),
                reason: "decode".into(),
            }),
        }));
        assert!(canvas.is_fallback());
    }

    #[test]
    fn test_loaded_image_is_letterboxed() {
        let canvas = loaded_canvas(RenderConfiguration::default());
        assert!(matches!(canvas.asset_state(), AssetState::Ready(_)));
        assert_eq!(canvas.meters_per_pixel(), IMAGE_METERS_PER_PIXEL);

        // square image on a 4:3 canvas: 100px bars left and right
        assert_eq!(canvas.pixmap().pixel(50, 300).unwrap().alpha(), 0);
        assert_eq!(canvas.pixmap().pixel(400, 300).unwrap().red(), 200);
        assert_eq!(canvas.pixmap().pixel(750, 300).unwrap().alpha(), 0);
    }

    #[test]
    fn test_stale_results_are_ignored() {
        let mut canvas = FloorplanCanvas::new(W, H, RenderConfiguration::new("a.png")).unwrap();
        let old = canvas.take_request().unwrap();

        canvas.handle(CanvasMsg::Configure(RenderConfiguration::new("b.png")));
        let current = canvas.take_request().unwrap();
        assert!(current.generation > old.generation);
        assert_eq!(current.path, "b.png");

        canvas.handle(CanvasMsg::Asset(AssetMsg::Probed {
            generation: old.generation,
            outcome: Err(AssetFailure::NotFound(old.path)),
        }));
        assert!(canvas.is_loading());

        canvas.handle(CanvasMsg::Asset(AssetMsg::Probed {
            generation: current.generation,
            outcome: Err(AssetFailure::NotFound(current.path)),
        }));
        assert!(canvas.is_fallback());
    }

    #[test]
    fn test_same_path_does_not_restart_request() {
        let mut canvas = fallback_canvas(RenderConfiguration::default());
        let config = RenderConfiguration {
            show_coverage: true,
            ..RenderConfiguration::default()
        };
        canvas.handle(CanvasMsg::Configure(config));
        assert!(canvas.take_request().is_none());
        assert!(canvas.is_fallback());
    }

    #[test]
    fn test_measurement_on_loaded_image() {
        let mut canvas = loaded_canvas(measuring_config());

        assert_eq!(canvas.handle(click(100.0, 100.0)), None);
        assert_eq!(canvas.session().state(), MeasureState::Armed);

        let event = canvas.handle(click(100.0, 350.0));
        assert_eq!(
            event,
            Some(CanvasEvent::Measured {
                points: [Point2D::new(100.0, 100.0), Point2D::new(100.0, 350.0)],
                distance_m: 25.0,
            })
        );
        assert_eq!(canvas.session().state(), MeasureState::Complete);
    }

    #[test]
    fn test_fallback_measurement_draws_outlined_label() {
        let mut canvas = fallback_canvas(measuring_config());
        canvas.handle(click(200.0, 300.0));
        let event = canvas.handle(click(600.0, 300.0));
        assert!(matches!(event, Some(CanvasEvent::Measured { distance_m, .. }) if distance_m == 400.0));

        // label box around the midpoint lifted by 15px
        let (mut white, mut black) = (0, 0);
        for y in 275..295 {
            for x in 370..430 {
                let p = canvas.pixmap().pixel(x, y).unwrap();
                match (p.red(), p.green(), p.blue()) {
                    (255, 255, 255) => white += 1,
                    (0, 0, 0) => black += 1,
                    _ => {}
                }
            }
        }
        assert!(white > 0, "no label fill");
        assert!(black > 0, "no label outline");
    }

    #[test]
    fn test_third_click_rearms() {
        let mut canvas = fallback_canvas(measuring_config());
        canvas.handle(click(10.0, 10.0));
        canvas.handle(click(20.0, 20.0));
        assert_eq!(canvas.handle(click(30.0, 30.0)), None);

        assert_eq!(canvas.session().state(), MeasureState::Armed);
        assert_eq!(canvas.session().points(), vec![Point2D::new(30.0, 30.0)]);
    }

    #[test]
    fn test_clicks_ignored_when_not_measuring_or_outside() {
        let mut canvas = fallback_canvas(RenderConfiguration::default());
        canvas.handle(click(10.0, 10.0));
        assert!(canvas.session().is_empty());

        canvas.handle(CanvasMsg::Configure(measuring_config()));
        canvas.handle(click(-5.0, 10.0));
        assert!(canvas.session().is_empty());
    }

    #[test]
    fn test_click_scales_display_to_canvas() {
        let mut canvas = fallback_canvas(measuring_config());
        let half = DisplayRect::new(0.0, 0.0, W as f32 / 2.0, H as f32 / 2.0);
        canvas.handle(CanvasMsg::Click(PointerInput::new(50.0, 25.0, half)));
        assert_eq!(canvas.session().points(), vec![Point2D::new(100.0, 50.0)]);
    }

    #[test]
    fn test_disabling_measuring_resets_session() {
        for clicks in [1, 2] {
            let mut canvas = fallback_canvas(measuring_config());
            for i in 0..clicks {
                canvas.handle(click(10.0 + i as f32 * 50.0, 10.0));
            }

            let event = canvas.handle(CanvasMsg::Configure(RenderConfiguration::new("plan.png")));
            assert_eq!(event, Some(CanvasEvent::MeasurementCleared));
            assert_eq!(canvas.session().state(), MeasureState::Idle);
        }
    }

    #[test]
    fn test_hover_relay_gated_by_sync() {
        let mut canvas = fallback_canvas(RenderConfiguration::default());
        assert_eq!(canvas.handle(moved(400.0, 300.0)), None);

        canvas.handle(CanvasMsg::Configure(RenderConfiguration {
            sync_views: true,
            ..RenderConfiguration::default()
        }));
        assert_eq!(
            canvas.handle(moved(400.0, 150.0)),
            Some(CanvasEvent::Hover {
                x_percent: 50.0,
                y_percent: 25.0
            })
        );
        assert_eq!(
            canvas.handle(moved(900.0, -20.0)),
            Some(CanvasEvent::Hover {
                x_percent: 100.0,
                y_percent: 0.0
            })
        );
    }

    #[test]
    fn test_zero_opacity_matches_hidden_coverage() {
        let hidden = fallback_canvas(RenderConfiguration::default());
        let transparent = fallback_canvas(RenderConfiguration {
            show_coverage: true,
            coverage_opacity: 0.0,
            ..RenderConfiguration::default()
        });
        assert_eq!(hidden.pixmap().data(), transparent.pixmap().data());

        let visible = fallback_canvas(RenderConfiguration {
            show_coverage: true,
            coverage_opacity: 1.0,
            ..RenderConfiguration::default()
        });
        assert_ne!(hidden.pixmap().data(), visible.pixmap().data());
    }
}
