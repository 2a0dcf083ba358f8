//! Two-point measurement session
//!
//! A session holds at most two canvas points. The first click arms it, the
//! second completes it, and any further click starts over from that point.

use super::geometry::Point2D;

/// Meters per pixel assumed once a floorplan image has loaded.
///
/// This is a fixed assumption about the source images, not read from image
/// metadata or calibrated.
pub const IMAGE_METERS_PER_PIXEL: f32 = 0.1;

/// Meters per pixel before any image has loaded (fallback schematic)
pub const DEFAULT_METERS_PER_PIXEL: f32 = 1.0;

/// Observable phase of a measurement session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasureState {
    Idle,
    Armed,
    Complete,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum MeasurementSession {
    #[default]
    Idle,
    Armed(Point2D),
    Complete(Point2D, Point2D),
}

impl MeasurementSession {
    pub fn state(&self) -> MeasureState {
        match self {
            MeasurementSession::Idle => MeasureState::Idle,
            MeasurementSession::Armed(_) => MeasureState::Armed,
            MeasurementSession::Complete(..) => MeasureState::Complete,
        }
    }

    /// Record a click, returning the point pair when it completes a measurement
    pub fn click(&mut self, point: Point2D) -> Option<(Point2D, Point2D)> {
        match *self {
            MeasurementSession::Armed(first) => {
                *self = MeasurementSession::Complete(first, point);
                Some((first, point))
            }
            MeasurementSession::Idle | MeasurementSession::Complete(..) => {
                *self = MeasurementSession::Armed(point);
                None
            }
        }
    }

    pub fn reset(&mut self) {
        *self = MeasurementSession::Idle;
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, MeasurementSession::Idle)
    }

    /// Points placed so far, in click order
    pub fn points(&self) -> Vec<Point2D> {
        match *self {
            MeasurementSession::Idle => Vec::new(),
            MeasurementSession::Armed(p) => vec![p],
            MeasurementSession::Complete(a, b) => vec![a, b],
        }
    }

    pub fn pair(&self) -> Option<(Point2D, Point2D)> {
        match *self {
            MeasurementSession::Complete(a, b) => Some((a, b)),
            _ => None,
        }
    }

    /// Distance in meters, defined only for a complete session
    pub fn distance(&self, meters_per_pixel: f32) -> Option<f32> {
        self.pair().map(|(a, b)| distance_meters(a, b, meters_per_pixel))
    }
}

/// Pixel distance scaled to meters and rounded to one decimal
pub fn distance_meters(a: Point2D, b: Point2D, meters_per_pixel: f32) -> f32 {
    round_to_tenth(a.distance_to(b) * meters_per_pixel)
}

#[inline]
pub fn round_to_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Label shown next to a completed measurement
pub fn format_distance(meters: f32) -> String {
    format!("{meters:.1}m")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_clicks_complete_measurement() {
        let mut session = MeasurementSession::default();
        assert_eq!(session.state(), MeasureState::Idle);

        assert_eq!(session.click(Point2D::new(100.0, 100.0)), None);
        assert_eq!(session.state(), MeasureState::Armed);
        assert_eq!(session.distance(0.1), None);

        let pair = session.click(Point2D::new(100.0, 350.0));
        assert_eq!(pair, Some((Point2D::new(100.0, 100.0), Point2D::new(100.0, 350.0))));
        assert_eq!(session.state(), MeasureState::Complete);
        assert_eq!(session.distance(IMAGE_METERS_PER_PIXEL), Some(25.0));
    }

    #[test]
    fn test_third_click_starts_new_session() {
        let mut session = MeasurementSession::default();
        session.click(Point2D::new(1.0, 1.0));
        session.click(Point2D::new(2.0, 2.0));
        session.click(Point2D::new(3.0, 3.0));

        assert_eq!(session.state(), MeasureState::Armed);
        assert_eq!(session.points(), vec![Point2D::new(3.0, 3.0)]);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut session = MeasurementSession::default();
        session.click(Point2D::new(1.0, 1.0));
        session.reset();
        assert!(session.is_empty());
        assert!(session.points().is_empty());
    }

    #[test]
    fn test_distance_rounds_to_one_decimal() {
        let d = distance_meters(Point2D::new(0.0, 0.0), Point2D::new(3.0, 4.0), 0.123);
        assert_eq!(d, 0.6);
        assert_eq!(format_distance(25.0), "25.0m");
        assert_eq!(format_distance(round_to_tenth(1.26)), "1.3m");
    }
}
