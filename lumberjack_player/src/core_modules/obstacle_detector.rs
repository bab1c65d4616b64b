// THEORY:
// The `ObstacleDetector` turns a frame into two yes/no signals: is there wood in
// the left band, is there wood in the right band. It never looks outside the two
// bands and never inspects more than the stride grid inside them.
//
// Key properties:
// 1.  **Exact match**: a sample counts only if every channel equals the target.
// 2.  **Short-circuit**: the walk stops at the first match, so a trunk near the
//     top-left of a band costs a single read.
// 3.  **Pure**: detection has no side effects. Tracing a match to disk is the
//     loop's job; the detector only reports where the match was.

use crate::core_modules::color::Color;
use crate::core_modules::frame::Frame;
use crate::core_modules::geometry::Point;
use crate::core_modules::scan_region::{ScanRegion, Side};

/// The per-side outcome of one detection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Detection {
    /// First matching coordinate in the left band, if any.
    pub left: Option<Point>,
    /// First matching coordinate in the right band, if any.
    pub right: Option<Point>,
}

impl Detection {
    pub fn obstacle_left(&self) -> bool {
        self.left.is_some()
    }

    pub fn obstacle_right(&self) -> bool {
        self.right.is_some()
    }

    pub fn on(&self, side: Side) -> Option<Point> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Scans the two fixed bands of every frame for the obstacle color.
#[derive(Debug, Clone)]
pub struct ObstacleDetector {
    left: ScanRegion,
    right: ScanRegion,
    target: Color,
}

impl ObstacleDetector {
    pub fn new(left: ScanRegion, right: ScanRegion, target: Color) -> Self {
        Self {
            left,
            right,
            target,
        }
    }

    pub fn target(&self) -> Color {
        self.target
    }

    pub fn region(&self, side: Side) -> &ScanRegion {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Runs both scans. Each band is scanned independently; a match on the left
    /// does not skip the right.
    pub fn detect(&self, frame: &Frame) -> Detection {
        Detection {
            left: find(frame, &self.left, self.target),
            right: find(frame, &self.right, self.target),
        }
    }
}

/// Returns the first sample point in `region` whose color equals `target`.
/// Points outside the frame never match.
pub fn find(frame: &Frame, region: &ScanRegion, target: Color) -> Option<Point> {
    region
        .sample_points()
        .find(|&point| frame.color_at(point) == Some(target))
}

/// True when any sample point in `region` equals `target`.
pub fn scan(frame: &Frame, region: &ScanRegion, target: Color) -> bool {
    find(frame, region, target).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKGROUND: Color = Color::new(90, 180, 240);

    fn detector() -> ObstacleDetector {
        ObstacleDetector::new(ScanRegion::LEFT, ScanRegion::RIGHT, Color::WOOD)
    }

    fn blank() -> Frame {
        Frame::filled(145, 120, BACKGROUND)
    }

    #[test]
    fn empty_scene_reports_nothing() {
        assert_eq!(detector().detect(&blank()), Detection::default());
    }

    #[test]
    fn finds_wood_on_a_sample_point() {
        let frame = blank().with_pixel(Point::new(5, 60), Color::WOOD);
        let detection = detector().detect(&frame);
        assert_eq!(detection.left, Some(Point::new(5, 60)));
        assert_eq!(detection.right, None);
    }

    #[test]
    fn ignores_wood_between_sample_points() {
        let frame = blank().with_pixel(Point::new(6, 61), Color::WOOD);
        assert!(!scan(&frame, &ScanRegion::LEFT, Color::WOOD));
    }

    #[test]
    fn near_miss_colors_do_not_match() {
        let frame = blank().with_pixel(Point::new(110, 0), Color::new(161, 116, 55));
        assert!(!scan(&frame, &ScanRegion::RIGHT, Color::WOOD));
    }

    #[test]
    fn reports_first_match_in_walk_order() {
        let frame = blank()
            .with_pixel(Point::new(110, 5), Color::WOOD)
            .with_pixel(Point::new(105, 100), Color::WOOD);
        assert_eq!(
            find(&frame, &ScanRegion::RIGHT, Color::WOOD),
            Some(Point::new(105, 100))
        );
    }

    #[test]
    fn both_bands_are_scanned_independently() {
        let frame = blank()
            .with_pixel(Point::new(0, 0), Color::WOOD)
            .with_pixel(Point::new(120, 115), Color::WOOD);
        let detection = detector().detect(&frame);
        assert!(detection.obstacle_left());
        assert_eq!(detection.on(Side::Right), Some(Point::new(120, 115)));
    }

    #[test]
    fn region_past_the_frame_edge_does_not_panic() {
        let frame = Frame::filled(10, 10, Color::WOOD);
        assert_eq!(find(&frame, &ScanRegion::RIGHT, Color::WOOD), None);
    }
}
