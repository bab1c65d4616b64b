use crate::core_modules::color::Color;
use crate::core_modules::geometry::ScreenRect;
use crate::core_modules::pacer::frame_interval_millis;
use crate::core_modules::scan_region::{ScanRegion, Side};
use crate::core_modules::trace_writer::DEFAULT_TRACE_DIR;
use crate::error::{PlayerError, Result};
use std::path::PathBuf;

/// Where the play area sits on a 1920x1080 desktop with the game window centered.
pub const DEFAULT_CAPTURE_AREA: ScreenRect = ScreenRect::new(890, 310, 145, ScanRegion::DEFAULT_HEIGHT);
pub const DEFAULT_ITERATIONS: u64 = 10_000;
pub const DEFAULT_FPS: f64 = 10.0;

/// Configuration for the `PlayerLoop`. Geometry and color default to values
/// tuned for the lumberjack game; everything can be overridden for other
/// window placements or synthetic test scenes.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Absolute screen rectangle of the play area.
    pub capture_area: ScreenRect,
    /// Band along the left edge, relative to the capture area.
    pub left_region: ScanRegion,
    /// Band along the right edge, relative to the capture area.
    pub right_region: ScanRegion,
    /// Color of an obstacle.
    pub target_color: Color,
    /// Target iterations per second.
    pub fps: f64,
    /// Milliseconds to wait after reversing direction. Zero disables damping.
    pub nap_if_change_direction: u64,
    /// Persist every frame (and every match) under `trace_dir`.
    pub log_images: bool,
    pub trace_dir: PathBuf,
    /// Number of iterations to run. Zero runs until the process is stopped.
    pub iterations: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            capture_area: DEFAULT_CAPTURE_AREA,
            left_region: ScanRegion::LEFT,
            right_region: ScanRegion::RIGHT,
            target_color: Color::WOOD,
            fps: DEFAULT_FPS,
            nap_if_change_direction: 0,
            log_images: false,
            trace_dir: PathBuf::from(DEFAULT_TRACE_DIR),
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<()> {
        frame_interval_millis(self.fps)?;

        if self.capture_area.width == 0 || self.capture_area.height == 0 {
            return Err(PlayerError::Config(format!(
                "capture area {} is empty",
                self.capture_area
            )));
        }

        for (expected, region) in [(Side::Left, &self.left_region), (Side::Right, &self.right_region)] {
            if region.side != expected {
                return Err(PlayerError::Config(format!(
                    "{expected} scan region is labelled {}",
                    region.side
                )));
            }
            if region.stride == 0 {
                return Err(PlayerError::Config(format!(
                    "{expected} scan region has a zero stride"
                )));
            }
            if region.width == 0 || region.height == 0 {
                return Err(PlayerError::Config(format!(
                    "{expected} scan region is empty"
                )));
            }
            if region.right_edge() > self.capture_area.width
                || region.bottom_edge() > self.capture_area.height
            {
                return Err(PlayerError::Config(format!(
                    "{expected} scan region {}x{}@({}, {}) falls outside the {}x{} capture area",
                    region.width,
                    region.height,
                    region.x,
                    region.y,
                    self.capture_area.width,
                    self.capture_area.height
                )));
            }
        }

        if self.left_region.overlaps_horizontally(&self.right_region) {
            return Err(PlayerError::Config(
                "left and right scan regions overlap".to_string(),
            ));
        }

        Ok(())
    }
}
