// THEORY:
// The `FrameSampler` is the player's only view of the game. Once per iteration it
// reads a fixed rectangle of the screen and hands back a fully materialized
// `Frame`. The platform capture lives behind the `ScreenSource` trait so that the
// loop can be driven by scripted frames in tests and by `xcap` in real runs.
//
// Capture is fatal on failure. There is no retry: without a display every later
// decision would be made blind.

use crate::core_modules::frame::Frame;
use crate::core_modules::geometry::ScreenRect;
use crate::error::{PlayerError, Result};
use image::{DynamicImage, imageops};
use tracing::debug;
use xcap::Monitor;

/// Something that can read a rectangle of the screen.
pub trait ScreenSource {
    fn capture(&mut self, area: ScreenRect) -> Result<Frame>;
}

impl<S: ScreenSource + ?Sized> ScreenSource for &mut S {
    fn capture(&mut self, area: ScreenRect) -> Result<Frame> {
        (**self).capture(area)
    }
}

/// Screen capture through `xcap`, bound to the monitor that contains the
/// top-left corner of the play area.
///
/// Every capture grabs the whole monitor and crops the play area out of it, so
/// the cost per frame scales with the monitor resolution rather than the play
/// area. Capture coordinates are taken in the screenshot's pixel space. On a
/// HiDPI display with scaling, logical screen coordinates must be converted by
/// the caller; no scale factor is applied here.
pub struct XcapScreen {
    monitor: Monitor,
}

impl XcapScreen {
    pub fn for_area(area: ScreenRect) -> Result<Self> {
        let monitor = Monitor::from_point(area.x, area.y).map_err(|err| {
            PlayerError::Capture(format!("no monitor contains {area}: {err}"))
        })?;
        debug!(
            monitor = monitor.name(),
            x = monitor.x(),
            y = monitor.y(),
            width = monitor.width(),
            height = monitor.height(),
            "bound capture monitor"
        );
        Ok(Self { monitor })
    }
}

impl ScreenSource for XcapScreen {
    fn capture(&mut self, area: ScreenRect) -> Result<Frame> {
        let screenshot = self
            .monitor
            .capture_image()
            .map_err(|err| PlayerError::Capture(err.to_string()))?;

        let offset_x = area.x - self.monitor.x();
        let offset_y = area.y - self.monitor.y();
        if offset_x < 0
            || offset_y < 0
            || offset_x as u64 + area.width as u64 > screenshot.width() as u64
            || offset_y as u64 + area.height as u64 > screenshot.height() as u64
        {
            return Err(PlayerError::Capture(format!(
                "{area} does not fit on monitor {}",
                self.monitor.name()
            )));
        }

        let cropped = imageops::crop_imm(
            &screenshot,
            offset_x as u32,
            offset_y as u32,
            area.width,
            area.height,
        )
        .to_image();
        Ok(Frame::new(DynamicImage::ImageRgba8(cropped).to_rgb8()))
    }
}

/// Captures the play area from a `ScreenSource`.
pub struct FrameSampler<S> {
    source: S,
    area: ScreenRect,
}

impl<S: ScreenSource> FrameSampler<S> {
    pub fn new(source: S, area: ScreenRect) -> Self {
        Self { source, area }
    }

    pub fn area(&self) -> ScreenRect {
        self.area
    }

    pub fn sample(&mut self) -> Result<Frame> {
        let frame = self.source.capture(self.area)?;
        if frame.width() != self.area.width || frame.height() != self.area.height {
            return Err(PlayerError::Capture(format!(
                "expected a {}x{} frame, got {}x{}",
                self.area.width,
                self.area.height,
                frame.width(),
                frame.height()
            )));
        }
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::color::Color;

    struct FixedScreen {
        frame: Frame,
        requested: Vec<ScreenRect>,
    }

    impl ScreenSource for FixedScreen {
        fn capture(&mut self, area: ScreenRect) -> Result<Frame> {
            self.requested.push(area);
            Ok(self.frame.clone())
        }
    }

    struct NoDisplay;

    impl ScreenSource for NoDisplay {
        fn capture(&mut self, _area: ScreenRect) -> Result<Frame> {
            Err(PlayerError::Capture("no display".into()))
        }
    }

    #[test]
    fn samples_the_configured_area() {
        let area = ScreenRect::new(890, 310, 145, 120);
        let mut screen = FixedScreen {
            frame: Frame::filled(145, 120, Color::WOOD),
            requested: Vec::new(),
        };
        let frame = FrameSampler::new(&mut screen, area).sample().unwrap();
        assert_eq!((frame.width(), frame.height()), (145, 120));
        assert_eq!(screen.requested, vec![area]);
    }

    #[test]
    fn wrong_sized_capture_is_an_error() {
        let mut screen = FixedScreen {
            frame: Frame::filled(10, 10, Color::WOOD),
            requested: Vec::new(),
        };
        let result = FrameSampler::new(&mut screen, ScreenRect::new(0, 0, 145, 120)).sample();
        assert!(matches!(result, Err(PlayerError::Capture(_))));
    }

    #[test]
    fn capture_failure_propagates() {
        let result = FrameSampler::new(NoDisplay, ScreenRect::new(0, 0, 1, 1)).sample();
        assert!(matches!(result, Err(PlayerError::Capture(_))));
    }
}
