// THEORY:
// A `Frame` is one captured snapshot of the play area. It is created once per
// iteration by the sampler, read by the detector, optionally written to disk by
// the trace writer, and then dropped. Nothing mutates it after construction, so
// the type only hands out shared access to its pixels.

use crate::core_modules::color::Color;
use crate::core_modules::geometry::Point;
use image::RgbImage;

/// An immutable grid of RGB samples covering the capture rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    image: RgbImage,
}

impl Frame {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    /// Builds a frame filled with a single color. Mostly useful for synthetic
    /// test scenes and the frame inspector.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self::new(RgbImage::from_pixel(width, height, color.into()))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The sample at `point`, or `None` when the point lies outside the frame.
    pub fn color_at(&self, point: Point) -> Option<Color> {
        self.image
            .get_pixel_checked(point.x, point.y)
            .map(|pixel| Color::from(*pixel))
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Returns a copy of this frame with one pixel recolored. Test scenes are
    /// built this way so the frame itself never needs a mutable API.
    pub fn with_pixel(&self, point: Point, color: Color) -> Self {
        let mut image = self.image.clone();
        if let Some(pixel) = image.get_pixel_mut_checked(point.x, point.y) {
            *pixel = color.into();
        }
        Self::new(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_are_none() {
        let frame = Frame::filled(4, 3, Color::new(9, 9, 9));
        assert_eq!(frame.color_at(Point::new(3, 2)), Some(Color::new(9, 9, 9)));
        assert_eq!(frame.color_at(Point::new(4, 0)), None);
        assert_eq!(frame.color_at(Point::new(0, 3)), None);
    }

    #[test]
    fn with_pixel_leaves_original_untouched() {
        let frame = Frame::filled(2, 2, Color::default());
        let painted = frame.with_pixel(Point::new(1, 1), Color::WOOD);
        assert_eq!(painted.color_at(Point::new(1, 1)), Some(Color::WOOD));
        assert_eq!(frame.color_at(Point::new(1, 1)), Some(Color::default()));
    }
}
