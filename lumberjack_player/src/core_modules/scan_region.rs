// THEORY:
// A trunk enters the play area as a solid block of wood-colored pixels near the
// left or right edge. A `ScanRegion` describes one of those two narrow bands and
// how coarsely to sample it. The stride trades accuracy for speed: a trunk is many
// pixels wide, so visiting every fifth pixel in each direction still sees it.
//
// The walk order is part of the contract: columns outer, rows inner, both starting
// at the region origin. The first match in that order is the coordinate reported
// in FOUND traces.

use crate::core_modules::geometry::Point;

/// A horizontal side of the play area. Used both for where an obstacle was seen
/// and for which way the character moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => f.write_str("LEFT"),
            Side::Right => f.write_str("RIGHT"),
        }
    }
}

/// A named rectangle, relative to the frame origin, plus its sampling stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanRegion {
    pub side: Side,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Distance in pixels between neighbouring sample points, on both axes.
    pub stride: u32,
}

impl ScanRegion {
    pub const DEFAULT_HEIGHT: u32 = 120;
    pub const DEFAULT_STRIDE: u32 = 5;

    /// The band along the left edge of the default capture rectangle.
    pub const LEFT: ScanRegion = ScanRegion {
        side: Side::Left,
        x: 0,
        y: 0,
        width: 20,
        height: Self::DEFAULT_HEIGHT,
        stride: Self::DEFAULT_STRIDE,
    };

    /// The band along the right edge of the default capture rectangle.
    pub const RIGHT: ScanRegion = ScanRegion {
        side: Side::Right,
        x: 105,
        y: 0,
        width: 20,
        height: Self::DEFAULT_HEIGHT,
        stride: Self::DEFAULT_STRIDE,
    };

    /// Exclusive right edge.
    pub fn right_edge(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom_edge(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// The grid points visited by a scan, columns outer and rows inner.
    /// A zero stride yields nothing instead of looping forever.
    pub fn sample_points(&self) -> impl Iterator<Item = Point> + use<> {
        let stride = self.stride as usize;
        let (x0, x1, y0, y1) = (self.x, self.right_edge(), self.y, self.bottom_edge());
        let step = stride.max(1);
        let columns = if stride == 0 { 0..0 } else { x0..x1 };
        columns
            .step_by(step)
            .flat_map(move |x| (y0..y1).step_by(step).map(move |y| Point::new(x, y)))
    }

    /// True when the two bands share at least one column.
    pub fn overlaps_horizontally(&self, other: &ScanRegion) -> bool {
        self.x < other.right_edge() && other.x < self.right_edge()
    }
}
