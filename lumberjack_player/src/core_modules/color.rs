// THEORY:
// `Color` is the smallest unit the player reasons about. It is a "dumb" data
// container for one RGB sample, with no alpha: the game renders flat, opaque
// sprites, so transparency carries no information once a frame has been captured.
//
// The same type plays two roles:
// 1.  **Sample**: the value read back from a captured `Frame` at one grid point.
// 2.  **Reference**: the fixed obstacle color (the wood of a tree trunk) that
//     samples are compared against.
//
// Comparison is exact per-channel equality (`PartialEq`). The game draws without
// anti-aliasing, so a tolerance would only add false positives at sprite edges.

use image::Rgb;

pub type Channel = u8;

/// A single opaque RGB sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// The red channel value (0-255).
    pub red: Channel,
    /// The green channel value (0-255).
    pub green: Channel,
    /// The blue channel value (0-255).
    pub blue: Channel,
}

impl Color {
    /// The trunk color of the lumberjack game.
    pub const WOOD: Color = Color::new(161, 116, 56);

    pub const fn new(red: Channel, green: Channel, blue: Channel) -> Self {
        Color { red, green, blue }
    }
}

impl From<Rgb<u8>> for Color {
    fn from(pixel: Rgb<u8>) -> Self {
        let [red, green, blue] = pixel.0;
        Color { red, green, blue }
    }
}

impl From<Color> for Rgb<u8> {
    fn from(color: Color) -> Self {
        Rgb([color.red, color.green, color.blue])
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.red, self.green, self.blue)
    }
}
