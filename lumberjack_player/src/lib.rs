// THEORY:
// `lumberjack_player` is a perception-decision-action loop for a side-scrolling
// lumberjack game. Every iteration it captures the play area, looks for trunk
// wood in two narrow bands at the left and right edges, decides which way to
// move, taps an arrow key and waits for the next frame.
//
// The crate exposes `PlayerLoop` and `PlayerConfig` as the high-level entry
// points. The building blocks in `core_modules` are public so that tools such as
// the frame inspector can reuse the detector and planner on saved frames.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod player_loop;

pub use config::PlayerConfig;
pub use error::{PlayerError, Result};
pub use player_loop::{PlayerLoop, RunSummary, StepReport};
