use anyhow::{Context, Result};
use clap::Parser;
use lumberjack_player::config::{DEFAULT_CAPTURE_AREA, DEFAULT_ITERATIONS};
use lumberjack_player::core_modules::action_executor::EnigoKeyboard;
use lumberjack_player::core_modules::clock::{Clock, SystemClock};
use lumberjack_player::core_modules::frame_sampler::XcapScreen;
use lumberjack_player::core_modules::geometry::ScreenRect;
use lumberjack_player::core_modules::trace_writer::DEFAULT_TRACE_DIR;
use lumberjack_player::{PlayerConfig, PlayerLoop};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lumberjack_player")]
#[command(about = "Plays the lumberjack game by watching the screen and tapping the arrow keys")]
struct Cli {
    /// Target iterations per second
    #[arg(long)]
    fps: f64,
    /// Milliseconds to wait after reversing direction (0 disables)
    #[arg(long = "nap-if-change", default_value_t = 0)]
    nap_if_change: u64,
    /// Save every captured frame, and every obstacle match, as PNG
    #[arg(long)]
    log_images: bool,
    /// Directory for saved frames
    #[arg(long, default_value = DEFAULT_TRACE_DIR)]
    trace_dir: PathBuf,
    /// Iterations to run before exiting (0 runs until killed)
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: u64,
    /// Screen x of the play area's top-left corner
    #[arg(long, default_value_t = DEFAULT_CAPTURE_AREA.x, allow_hyphen_values = true)]
    capture_x: i32,
    /// Screen y of the play area's top-left corner
    #[arg(long, default_value_t = DEFAULT_CAPTURE_AREA.y, allow_hyphen_values = true)]
    capture_y: i32,
    /// Grace period before the first capture, to focus the game window
    #[arg(long, default_value_t = 0)]
    start_delay_ms: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = PlayerConfig {
        capture_area: ScreenRect {
            x: cli.capture_x,
            y: cli.capture_y,
            ..DEFAULT_CAPTURE_AREA
        },
        fps: cli.fps,
        nap_if_change_direction: cli.nap_if_change,
        log_images: cli.log_images,
        trace_dir: cli.trace_dir,
        iterations: cli.iterations,
        ..PlayerConfig::default()
    };
    config.validate().context("rejected command line")?;

    let clock = SystemClock::new();
    if cli.start_delay_ms > 0 {
        info!(delay_ms = cli.start_delay_ms, "waiting before first capture");
        clock.sleep(cli.start_delay_ms);
    }

    let screen = XcapScreen::for_area(config.capture_area).context("opening the display")?;
    let keys = EnigoKeyboard::new().context("opening the keyboard")?;
    let mut player = PlayerLoop::new(&config, screen, keys, clock)
        .context("building the player loop")?;

    let summary = player.run().context("player loop aborted")?;
    println!(
        "Played {} frames: {} left, {} right, {} continue, {} reversals",
        summary.iterations,
        summary.moves_left,
        summary.moves_right,
        summary.continues,
        summary.reversals
    );
    Ok(())
}
