use thiserror::Error;

/// Everything that can stop the player.
///
/// Capture and input failures are fatal: a loop that cannot see the screen or
/// cannot press keys has nothing useful left to do.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("screen capture failed: {0}")]
    Capture(String),
    #[error("key injection failed: {0}")]
    Input(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = PlayerError> = std::result::Result<T, E>;
