use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LoggingError;

/// Everything that can stop the binary before or during the game loop.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Logging(#[from] LoggingError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}
