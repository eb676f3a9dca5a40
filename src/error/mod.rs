use crate::config::ConfigError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

/// Failures that stop a run. Clipboard and browser failures are reported as
/// action outcomes instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("option {index} does not exist ({available} configured)")]
    UnknownOption { index: usize, available: usize },
    #[error("failed to read selection from stdin: {0}")]
    Input(#[source] std::io::Error),
}
