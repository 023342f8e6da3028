//! Application error types.

use std::fmt;

use crate::config::ConfigError;
use crate::fetch::FetchError;
use crate::lifecycle::LifecycleError;

/// Errors that can occur while bringing the application up.
#[derive(Debug)]
pub enum AppError {
    /// Configuration could not be loaded.
    Config(ConfigError),

    /// The network transport could not be built.
    Transport(FetchError),

    /// Install or activation failed.
    Lifecycle(LifecycleError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::Transport(e) => write!(f, "Failed to create network transport: {}", e),
            AppError::Lifecycle(e) => write!(f, "Worker failed to start: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(e) => Some(e),
            AppError::Transport(e) => Some(e),
            AppError::Lifecycle(e) => Some(e),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        AppError::Transport(e)
    }
}

impl From<LifecycleError> for AppError {
    fn from(e: LifecycleError) -> Self {
        AppError::Lifecycle(e)
    }
}
