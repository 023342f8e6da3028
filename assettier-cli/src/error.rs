//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and exit codes.

use std::fmt;
use std::process;

use assettier::app::AppError;
use assettier::cache::CacheError;
use assettier::config::ConfigError;
use assettier::fetch::FetchError;
use assettier::lifecycle::LifecycleError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be loaded
    Config(ConfigError),
    /// Failed to create the Tokio runtime
    Runtime(String),
    /// Application failed to start
    App(AppError),
    /// A worker operation failed after startup
    Lifecycle(LifecycleError),
    /// Cache backend failure
    Cache(CacheError),
    /// A URL argument could not be parsed
    InvalidUrl(FetchError),
    /// Command output could not be encoded
    Output(serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) | CliError::InvalidUrl(_) => 2,
            CliError::App(AppError::Lifecycle(_)) | CliError::Lifecycle(_) => 3,
            _ => 1,
        }
    }

    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::App(AppError::Lifecycle(LifecycleError::ManifestPopulation { .. })) => {
                eprintln!();
                eprintln!("Every manifest entry must be reachable for install to succeed.");
                eprintln!("Check that:");
                eprintln!("  1. The origin in [delivery] origin is serving the app");
                eprintln!("  2. Every path in [manifest] paths exists on that origin");
            }
            CliError::Config(_) => {
                eprintln!();
                eprintln!(
                    "Config file: {}",
                    assettier::config::config_file_path().display()
                );
            }
            _ => {}
        }

        process::exit(self.exit_code())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "{}", e),
            CliError::Runtime(msg) => write!(f, "Failed to create Tokio runtime: {}", msg),
            CliError::App(e) => write!(f, "{}", e),
            CliError::Lifecycle(e) => write!(f, "{}", e),
            CliError::Cache(e) => write!(f, "Cache error: {}", e),
            CliError::InvalidUrl(e) => write!(f, "{}", e),
            CliError::Output(e) => write!(f, "Failed to encode output: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::App(e) => Some(e),
            CliError::Lifecycle(e) => Some(e),
            CliError::Cache(e) => Some(e),
            CliError::InvalidUrl(e) => Some(e),
            CliError::Output(e) => Some(e),
            CliError::LoggingInit(_) | CliError::Runtime(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<AppError> for CliError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Config(e) => CliError::Config(e),
            e => CliError::App(e),
        }
    }
}

impl From<LifecycleError> for CliError {
    fn from(e: LifecycleError) -> Self {
        CliError::Lifecycle(e)
    }
}

impl From<CacheError> for CliError {
    fn from(e: CacheError) -> Self {
        CliError::Cache(e)
    }
}

impl From<FetchError> for CliError {
    fn from(e: FetchError) -> Self {
        CliError::InvalidUrl(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let invalid = CliError::from(FetchError::InvalidUrl {
            url: "::".to_string(),
            reason: "relative URL without a base".to_string(),
        });
        assert_eq!(invalid.exit_code(), 2);

        let install = CliError::from(AppError::from(LifecycleError::ManifestPopulation {
            store: "s".to_string(),
            url: "u".to_string(),
            reason: "HTTP 500".to_string(),
        }));
        assert_eq!(install.exit_code(), 3);

        assert_eq!(CliError::Runtime("x".to_string()).exit_code(), 1);
    }

    #[test]
    fn test_app_config_error_keeps_config_exit_code() {
        let err = CliError::from(AppError::from(ConfigError::InvalidValue {
            section: "network".to_string(),
            key: "timeout_secs".to_string(),
            value: "0".to_string(),
            reason: "must be greater than 0".to_string(),
        }));
        assert!(matches!(err, CliError::Config(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_output_error_exits_nonzero() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CliError::from(json_err);
        assert!(err.to_string().starts_with("Failed to encode output"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_display() {
        let err = CliError::LoggingInit("permission denied".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to initialize logging: permission denied"
        );
    }
}
