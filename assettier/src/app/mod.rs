//! Application bootstrap: configuration, classification and worker start.

mod bootstrap;
mod config;
mod error;

pub use bootstrap::AssetApp;
pub use config::AppConfig;
pub use error::AppError;
