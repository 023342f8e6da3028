//! User configuration loaded from `~/.assettier/config.ini`.
//!
//! ```ini
//! [cache]
//! backend = disk
//! memory_size = 512MB
//!
//! [manifest]
//! paths = /, /index.html, /main.css
//! ```

mod file;
mod parser;
mod size;

pub use file::{
    config_directory, config_file_path, CacheBackend, CacheSettings, ConfigError, ConfigFile,
    DeliverySettings, ManifestSettings, NetworkSettings, DEFAULT_ORIGIN,
};
pub use size::{format_size, parse_size, SizeParseError};
