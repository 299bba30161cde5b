//! Command-line front end support: configuration, log setup, the saved
//! question cursor and text rendering.

pub mod config;
pub mod cursor;
pub mod logging;
pub mod render;

pub use config::{Config, ConfigError, LogFormat, LoggingConfig, StoreConfig};
pub use logging::{LoggingError, init as init_logging};
